use std::net::SocketAddr;
use std::sync::Arc;
use lambda_http::{run, Error};
use book_management::catalog::controller::routes;
use book_management::catalog::factory;
use book_management::core::controller::AppState;
use book_management::core::domain::Configuration;
use book_management::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    let (config, rejected) = Configuration::from_env()?;
    setup_tracing(&config);
    for setting in rejected {
        tracing::warn!(setting = %setting, "ignoring invalid setting, keeping default");
    }

    let catalog_service = Arc::from(factory::create_catalog_service(&config).await);
    let app = routes(AppState::new(config.clone(), catalog_service));

    if config.lambda {
        tracing::info!(environment = config.environment.as_str(), store = %config.store, "starting lambda handler");
        return run(app).await;
    }

    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!(environment = config.environment.as_str(), store = %config.store, %addr, "listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
