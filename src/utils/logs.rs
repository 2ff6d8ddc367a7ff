use crate::core::domain::Configuration;

// Lambda output goes to CloudWatch, which wants JSON lines without ANSI codes or
// timestamps; a standalone server logs in the default human readable format.
pub fn setup_tracing(config: &Configuration) {
    if config.lambda {
        tracing_subscriber::fmt()
            .with_max_level(config.max_log_level())
            // disable printing the name of the module in every log line.
            .with_target(false)
            .with_ansi(false)
            // CloudWatch will add the ingestion time.
            .without_time()
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(config.max_log_level())
            .with_target(false)
            .init();
    }
}
