use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use config::{Config, ConfigError, Environment, Map};
use serde::{Deserialize, Serialize};
use crate::core::repository::RepositoryStore;

const ENV_PREFIX: &str = "BOOKS";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> i64;
    fn version(&self) -> i64;
}

// Configuration abstracts config options for the book catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub environment: String,
    pub store: RepositoryStore,
    pub table_name: String,
    pub sequence_table_name: String,
    pub dynamodb_endpoint: String,
    pub bind_addr: String,
    pub lambda: bool,
    pub log_level: String,
}

/// A `BOOKS_*` value that could not be parsed; the default was kept instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedSetting {
    pub key: String,
    pub value: String,
}

impl Display for RejectedSetting {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}={}", ENV_PREFIX, self.key.to_uppercase(), self.value)
    }
}

// Raw BOOKS_* settings, keys are lowercased without the prefix.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    #[serde(default = "EnvSettings::default_env")]
    env: String,
    store: Option<String>,
    #[serde(default = "EnvSettings::default_table")]
    table: String,
    #[serde(default = "EnvSettings::default_sequence_table")]
    sequence_table: String,
    #[serde(default = "EnvSettings::default_dynamodb_endpoint")]
    dynamodb_endpoint: String,
    #[serde(default = "EnvSettings::default_bind_addr")]
    bind_addr: String,
    lambda: Option<String>,
    log_level: Option<String>,
}

impl EnvSettings {
    fn default_env() -> String {
        "dev".to_string()
    }

    fn default_table() -> String {
        "books".to_string()
    }

    fn default_sequence_table() -> String {
        "book_sequences".to_string()
    }

    fn default_dynamodb_endpoint() -> String {
        "http://localhost:8000".to_string()
    }

    fn default_bind_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    fn into_configuration(self) -> (Configuration, Vec<RejectedSetting>) {
        let mut rejected = vec![];
        let mut config = Configuration {
            environment: self.env,
            table_name: self.table,
            sequence_table_name: self.sequence_table,
            dynamodb_endpoint: self.dynamodb_endpoint,
            bind_addr: self.bind_addr,
            ..Configuration::new("")
        };
        if let Some(store) = self.store {
            match store.parse::<RepositoryStore>() {
                Ok(store) => config.store = store,
                Err(_) => rejected.push(RejectedSetting { key: "store".to_string(), value: store }),
            }
        }
        if let Some(lambda) = self.lambda {
            match lambda.to_lowercase().parse::<bool>() {
                Ok(lambda) => config.lambda = lambda,
                Err(_) => rejected.push(RejectedSetting { key: "lambda".to_string(), value: lambda }),
            }
        }
        if let Some(level) = self.log_level {
            if level.parse::<tracing::Level>().is_ok() {
                config.log_level = level;
            } else {
                rejected.push(RejectedSetting { key: "log_level".to_string(), value: level });
            }
        }
        (config, rejected)
    }
}

impl Configuration {
    pub fn new(environment: &str) -> Self {
        Configuration {
            environment: environment.to_string(),
            store: RepositoryStore::Memory,
            table_name: EnvSettings::default_table(),
            sequence_table_name: EnvSettings::default_sequence_table(),
            dynamodb_endpoint: EnvSettings::default_dynamodb_endpoint(),
            bind_addr: EnvSettings::default_bind_addr(),
            lambda: false,
            log_level: "info".to_string(),
        }
    }

    /// Loads `BOOKS_*` variables from the process environment. Values that cannot be parsed
    /// keep their default and are returned so they can be logged once tracing is up.
    pub fn from_env() -> Result<(Self, Vec<RejectedSetting>), ConfigError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<(Self, Vec<RejectedSetting>), ConfigError> {
        let source: Map<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    fn load(source: Environment) -> Result<(Self, Vec<RejectedSetting>), ConfigError> {
        let settings: EnvSettings = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(settings.into_configuration())
    }

    pub fn max_log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::domain::{Configuration, RejectedSetting};
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.environment.as_str());
        assert_eq!(RepositoryStore::Memory, config.store);
        assert_eq!("books", config.table_name.as_str());
        assert!(!config.lambda);
        assert_eq!(tracing::Level::INFO, config.max_log_level());
    }

    #[tokio::test]
    async fn test_should_use_defaults_without_vars() {
        let (config, rejected) = Configuration::from_vars(&HashMap::new()).expect("should load config");
        assert_eq!(Configuration::new("dev"), config);
        assert!(rejected.is_empty());
    }

    #[tokio::test]
    async fn test_should_build_config_from_vars() {
        let vars = HashMap::from([
            ("BOOKS_ENV".to_string(), "prod".to_string()),
            ("BOOKS_STORE".to_string(), "dynamodb".to_string()),
            ("BOOKS_TABLE".to_string(), "prod_books".to_string()),
            ("BOOKS_DYNAMODB_ENDPOINT".to_string(), "http://ddb:8000".to_string()),
            ("BOOKS_BIND_ADDR".to_string(), "127.0.0.1:9090".to_string()),
            ("BOOKS_LAMBDA".to_string(), "true".to_string()),
            ("BOOKS_LOG_LEVEL".to_string(), "debug".to_string()),
            ("OTHER_TABLE".to_string(), "ignored".to_string()),
        ]);
        let (config, rejected) = Configuration::from_vars(&vars).expect("should load config");
        assert!(rejected.is_empty());
        assert_eq!("prod", config.environment.as_str());
        assert_eq!(RepositoryStore::DynamoDB, config.store);
        assert_eq!("prod_books", config.table_name.as_str());
        assert_eq!("book_sequences", config.sequence_table_name.as_str());
        assert_eq!("http://ddb:8000", config.dynamodb_endpoint.as_str());
        assert_eq!("127.0.0.1:9090", config.bind_addr.as_str());
        assert!(config.lambda);
        assert_eq!(tracing::Level::DEBUG, config.max_log_level());
    }

    #[tokio::test]
    async fn test_should_report_invalid_vars() {
        let vars = HashMap::from([
            ("BOOKS_STORE".to_string(), "oracle".to_string()),
            ("BOOKS_LAMBDA".to_string(), "maybe".to_string()),
            ("BOOKS_LOG_LEVEL".to_string(), "loud".to_string()),
        ]);
        let (config, rejected) = Configuration::from_vars(&vars).expect("should load config");
        assert_eq!("dev", config.environment.as_str());
        assert_eq!(RepositoryStore::Memory, config.store);
        assert!(!config.lambda);
        assert_eq!("info", config.log_level.as_str());
        assert_eq!(3, rejected.len());
        assert!(rejected.contains(&RejectedSetting { key: "store".to_string(), value: "oracle".to_string() }));
        assert_eq!("BOOKS_STORE=oracle", rejected[0].to_string());
    }
}
