use std::collections::HashMap;
use thiserror::Error;

/// Name of the environment variable holding the data feed base URL.
pub const BASE_URL_VAR: &str = "PUBLIC_APP_URL";

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("PUBLIC_APP_URL is not set")]
    MissingBaseUrl,

    #[error("PUBLIC_APP_URL is set but empty")]
    EmptyBaseUrl,

    #[error("Failed to read environment: {0}")]
    Source(#[from] ::config::ConfigError),
}

/// Values read from the process environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnvironment {
    /// Base URL for the data feed and image assets, used verbatim
    /// (`{base_url}data/data.json`, `{base_url}{img}`)
    pub base_url: String,
}

impl AppEnvironment {
    /// Read `PUBLIC_APP_URL` from the process environment.
    pub fn from_env() -> Result<Self, EnvironmentError> {
        Self::from_source(None)
    }

    /// Read from an explicit variable map instead of the process environment.
    ///
    /// Useful for tests, where mutating the real environment races with
    /// other tests.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, EnvironmentError> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self, EnvironmentError> {
        let settings = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix("PUBLIC").source(vars))
            .build()?;

        let base_url = match settings.get_string("app_url") {
            Ok(value) => value,
            Err(::config::ConfigError::NotFound(_)) => return Err(EnvironmentError::MissingBaseUrl),
            Err(e) => return Err(e.into()),
        };

        if base_url.trim().is_empty() {
            return Err(EnvironmentError::EmptyBaseUrl);
        }

        tracing::info!("Using data feed base URL {}", base_url);
        Ok(Self { base_url })
    }
}
