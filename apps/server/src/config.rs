//! Server configuration sourced from the environment.

use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 12345;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `HOKM_HOST` / `HOKM_PORT`, falling back to the defaults.
    ///
    /// Environment variables must be set by the runtime environment;
    /// no dotenv loading happens here.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("HOKM_HOST").ok(),
            std::env::var("HOKM_PORT").ok(),
        )
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, AppError> {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match port {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("HOKM_PORT must be a valid port number, got {raw:?}"))
            })?,
            None => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
