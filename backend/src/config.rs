use std::net::SocketAddr;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_FILTER: &str = "tripgen_backend=debug,tower_http=info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TRIPGEN_ADDR is not a socket address: {0:?}")]
    InvalidAddr(String),
    #[error("TRIPGEN_SEED is not an unsigned integer: {0:?}")]
    InvalidSeed(String),
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub addr: SocketAddr,
    /// Fixed seed for every plan unless the request supplies its own.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_raw = lookup("TRIPGEN_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr_raw.clone()))?;
        let seed = match lookup("TRIPGEN_SEED").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeed(raw.clone()))?,
            ),
            None => None,
        };
        Ok(Self { addr, seed })
    }
}
