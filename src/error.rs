use thiserror::Error;

use crate::Name;

/// The only outcome besides success that `resolve` reports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{0}: name not found")]
    NotFound(Name),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TTL in {var}: {value:?} is not a whole number of seconds")]
    InvalidTtl { var: &'static str, value: String },
}
