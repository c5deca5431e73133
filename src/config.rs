use std::path::PathBuf;

use crate::{ConfigError, Ttl};

pub const TTL_VAR: &str = "HOSTCACHE_TTL";
pub const NEGATIVE_TTL_VAR: &str = "HOSTCACHE_NEGATIVE_TTL";
pub const HOSTS_FILE_VAR: &str = "HOSTCACHE_HOSTS_FILE";

/// Settings a cache reads once, when it is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime of successful resolutions (default: forever)
    pub ttl: Ttl,
    /// Lifetime of failed resolutions (default: failures are not cached)
    pub negative_ttl: Ttl,
    /// Serve this hosts file instead of asking the system resolver
    pub hosts_file: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Ttl::Forever,
            negative_ttl: Ttl::Disabled,
            hosts_file: None,
        }
    }
}

impl CacheConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// Load through `lookup`, which maps a variable name to its value if set
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            ttl: parse_ttl(TTL_VAR, lookup(TTL_VAR), defaults.ttl)?,
            negative_ttl: parse_ttl(
                NEGATIVE_TTL_VAR,
                lookup(NEGATIVE_TTL_VAR),
                defaults.negative_ttl,
            )?,
            hosts_file: lookup(HOSTS_FILE_VAR)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn with_ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_negative_ttl(mut self, negative_ttl: Ttl) -> Self {
        self.negative_ttl = negative_ttl;
        self
    }

    pub fn with_hosts_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.hosts_file = Some(path.into());
        self
    }
}

fn parse_ttl(var: &'static str, value: Option<String>, default: Ttl) -> Result<Ttl, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    trimmed
        .parse::<i64>()
        .map(Ttl::from_secs)
        .map_err(|_| ConfigError::InvalidTtl { var, value })
}
