use std::time::{Duration, Instant};

/// How long a successful (or, for negative caching, failed) resolution stays valid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ttl {
    /// Never trust a cached result, always go to the backend
    Disabled,
    For(Duration),
    /// Never expire
    #[default]
    Forever,
}

impl Ttl {
    /// Maps a configured number of seconds onto a policy:
    /// 0 disables caching, a positive value caches for that long
    /// and a negative value caches forever
    pub fn from_secs(secs: i64) -> Self {
        match secs {
            0 => Self::Disabled,
            s if s > 0 => Self::For(Duration::from_secs(s.unsigned_abs())),
            _ => Self::Forever,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Expiry of a result produced at `now`
    pub fn expiry(&self, now: Instant) -> Expiry {
        match self {
            // Already expired at the moment it is created
            Self::Disabled => Expiry::At(now),
            Self::For(ttl) => now.checked_add(*ttl).map_or(Expiry::Never, Expiry::At),
            Self::Forever => Expiry::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    At(Instant),
    Never,
}

impl Expiry {
    /// The deadline itself counts as expired
    pub fn is_expired(&self, now: Instant) -> bool {
        match self {
            Self::At(deadline) => now >= *deadline,
            Self::Never => false,
        }
    }
}
