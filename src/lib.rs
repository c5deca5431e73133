mod error;
pub use error::{ConfigError, ResolveError};

mod name;
pub use name::Name;

mod ttl;
pub use ttl::{Expiry, Ttl};

mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod backend;
pub use backend::{HostsFile, LookupBackend, StaticHosts, SystemResolver};

mod cache;
pub use cache::{CacheEntry, ResolutionCache};

pub mod config;
pub use config::CacheConfig;
