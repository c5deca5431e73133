use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;

use crate::{Name, ResolveError};

mod hosts_file;
pub use hosts_file::HostsFile;

mod static_hosts;
pub use static_hosts::StaticHosts;

mod system;
pub use system::SystemResolver;

/// The authoritative source the cache falls back to on a miss or expiry
///
/// A lookup either yields the addresses for `name` in preference order or
/// fails with [`ResolveError::NotFound`]. Adapters translate any other
/// failure (I/O, resolver errors) into NotFound.
pub trait LookupBackend: Send + Sync {
    fn lookup(
        &self,
        name: &Name,
    ) -> impl Future<Output = Result<Vec<IpAddr>, ResolveError>> + Send;
}

impl<B: LookupBackend> LookupBackend for Arc<B> {
    fn lookup(
        &self,
        name: &Name,
    ) -> impl Future<Output = Result<Vec<IpAddr>, ResolveError>> + Send {
        (**self).lookup(name)
    }
}
