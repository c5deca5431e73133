use std::net::IpAddr;

use itertools::Itertools;
use tracing::{debug, instrument};

use super::LookupBackend;
use crate::{Name, ResolveError};

/// Hands lookups to the platform resolver (getaddrinfo and friends)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl LookupBackend for SystemResolver {
    #[instrument(level = "trace", skip(self))]
    async fn lookup(&self, name: &Name) -> Result<Vec<IpAddr>, ResolveError> {
        // The port is required by the API and ignored
        let addresses: Vec<IpAddr> = match tokio::net::lookup_host((name.as_str(), 0)).await {
            Ok(addrs) => addrs.map(|addr| addr.ip()).unique().collect(),
            Err(e) => {
                debug!("System lookup of {name} failed: {e}");
                Vec::new()
            }
        };

        if addresses.is_empty() {
            Err(ResolveError::NotFound(name.clone()))
        } else {
            Ok(addresses)
        }
    }
}
