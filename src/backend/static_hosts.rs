use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{PoisonError, RwLock};

use super::LookupBackend;
use crate::{Name, ResolveError};

/// An in-memory hosts table that can be edited while it is being served
#[derive(Debug, Default)]
pub struct StaticHosts {
    hosts: RwLock<HashMap<Name, Vec<IpAddr>>>,
}

impl StaticHosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every address of `name`, returning the previous ones
    pub fn insert(
        &self,
        name: &str,
        addresses: impl IntoIterator<Item = IpAddr>,
    ) -> Option<Vec<IpAddr>> {
        let mut hosts = self.hosts.write().unwrap_or_else(PoisonError::into_inner);
        hosts.insert(Name::new(name), addresses.into_iter().collect())
    }

    /// Appends one address to `name`, after the ones it already has
    pub fn push(&self, name: &str, address: IpAddr) {
        let mut hosts = self.hosts.write().unwrap_or_else(PoisonError::into_inner);
        let addresses = hosts.entry(Name::new(name)).or_default();
        if !addresses.contains(&address) {
            addresses.push(address);
        }
    }

    pub fn remove(&self, name: &str) -> Option<Vec<IpAddr>> {
        let mut hosts = self.hosts.write().unwrap_or_else(PoisonError::into_inner);
        hosts.remove(&Name::new(name))
    }

    fn get(&self, name: &Name) -> Option<Vec<IpAddr>> {
        let hosts = self.hosts.read().unwrap_or_else(PoisonError::into_inner);
        hosts.get(name).filter(|a| !a.is_empty()).cloned()
    }
}

impl<N, A> FromIterator<(N, A)> for StaticHosts
where
    N: AsRef<str>,
    A: IntoIterator<Item = IpAddr>,
{
    fn from_iter<T: IntoIterator<Item = (N, A)>>(iter: T) -> Self {
        let hosts = iter
            .into_iter()
            .map(|(name, addresses)| (Name::new(name.as_ref()), addresses.into_iter().collect()))
            .collect();

        Self {
            hosts: RwLock::new(hosts),
        }
    }
}

impl LookupBackend for StaticHosts {
    async fn lookup(&self, name: &Name) -> Result<Vec<IpAddr>, ResolveError> {
        self.get(name).ok_or_else(|| ResolveError::NotFound(name.clone()))
    }
}
