use std::net::IpAddr;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use super::LookupBackend;
use crate::{Name, ResolveError};

/// A backend serving a hosts(5) style file
///
/// The file is read again on every lookup, so edits show up as soon as the
/// cache decides to ask.
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: PathBuf,
}

impl HostsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LookupBackend for HostsFile {
    #[instrument(level = "trace", skip(self), fields(path = %self.path.display()))]
    async fn lookup(&self, name: &Name) -> Result<Vec<IpAddr>, ResolveError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), "Couldn't read hosts file: {e}");
                return Err(ResolveError::NotFound(name.clone()));
            }
        };

        let addresses = addresses_for(&contents, name);
        if addresses.is_empty() {
            Err(ResolveError::NotFound(name.clone()))
        } else {
            Ok(addresses)
        }
    }
}

/// One mapping line: an address followed by the names it answers for
#[derive(Debug, Clone, PartialEq, Eq)]
struct HostLine {
    address: IpAddr,
    names: Vec<Name>,
}

impl HostLine {
    fn parse(line: &str) -> Option<Self> {
        let line = line.split('#').next().unwrap_or_default();
        let mut fields = line.split_whitespace();

        let address = fields.next()?;
        let Ok(address) = address.parse() else {
            debug!("Skipping hosts line with bad address {address:?}");
            return None;
        };

        let names: Vec<Name> = fields.map(Name::new).collect();
        if names.is_empty() {
            debug!("Skipping hosts line for {address} without names");
            return None;
        }

        Some(Self { address, names })
    }
}

/// Every address mapped to `name`, in file order and without repeats
fn addresses_for(contents: &str, name: &Name) -> Vec<IpAddr> {
    contents
        .lines()
        .filter_map(HostLine::parse)
        .filter(|host| host.names.contains(name))
        .map(|host| host.address)
        .unique()
        .collect()
}
