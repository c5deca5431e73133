use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use tracing::{debug, instrument, trace};

use crate::{CacheConfig, Clock, Expiry, LookupBackend, Name, ResolveError, SystemClock, Ttl};

/// The result of the last successful resolution of a name
///
/// Entries are never edited. A re-resolution builds a new one and swaps it
/// in, so a reader always sees addresses and expiry from the same lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    name: Name,
    addresses: Vec<IpAddr>,
    expires_at: Expiry,
}

impl CacheEntry {
    pub fn new(name: Name, addresses: Vec<IpAddr>, expires_at: Expiry) -> Self {
        Self {
            name,
            addresses,
            expires_at,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }

    pub fn expires_at(&self) -> Expiry {
        self.expires_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_expired(now)
    }
}

type Entries = HashMap<Name, Arc<CacheEntry>>;

/// A TTL-bounded cache of name resolutions in front of a [`LookupBackend`]
///
/// Expiry is checked lazily when a name is resolved; nothing is swept in the
/// background. Concurrent misses on the same name may each query the
/// backend, and the last one to finish wins.
#[derive(Debug)]
pub struct ResolutionCache<B, C = SystemClock> {
    backend: B,
    clock: C,
    ttl: Ttl,
    negative_ttl: Ttl,
    entries: RwLock<Entries>,
    /// Names that recently failed, only filled when `negative_ttl` allows it
    negative: RwLock<HashMap<Name, Expiry>>,
}

impl<B: LookupBackend> ResolutionCache<B> {
    pub fn new(backend: B, config: &CacheConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<B: LookupBackend, C: Clock> ResolutionCache<B, C> {
    pub fn with_clock(backend: B, config: &CacheConfig, clock: C) -> Self {
        debug!(ttl = ?config.ttl, negative_ttl = ?config.negative_ttl, "Creating resolution cache");

        Self {
            backend,
            clock,
            ttl: config.ttl,
            negative_ttl: config.negative_ttl,
            entries: RwLock::new(HashMap::new()),
            negative: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves `name` to its addresses, asking the backend only when there
    /// is no unexpired entry for it
    ///
    /// IP literals resolve to themselves without touching the cache.
    #[instrument(level = "debug", skip(self))]
    pub async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, ResolveError> {
        let name = Name::new(name);

        if let Some(address) = name.as_ip() {
            return Ok(vec![address]);
        }

        if let Some(cached) = self.cached(&name, self.clock.now()) {
            return cached;
        }

        debug!("Querying backend for {name}");

        match self.backend.lookup(&name).await {
            Ok(addresses) if !addresses.is_empty() => {
                let expires_at = self.ttl.expiry(self.clock.now());
                let entry = Arc::new(CacheEntry::new(name, addresses, expires_at));
                self.store(Arc::clone(&entry));

                Ok(entry.addresses.clone())
            }
            Ok(_) => {
                self.store_negative(&name);
                Err(ResolveError::NotFound(name))
            }
            Err(e) => {
                self.store_negative(&name);
                Err(e)
            }
        }
    }

    /// The first (preferred) address of `name`
    pub async fn resolve_first(&self, name: &str) -> Result<IpAddr, ResolveError> {
        let addresses = self.resolve(name).await?;

        addresses
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::NotFound(Name::new(name)))
    }

    /// The last entry stored for `name`, expired or not
    pub fn entry(&self, name: &str) -> Option<Arc<CacheEntry>> {
        self.read_entries().get(&Name::new(name)).cloned()
    }

    /// Forgets everything known about `name`, returning whether there was anything
    pub fn invalidate(&self, name: &str) -> bool {
        let name = Name::new(name);
        let had_entry = self.write_entries().remove(&name).is_some();
        let had_negative = self.write_negative().remove(&name).is_some();

        had_entry || had_negative
    }

    pub fn clear(&self) {
        self.write_entries().clear();
        self.write_negative().clear();
    }

    /// Number of stored entries, counting expired ones that were not replaced yet
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    pub fn negative_ttl(&self) -> Ttl {
        self.negative_ttl
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// What the cache can answer for `name` on its own at `now`, if anything
    fn cached(&self, name: &Name, now: Instant) -> Option<Result<Vec<IpAddr>, ResolveError>> {
        if let Some(entry) = self.read_entries().get(name) {
            if !entry.is_expired(now) {
                trace!("Cache hit for {name}");
                return Some(Ok(entry.addresses.clone()));
            }
            trace!("Cache entry for {name} expired");
        }

        let negative = self.read_negative();
        match negative.get(name) {
            Some(expiry) if !expiry.is_expired(now) => {
                trace!("Negative cache hit for {name}");
                Some(Err(ResolveError::NotFound(name.clone())))
            }
            _ => None,
        }
    }

    fn store(&self, entry: Arc<CacheEntry>) {
        if !self.negative_ttl.is_disabled() {
            self.write_negative().remove(&entry.name);
        }

        trace!(expires_at = ?entry.expires_at, "Caching {}", entry.name);
        self.write_entries().insert(entry.name.clone(), entry);
    }

    fn store_negative(&self, name: &Name) {
        if self.negative_ttl.is_disabled() {
            return;
        }

        let expires_at = self.negative_ttl.expiry(self.clock.now());
        trace!(?expires_at, "Caching failure for {name}");
        self.write_negative().insert(name.clone(), expires_at);
    }

    // Entries are only ever inserted or removed whole, so a poisoned lock
    // still guards a consistent map
    fn read_entries(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_negative(&self) -> RwLockReadGuard<'_, HashMap<Name, Expiry>> {
        self.negative.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_negative(&self) -> RwLockWriteGuard<'_, HashMap<Name, Expiry>> {
        self.negative.write().unwrap_or_else(PoisonError::into_inner)
    }
}
