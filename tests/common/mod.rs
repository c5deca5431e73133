use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

use hostcache::{LookupBackend, Name, ResolveError};

/// Wraps a backend and counts how many lookups reach it
pub struct Counting<B> {
    pub inner: B,
    calls: AtomicUsize,
}

impl<B> Counting<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<B: LookupBackend> LookupBackend for Counting<B> {
    async fn lookup(&self, name: &Name) -> Result<Vec<IpAddr>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(name).await
    }
}

pub fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}
