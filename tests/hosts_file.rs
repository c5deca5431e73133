use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use hostcache::{CacheConfig, HostsFile, ManualClock, ResolutionCache, Ttl};

mod common;
use common::{addr, Counting};

fn add_mapping(path: &Path, host: &str, address: &str, append: bool) {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .unwrap();

    writeln!(file, "{address} {host}").unwrap();
}

async fn expect(
    cache: &ResolutionCache<Counting<HostsFile>, ManualClock>,
    host: &str,
    address: Option<&str>,
    lookups: usize,
) {
    match address {
        Some(address) => assert_eq!(
            cache.resolve_first(host).await,
            Ok(addr(address)),
            "resolving {host}"
        ),
        None => assert!(
            cache.resolve(host).await.is_err(),
            "{host} should not resolve"
        ),
    }

    assert_eq!(cache.backend().calls(), lookups, "after resolving {host}");
}

/// Edits a hosts file underneath a cache with a 20s TTL and a 10s negative
/// TTL, checking which names are served from the cache at each point
#[tokio::test]
async fn tracks_hosts_file_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts");
    let clock = ManualClock::new();
    let config = CacheConfig::default()
        .with_ttl(Ttl::from_secs(20))
        .with_negative_ttl(Ttl::from_secs(10));
    let cache = ResolutionCache::with_clock(
        Counting::new(HostsFile::new(&path)),
        &config,
        clock.clone(),
    );
    let sleep = |secs| clock.advance(Duration::from_secs(secs));

    add_mapping(&path, "theclub", "129.156.220.219", false);

    // t=0
    expect(&cache, "theclub", Some("129.156.220.219"), 1).await;
    expect(&cache, "luster", None, 2).await;

    add_mapping(&path, "luster", "10.5.18.21", true);

    // The failure is still cached
    expect(&cache, "luster", None, 2).await;

    // t=11
    sleep(11);
    expect(&cache, "luster", Some("10.5.18.21"), 3).await;

    // t=16
    sleep(5);
    add_mapping(&path, "theclub", "129.156.220.1", false);
    add_mapping(&path, "foo", "10.5.18.22", true);
    add_mapping(&path, "luster", "10.5.18.21", true);

    expect(&cache, "theclub", Some("129.156.220.219"), 3).await;
    expect(&cache, "luster", Some("10.5.18.21"), 3).await;
    expect(&cache, "bar", None, 4).await;
    expect(&cache, "foo", Some("10.5.18.22"), 5).await;

    // t=21, theclub has expired
    sleep(5);
    expect(&cache, "foo", Some("10.5.18.22"), 5).await;
    expect(&cache, "theclub", Some("129.156.220.1"), 6).await;

    // t=32, luster has expired
    sleep(11);
    expect(&cache, "luster", Some("10.5.18.21"), 7).await;
    expect(&cache, "theclub", Some("129.156.220.1"), 7).await;

    // t=48, theclub and foo have expired
    sleep(16);
    expect(&cache, "theclub", Some("129.156.220.1"), 8).await;
    expect(&cache, "luster", Some("10.5.18.21"), 8).await;
    expect(&cache, "foo", Some("10.5.18.22"), 9).await;
}

#[tokio::test]
async fn unreadable_file_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts");
    let clock = ManualClock::new();
    let config = CacheConfig::default().with_ttl(Ttl::from_secs(60));
    let cache = ResolutionCache::with_clock(
        Counting::new(HostsFile::new(&path)),
        &config,
        clock.clone(),
    );

    expect(&cache, "theclub", None, 1).await;
    expect(&cache, "theclub", None, 2).await;

    add_mapping(&path, "theclub", "129.156.220.219", false);
    expect(&cache, "theclub", Some("129.156.220.219"), 3).await;
    expect(&cache, "theclub", Some("129.156.220.219"), 3).await;
}
