use hostcache::{CacheConfig, ConfigError, HostsFile, LookupBackend, ResolutionCache, SystemResolver};
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const REPEAT_VAR: &str = "HOSTCACHE_REPEAT";

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "hostcache=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        eprintln!("usage: hostcache NAME...");
        return Ok(());
    }

    let config = CacheConfig::from_env()?;
    let repeat = std::env::var(REPEAT_VAR)
        .ok()
        .and_then(|n| n.trim().parse().ok())
        .unwrap_or(1);

    match &config.hosts_file {
        Some(path) => {
            info!("Serving names from {}", path.display());
            let cache = ResolutionCache::new(HostsFile::new(path), &config);
            run(&cache, &names, repeat).await;
        }
        None => {
            info!("Serving names from the system resolver");
            let cache = ResolutionCache::new(SystemResolver, &config);
            run(&cache, &names, repeat).await;
        }
    }

    Ok(())
}

async fn run<B: LookupBackend>(cache: &ResolutionCache<B>, names: &[String], repeat: usize) {
    for _ in 0..repeat {
        for name in names {
            match cache.resolve(name).await {
                Ok(addresses) => println!("{name} -> {}", addresses.iter().join(", ")),
                Err(e) => println!("{e}"),
            }
        }
    }
}
