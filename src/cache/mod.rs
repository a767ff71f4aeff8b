use moka::future::Cache;
use std::time::Duration;

/// Hashes of transactions already forwarded successfully, kept for a bounded window.
pub type SeenCache = Cache<String, ()>;

pub fn init_seen_cache(ttl: Duration, max_capacity: u64) -> SeenCache {
    Cache::builder()
        .time_to_live(ttl)
        .max_capacity(max_capacity)
        .build()
}

pub fn generate_cache_key(address: &str, tx_hash: &str) -> String {
    format!("{}:{}", address, tx_hash)
}
