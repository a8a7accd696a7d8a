//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions and a single-instance in-memory
//! fixed-window implementation.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 50,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Seconds until the window resets (for Retry-After headers)
    pub fn retry_after_secs(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        ((self.reset_at_ms - now_ms).max(0) + 999) / 1000
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    /// Returns (allowed, remaining_requests)
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

// ============================================================================
// In-memory fixed-window store
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    count: u32,
    window_started_ms: i64,
}

/// Single-instance in-memory rate limit store
///
/// Fixed-window counters keyed by an arbitrary string (typically the
/// client IP). Counters for elapsed windows are replaced on the next hit,
/// so the map stays bounded by the number of active clients.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    entries: Mutex<HashMap<String, WindowCounter>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = Utc::now().timestamp_millis();
        let window_ms = config.window_ms();

        let mut entries = self.entries.lock().await;

        let counter = entries
            .entry(key.to_string())
            .and_modify(|c| {
                if now_ms - c.window_started_ms >= window_ms {
                    c.count = 0;
                    c.window_started_ms = now_ms;
                }
            })
            .or_insert(WindowCounter {
                count: 0,
                window_started_ms: now_ms,
            });

        let reset_at_ms = counter.window_started_ms + window_ms;

        if counter.count >= config.max_requests {
            return Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms,
            });
        }

        counter.count += 1;

        Ok(RateLimitResult {
            allowed: true,
            remaining: config.max_requests - counter.count,
            reset_at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryRateLimitStore, RateLimitConfig, RateLimitStore};

    #[tokio::test]
    async fn test_allows_up_to_limit() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);

        for i in 0..3 {
            let result = store.check_and_increment("client", &config).await.unwrap();
            assert!(result.allowed, "request {} should be allowed", i);
        }

        let result = store.check_and_increment("client", &config).await.unwrap();
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(
            store
                .check_and_increment("a", &config)
                .await
                .unwrap()
                .allowed
        );
        assert!(
            store
                .check_and_increment("b", &config)
                .await
                .unwrap()
                .allowed
        );
        assert!(
            !store
                .check_and_increment("a", &config)
                .await
                .unwrap()
                .allowed
        );
    }

    #[tokio::test]
    async fn test_remaining_counts_down() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(5, 60);

        let first = store.check_and_increment("c", &config).await.unwrap();
        assert_eq!(first.remaining, 4);

        let second = store.check_and_increment("c", &config).await.unwrap();
        assert_eq!(second.remaining, 3);
    }
}
