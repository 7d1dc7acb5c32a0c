use std::collections::HashMap;

use super::coincap::CoinCapFeed;
use super::traits::PriceFeed;
use crate::errors::CoreError;

/// Registry of all available crypto price feeds.
///
/// Feeds are tried in registration order; if the primary fails (API down,
/// rate limited, etc.), the next one is tried. New feeds can be added
/// without modifying existing code.
pub struct FeedRegistry {
    feeds: Vec<Box<dyn PriceFeed>>,
}

impl FeedRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { feeds: Vec::new() }
    }

    /// Create a registry with the default feeds pre-configured.
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();

        // CoinCap — crypto, no API key needed
        registry.register(Box::new(CoinCapFeed::new()));

        registry
    }

    /// Register a new price feed.
    pub fn register(&mut self, feed: Box<dyn PriceFeed>) {
        self.feeds.push(feed);
    }

    /// Names of the registered feeds, in fallback order.
    pub fn feed_names(&self) -> Vec<String> {
        self.feeds.iter().map(|f| f.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Fetch current USD prices for the given crypto symbols, trying each
    /// feed in registration order until one succeeds.
    pub async fn fetch_crypto_usd(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        if self.feeds.is_empty() {
            return Err(CoreError::NoFeed);
        }

        let mut last_error = None;
        for feed in &self.feeds {
            match feed.fetch_crypto_usd(symbols).await {
                Ok(prices) => return Ok(prices),
                Err(e) => {
                    log::warn!("{} feed failed, trying next: {e}", feed.name());
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoFeed))
    }
}

impl Default for FeedRegistry {
    fn default() -> Self {
        Self::new()
    }
}
