use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;

/// Trait abstraction for crypto price feeds.
///
/// Toman exchange rates (USD, EUR, gold) have no free public API and are
/// entered manually, so feeds only cover the USD leg: current USD prices
/// for crypto symbols. If a feed stops working or changes, we replace
/// only that one implementation — the rest of the codebase is untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceFeed: Send + Sync {
    /// Human-readable name of this feed (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch current USD prices for the given crypto symbols.
    ///
    /// Returns a map keyed by uppercase symbol. Symbols the feed cannot
    /// resolve are simply absent from the map, not an error.
    async fn fetch_crypto_usd(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, CoreError>;
}
