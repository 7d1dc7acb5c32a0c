use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::PriceFeed;
use crate::errors::CoreError;

const BASE_URL: &str = "https://api.coincap.io/v2";

/// CoinCap API feed for cryptocurrency USD prices.
///
/// - **Free**: No API key required, no strict rate limits.
/// - **Data**: 2000+ cryptocurrencies, real-time.
/// - **Endpoint**: `/assets?ids={id},{id},...` (one request per refresh)
///
/// Note: CoinCap uses lowercase ids like "bitcoin", "ethereum".
/// We map common symbols (BTC → bitcoin) and fall back to the lowercased
/// symbol for anything outside the map.
pub struct CoinCapFeed {
    client: Client,
    /// Map from uppercase symbol (BTC) to CoinCap asset id (bitcoin).
    symbol_map: HashMap<String, String>,
}

impl CoinCapFeed {
    pub fn new() -> Self {
        let mut symbol_map = HashMap::new();
        // Pre-populate common mappings
        let common = vec![
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("USDT", "tether"),
            ("USDC", "usd-coin"),
            ("BNB", "binance-coin"),
            ("XRP", "xrp"),
            ("ADA", "cardano"),
            ("SOL", "solana"),
            ("DOGE", "dogecoin"),
            ("DOT", "polkadot"),
            ("LTC", "litecoin"),
            ("AVAX", "avalanche"),
            ("LINK", "chainlink"),
            ("ATOM", "cosmos"),
            ("XLM", "stellar"),
            ("TRX", "tron"),
            ("ETC", "ethereum-classic"),
            ("XMR", "monero"),
            ("SHIB", "shiba-inu"),
            ("FIL", "filecoin"),
        ];
        for (sym, id) in common {
            symbol_map.insert(sym.to_string(), id.to_string());
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            symbol_map,
        }
    }

    /// Resolve a symbol like "BTC" to a CoinCap id like "bitcoin".
    /// Falls back to the lowercased symbol for unmapped entries.
    pub fn resolve_id(&self, symbol: &str) -> String {
        let upper = symbol.to_uppercase();
        self.symbol_map
            .get(&upper)
            .cloned()
            .unwrap_or_else(|| symbol.to_lowercase())
    }
}

impl Default for CoinCapFeed {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AssetsResponse {
    data: Vec<AssetEntry>,
}

#[derive(Deserialize)]
struct AssetEntry {
    symbol: String,
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceFeed for CoinCapFeed {
    fn name(&self) -> &str {
        "CoinCap"
    }

    async fn fetch_crypto_usd(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<String> = symbols.iter().map(|s| self.resolve_id(s)).collect();
        let url = format!("{BASE_URL}/assets?ids={}", ids.join(","));

        let resp: AssetsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                feed: "CoinCap".into(),
                message: format!("Failed to parse assets response: {e}"),
            })?;

        // Unparseable or missing prices drop out of the map; the caller
        // treats absent symbols as price 0.
        let prices: HashMap<String, f64> = resp
            .data
            .iter()
            .filter_map(|entry| {
                let price: f64 = entry.price_usd.as_deref()?.parse().ok()?;
                Some((entry.symbol.to_uppercase(), price))
            })
            .collect();

        Ok(prices)
    }
}
