use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::catalog::{SYMBOL_EUR, SYMBOL_GOLD18, SYMBOL_USD};

/// A point-in-time set of market rates used to value holdings.
///
/// Supplied externally (stored file, manual admin entry, or a crypto feed)
/// and treated as read-only by the valuation engine. All Toman rates are
/// free-market rates; crypto prices are quoted in USD and converted through
/// `usd_to_toman`.
///
/// The JSON shape matches the stored `prices.json` (`usdToToman`,
/// `cryptoUsdPrices`, numeric `fetchedAt` in epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    /// USD→Toman rate
    pub usd_to_toman: f64,

    /// EUR→Toman rate
    pub eur_to_toman: f64,

    /// One gram of 18-karat gold in Toman
    pub gold18_to_toman: f64,

    /// USD price per unit, keyed by crypto symbol
    pub crypto_usd_prices: HashMap<String, f64>,

    /// When the rates were fetched
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub fetched_at: DateTime<Utc>,
}

impl PriceSnapshot {
    /// Built-in fallback rates, used when no snapshot has ever been
    /// stored or fetched.
    #[must_use]
    pub fn builtin_defaults() -> Self {
        let mut crypto_usd_prices = HashMap::new();
        crypto_usd_prices.insert("USDT".to_string(), 1.0);
        crypto_usd_prices.insert("ETH".to_string(), 2500.0);
        crypto_usd_prices.insert("ADA".to_string(), 0.60);
        crypto_usd_prices.insert("ETC".to_string(), 22.0);

        Self {
            usd_to_toman: 70_000.0,
            eur_to_toman: 74_000.0,
            gold18_to_toman: 4_700_000.0,
            crypto_usd_prices,
            fetched_at: Utc::now(),
        }
    }

    /// Current Toman price for every symbol this snapshot can value:
    /// USD, EUR and GOLD18 from their dedicated rate fields, and each entry
    /// of `crypto_usd_prices` multiplied by the USD→Toman rate.
    ///
    /// Symbols absent from the returned index are valued at 0 by the engine.
    #[must_use]
    pub fn toman_price_index(&self) -> HashMap<String, f64> {
        let mut index = HashMap::with_capacity(3 + self.crypto_usd_prices.len());
        index.insert(SYMBOL_USD.to_string(), self.usd_to_toman);
        index.insert(SYMBOL_EUR.to_string(), self.eur_to_toman);
        index.insert(SYMBOL_GOLD18.to_string(), self.gold18_to_toman);
        for (symbol, usd_price) in &self.crypto_usd_prices {
            index.insert(symbol.to_uppercase(), usd_price * self.usd_to_toman);
        }
        index
    }
}
