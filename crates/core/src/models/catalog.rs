use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

/// Symbols that carry a dedicated Toman rate field in every price snapshot.
pub const SYMBOL_USD: &str = "USD";
pub const SYMBOL_EUR: &str = "EUR";
pub const SYMBOL_GOLD18: &str = "GOLD18";

/// The classification of a tracked asset.
/// Determines how its current Toman price is derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetKind {
    /// Foreign cash (USD, EUR) — the snapshot carries a direct Toman rate
    Fiat,
    /// 18-karat gold, priced per gram in Toman
    Gold,
    /// Cryptocurrencies — priced in USD, converted through the USD→Toman rate
    Crypto,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Fiat => write!(f, "FIAT"),
            AssetKind::Gold => write!(f, "GOLD"),
            AssetKind::Crypto => write!(f, "CRYPTO"),
        }
    }
}

/// Display name and classification for one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Human-readable name (Persian in the default catalog)
    pub name: String,

    /// Asset classification
    #[serde(rename = "type")]
    pub kind: AssetKind,
}

impl AssetInfo {
    pub fn new(name: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Static lookup table from asset symbol to display name and kind.
///
/// Supplied as configuration and never mutated at runtime. The JSON shape is
/// a plain symbol-keyed record, e.g.
/// `{"USD": {"name": "دلار آمریکا", "type": "FIAT"}, ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog {
    assets: HashMap<String, AssetInfo>,
}

impl AssetCatalog {
    /// Build a catalog from arbitrary entries. Symbols are uppercased.
    pub fn new(assets: HashMap<String, AssetInfo>) -> Self {
        Self {
            assets: assets
                .into_iter()
                .map(|(symbol, info)| (symbol.to_uppercase(), info))
                .collect(),
        }
    }

    /// Load a catalog from its JSON representation (symbols are uppercased).
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: HashMap<String, AssetInfo> = serde_json::from_str(json)?;
        Ok(Self::new(raw))
    }

    /// Look up a symbol (case-insensitive).
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&AssetInfo> {
        self.assets.get(&symbol.to_uppercase())
    }

    /// Check whether a symbol is part of the catalog (case-insensitive).
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.assets.contains_key(&symbol.to_uppercase())
    }

    /// Number of supported symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// All supported symbols in deterministic (alphabetical) order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.assets.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Symbols of a given kind in deterministic (alphabetical) order.
    /// `crypto` entries are the ones refreshed through price feeds.
    #[must_use]
    pub fn symbols_of_kind(&self, kind: AssetKind) -> Vec<String> {
        let mut symbols: Vec<String> = self
            .assets
            .iter()
            .filter(|(_, info)| info.kind == kind)
            .map(|(symbol, _)| symbol.clone())
            .collect();
        symbols.sort_unstable();
        symbols
    }
}

impl Default for AssetCatalog {
    /// The built-in catalog: the seven assets tracked by default, with
    /// their Persian display names.
    fn default() -> Self {
        let mut assets = HashMap::new();
        assets.insert(
            SYMBOL_USD.to_string(),
            AssetInfo::new("دلار آمریکا", AssetKind::Fiat),
        );
        assets.insert(
            SYMBOL_EUR.to_string(),
            AssetInfo::new("یورو", AssetKind::Fiat),
        );
        assets.insert(
            SYMBOL_GOLD18.to_string(),
            AssetInfo::new("طلای ۱۸ عیار", AssetKind::Gold),
        );
        assets.insert(
            "USDT".to_string(),
            AssetInfo::new("تتر", AssetKind::Crypto),
        );
        assets.insert(
            "ETH".to_string(),
            AssetInfo::new("اتریوم", AssetKind::Crypto),
        );
        assets.insert(
            "ADA".to_string(),
            AssetInfo::new("کاردانو", AssetKind::Crypto),
        );
        assets.insert(
            "ETC".to_string(),
            AssetInfo::new("اتریوم کلاسیک", AssetKind::Crypto),
        );
        Self { assets }
    }
}
