use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The currency a purchase price was denominated in.
///
/// Fees are always Toman regardless of this, and never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Unit price entered directly in Toman
    Toman,
    /// Unit price entered in USD; cost basis converts through the
    /// snapshot's USD→Toman rate
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Toman => write!(f, "TOMAN"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest purchase first (default for display)
    DateDesc,
    /// Oldest purchase first
    DateAsc,
    /// Largest quantity first
    QuantityDesc,
    /// Smallest quantity first
    QuantityAsc,
    /// Alphabetical by asset symbol
    SymbolAsc,
    /// Reverse alphabetical by asset symbol
    SymbolDesc,
}

/// A single purchase logged by the user.
///
/// Immutable once created; edits replace the whole record by id. The JSON
/// shape matches the legacy data files (`assetSymbol`, `buyDateTime`,
/// `buyPricePerUnit`, `buyCurrency`, `feesToman`), so stores written by
/// earlier deployments load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier within a user's transaction set. New transactions
    /// get a uuid-v4 string; legacy ids from older data files are kept as-is.
    pub id: String,

    /// Catalog symbol of the purchased asset, uppercase
    pub asset_symbol: String,

    /// Amount purchased (always positive)
    pub quantity: f64,

    /// Purchase timestamp
    pub buy_date_time: DateTime<Utc>,

    /// Price paid per unit, denominated in `buy_currency`
    pub buy_price_per_unit: f64,

    /// Currency of `buy_price_per_unit`
    pub buy_currency: Currency,

    /// Flat fee in Toman, added to cost basis unconverted
    pub fees_toman: f64,

    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(
        asset_symbol: impl Into<String>,
        quantity: f64,
        buy_date_time: DateTime<Utc>,
        buy_price_per_unit: f64,
        buy_currency: Currency,
        fees_toman: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            asset_symbol: asset_symbol.into().to_uppercase(),
            quantity,
            buy_date_time,
            buy_price_per_unit,
            buy_currency,
            fees_toman,
            note: None,
        }
    }

    /// Create a transaction with a note attached.
    pub fn with_note(
        asset_symbol: impl Into<String>,
        quantity: f64,
        buy_date_time: DateTime<Utc>,
        buy_price_per_unit: f64,
        buy_currency: Currency,
        fees_toman: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::new(
                asset_symbol,
                quantity,
                buy_date_time,
                buy_price_per_unit,
                buy_currency,
                fees_toman,
            )
        }
    }
}
