pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage;

use chrono::{DateTime, Utc};
use models::{
    catalog::{AssetCatalog, AssetKind},
    price::PriceSnapshot,
    summary::PortfolioSummary,
    transaction::{Currency, Transaction, TransactionSortOrder},
};
use providers::registry::FeedRegistry;
use services::{transaction_service::TransactionService, valuation_service::ValuationService};
#[cfg(not(target_arch = "wasm32"))]
use storage::store::DataStore;

use errors::CoreError;

/// Main entry point for the Toman Tracker core library.
/// Holds one user's purchase log, the shared price snapshot and the
/// services needed to operate on them.
#[must_use]
pub struct TomanTracker {
    catalog: AssetCatalog,
    transactions: Vec<Transaction>,
    snapshot: Option<PriceSnapshot>,
    registry: FeedRegistry,
    transaction_service: TransactionService,
    valuation_service: ValuationService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for TomanTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomanTracker")
            .field("transactions", &self.transactions.len())
            .field("catalog_assets", &self.catalog.len())
            .field("has_snapshot", &self.snapshot.is_some())
            .field("feeds", &self.registry.feed_names())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl TomanTracker {
    /// Create an empty tracker over the built-in asset catalog.
    pub fn new() -> Self {
        Self::build(AssetCatalog::default(), Vec::new(), None)
    }

    /// Create an empty tracker over a custom asset catalog.
    pub fn with_catalog(catalog: AssetCatalog) -> Self {
        Self::build(catalog, Vec::new(), None)
    }

    /// Load a user's transactions and the shared price snapshot from a store
    /// (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_store(store: &DataStore, username: &str) -> Result<Self, CoreError> {
        let transactions = store.transactions(username)?;
        let snapshot = store.load_snapshot()?;
        Ok(Self::build(AssetCatalog::default(), transactions, snapshot))
    }

    /// Persist the transaction log and the snapshot back to a store
    /// (native only, not WASM).
    /// The snapshot file is only touched when a snapshot is present.
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_store(&mut self, store: &DataStore, username: &str) -> Result<(), CoreError> {
        store.save_transactions(username, &self.transactions)?;
        if let Some(snapshot) = &self.snapshot {
            store.save_snapshot(snapshot)?;
        }
        self.dirty = false;
        Ok(())
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Record a purchase. Returns the generated transaction id.
    pub fn add_transaction(
        &mut self,
        asset_symbol: impl Into<String>,
        quantity: f64,
        buy_date_time: DateTime<Utc>,
        buy_price_per_unit: f64,
        buy_currency: Currency,
        fees_toman: f64,
    ) -> Result<String, CoreError> {
        let tx = Transaction::new(
            asset_symbol,
            quantity,
            buy_date_time,
            buy_price_per_unit,
            buy_currency,
            fees_toman,
        );
        let id = tx.id.clone();
        self.transaction_service
            .add(&mut self.transactions, tx, &self.catalog)?;
        self.dirty = true;
        Ok(id)
    }

    /// Record a purchase with a note attached.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transaction_with_note(
        &mut self,
        asset_symbol: impl Into<String>,
        quantity: f64,
        buy_date_time: DateTime<Utc>,
        buy_price_per_unit: f64,
        buy_currency: Currency,
        fees_toman: f64,
        note: impl Into<String>,
    ) -> Result<String, CoreError> {
        let tx = Transaction::with_note(
            asset_symbol,
            quantity,
            buy_date_time,
            buy_price_per_unit,
            buy_currency,
            fees_toman,
            note,
        );
        let id = tx.id.clone();
        self.transaction_service
            .add(&mut self.transactions, tx, &self.catalog)?;
        self.dirty = true;
        Ok(id)
    }

    /// Replace an existing transaction, matched by id.
    /// Validates the replacement before committing.
    pub fn update_transaction(&mut self, updated: Transaction) -> Result<(), CoreError> {
        self.transaction_service
            .replace(&mut self.transactions, updated, &self.catalog)?;
        self.dirty = true;
        Ok(())
    }

    /// Set or clear the note on an existing transaction.
    pub fn set_transaction_note(
        &mut self,
        tx_id: &str,
        note: Option<String>,
    ) -> Result<(), CoreError> {
        self.transaction_service
            .set_note(&mut self.transactions, tx_id, note)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a transaction by its id.
    pub fn remove_transaction(&mut self, tx_id: &str) -> Result<(), CoreError> {
        self.transaction_service
            .remove(&mut self.transactions, tx_id)?;
        self.dirty = true;
        Ok(())
    }

    /// Get a single transaction by its id.
    #[must_use]
    pub fn get_transaction(&self, tx_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == tx_id)
    }

    /// All transactions, in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get the total number of transactions.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Transactions for one asset (case-insensitive symbol match), in
    /// insertion order.
    #[must_use]
    pub fn transactions_for_asset(&self, symbol: &str) -> Vec<&Transaction> {
        self.transaction_service
            .for_asset(&self.transactions, symbol)
    }

    /// Transactions sorted by a specific order.
    #[must_use]
    pub fn transactions_sorted(&self, order: TransactionSortOrder) -> Vec<&Transaction> {
        self.transaction_service.sorted(&self.transactions, order)
    }

    /// Search transactions by matching query against symbol, catalog display
    /// name, and note (case-insensitive).
    #[must_use]
    pub fn search_transactions(&self, query: &str) -> Vec<&Transaction> {
        self.transaction_service
            .search(&self.transactions, &self.catalog, query)
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Replace the price snapshot wholesale.
    pub fn set_price_snapshot(&mut self, snapshot: PriceSnapshot) {
        self.snapshot = Some(snapshot);
        self.dirty = true;
    }

    /// The current price snapshot, if any.
    #[must_use]
    pub fn price_snapshot(&self) -> Option<&PriceSnapshot> {
        self.snapshot.as_ref()
    }

    /// Set the three market rates by hand (the admin-update path).
    /// Crypto USD prices already in the snapshot are kept and `fetched_at`
    /// is refreshed. Starts from built-in defaults when no snapshot exists.
    pub fn set_market_rates(
        &mut self,
        usd_to_toman: f64,
        eur_to_toman: f64,
        gold18_to_toman: f64,
    ) -> Result<(), CoreError> {
        for rate in [usd_to_toman, eur_to_toman, gold18_to_toman] {
            if rate < 0.0 || !rate.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Market rate must be a non-negative number, got {rate}"
                )));
            }
        }
        let mut snapshot = self
            .snapshot
            .take()
            .unwrap_or_else(PriceSnapshot::builtin_defaults);
        snapshot.usd_to_toman = usd_to_toman;
        snapshot.eur_to_toman = eur_to_toman;
        snapshot.gold18_to_toman = gold18_to_toman;
        snapshot.fetched_at = Utc::now();
        self.snapshot = Some(snapshot);
        self.dirty = true;
        Ok(())
    }

    /// Manually insert one crypto USD price (useful for testing, offline, or
    /// assets no feed covers). Starts from built-in defaults when no snapshot
    /// exists.
    pub fn set_crypto_usd_price(&mut self, symbol: &str, usd_price: f64) -> Result<(), CoreError> {
        if usd_price < 0.0 || !usd_price.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Price must be a non-negative number, got {usd_price}"
            )));
        }
        let mut snapshot = self
            .snapshot
            .take()
            .unwrap_or_else(PriceSnapshot::builtin_defaults);
        snapshot
            .crypto_usd_prices
            .insert(symbol.to_uppercase(), usd_price);
        self.snapshot = Some(snapshot);
        self.dirty = true;
        Ok(())
    }

    /// Fetch fresh USD prices for every crypto asset in the catalog and merge
    /// them into the snapshot. Prices for symbols the feeds don't return are
    /// kept as they were. Returns the number of prices updated.
    pub async fn refresh_crypto_prices(&mut self) -> Result<usize, CoreError> {
        let symbols = self.catalog.symbols_of_kind(AssetKind::Crypto);
        if symbols.is_empty() {
            return Ok(0);
        }

        let prices = self.registry.fetch_crypto_usd(&symbols).await?;
        let count = prices.len();

        let mut snapshot = self
            .snapshot
            .take()
            .unwrap_or_else(PriceSnapshot::builtin_defaults);
        for (symbol, usd_price) in prices {
            snapshot.crypto_usd_prices.insert(symbol, usd_price);
        }
        snapshot.fetched_at = Utc::now();
        self.snapshot = Some(snapshot);
        self.dirty = true;
        Ok(count)
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Value the whole portfolio against the current snapshot: per-asset
    /// totals, profit/loss, allocation, and ranked ordering.
    pub fn get_portfolio_summary(&self) -> Result<PortfolioSummary, CoreError> {
        self.valuation_service
            .summarize(&self.transactions, self.snapshot.as_ref(), &self.catalog)
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if the tracker has been modified since the last save
    /// or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all transactions as a JSON string.
    pub fn export_transactions_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.transactions).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize transactions to JSON: {e}"))
        })
    }

    /// Export all transactions as a CSV string.
    /// Columns: id, symbol, name, quantity, buy_date_time, price_per_unit, currency, fees_toman, note
    #[must_use]
    pub fn export_transactions_to_csv(&self) -> String {
        let mut csv = String::from(
            "id,symbol,name,quantity,buy_date_time,price_per_unit,currency,fees_toman,note\n",
        );
        for tx in &self.transactions {
            let name = self
                .catalog
                .get(&tx.asset_symbol)
                .map(|info| info.name.as_str())
                .unwrap_or("");
            let note = tx.note.as_deref().unwrap_or("");
            // Escape CSV: quote fields containing commas, quotes, or newlines
            let escaped_name = if name.contains(',') || name.contains('"') {
                format!("\"{}\"", name.replace('"', "\"\""))
            } else {
                name.to_string()
            };
            let escaped_note = if note.contains(',') || note.contains('"') || note.contains('\n') {
                format!("\"{}\"", note.replace('"', "\"\""))
            } else {
                note.to_string()
            };
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                tx.id,
                tx.asset_symbol,
                escaped_name,
                tx.quantity,
                tx.buy_date_time.to_rfc3339(),
                tx.buy_price_per_unit,
                tx.buy_currency,
                tx.fees_toman,
                escaped_note,
            ));
        }
        csv
    }

    /// Import transactions from a JSON string. All rows are validated first;
    /// if any row fails, none are imported (all-or-nothing).
    /// Returns the number of transactions imported.
    pub fn import_transactions_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let incoming: Vec<Transaction> = serde_json::from_str(json)?;
        let count = incoming.len();

        // Phase 1: validate every row against a staged copy
        let mut staged = self.transactions.clone();
        for tx in incoming {
            self.transaction_service
                .add(&mut staged, tx, &self.catalog)?;
        }

        // Phase 2: all valid — commit
        self.transactions = staged;
        self.dirty = true;
        Ok(count)
    }

    // ── Feed Availability ───────────────────────────────────────────

    /// Names of the registered price feeds, in priority order.
    #[must_use]
    pub fn feed_names(&self) -> Vec<String> {
        self.registry.feed_names()
    }

    /// Swap the feed registry (custom feeds, offline mocks).
    pub fn set_feed_registry(&mut self, registry: FeedRegistry) {
        self.registry = registry;
    }

    // ── Convenience Helpers ─────────────────────────────────────────

    /// The asset catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Distinct symbols that appear in at least one transaction, in
    /// first-purchase order.
    #[must_use]
    pub fn held_symbols(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.transactions
            .iter()
            .filter_map(|t| {
                if seen.insert(t.asset_symbol.as_str()) {
                    Some(t.asset_symbol.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Timestamp of the earliest purchase.
    #[must_use]
    pub fn earliest_purchase(&self) -> Option<DateTime<Utc>> {
        self.transactions.iter().map(|t| t.buy_date_time).min()
    }

    /// Timestamp of the most recent purchase.
    #[must_use]
    pub fn latest_purchase(&self) -> Option<DateTime<Utc>> {
        self.transactions.iter().map(|t| t.buy_date_time).max()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        catalog: AssetCatalog,
        transactions: Vec<Transaction>,
        snapshot: Option<PriceSnapshot>,
    ) -> Self {
        Self {
            catalog,
            transactions,
            snapshot,
            registry: FeedRegistry::new_with_defaults(),
            transaction_service: TransactionService::new(),
            valuation_service: ValuationService::new(),
            dirty: false,
        }
    }
}

impl Default for TomanTracker {
    fn default() -> Self {
        Self::new()
    }
}
