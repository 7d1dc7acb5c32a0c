use std::cmp::Ordering;

use crate::errors::CoreError;
use crate::models::catalog::AssetCatalog;
use crate::models::transaction::{Transaction, TransactionSortOrder};

/// Manages the purchase log: validation, add/update/remove, sorted and
/// filtered views.
///
/// Pure business logic — no I/O. The valuation engine assumes its input
/// passed through here, so every mutating entry point validates first.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a transaction against the catalog.
    ///
    /// Rules:
    /// - Symbol must exist in the asset catalog
    /// - Quantity must be positive and finite
    /// - Purchase price must be non-negative and finite
    /// - Fees must be non-negative and finite
    pub fn validate(&self, tx: &Transaction, catalog: &AssetCatalog) -> Result<(), CoreError> {
        if !catalog.contains(&tx.asset_symbol) {
            return Err(CoreError::UnknownAsset(tx.asset_symbol.clone()));
        }
        if tx.quantity <= 0.0 || !tx.quantity.is_finite() {
            return Err(CoreError::ValidationError(
                "Quantity must be positive".into(),
            ));
        }
        if tx.buy_price_per_unit < 0.0 || !tx.buy_price_per_unit.is_finite() {
            return Err(CoreError::ValidationError(
                "Purchase price must be non-negative".into(),
            ));
        }
        if tx.fees_toman < 0.0 || !tx.fees_toman.is_finite() {
            return Err(CoreError::ValidationError(
                "Fees must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Append a new transaction. Rejects duplicate identifiers.
    pub fn add(
        &self,
        transactions: &mut Vec<Transaction>,
        tx: Transaction,
        catalog: &AssetCatalog,
    ) -> Result<(), CoreError> {
        self.validate(&tx, catalog)?;
        if transactions.iter().any(|t| t.id == tx.id) {
            return Err(CoreError::ValidationError(format!(
                "Transaction id {} already exists",
                tx.id
            )));
        }
        transactions.push(tx);
        Ok(())
    }

    /// Replace the transaction with the same id, or append when no match
    /// exists. The replaced slot keeps its position in the list.
    pub fn upsert(
        &self,
        transactions: &mut Vec<Transaction>,
        tx: Transaction,
        catalog: &AssetCatalog,
    ) -> Result<(), CoreError> {
        self.validate(&tx, catalog)?;
        match transactions.iter().position(|t| t.id == tx.id) {
            Some(idx) => transactions[idx] = tx,
            None => transactions.push(tx),
        }
        Ok(())
    }

    /// Replace an existing transaction in place, matched by id.
    /// Unlike [`upsert`](Self::upsert), a missing id is an error.
    pub fn replace(
        &self,
        transactions: &mut [Transaction],
        updated: Transaction,
        catalog: &AssetCatalog,
    ) -> Result<(), CoreError> {
        self.validate(&updated, catalog)?;
        let idx = transactions
            .iter()
            .position(|t| t.id == updated.id)
            .ok_or_else(|| CoreError::TransactionNotFound(updated.id.clone()))?;
        transactions[idx] = updated;
        Ok(())
    }

    /// Remove a transaction by id, returning the removed record.
    pub fn remove(
        &self,
        transactions: &mut Vec<Transaction>,
        id: &str,
    ) -> Result<Transaction, CoreError> {
        let idx = transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
        Ok(transactions.remove(idx))
    }

    /// Set or clear the note on an existing transaction.
    pub fn set_note(
        &self,
        transactions: &mut [Transaction],
        id: &str,
        note: Option<String>,
    ) -> Result<(), CoreError> {
        let tx = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
        tx.note = note;
        Ok(())
    }

    /// All transactions for one symbol, in list order.
    pub fn for_asset<'a>(
        &self,
        transactions: &'a [Transaction],
        symbol: &str,
    ) -> Vec<&'a Transaction> {
        let wanted = symbol.to_uppercase();
        transactions
            .iter()
            .filter(|t| t.asset_symbol == wanted)
            .collect()
    }

    /// Sorted view of the transaction list. Equal keys keep list order.
    pub fn sorted<'a>(
        &self,
        transactions: &'a [Transaction],
        order: TransactionSortOrder,
    ) -> Vec<&'a Transaction> {
        let mut view: Vec<&Transaction> = transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => {
                view.sort_by(|a, b| b.buy_date_time.cmp(&a.buy_date_time));
            }
            TransactionSortOrder::DateAsc => {
                view.sort_by(|a, b| a.buy_date_time.cmp(&b.buy_date_time));
            }
            TransactionSortOrder::QuantityDesc => {
                view.sort_by(|a, b| {
                    b.quantity.partial_cmp(&a.quantity).unwrap_or(Ordering::Equal)
                });
            }
            TransactionSortOrder::QuantityAsc => {
                view.sort_by(|a, b| {
                    a.quantity.partial_cmp(&b.quantity).unwrap_or(Ordering::Equal)
                });
            }
            TransactionSortOrder::SymbolAsc => {
                view.sort_by(|a, b| a.asset_symbol.cmp(&b.asset_symbol));
            }
            TransactionSortOrder::SymbolDesc => {
                view.sort_by(|a, b| b.asset_symbol.cmp(&a.asset_symbol));
            }
        }
        view
    }

    /// Case-insensitive search over symbol, catalog display name and note.
    pub fn search<'a>(
        &self,
        transactions: &'a [Transaction],
        catalog: &AssetCatalog,
        query: &str,
    ) -> Vec<&'a Transaction> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return transactions.iter().collect();
        }
        transactions
            .iter()
            .filter(|t| {
                if t.asset_symbol.to_lowercase().contains(&needle) {
                    return true;
                }
                if let Some(info) = catalog.get(&t.asset_symbol) {
                    if info.name.to_lowercase().contains(&needle) {
                        return true;
                    }
                }
                t.note
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
