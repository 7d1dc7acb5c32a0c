use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::catalog::AssetCatalog;
use crate::models::price::PriceSnapshot;
use crate::models::summary::{AssetSummary, PortfolioSummary};
use crate::models::transaction::{Currency, Transaction};

/// Computes the portfolio summary: per-asset holdings, cost basis,
/// profit/loss and allocation, all in Toman.
///
/// Pure business logic — no I/O, no API calls, no mutation of inputs.
/// Safe to call concurrently on independent input snapshots.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value a list of transactions against a price snapshot.
    ///
    /// Returns the zero summary (all totals 0, empty asset list) when the
    /// snapshot is absent or there are no transactions. Transactions that
    /// reference a symbol outside the catalog, or carry a non-positive
    /// quantity, are rejected with an error before any aggregation — even
    /// when the zero state would otherwise apply.
    pub fn summarize(
        &self,
        transactions: &[Transaction],
        snapshot: Option<&PriceSnapshot>,
        catalog: &AssetCatalog,
    ) -> Result<PortfolioSummary, CoreError> {
        for tx in transactions {
            if !catalog.contains(&tx.asset_symbol) {
                return Err(CoreError::UnknownAsset(tx.asset_symbol.clone()));
            }
            if tx.quantity <= 0.0 || !tx.quantity.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Transaction {} has non-positive quantity {}",
                    tx.id, tx.quantity
                )));
            }
        }

        // No prices or no holdings is a defined zero state, not an error
        let Some(snapshot) = snapshot else {
            return Ok(PortfolioSummary::default());
        };
        if transactions.is_empty() {
            return Ok(PortfolioSummary::default());
        }

        // 1. Current Toman price per symbol (missing symbols price at 0)
        let prices = snapshot.toman_price_index();

        // 2. Group by symbol, accumulating quantity and Toman cost basis.
        //    Groups keep first-encounter order so equal-value assets sort
        //    deterministically later.
        let mut assets: Vec<AssetSummary> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for tx in transactions {
            let pos = match index.get(&tx.asset_symbol) {
                Some(&pos) => pos,
                None => {
                    // contains() above guarantees the lookup succeeds
                    let info = catalog
                        .get(&tx.asset_symbol)
                        .ok_or_else(|| CoreError::UnknownAsset(tx.asset_symbol.clone()))?;
                    assets.push(AssetSummary {
                        symbol: tx.asset_symbol.clone(),
                        name: info.name.clone(),
                        kind: info.kind,
                        total_quantity: 0.0,
                        current_price_toman: prices
                            .get(&tx.asset_symbol)
                            .copied()
                            .unwrap_or(0.0),
                        current_value_toman: 0.0, // filled below
                        cost_basis_toman: 0.0,
                        pnl_toman: 0.0,       // filled below
                        pnl_percent: 0.0,     // filled below
                        allocation_percent: 0.0, // filled below
                    });
                    index.insert(tx.asset_symbol.clone(), assets.len() - 1);
                    assets.len() - 1
                }
            };

            let entry = &mut assets[pos];
            entry.total_quantity += tx.quantity;

            // USD purchases convert at the snapshot rate; the flat fee is
            // already in Toman and is added unconverted.
            let cost = match tx.buy_currency {
                Currency::Toman => tx.quantity * tx.buy_price_per_unit,
                Currency::Usd => tx.quantity * tx.buy_price_per_unit * snapshot.usd_to_toman,
            };
            entry.cost_basis_toman += cost + tx.fees_toman;
        }

        // 3. Per-asset value and profit/loss, accumulating portfolio totals
        let mut total_value = 0.0;
        let mut total_basis = 0.0;

        for asset in &mut assets {
            asset.current_value_toman = asset.total_quantity * asset.current_price_toman;
            asset.pnl_toman = asset.current_value_toman - asset.cost_basis_toman;
            asset.pnl_percent = if asset.cost_basis_toman > 0.0 {
                (asset.pnl_toman / asset.cost_basis_toman) * 100.0
            } else {
                0.0
            };
            total_value += asset.current_value_toman;
            total_basis += asset.cost_basis_toman;
        }

        // 4. Allocation needs the final total, so it gets its own pass
        for asset in &mut assets {
            asset.allocation_percent = if total_value > 0.0 {
                (asset.current_value_toman / total_value) * 100.0
            } else {
                0.0
            };
        }

        // 5. Largest position first; stable sort keeps encounter order on ties
        assets.sort_by(|a, b| {
            b.current_value_toman
                .partial_cmp(&a.current_value_toman)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_pnl = total_value - total_basis;
        let total_pnl_percent = if total_basis > 0.0 {
            (total_pnl / total_basis) * 100.0
        } else {
            0.0
        };

        Ok(PortfolioSummary {
            total_value_toman: total_value,
            total_cost_basis_toman: total_basis,
            total_pnl_toman: total_pnl,
            total_pnl_percent,
            assets,
        })
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
