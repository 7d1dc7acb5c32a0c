use serde::{Deserialize, Serialize};

use super::catalog::AssetKind;

/// Per-asset aggregate, recomputed fresh on every valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    /// Catalog symbol
    pub symbol: String,

    /// Display name from the catalog
    pub name: String,

    /// Classification from the catalog
    #[serde(rename = "type")]
    pub kind: AssetKind,

    /// Sum of purchased quantities
    pub total_quantity: f64,

    /// Current unit price in Toman (0 when the snapshot has no rate)
    pub current_price_toman: f64,

    /// total_quantity × current_price_toman
    pub current_value_toman: f64,

    /// Total paid to acquire the held quantity, in Toman, fees included
    pub cost_basis_toman: f64,

    /// current_value_toman − cost_basis_toman
    pub pnl_toman: f64,

    /// (pnl_toman / cost_basis_toman) × 100, or 0 when the cost basis is 0
    pub pnl_percent: f64,

    /// This asset's share of total portfolio value × 100, or 0 when the
    /// total value is 0
    pub allocation_percent: f64,
}

/// Aggregate result of a portfolio valuation — the sole output of the
/// engine. Created fresh on every computation; callers may discard or
/// cache it freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Total current value in Toman
    pub total_value_toman: f64,

    /// Total cost basis in Toman
    pub total_cost_basis_toman: f64,

    /// total_value_toman − total_cost_basis_toman
    pub total_pnl_toman: f64,

    /// (total_pnl_toman / total_cost_basis_toman) × 100, or 0 when the
    /// total cost basis is 0
    pub total_pnl_percent: f64,

    /// Per-asset breakdown, sorted descending by current value with a
    /// deterministic order for equal values
    pub assets: Vec<AssetSummary>,
}

impl PortfolioSummary {
    /// The asset with the highest profit/loss percent.
    ///
    /// Derived view for the overview screen; not stored in the summary.
    /// Returns `None` for an empty portfolio — callers must handle that
    /// case instead of assuming a default element. Ties keep the asset
    /// listed first.
    #[must_use]
    pub fn best_performer(&self) -> Option<&AssetSummary> {
        let mut best: Option<&AssetSummary> = None;
        for asset in &self.assets {
            match best {
                Some(current) if asset.pnl_percent <= current.pnl_percent => {}
                _ => best = Some(asset),
            }
        }
        best
    }

    /// The asset with the lowest profit/loss percent.
    ///
    /// Same contract as [`best_performer`](Self::best_performer): `None`
    /// when the portfolio is empty, first-listed asset wins ties.
    #[must_use]
    pub fn worst_performer(&self) -> Option<&AssetSummary> {
        let mut worst: Option<&AssetSummary> = None;
        for asset in &self.assets {
            match worst {
                Some(current) if asset.pnl_percent >= current.pnl_percent => {}
                _ => worst = Some(asset),
            }
        }
        worst
    }
}
