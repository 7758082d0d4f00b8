use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::error::{MarketError, Result};

/// Tolerance used when comparing prices and quantities.
pub const EPSILON: f64 = 1e-9;

// ============================================================================
// Market Parameters - Two linear curves and a per-unit tax
// ============================================================================

/// Linear market in inverse form.
///
/// Demand: `P = demand_intercept + demand_slope * Q`
/// Supply: `P = supply_intercept + supply_slope * Q`
///
/// A per-unit tax `tax_rate` is levied on sellers, which shifts the supply
/// curve up by the tax: sellers receive `P - tax_rate` for a buyer price `P`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct MarketParameters {
    pub demand_intercept: f64,
    pub demand_slope: f64,
    pub supply_intercept: f64,
    pub supply_slope: f64,
    pub tax_rate: f64,
}

impl Default for MarketParameters {
    /// Demand `P = 100 - Q`, supply `P = Q`, no tax.
    fn default() -> Self {
        Self {
            demand_intercept: 100.0,
            demand_slope: -1.0,
            supply_intercept: 0.0,
            supply_slope: 1.0,
            tax_rate: 0.0,
        }
    }
}

impl MarketParameters {
    /// Same curves, different tax.
    pub fn with_tax(self, tax_rate: f64) -> Self {
        Self { tax_rate, ..self }
    }

    /// Same curves, no tax.
    pub fn untaxed(self) -> Self {
        self.with_tax(0.0)
    }

    /// Buyer price on the demand curve at quantity `q`.
    pub fn demand_price(&self, q: f64) -> f64 {
        self.demand_intercept + self.demand_slope * q
    }

    /// Seller price on the untaxed supply curve at quantity `q`.
    pub fn supply_price(&self, q: f64) -> f64 {
        self.supply_intercept + self.supply_slope * q
    }

    /// Buyer price on the tax-shifted supply curve at quantity `q`.
    pub fn taxed_supply_price(&self, q: f64) -> f64 {
        self.supply_price(q) + self.tax_rate
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("demand_intercept", self.demand_intercept),
            ("demand_slope", self.demand_slope),
            ("supply_intercept", self.supply_intercept),
            ("supply_slope", self.supply_slope),
            ("tax_rate", self.tax_rate),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MarketError::InvalidParameters(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.demand_slope >= 0.0 {
            return Err(MarketError::InvalidParameters(format!(
                "demand must slope downward, got slope {}",
                self.demand_slope
            )));
        }
        if self.supply_slope <= 0.0 {
            return Err(MarketError::InvalidParameters(format!(
                "supply must slope upward, got slope {}",
                self.supply_slope
            )));
        }
        if self.tax_rate < 0.0 {
            return Err(MarketError::InvalidParameters(format!(
                "tax rate must be non-negative, got {}",
                self.tax_rate
            )));
        }
        if self.demand_intercept <= self.supply_intercept {
            return Err(MarketError::InvalidParameters(format!(
                "demand intercept {} must lie above supply intercept {}",
                self.demand_intercept, self.supply_intercept
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Results
// ============================================================================

/// Market clearing point. Without a tax both prices coincide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct EquilibriumResult {
    pub buyer_price: f64,
    pub seller_price: f64,
    pub quantity: f64,
}

impl EquilibriumResult {
    /// Gap between what buyers pay and sellers keep; equals the tax.
    pub fn price_wedge(&self) -> f64 {
        self.buyer_price - self.seller_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct SurplusResult {
    pub consumer_surplus: f64,
    pub producer_surplus: f64,
    pub deadweight_loss: f64,
    pub tax_revenue: f64,
}

impl SurplusResult {
    /// Surplus still realised after the tax (revenue counts as surplus).
    pub fn total_welfare(&self) -> f64 {
        self.consumer_surplus + self.producer_surplus + self.tax_revenue
    }
}

/// How the price effect of the tax is split between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct TaxIncidence {
    /// Rise in the price buyers pay.
    pub buyer_burden: f64,
    /// Fall in the price sellers keep.
    pub seller_burden: f64,
    /// Fraction of the tax borne by buyers, in [0, 1].
    pub buyer_share: f64,
}

impl TaxIncidence {
    pub fn seller_share(&self) -> f64 {
        1.0 - self.buyer_share
    }
}
