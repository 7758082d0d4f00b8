use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::types::{EquilibriumResult, SurplusResult};

/// Rounds to cents; a result of zero is always `+0.0` so it never prints as `-0.00`.
fn round2(x: f64) -> f64 {
    let rounded = (x * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Headline numbers shown under the chart, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Summary {
    pub buyer_price: f64,
    pub seller_price: f64,
    pub quantity: f64,
    pub consumer_surplus: f64,
    pub producer_surplus: f64,
    pub deadweight_loss: f64,
    pub tax_revenue: f64,
}

impl Summary {
    pub fn new(taxed: &EquilibriumResult, surplus: &SurplusResult) -> Self {
        Self {
            buyer_price: round2(taxed.buyer_price),
            seller_price: round2(taxed.seller_price),
            quantity: round2(taxed.quantity),
            consumer_surplus: round2(surplus.consumer_surplus),
            producer_surplus: round2(surplus.producer_surplus),
            deadweight_loss: round2(surplus.deadweight_loss),
            tax_revenue: round2(surplus.tax_revenue),
        }
    }

    /// Prices line and welfare line, e.g. `Pd = 60.00, Ps = 40.00, Qe = 40.00`.
    pub fn lines(&self) -> [String; 2] {
        [
            format!(
                "Pd = {:.2}, Ps = {:.2}, Qe = {:.2}",
                self.buyer_price, self.seller_price, self.quantity
            ),
            format!(
                "CS = {:.2}, PS = {:.2}, DWL = {:.2}, Tx = {:.2}",
                self.consumer_surplus, self.producer_surplus, self.deadweight_loss, self.tax_revenue
            ),
        ]
    }
}
