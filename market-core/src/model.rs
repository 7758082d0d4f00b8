use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::chart::{ChartGeometry, QuantityDomain, build_chart_geometry};
use crate::error::Result;
use crate::market::{compute_equilibrium, compute_incidence, compute_surplus};
use crate::summary::Summary;
use crate::types::{EquilibriumResult, MarketParameters, SurplusResult, TaxIncidence};

/// Everything derived from one tax value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MarketOutcome {
    pub params: MarketParameters,
    pub initial: EquilibriumResult,
    pub taxed: EquilibriumResult,
    pub surplus: SurplusResult,
    pub incidence: TaxIncidence,
    pub geometry: ChartGeometry,
    pub summary: Summary,
}

/// Fixed curves plus the sampling used for the chart. Holds no per-tax state;
/// every [`MarketModel::evaluate`] starts from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarketModel {
    curves: MarketParameters,
    domain: QuantityDomain,
}

impl MarketModel {
    /// The tax in `curves` is ignored; it is supplied per evaluation.
    pub fn new(curves: MarketParameters, domain: QuantityDomain) -> Result<Self> {
        let curves = curves.untaxed();
        curves.validate()?;
        domain.validate()?;
        Ok(Self { curves, domain })
    }

    pub fn curves(&self) -> &MarketParameters {
        &self.curves
    }

    pub fn domain(&self) -> &QuantityDomain {
        &self.domain
    }

    pub fn evaluate(&self, tax_rate: f64) -> Result<MarketOutcome> {
        let params = self.curves.with_tax(tax_rate);

        let initial = compute_equilibrium(&self.curves)?;
        let taxed = compute_equilibrium(&params)?;
        let surplus = compute_surplus(&params, &initial, &taxed);
        let incidence = compute_incidence(&params, &initial, &taxed);
        let geometry = build_chart_geometry(&initial, &taxed, &params, &self.domain)?;
        let summary = Summary::new(&taxed, &surplus);

        Ok(MarketOutcome {
            params,
            initial,
            taxed,
            surplus,
            incidence,
            geometry,
            summary,
        })
    }
}
