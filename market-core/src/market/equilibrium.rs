use crate::error::{MarketError, Result};
use crate::types::{EquilibriumResult, MarketParameters};

// === CLOSED-FORM CLEARING ===

/// Solve the two linear curves for the clearing point under a per-unit tax.
///
/// Buyers pay `P_b` on the demand curve, sellers keep `P_s` on the supply
/// curve, and the two differ by the tax:
///
/// ```text
/// P_b = demand_intercept + demand_slope * Q
/// P_s = supply_intercept + supply_slope * Q
/// P_b - P_s = t
/// => Q = (demand_intercept - supply_intercept - t) / (supply_slope - demand_slope)
/// ```
///
/// Returns [`MarketError::NoEquilibrium`] when the tax is large enough to push
/// the seller price or the traded quantity below zero. Hitting zero exactly is
/// a valid (degenerate) market.
pub fn compute_equilibrium(params: &MarketParameters) -> Result<EquilibriumResult> {
    params.validate()?;

    let t = params.tax_rate;
    let quantity =
        (params.demand_intercept - params.supply_intercept - t) / (params.supply_slope - params.demand_slope);
    let seller_price = params.supply_price(quantity);

    if seller_price < -crate::EPSILON || quantity < -crate::EPSILON {
        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "domain_violation",
            tax_rate = t,
            seller_price = seller_price,
            quantity = quantity,
        );
        return Err(MarketError::NoEquilibrium {
            tax_rate: t,
            seller_price,
            quantity,
        });
    }

    // Rounding noise at the boundary becomes an exact zero before either
    // price is read off its curve, so both sit on the curves at that point.
    let quantity = snap_non_negative(quantity);
    let eq = EquilibriumResult {
        buyer_price: params.demand_price(quantity),
        seller_price: snap_non_negative(params.supply_price(quantity)),
        quantity,
    };

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "equilibrium",
        tax_rate = t,
        buyer_price = eq.buyer_price,
        seller_price = eq.seller_price,
        quantity = eq.quantity,
    );

    Ok(eq)
}

fn snap_non_negative(x: f64) -> f64 {
    if x <= 0.0 { 0.0 } else { x }
}

/// Equilibrium of the same market with the tax removed.
pub fn compute_untaxed_equilibrium(params: &MarketParameters) -> Result<EquilibriumResult> {
    compute_equilibrium(&params.untaxed())
}
