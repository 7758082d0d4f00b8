use crate::types::{EquilibriumResult, MarketParameters, SurplusResult, TaxIncidence};

// === WELFARE ===

/// Surplus triangles and tax revenue for a taxed market.
///
/// `initial` is the untaxed clearing point, `taxed` the clearing point under
/// `params.tax_rate`. Consumer surplus is bounded above by the demand curve's
/// price intercept, producer surplus below by the supply curve's.
pub fn compute_surplus(
    params: &MarketParameters,
    initial: &EquilibriumResult,
    taxed: &EquilibriumResult,
) -> SurplusResult {
    let q = taxed.quantity;

    let surplus = SurplusResult {
        consumer_surplus: 0.5 * (params.demand_intercept - taxed.buyer_price) * q,
        producer_surplus: 0.5 * (taxed.seller_price - params.supply_intercept) * q,
        deadweight_loss: 0.5 * taxed.price_wedge() * (initial.quantity - q),
        tax_revenue: params.tax_rate * q,
    };

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "surplus",
        tax_rate = params.tax_rate,
        consumer_surplus = surplus.consumer_surplus,
        producer_surplus = surplus.producer_surplus,
        deadweight_loss = surplus.deadweight_loss,
        tax_revenue = surplus.tax_revenue,
    );

    surplus
}

/// Split of the tax between buyers and sellers.
///
/// With no tax there is nothing to split; the share then reports the split a
/// marginal tax would produce, which depends only on the slopes.
pub fn compute_incidence(
    params: &MarketParameters,
    initial: &EquilibriumResult,
    taxed: &EquilibriumResult,
) -> TaxIncidence {
    let buyer_burden = taxed.buyer_price - initial.buyer_price;
    let seller_burden = initial.seller_price - taxed.seller_price;
    let buyer_share = if params.tax_rate > crate::EPSILON {
        buyer_burden / params.tax_rate
    } else {
        -params.demand_slope / (params.supply_slope - params.demand_slope)
    };

    TaxIncidence {
        buyer_burden,
        seller_burden,
        buyer_share: buyer_share.clamp(0.0, 1.0),
    }
}
