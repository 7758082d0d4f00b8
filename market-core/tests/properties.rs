//! Properties that must hold for every tax the slider can produce.

use approx::assert_abs_diff_eq;
use market_core::{
    MarketModel, MarketParameters, QuantityDomain, TaxSlider, build_chart_geometry,
    compute_equilibrium, compute_surplus,
};

fn slider_taxes() -> Vec<f64> {
    let slider = TaxSlider::default();
    let steps = ((slider.max - slider.min) / slider.step) as usize;
    (0..=steps).map(|i| slider.min + slider.step * i as f64).collect()
}

#[test]
fn wedge_equals_tax() {
    let model = MarketModel::default();
    for tax in slider_taxes() {
        let outcome = model.evaluate(tax).unwrap();
        assert_abs_diff_eq!(outcome.taxed.price_wedge(), tax, epsilon = 1e-9);
    }
}

#[test]
fn welfare_measures_are_non_negative() {
    let model = MarketModel::default();
    for tax in slider_taxes() {
        let s = model.evaluate(tax).unwrap().surplus;
        assert!(s.consumer_surplus >= 0.0, "tax {tax}: {s:?}");
        assert!(s.producer_surplus >= 0.0, "tax {tax}: {s:?}");
        assert!(s.deadweight_loss >= 0.0, "tax {tax}: {s:?}");
        assert!(s.tax_revenue >= 0.0, "tax {tax}: {s:?}");
    }
}

#[test]
fn lost_surplus_is_exactly_deadweight_loss() {
    let model = MarketModel::default();
    let untaxed = model.evaluate(0.0).unwrap().surplus.total_welfare();
    assert_eq!(untaxed, 2500.0);
    for tax in slider_taxes() {
        let s = model.evaluate(tax).unwrap().surplus;
        assert_abs_diff_eq!(s.total_welfare() + s.deadweight_loss, untaxed, epsilon = 1e-9);
    }
}

#[test]
fn regions_have_the_areas_they_shade() {
    let model = MarketModel::default();
    for tax in slider_taxes() {
        let outcome = model.evaluate(tax).unwrap();
        let (g, s) = (&outcome.geometry, &outcome.surplus);
        assert_abs_diff_eq!(g.consumer_surplus.signed_area(), s.consumer_surplus, epsilon = 1e-9);
        assert_abs_diff_eq!(g.producer_surplus.signed_area(), s.producer_surplus, epsilon = 1e-9);
        assert_abs_diff_eq!(g.deadweight_loss.signed_area(), s.deadweight_loss, epsilon = 1e-9);
    }
}

#[test]
fn buyer_price_rises_and_seller_price_falls_with_tax() {
    let model = MarketModel::default();
    let outcomes: Vec<_> = slider_taxes()
        .into_iter()
        .map(|t| model.evaluate(t).unwrap().taxed)
        .collect();
    for pair in outcomes.windows(2) {
        assert!(pair[1].buyer_price > pair[0].buyer_price);
        assert!(pair[1].seller_price < pair[0].seller_price);
        assert!(pair[1].quantity < pair[0].quantity);
    }
}

#[test]
fn general_curves_keep_the_same_invariants() {
    // P = 80 - 2Q, P = 10 + 0.5Q; boundary tax is 70.
    let curves = MarketParameters {
        demand_intercept: 80.0,
        demand_slope: -2.0,
        supply_intercept: 10.0,
        supply_slope: 0.5,
        tax_rate: 0.0,
    };
    let domain = QuantityDomain::new(0.0, 40.0, 81).unwrap();
    let initial = compute_equilibrium(&curves).unwrap();
    assert_abs_diff_eq!(initial.quantity, 28.0, epsilon = 1e-9);
    assert_abs_diff_eq!(initial.buyer_price, 24.0, epsilon = 1e-9);

    for tax in [0.0, 7.0, 35.0, 69.0, 70.0] {
        let params = curves.with_tax(tax);
        let taxed = compute_equilibrium(&params).unwrap();
        let s = compute_surplus(&params, &initial, &taxed);
        let g = build_chart_geometry(&initial, &taxed, &params, &domain).unwrap();

        assert_abs_diff_eq!(taxed.price_wedge(), tax, epsilon = 1e-9);
        assert!(taxed.seller_price >= curves.supply_intercept - 1e-9);
        assert_abs_diff_eq!(g.consumer_surplus.area(), s.consumer_surplus, epsilon = 1e-9);
        assert_abs_diff_eq!(g.producer_surplus.area(), s.producer_surplus, epsilon = 1e-9);
        assert_abs_diff_eq!(g.deadweight_loss.area(), s.deadweight_loss, epsilon = 1e-9);
    }
    assert!(compute_equilibrium(&curves.with_tax(71.0)).is_err());
}
