//! Worked examples from the classroom model: demand `P = 100 - Q`, supply `P = Q`.

use approx::assert_abs_diff_eq;
use market_core::{MarketError, MarketModel, TaxMarket};
use rstest::rstest;

#[test]
fn untaxed_market() {
    let outcome = MarketModel::default().evaluate(0.0).unwrap();

    assert_eq!(outcome.taxed, outcome.initial);
    assert_eq!(outcome.taxed.buyer_price, 50.0);
    assert_eq!(outcome.taxed.seller_price, 50.0);
    assert_eq!(outcome.taxed.quantity, 50.0);
    assert_eq!(outcome.surplus.deadweight_loss, 0.0);
    assert_eq!(outcome.surplus.tax_revenue, 0.0);
}

#[test]
fn tax_of_twenty() {
    let outcome = MarketModel::default().evaluate(20.0).unwrap();
    let s = &outcome.summary;

    assert_eq!(
        (s.buyer_price, s.seller_price, s.quantity),
        (60.0, 40.0, 40.0)
    );
    assert_eq!(s.consumer_surplus, 800.0);
    assert_eq!(s.producer_surplus, 800.0);
    assert_eq!(s.deadweight_loss, 100.0);
    assert_eq!(s.tax_revenue, 800.0);

    let [prices, welfare] = s.lines();
    assert_eq!(prices, "Pd = 60.00, Ps = 40.00, Qe = 40.00");
    assert_eq!(welfare, "CS = 800.00, PS = 800.00, DWL = 100.00, Tx = 800.00");
}

#[test]
fn tax_of_hundred_reaches_boundary_without_going_negative() {
    let outcome = MarketModel::default().evaluate(100.0).unwrap();

    assert_eq!(outcome.taxed.seller_price, 0.0);
    assert_eq!(outcome.taxed.quantity, 0.0);
    assert_eq!(outcome.surplus.consumer_surplus, 0.0);
    assert_eq!(outcome.surplus.producer_surplus, 0.0);
    assert_eq!(outcome.surplus.tax_revenue, 0.0);
    // The whole untaxed surplus is lost.
    assert_eq!(outcome.surplus.deadweight_loss, 2500.0);
}

#[rstest]
#[case(100.5)]
#[case(150.0)]
#[case(1_000.0)]
fn taxes_past_boundary_are_reported(#[case] tax: f64) {
    let err = MarketModel::default().evaluate(tax).unwrap_err();
    match err {
        MarketError::NoEquilibrium {
            tax_rate,
            seller_price,
            quantity,
        } => {
            assert_eq!(tax_rate, tax);
            assert!(seller_price < 0.0 && quantity < 0.0);
        }
        other => panic!("expected NoEquilibrium, got {other:?}"),
    }
}

#[rstest]
#[case(10.0, 55.0, 45.0, 45.0)]
#[case(30.0, 65.0, 35.0, 35.0)]
#[case(50.0, 75.0, 25.0, 25.0)]
#[case(80.0, 90.0, 10.0, 10.0)]
fn incidence_splits_evenly(
    #[case] tax: f64,
    #[case] buyer: f64,
    #[case] seller: f64,
    #[case] quantity: f64,
) {
    let outcome = MarketModel::default().evaluate(tax).unwrap();
    assert_abs_diff_eq!(outcome.taxed.buyer_price, buyer, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.taxed.seller_price, seller, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.taxed.quantity, quantity, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.incidence.buyer_burden, tax / 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.incidence.seller_burden, tax / 2.0, epsilon = 1e-9);
}

#[test]
fn handle_serves_figure_and_outcome_for_same_tax() {
    let market = TaxMarket::new();
    let outcome = market.outcome(20.0).unwrap();
    let figure = market.render(20.0).unwrap();

    let cs = &figure.traces[3];
    assert_eq!(cs.x, vec![0.0, 40.0, 0.0]);
    assert_eq!(cs.y, vec![60.0, 60.0, 100.0]);
    assert_eq!(figure.layout.x_range, (0.0, 100.0));
    assert_eq!(figure.layout.y_range, (0.0, 100.0));
    assert_eq!(outcome.geometry.consumer_surplus.vertices.len(), 3);
}

#[test]
fn outcome_serialises_for_the_front_end() {
    let outcome = TaxMarket::new().outcome(20.0).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["summary"]["buyer_price"], 60.0);
    assert_eq!(json["surplus"]["deadweight_loss"], 100.0);
    assert_eq!(json["geometry"]["demand"]["points"].as_array().map(Vec::len), Some(500));
}
