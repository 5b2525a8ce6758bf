//! Property-style tests for the Growth Derivation Engine.

use growthlens_tests::{derive, Field, FinancialRecord, GrowthResult};

fn record(stock_price: f64, fcf_per_share: f64, wacc: f64) -> FinancialRecord {
    FinancialRecord::new(stock_price, fcf_per_share, wacc, "USD").expect("record is valid")
}

#[test]
fn positive_price_always_yields_finite_rate_matching_formula() {
    let cases = [
        (150.75, 5.20, 8.5),
        (1.0, 0.0, 0.0),
        (0.01, -400.0, 99.9),
        (25_000.0, 1_000.0, 12.0),
        (3.5, -0.01, 7.25),
    ];

    for (price, fcf, wacc) in cases {
        let result = derive(&record(price, fcf, wacc));
        let rate = result.rate.unwrap_or_else(|| {
            panic!("rate must be defined for positive price {price}")
        });
        assert!(rate.is_finite());
        assert!((rate - (wacc / 100.0 - fcf / price)).abs() < 1e-12);
    }
}

#[test]
fn non_positive_price_always_yields_undefined_rate() {
    for price in [0.0, -0.0, -1.0, -150.75] {
        let result = derive(&record(price, 5.20, 8.5));
        assert_eq!(result.rate, None, "price {price} must be undefined");
    }
}

#[test]
fn reference_scenario_is_about_five_percent() {
    let result = derive(&record(150.75, 5.20, 8.5));
    let percent = result.as_percent().expect("rate must be defined");
    assert!((percent - 5.05).abs() < 0.01, "got {percent}");
}

#[test]
fn zero_price_reference_scenario_is_undefined() {
    assert_eq!(derive(&record(0.0, 5.20, 8.5)), GrowthResult::undefined());
}

#[test]
fn derivation_is_deterministic_for_an_unchanged_record() {
    let subject = record(87.3, -2.4, 11.1);
    let first = derive(&subject);
    let second = derive(&subject);
    assert_eq!(first, second);
}

#[test]
fn each_field_moves_the_rate_in_its_own_direction() {
    let base = record(100.0, 4.0, 8.0);
    let base_rate = derive(&base).rate.expect("defined");

    // Raising WACC raises the rate.
    let mut subject = base.clone();
    subject.set(Field::Wacc, 9.0).expect("edit applies");
    assert!(derive(&subject).rate.expect("defined") > base_rate);

    // Raising FCF per share lowers the rate.
    let mut subject = base.clone();
    subject.set(Field::FcfPerShare, 5.0).expect("edit applies");
    assert!(derive(&subject).rate.expect("defined") < base_rate);

    // Raising the price (with positive FCF) raises the rate.
    let mut subject = base.clone();
    subject.set(Field::StockPrice, 200.0).expect("edit applies");
    assert!(derive(&subject).rate.expect("defined") > base_rate);
}

#[test]
fn negative_fcf_implies_growth_above_wacc() {
    // A market paying a positive price for negative FCF is pricing in growth
    // beyond the cost of capital.
    let result = derive(&record(50.0, -2.0, 8.0));
    let rate = result.rate.expect("defined");
    assert!(rate > 0.08);
}
