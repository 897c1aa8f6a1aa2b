use loan_estimator::app::pipeline::estimate;
use loan_estimator::domain::{DEFAULT_TERMS, RateTable, ZeroRatePolicy};
use loan_estimator::payment::{calculate_payment, monthly_payment};
use loan_estimator::rates::interest_rate;
use proptest::prelude::*;

const POLICY: ZeroRatePolicy = ZeroRatePolicy::StraightLine;

fn expected_rate(score: f64) -> f64 {
    if score < 580.0 {
        10.0
    } else if score < 670.0 {
        7.1
    } else if score < 740.0 {
        6.5
    } else if score < 800.0 {
        6.0
    } else {
        5.5
    }
}

proptest! {
    #[test]
    fn rate_matches_band(score in 0.0f64..2_000.0) {
        prop_assert_eq!(interest_rate(score, &RateTable::default()), expected_rate(score));
    }

    #[test]
    fn rate_never_improves_as_score_drops(a in 300u16..=850, b in 300u16..=850) {
        let table = RateTable::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(interest_rate(f64::from(lo), &table) >= interest_rate(f64::from(hi), &table));
    }

    #[test]
    fn payment_increases_with_principal(
        p in 1.0f64..1_000_000.0,
        extra in 1.0f64..100_000.0,
        rate in 0.5f64..25.0,
        term in 1u32..400,
    ) {
        prop_assert!(monthly_payment(p + extra, rate, term, POLICY) > monthly_payment(p, rate, term, POLICY));
    }

    #[test]
    fn payment_increases_with_rate(
        p in 100.0f64..1_000_000.0,
        rate in 0.5f64..25.0,
        bump in 0.1f64..5.0,
        term in 2u32..400,
    ) {
        prop_assert!(monthly_payment(p, rate + bump, term, POLICY) > monthly_payment(p, rate, term, POLICY));
    }

    #[test]
    fn payment_decreases_with_term(
        p in 100.0f64..1_000_000.0,
        rate in 0.5f64..25.0,
        term in 1u32..360,
        more in 1u32..40,
    ) {
        prop_assert!(monthly_payment(p, rate, term + more, POLICY) < monthly_payment(p, rate, term, POLICY));
    }

    #[test]
    fn payment_covers_principal_and_interest(
        p in 100.0f64..1_000_000.0,
        rate in 0.5f64..25.0,
        term in 1u32..400,
    ) {
        let payment = monthly_payment(p, rate, term, POLICY);
        prop_assert!(payment * f64::from(term) > p);
        prop_assert!(payment > p * rate / 1_200.0);
    }

    #[test]
    fn calls_are_repeatable(p in -1e6f64..1e6, score in 300.0f64..850.0, term in 1u32..120) {
        let table = RateTable::default();
        let rate = interest_rate(score, &table);
        prop_assert_eq!(interest_rate(score, &table), rate);
        prop_assert_eq!(
            calculate_payment(p, rate, term, POLICY),
            calculate_payment(p, rate, term, POLICY)
        );
    }

    #[test]
    fn formatted_payment_has_currency_shape(p in 0.0f64..10_000_000.0, term in 1u32..120) {
        let s = calculate_payment(p, 7.1, term, POLICY);
        prop_assert!(s.starts_with('$'));
        let (_, cents) = s.rsplit_once('.').unwrap();
        prop_assert_eq!(cents.len(), 2);
        prop_assert!(s[1..].chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.'));
    }

    #[test]
    fn default_terms_give_distinct_ordered_rows(p in 1_000.0f64..500_000.0, score in 300.0f64..850.0) {
        let est = estimate(p, score, &DEFAULT_TERMS, &RateTable::default(), POLICY);
        let terms: Vec<u32> = est.rows.iter().map(|r| r.term_months).collect();
        prop_assert_eq!(terms, DEFAULT_TERMS.to_vec());
        for pair in est.rows.windows(2) {
            prop_assert!(pair[1].monthly_payment < pair[0].monthly_payment);
            prop_assert_ne!(&pair[1].formatted, &pair[0].formatted);
        }
    }
}

#[test]
fn documented_reference_points() {
    let table = RateTable::default();
    assert_eq!(interest_rate(579.0, &table), 10.0);
    assert_eq!(interest_rate(580.0, &table), 7.1);
    assert_eq!(interest_rate(799.0, &table), 6.0);
    assert_eq!(interest_rate(800.0, &table), 5.5);
    assert_eq!(interest_rate(850.0, &table), 5.5);
    assert_eq!(calculate_payment(15_000.0, 7.1, 60, POLICY), "$297.73");
}
