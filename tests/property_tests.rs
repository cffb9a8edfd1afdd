use chrono::NaiveDate;
use fx_hedge::core::direction::TradeDirection;
use fx_hedge::core::exposure::ExposureRow;
use fx_hedge::core::spot::SpotRate;
use fx_hedge::hedge::calculator::{HedgeCalculator, HedgeError};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Tolerance for the weight sum: each division rounds at 28 digits.
fn tolerance() -> Decimal {
    Decimal::new(1, 9)
}

/// An expiry within a few years of 2024.
fn arb_expiry() -> impl Strategy<Value = NaiveDate> {
    (0u64..1500).prop_map(|d| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(d)
    })
}

/// A positive notional in whole units (1 to 100,000,000).
fn arb_notional() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(Decimal::from)
}

/// Forward points between -0.0500 and 0.0500, four decimals.
fn arb_forward_pts() -> impl Strategy<Value = Decimal> {
    (-500i64..=500i64).prop_map(|p| Decimal::new(p, 4))
}

/// A spot between 0.5000 and 2.0000.
fn arb_spot() -> impl Strategy<Value = SpotRate> {
    (5_000i64..=20_000i64).prop_map(|s| SpotRate::new(Decimal::new(s, 4)))
}

fn arb_direction() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Sell EUR".to_string()),
        Just("Buy EUR".to_string()),
        Just("Sell EUR vs USD".to_string()),
        ".*",
    ]
}

fn arb_row() -> impl Strategy<Value = ExposureRow> {
    (arb_expiry(), arb_notional(), arb_forward_pts(), arb_direction())
        .prop_map(|(e, n, p, d)| ExposureRow::new(e, n, p, d))
}

/// A book of 1..40 long exposures.
fn arb_book() -> impl Strategy<Value = Vec<ExposureRow>> {
    prop::collection::vec(arb_row(), 1..40)
}

proptest! {
    // ===================================================================
    // Weights always sum to one when the total is nonzero.
    // ===================================================================
    #[test]
    fn weights_sum_to_one(rows in arb_book(), spot in arb_spot()) {
        let result = HedgeCalculator::compute(&rows, spot).unwrap();
        prop_assert!(
            (result.weight_sum() - Decimal::ONE).abs() < tolerance(),
            "weight sum {} must be 1",
            result.weight_sum()
        );
    }

    // ===================================================================
    // Blended price is exactly the sum of outright × weight, in row order.
    // ===================================================================
    #[test]
    fn blended_is_sum_of_contributions(rows in arb_book(), spot in arb_spot()) {
        let result = HedgeCalculator::compute(&rows, spot).unwrap();
        let mut manual = Decimal::ZERO;
        for r in result.rows() {
            prop_assert_eq!(r.contribution, r.outright * r.weight);
            manual += r.outright * r.weight;
        }
        prop_assert_eq!(result.blended_price(), manual);
    }

    // ===================================================================
    // With all-positive notionals the blend lies between the extreme outrights.
    // ===================================================================
    #[test]
    fn blended_within_outright_range(rows in arb_book(), spot in arb_spot()) {
        let result = HedgeCalculator::compute(&rows, spot).unwrap();
        let lo = result.rows().iter().map(|r| r.outright).min().unwrap();
        let hi = result.rows().iter().map(|r| r.outright).max().unwrap();
        prop_assert!(result.blended_price() >= lo - tolerance());
        prop_assert!(result.blended_price() <= hi + tolerance());
    }

    // ===================================================================
    // Outrights are spot plus points, row by row.
    // ===================================================================
    #[test]
    fn outright_is_spot_plus_points(rows in arb_book(), spot in arb_spot()) {
        let result = HedgeCalculator::compute(&rows, spot).unwrap();
        for (input, enriched) in rows.iter().zip(result.rows()) {
            prop_assert_eq!(enriched.outright, spot.value() + input.forward_pts());
        }
    }

    // ===================================================================
    // Output keeps input length and order, and leaves inputs untouched.
    // ===================================================================
    #[test]
    fn row_order_preserved(rows in arb_book(), spot in arb_spot()) {
        let before = rows.clone();
        let result = HedgeCalculator::compute(&rows, spot).unwrap();
        prop_assert_eq!(&rows, &before);
        prop_assert_eq!(result.len(), rows.len());
        for (input, enriched) in rows.iter().zip(result.rows()) {
            prop_assert_eq!(input, &enriched.exposure);
        }
    }

    // ===================================================================
    // Direction inversion is total: "Buy EUR" iff "Sell EUR" appears.
    // ===================================================================
    #[test]
    fn direction_inversion_is_total(text in ".*") {
        let direction = TradeDirection::from_client_direction(&text);
        prop_assert!(matches!(direction.as_str(), "Buy EUR" | "Sell EUR"));
        prop_assert_eq!(
            direction == TradeDirection::BuyEur,
            text.contains("Sell EUR")
        );
    }

    #[test]
    fn direction_inversion_with_marker(prefix in ".*", suffix in ".*") {
        let text = format!("{}Sell EUR{}", prefix, suffix);
        prop_assert_eq!(TradeDirection::from_client_direction(&text), TradeDirection::BuyEur);
    }

    // ===================================================================
    // A book mirrored by its exact negation always fails the zero guard.
    // ===================================================================
    #[test]
    fn mirrored_book_rejected(rows in arb_book(), spot in arb_spot()) {
        let mirrored: Vec<ExposureRow> = rows
            .iter()
            .cloned()
            .chain(rows.iter().map(|r| {
                ExposureRow::new(r.expiry(), -r.notional(), r.forward_pts(), r.client_direction())
            }))
            .collect();
        prop_assert_eq!(
            HedgeCalculator::compute(&mirrored, spot),
            Err(HedgeError::ZeroNotional)
        );
    }

    // ===================================================================
    // Same input, same output. No hidden state.
    // ===================================================================
    #[test]
    fn computation_is_deterministic(rows in arb_book(), spot in arb_spot()) {
        let first = HedgeCalculator::compute(&rows, spot).unwrap();
        let second = HedgeCalculator::compute(&rows, spot).unwrap();
        prop_assert_eq!(first, second);
    }
}
