use crate::domain::record::StockRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub avg_target_price: f64,
    /// Absolute distance from the current price to the average target.
    pub price_potential: f64,
    pub price_potential_percent: f64,
}

/// Average of the predicted range and the implied upside against the current price.
///
/// When only one side of the range is positive it stands in for the average.
/// Potential stays at zero unless both the current price and the target are
/// positive, so a missing price never divides by zero.
pub fn derive_metrics(record: &StockRecord) -> DerivedMetrics {
    let high = record.high_price;
    let low = record.low_price;
    let current = record.current_price;

    let avg_target_price = if high > 0.0 && low > 0.0 {
        (high + low) / 2.0
    } else if high > 0.0 {
        high
    } else if low > 0.0 {
        low
    } else {
        0.0
    };

    let (price_potential, price_potential_percent) = if current > 0.0 && avg_target_price > 0.0 {
        let delta = avg_target_price - current;
        (delta, delta / current * 100.0)
    } else {
        (0.0, 0.0)
    };

    DerivedMetrics {
        avg_target_price,
        price_potential,
        price_potential_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(high: f64, low: f64, current: f64) -> StockRecord {
        StockRecord {
            symbol: "T".to_string(),
            sector: String::new(),
            recommendation: String::new(),
            confidence: 0.0,
            confidence_reported: false,
            current_price: current,
            high_price: high,
            low_price: low,
            generated_date: None,
        }
    }

    #[test]
    fn averages_both_sides_of_range() {
        let m = derive_metrics(&record(10.0, 6.0, 8.0));
        assert_eq!(m.avg_target_price, 8.0);
        assert_eq!(m.price_potential, 0.0);
        assert_eq!(m.price_potential_percent, 0.0);
    }

    #[test]
    fn single_side_stands_in_for_average() {
        let m = derive_metrics(&record(12.0, 0.0, 10.0));
        assert_eq!(m.avg_target_price, 12.0);
        assert!((m.price_potential_percent - 20.0).abs() < 1e-9);

        let m = derive_metrics(&record(0.0, 5.0, 10.0));
        assert_eq!(m.avg_target_price, 5.0);
        assert!((m.price_potential_percent + 50.0).abs() < 1e-9);
        assert_eq!(m.price_potential, -5.0);
    }

    #[test]
    fn no_target_or_price_means_no_potential() {
        let m = derive_metrics(&record(0.0, 0.0, 10.0));
        assert_eq!(m.avg_target_price, 0.0);
        assert_eq!(m.price_potential_percent, 0.0);

        let m = derive_metrics(&record(12.0, 8.0, 0.0));
        assert_eq!(m.avg_target_price, 10.0);
        assert_eq!(m.price_potential_percent, 0.0);
    }

    #[test]
    fn negative_prices_are_not_targets() {
        let m = derive_metrics(&record(-4.0, 6.0, 3.0));
        assert_eq!(m.avg_target_price, 6.0);
        assert!((m.price_potential_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn derivation_is_deterministic() {
        let r = record(11.0, 7.0, 9.5);
        assert_eq!(derive_metrics(&r), derive_metrics(&r));
    }
}
