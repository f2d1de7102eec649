use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds to `decimal_places` fractional digits, halves away from zero.
///
/// Goes through `Decimal` so `1.005` rounds on its decimal digits rather than
/// on the nearest binary float.
pub fn round_to_precision(value: f64, decimal_places: u32) -> ChartResult<f64> {
    let decimal = Decimal::from_f64(value).ok_or_else(|| {
        ChartError::InvalidData(format!("{value} cannot be represented as decimal"))
    })?;
    let rounded =
        decimal.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    decimal_to_f64(rounded, "rounded value")
}

#[cfg(test)]
mod tests {
    use super::round_to_precision;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_to_precision(12.3456, 2).expect("round"), 12.35);
        assert_eq!(round_to_precision(1.005, 2).expect("round"), 1.01);
        assert_eq!(round_to_precision(40.0, 2).expect("round"), 40.0);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(round_to_precision(f64::NAN, 2).is_err());
    }
}
