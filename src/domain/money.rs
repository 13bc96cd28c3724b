//! Monetary types for price and amount representation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Price in quote (fiat) currency per unit of the traded asset.
pub type Price = Decimal;

/// Fiat or asset amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Ten thousand basis points make one whole.
pub const BPS_PER_UNIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Relative distance of `value` from `reference` in basis points.
///
/// Returns `None` when `reference` is zero. A deviation too large to
/// represent saturates at [`Decimal::MAX`].
#[must_use]
pub fn deviation_bps(value: Decimal, reference: Decimal) -> Option<Decimal> {
    if reference.is_zero() {
        return None;
    }
    let bps = value
        .checked_sub(reference)
        .and_then(|diff| diff.abs().checked_div(reference.abs()))
        .and_then(|ratio| ratio.checked_mul(BPS_PER_UNIT))
        .unwrap_or(Decimal::MAX);
    Some(bps)
}

/// Round a price to the two decimal places accepted by the marketplace.
#[must_use]
pub fn round_price(price: Price) -> Price {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deviation_is_symmetric_in_sign() {
        assert_eq!(deviation_bps(dec!(103), dec!(100)), Some(dec!(300)));
        assert_eq!(deviation_bps(dec!(97), dec!(100)), Some(dec!(300)));
    }

    #[test]
    fn deviation_from_zero_reference_is_undefined() {
        assert_eq!(deviation_bps(dec!(1), Decimal::ZERO), None);
    }

    #[test]
    fn deviation_saturates_instead_of_overflowing() {
        assert_eq!(deviation_bps(Decimal::MAX, dec!(0.0000001)), Some(Decimal::MAX));
        assert!(deviation_bps(dec!(0.0000001), Decimal::MAX).is_some());
    }

    #[test]
    fn round_price_rounds_half_away_from_zero() {
        assert_eq!(round_price(dec!(2950.125)), dec!(2950.13));
        assert_eq!(round_price(dec!(2950.124)), dec!(2950.12));
    }
}
