// 3.0: price impact. fill price walks a linear premium curve from the skew before the
// order to the skew after it, and averages the two ends instead of integrating.

use crate::types::{checked_add, checked_sub, div_wad, mul_wad, MathResult, Price, Quote, SignedSize};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// premium as a fraction of price. positive skew = longs pay above oracle
pub fn premium_discount(skew: SignedSize, skew_scale: Decimal) -> MathResult<Decimal> {
    div_wad(skew.value(), skew_scale)
}

fn adjusted_price(price: Price, premium: Decimal) -> MathResult<Decimal> {
    checked_add(price.value(), mul_wad(price.value(), premium)?)
}

/// Average execution price of an order of `size` against a market at `skew`.
///
/// A zero `skew_scale` turns price impact off and returns the oracle price untouched.
/// The result is not clamped, so a skew deeper than the skew scale on the short side
/// can drive it to zero or below.
pub fn calc_fill_price(
    skew: SignedSize,
    skew_scale: Decimal,
    size: SignedSize,
    price: Price,
) -> MathResult<Decimal> {
    if skew_scale.is_zero() {
        return Ok(price.value());
    }

    let pd_before = premium_discount(skew, skew_scale)?;
    let pd_after = premium_discount(skew.add(size)?, skew_scale)?;

    let price_before = adjusted_price(price, pd_before)?;
    let price_after = adjusted_price(price, pd_after)?;

    div_wad(checked_add(price_before, price_after)?, dec!(2))
}

// 3.1: unrealised pnl between two prices. no funding, no fees.
pub fn calc_pnl(size: SignedSize, current_price: Price, previous_price: Price) -> MathResult<Quote> {
    let move_per_unit = checked_sub(current_price.value(), previous_price.value())?;
    mul_wad(size.value(), move_per_unit).map(Quote::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MathError;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn size(v: Decimal) -> SignedSize {
        SignedSize::new(v)
    }

    // oracle = 100, skew_scale = 1000
    #[test_case(dec!(0), dec!(0), dec!(100) ; "neutral market no order")]
    #[test_case(dec!(0), dec!(10), dec!(100.5) ; "neutral market buy")]
    #[test_case(dec!(0), dec!(-10), dec!(99.5) ; "neutral market sell")]
    #[test_case(dec!(-10), dec!(15), dec!(99.75) ; "short skew buy crosses zero")]
    #[test_case(dec!(10), dec!(-20), dec!(100) ; "long skew sell exactly mirrors")]
    #[test_case(dec!(100), dec!(100), dec!(115) ; "deep long skew buy")]
    fn fill_price_table(skew: Decimal, order: Decimal, expected: Decimal) {
        let fill = calc_fill_price(
            size(skew),
            dec!(1000),
            size(order),
            Price::new_unchecked(dec!(100)),
        );
        assert_eq!(fill, Ok(expected));
    }

    #[test]
    fn zero_skew_scale_disables_impact() {
        let price = Price::new_unchecked(dec!(1850.25));
        let fill = calc_fill_price(size(dec!(5000)), Decimal::ZERO, size(dec!(-200)), price);
        assert_eq!(fill, Ok(price.value()));
    }

    #[test]
    fn small_order_on_deep_market() {
        // pd_after = 10 / 1_000_000 = 0.00001, price_after = 2000.02
        let fill = calc_fill_price(
            SignedSize::zero(),
            dec!(1_000_000),
            size(dec!(10)),
            Price::new_unchecked(dec!(2000)),
        );
        assert_eq!(fill, Ok(dec!(2000.01)));
    }

    #[test]
    fn fill_price_truncates_repeating_premium() {
        // pd_after = 1 / 3 truncated at 18 dp
        let fill = calc_fill_price(
            SignedSize::zero(),
            dec!(3),
            size(dec!(1)),
            Price::new_unchecked(dec!(1)),
        );
        assert_eq!(fill, Ok(dec!(1.166666666666666666)));
    }

    #[test]
    fn pnl_long_and_short() {
        let entry = Price::new_unchecked(dec!(1000));
        let mark = Price::new_unchecked(dec!(1100));

        assert_eq!(calc_pnl(size(dec!(2)), mark, entry).unwrap().value(), dec!(200));
        assert_eq!(calc_pnl(size(dec!(-2)), mark, entry).unwrap().value(), dec!(-200));
        assert_eq!(calc_pnl(size(dec!(2)), entry, entry), Ok(Quote::zero()));
    }

    #[test]
    fn huge_skew_overflows_instead_of_panicking() {
        let fill = calc_fill_price(
            size(Decimal::MAX),
            dec!(0.5),
            size(dec!(1)),
            Price::new_unchecked(dec!(100)),
        );
        assert!(matches!(fill, Err(MathError::Overflow(_))));
    }
}
