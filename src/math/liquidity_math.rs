//! Conversions between token amounts and position liquidity.
//!
//! Liquidity-from-amount floors and amount-from-liquidity ceils, so a
//! position never claims more tokens than were deposited for it.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{Error, StateError};
use crate::math::math_helpers::{ceil_div, floor_div};

/// A pair of token balances, X and Y sides of a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceNat {
    pub x: BigInt,
    pub y: BigInt,
}

impl BalanceNat {
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self {
            x: BigInt::zero(),
            y: BigInt::zero(),
        }
    }
}

fn ordered<'a>(a: &'a BigInt, b: &'a BigInt) -> (&'a BigInt, &'a BigInt) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Liquidity backed by `amount_x` of token X across the sqrt price range
/// spanned by the two boundaries (order irrelevant). Floors.
pub fn liquidity_from_amount_x(
    amount_x: &BigInt,
    sqrt_price_a: &BigInt,
    sqrt_price_b: &BigInt,
) -> Result<BigInt, Error> {
    if amount_x.is_negative() {
        return Err(StateError::NegativeAmount.into());
    }
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    let numerator = amount_x * lower * upper;
    let denominator = (upper - lower) << 80u32;
    Ok(floor_div(&numerator, &denominator)?)
}

/// Liquidity backed by `amount_y` of token Y across the sqrt price range
/// spanned by the two boundaries (order irrelevant). Floors.
pub fn liquidity_from_amount_y(
    amount_y: &BigInt,
    sqrt_price_a: &BigInt,
    sqrt_price_b: &BigInt,
) -> Result<BigInt, Error> {
    if amount_y.is_negative() {
        return Err(StateError::NegativeAmount.into());
    }
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    let numerator = amount_y << 80u32;
    let denominator = upper - lower;
    Ok(floor_div(&numerator, &denominator)?)
}

/// Greatest liquidity fully backed by `amounts` for a position between
/// `sqrt_price_lower` and `sqrt_price_upper` while the pool trades at
/// `sqrt_price_current`.
///
/// Below the range only X is needed, above it only Y; inside, both sides
/// constrain and the smaller wins.
pub fn liquidity_from_amount(
    amounts: &BalanceNat,
    sqrt_price_current: &BigInt,
    sqrt_price_lower: &BigInt,
    sqrt_price_upper: &BigInt,
) -> Result<BigInt, Error> {
    let (lower, upper) = ordered(sqrt_price_lower, sqrt_price_upper);
    if sqrt_price_current <= lower {
        liquidity_from_amount_x(&amounts.x, lower, upper)
    } else if sqrt_price_current >= upper {
        liquidity_from_amount_y(&amounts.y, lower, upper)
    } else {
        let from_x = liquidity_from_amount_x(&amounts.x, sqrt_price_current, upper)?;
        let from_y = liquidity_from_amount_y(&amounts.y, lower, sqrt_price_current)?;
        Ok(from_x.min(from_y))
    }
}

/// Token X owed for `liquidity` across the sqrt price range spanned by the
/// two boundaries (order irrelevant). Ceils.
pub fn amount_x_from_liquidity(
    liquidity: &BigInt,
    sqrt_price_a: &BigInt,
    sqrt_price_b: &BigInt,
) -> Result<BigInt, Error> {
    if liquidity.is_negative() {
        return Err(StateError::NegativeLiquidity.into());
    }
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    let numerator = (liquidity * (upper - lower)) << 80u32;
    let denominator = lower * upper;
    Ok(ceil_div(&numerator, &denominator)?)
}

/// Token Y owed for `liquidity` across the sqrt price range spanned by the
/// two boundaries (order irrelevant). Ceils.
pub fn amount_y_from_liquidity(
    liquidity: &BigInt,
    sqrt_price_a: &BigInt,
    sqrt_price_b: &BigInt,
) -> Result<BigInt, Error> {
    if liquidity.is_negative() {
        return Err(StateError::NegativeLiquidity.into());
    }
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    Ok(ceil_div(&(liquidity * (upper - lower)), &crate::q80())?)
}

/// Token amounts owed for `liquidity` between `sqrt_price_lower` and
/// `sqrt_price_upper` while the pool trades at `sqrt_price_current`.
pub fn amount_from_liquidity(
    liquidity: &BigInt,
    sqrt_price_current: &BigInt,
    sqrt_price_lower: &BigInt,
    sqrt_price_upper: &BigInt,
) -> Result<BalanceNat, Error> {
    let (lower, upper) = ordered(sqrt_price_lower, sqrt_price_upper);
    if sqrt_price_current <= lower {
        Ok(BalanceNat::new(
            amount_x_from_liquidity(liquidity, lower, upper)?,
            BigInt::zero(),
        ))
    } else if sqrt_price_current >= upper {
        Ok(BalanceNat::new(
            BigInt::zero(),
            amount_y_from_liquidity(liquidity, lower, upper)?,
        ))
    } else {
        Ok(BalanceNat::new(
            amount_x_from_liquidity(liquidity, sqrt_price_current, upper)?,
            amount_y_from_liquidity(liquidity, lower, sqrt_price_current)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::sqrt_price_from_tick;

    // Range [-275830, -275450] around a pool trading at tick -275611.

    fn lower() -> BigInt {
        sqrt_price_from_tick(-275_830).unwrap()
    }

    fn upper() -> BigInt {
        sqrt_price_from_tick(-275_450).unwrap()
    }

    fn current() -> BigInt {
        BigInt::from(1251963215603107302u64)
    }

    // ---- liquidity from amounts ----

    #[test]
    fn liquidity_from_token_x() {
        let l = liquidity_from_amount_x(&BigInt::from(3u64 * 10u64.pow(18)), &current(), &upper())
            .unwrap();
        assert_eq!(l, BigInt::from(388_460_316_625_904u64));
    }

    #[test]
    fn liquidity_from_token_y() {
        let l = liquidity_from_amount_y(&BigInt::from(5_000_000u64), &lower(), &current()).unwrap();
        assert_eq!(l, BigInt::from(442_533_987_530_419u64));
    }

    #[test]
    fn in_range_liquidity_takes_the_tighter_side() {
        let amounts = BalanceNat::new(
            BigInt::from(3u64 * 10u64.pow(18)),
            BigInt::from(5_000_000u64),
        );
        let l = liquidity_from_amount(&amounts, &current(), &lower(), &upper()).unwrap();
        assert_eq!(l, BigInt::from(388_460_316_625_904u64));
    }

    #[test]
    fn boundary_order_does_not_matter() {
        let a = liquidity_from_amount_y(&BigInt::from(5_000_000u64), &lower(), &current()).unwrap();
        let b = liquidity_from_amount_y(&BigInt::from(5_000_000u64), &current(), &lower()).unwrap();
        assert_eq!(a, b);
    }

    // ---- amounts from liquidity ----

    #[test]
    fn in_range_amounts_for_liquidity() {
        let l = BigInt::from(388_460_316_625_904u64);
        let amounts = amount_from_liquidity(&l, &current(), &lower(), &upper()).unwrap();
        assert_eq!(amounts.x, BigInt::from(2_999_999_999_999_997_037u64));
        assert_eq!(amounts.y, BigInt::from(4_389_045u64));
    }

    #[test]
    fn below_range_needs_only_x() {
        let l = BigInt::from(388_460_316_625_904u64);
        let below = &lower() - 1;
        let amounts = amount_from_liquidity(&l, &below, &lower(), &upper()).unwrap();
        assert!(amounts.x > BigInt::zero());
        assert_eq!(amounts.y, BigInt::zero());
    }

    #[test]
    fn above_range_needs_only_y() {
        let l = BigInt::from(388_460_316_625_904u64);
        let above = &upper() + 1;
        let amounts = amount_from_liquidity(&l, &above, &lower(), &upper()).unwrap();
        assert_eq!(amounts.x, BigInt::zero());
        assert!(amounts.y > BigInt::zero());
    }

    #[test]
    fn round_trip_recovers_the_same_liquidity() {
        // Ceiled amounts back through the floored inverse land exactly on the
        // original liquidity for this range.
        let l = BigInt::from(388_460_316_625_904u64);
        let amounts = amount_from_liquidity(&l, &current(), &lower(), &upper()).unwrap();
        let back = liquidity_from_amount(&amounts, &current(), &lower(), &upper()).unwrap();
        assert_eq!(back, l);
    }

    // ---- validation ----

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(liquidity_from_amount_x(&BigInt::from(-1), &lower(), &upper()).is_err());
        assert!(liquidity_from_amount_y(&BigInt::from(-1), &lower(), &upper()).is_err());
    }

    #[test]
    fn negative_liquidity_is_rejected() {
        assert!(amount_x_from_liquidity(&BigInt::from(-1), &lower(), &upper()).is_err());
        assert!(amount_y_from_liquidity(&BigInt::from(-1), &lower(), &upper()).is_err());
    }

    #[test]
    fn degenerate_range_is_a_division_by_zero() {
        assert!(liquidity_from_amount_x(&BigInt::from(1), &lower(), &lower()).is_err());
    }
}
