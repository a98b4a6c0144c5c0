//! Human-readable price helpers.
//!
//! Pools quote prices in raw token units on an x80 sqrt grid; these helpers
//! convert to and from decimal-adjusted Y-per-X prices for display and for
//! seeding a pool at a target price. Both directions round through `f64`, so
//! they are approximate; the exact grid lives in
//! [`tick_math`](crate::math::tick_math).

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive};

use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::isqrt;
use crate::math::tick_math::tick_from_sqrt_price;
use crate::token::Token;

/// Decimal-adjusted price of token X in units of token Y at `sqrt_price`.
pub fn real_price_from_sqrt_price(
    sqrt_price: &BigInt,
    token_x: &Token,
    token_y: &Token,
) -> Result<f64, Error> {
    if !sqrt_price.is_positive() {
        return Err(StateError::PriceNotPositive.into());
    }
    let ratio = sqrt_price.to_f64().ok_or(MathError::Unrepresentable)? / 2f64.powi(80);
    let scale = 10f64.powi(token_x.decimals as i32 - token_y.decimals as i32);
    Ok(ratio * ratio * scale)
}

/// The x80 sqrt price closest to a decimal-adjusted Y-per-X price.
pub fn sqrt_price_from_real_price(
    real_price: f64,
    token_x: &Token,
    token_y: &Token,
) -> Result<BigInt, Error> {
    if !real_price.is_finite() {
        return Err(MathError::Unrepresentable.into());
    }
    if real_price <= 0.0 {
        return Err(StateError::PriceNotPositive.into());
    }
    let scaled = real_price * 10f64.powi(token_y.decimals as i32 - token_x.decimals as i32);
    // Carry 64 fractional bits into the integer domain, then square up to the
    // x160 grid so the square root lands on x80.
    let fixed = BigInt::from_f64((scaled * 2f64.powi(64)).floor())
        .ok_or(MathError::Unrepresentable)?;
    Ok(isqrt(&(fixed << 96u32))?)
}

/// The usable tick closest below a decimal-adjusted Y-per-X price.
pub fn tick_from_real_price(
    real_price: f64,
    token_x: &Token,
    token_y: &Token,
    tick_spacing: i32,
) -> Result<i32, Error> {
    let sqrt_price = sqrt_price_from_real_price(real_price, token_x, token_y)?;
    tick_from_sqrt_price(&sqrt_price, tick_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q80;
    use crate::token::TokenStandard;

    fn token(decimals: u32) -> Token {
        Token::new("KT1Token".into(), None, decimals, TokenStandard::Fa12)
    }

    #[test]
    fn unit_sqrt_price_with_equal_decimals_is_one() {
        let price = real_price_from_sqrt_price(&q80(), &token(6), &token(6)).unwrap();
        assert!((price - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unit_price_maps_back_to_the_unit_sqrt_price() {
        let sp = sqrt_price_from_real_price(1.0, &token(6), &token(6)).unwrap();
        assert_eq!(sp, q80());
    }

    #[test]
    fn decimals_shift_the_displayed_price() {
        // An 18/6 decimal pair trading around tick -275611.
        let sp = BigInt::from(1251963215603107302u64);
        let price = real_price_from_sqrt_price(&sp, &token(18), &token(6)).unwrap();
        assert!((price - 1.0724667377628057).abs() < 1e-9);
    }

    #[test]
    fn real_price_round_trips_within_float_accuracy() {
        let reference = BigInt::from(1251963215603107302u64);
        let price = real_price_from_sqrt_price(&reference, &token(18), &token(6)).unwrap();
        let sp = sqrt_price_from_real_price(price, &token(18), &token(6)).unwrap();
        let rel = (sp.to_f64().unwrap() - reference.to_f64().unwrap()).abs()
            / reference.to_f64().unwrap();
        assert!(rel < 1e-7);
    }

    #[test]
    fn tick_from_real_price_matches_the_pool_tick() {
        let reference = BigInt::from(1251963215603107302u64);
        let price = real_price_from_sqrt_price(&reference, &token(18), &token(6)).unwrap();
        assert_eq!(
            tick_from_real_price(price, &token(18), &token(6), 1).unwrap(),
            -275_611
        );
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        assert!(sqrt_price_from_real_price(0.0, &token(6), &token(6)).is_err());
        assert!(sqrt_price_from_real_price(-1.5, &token(6), &token(6)).is_err());
        assert!(sqrt_price_from_real_price(f64::NAN, &token(6), &token(6)).is_err());
        assert!(real_price_from_sqrt_price(&BigInt::from(0), &token(6), &token(6)).is_err());
    }
}
