//! Integer primitives shared by the tick, liquidity and swap formulas.
//!
//! Every division in the crate goes through [`floor_div`] or [`ceil_div`] so
//! the rounding direction is visible at each call site.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::error::MathError;

/// Divides rounding toward negative infinity.
pub fn floor_div(numerator: &BigInt, denominator: &BigInt) -> Result<BigInt, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(numerator.div_floor(denominator))
}

/// Divides rounding toward positive infinity.
pub fn ceil_div(numerator: &BigInt, denominator: &BigInt) -> Result<BigInt, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(numerator.div_ceil(denominator))
}

/// Shifts right by `places` when positive, left when negative.
///
/// Right shifts round toward negative infinity, matching [`floor_div`] by the
/// corresponding power of two.
pub fn bit_shift(value: &BigInt, places: i32) -> BigInt {
    if places >= 0 {
        value >> places as u32
    } else {
        value << places.unsigned_abs()
    }
}

/// Integer square root by Newton iteration.
pub fn isqrt(value: &BigInt) -> Result<BigInt, MathError> {
    if value.is_negative() {
        return Err(MathError::NegativeSqrt);
    }
    if value.is_zero() {
        return Ok(BigInt::zero());
    }
    let mut x0 = value.clone();
    let mut x1: BigInt = (value >> 1u32) + 1;
    while x1 < x0 {
        x0 = x1;
        x1 = (&x0 + value / &x0) >> 1u32;
    }
    Ok(x0)
}

/// Quotient and remainder of euclidean division; the remainder is always
/// non-negative.
pub fn euclidean_division(dividend: i64, divisor: i64) -> Result<(i64, i64), MathError> {
    if divisor == 0 {
        return Err(MathError::DivisionByZero);
    }
    Ok((dividend.div_euclid(divisor), dividend.rem_euclid(divisor)))
}

/// An unnormalized fixed-point value `v * 2^offset`.
///
/// Used by the tick ladder, where each precomputed entry keeps its own binary
/// exponent so products stay exact until the final rescale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPoint {
    pub v: BigInt,
    pub offset: i32,
}

impl FixedPoint {
    pub fn new(v: BigInt, offset: i32) -> Self {
        Self { v, offset }
    }
}

/// Exact product of two fixed-point values; mantissas multiply and exponents
/// add, with no intermediate rounding.
pub fn fixed_point_mul(a: &FixedPoint, b: &FixedPoint) -> FixedPoint {
    FixedPoint {
        v: &a.v * &b.v,
        offset: a.offset + b.offset,
    }
}
