//! Fee growth accounting for positions.
//!
//! The pool keeps one global fee-growth accumulator per token, scaled by
//! 2^128, plus an "outside" counter on every initialized tick. Subtracting
//! the growth below the lower tick and above the upper tick from the global
//! value yields the growth inside the range; the change since the position's
//! last checkpoint, descaled from x128, is the fee owed.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::math::liquidity_math::BalanceNat;
use crate::math::math_helpers::bit_shift;

/// A pair of per-token accumulators scaled by 2^128.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceNatx128 {
    pub x: BigInt,
    pub y: BigInt,
}

impl BalanceNatx128 {
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

/// Fee growth accrued between `lower_tick` and `upper_tick`, given the global
/// accumulator and the outside counters stored on the two boundary ticks.
pub fn fee_growth_inside(
    global: &BalanceNatx128,
    lower_outside: &BalanceNatx128,
    upper_outside: &BalanceNatx128,
    curr_tick_index: i32,
    lower_tick_index: i32,
    upper_tick_index: i32,
) -> BalanceNatx128 {
    let (below_x, below_y) = if curr_tick_index >= lower_tick_index {
        (lower_outside.x.clone(), lower_outside.y.clone())
    } else {
        (&global.x - &lower_outside.x, &global.y - &lower_outside.y)
    };
    let (above_x, above_y) = if curr_tick_index < upper_tick_index {
        (upper_outside.x.clone(), upper_outside.y.clone())
    } else {
        (&global.x - &upper_outside.x, &global.y - &upper_outside.y)
    };
    BalanceNatx128 {
        x: &global.x - below_x - above_x,
        y: &global.y - below_y - above_y,
    }
}

/// Tokens owed to a position since its last fee checkpoint.
///
/// Growth inside the range since the checkpoint, descaled from x128 with a
/// floor.
pub fn compute_position_fee(
    global: &BalanceNatx128,
    lower_outside: &BalanceNatx128,
    upper_outside: &BalanceNatx128,
    inside_last: &BalanceNatx128,
    curr_tick_index: i32,
    lower_tick_index: i32,
    upper_tick_index: i32,
) -> BalanceNat {
    let inside = fee_growth_inside(
        global,
        lower_outside,
        upper_outside,
        curr_tick_index,
        lower_tick_index,
        upper_tick_index,
    );
    BalanceNat {
        x: bit_shift(&(inside.x - &inside_last.x), 128),
        y: bit_shift(&(inside.y - &inside_last.y), 128),
    }
}
