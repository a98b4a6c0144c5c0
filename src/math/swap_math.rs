//! Price movement and tick tracking for single swap steps.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::{ceil_div, floor_div};
use crate::math::tick_math::sqrt_price_from_tick;
use crate::MAX_TICK;

/// Most correction steps allowed when pinning the tick after a price move.
/// The log approximation is within a few ticks of the true value, so hitting
/// this means corrupt inputs rather than a long walk.
const MAX_TICK_SEARCH_STEPS: u32 = 32;

/// New x80 sqrt price after selling `amount_x` (net of fees) into liquidity
/// `liquidity` at `sqrt_price`. Selling X pushes the price down; rounds down,
/// in the pool's favor.
pub fn sqrt_price_move_x(
    sqrt_price: &BigInt,
    amount_x: &BigInt,
    liquidity: &BigInt,
) -> Result<BigInt, Error> {
    let numerator = (liquidity * sqrt_price) << 80u32;
    let denominator = (liquidity << 80u32) + amount_x * sqrt_price;
    Ok(floor_div(&numerator, &denominator)?)
}

/// New x80 sqrt price after selling `amount_y` (net of fees) into liquidity
/// `liquidity` at `sqrt_price`. Selling Y pushes the price up; the increment
/// rounds up, in the pool's favor.
pub fn sqrt_price_move_y(
    sqrt_price: &BigInt,
    amount_y: &BigInt,
    liquidity: &BigInt,
) -> Result<BigInt, Error> {
    let increment = ceil_div(&(amount_y << 80u32), liquidity)?;
    Ok(sqrt_price + increment)
}

/// Tick index after the sqrt price moved from `old_sqrt_price` to
/// `new_sqrt_price`, starting from the tick that held before the move.
///
/// Seeds with a rational approximation of `20000 * ln(new/old)` (one tick per
/// half basis point of sqrt price), then corrects against exact tick prices
/// until `price(tick) <= new < price(tick + 1)`.
///
/// Errors with [`MathError::LogOutOfBounds`] when the ratio leaves the
/// `[0.7, 1.5]` window where the approximation holds; a single swap step never
/// moves the price that far.
pub fn calc_new_curr_tick_index(
    curr_tick_index: i32,
    old_sqrt_price: &BigInt,
    new_sqrt_price: &BigInt,
) -> Result<i32, Error> {
    let scaled_new: BigInt = new_sqrt_price * 10;
    if scaled_new < old_sqrt_price * 7 || scaled_new > old_sqrt_price * 15 {
        return Err(MathError::LogOutOfBounds.into());
    }

    let sum = new_sqrt_price + old_sqrt_price;
    let diff = new_sqrt_price - old_sqrt_price;
    let numerator = diff * 60_003 * &sum;
    let denominator = &sum * &sum + (new_sqrt_price * old_sqrt_price) * 2;
    let delta = floor_div(&numerator, &denominator)?;
    // The ratio guard keeps |delta| in the low thousands.
    let delta = delta.to_i32().ok_or(MathError::LogOutOfBounds)?;

    // The walk stops at MAX_TICK: a price at or beyond the top boundary
    // resolves to the last tick instead of probing past the domain.
    let mut tick = (curr_tick_index + delta).clamp(-MAX_TICK, MAX_TICK);
    for _ in 0..MAX_TICK_SEARCH_STEPS {
        if *new_sqrt_price < sqrt_price_from_tick(tick)? {
            tick -= 1;
        } else if tick < MAX_TICK && sqrt_price_from_tick(tick + 1)? <= *new_sqrt_price {
            tick += 1;
        } else {
            return Ok(tick);
        }
    }
    Err(StateError::TickSearchExceeded.into())
}
