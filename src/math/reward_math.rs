//! Reward accrual for staked positions.

use num_bigint::BigInt;

use crate::error::{Error, StateError};
use crate::math::math_helpers::floor_div;

/// Reward owed to a stake since its last checkpoint.
///
/// `seconds_per_liquidity_inside` values are x128-scaled accumulators of
/// seconds spent in range per unit of liquidity; the difference since the
/// checkpoint times the stake's liquidity gives x128-scaled seconds, which
/// are paid out of the incentive pro rata over the unclaimed seconds of the
/// program. After `end_time` the denominator keeps growing with `now`, so a
/// stake left in place dilutes instead of accruing forever.
///
/// The result is capped at `total_reward_unclaimed`.
#[allow(clippy::too_many_arguments)]
pub fn compute_unclaimed_reward(
    total_reward_unclaimed: &BigInt,
    total_seconds_claimed: &BigInt,
    start_time: u64,
    end_time: u64,
    now: u64,
    liquidity: &BigInt,
    seconds_per_liquidity_inside_last: &BigInt,
    seconds_per_liquidity_inside: &BigInt,
) -> Result<BigInt, Error> {
    if end_time < start_time {
        return Err(StateError::InvalidTimeWindow.into());
    }
    let horizon = now.max(end_time);
    let total_seconds_unclaimed =
        (BigInt::from(horizon - start_time) << 128u32) - total_seconds_claimed;
    let seconds_inside =
        (seconds_per_liquidity_inside - seconds_per_liquidity_inside_last) * liquidity;
    let reward = floor_div(
        &(total_reward_unclaimed * seconds_inside),
        &total_seconds_unclaimed,
    )?;
    Ok(reward.min(total_reward_unclaimed.clone()))
}
