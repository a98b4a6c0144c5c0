//! Staked positions and their incentive programs.

use num_bigint::BigInt;

use crate::error::Error;
use crate::math::reward_math::compute_unclaimed_reward;

/// A reward program paying `total_reward_unclaimed` out over a time window.
#[derive(Debug, Clone)]
pub struct Incentive {
    pub start_time: u64,
    pub end_time: u64,
    pub total_reward_unclaimed: BigInt,
    /// x128-scaled seconds already paid out to earlier claims.
    pub total_seconds_claimed: BigInt,
}

/// A position's enrollment in an incentive.
#[derive(Debug, Clone)]
pub struct Stake {
    pub incentive: Incentive,
    pub liquidity: BigInt,
    /// x128 seconds-per-liquidity inside the range at the stake checkpoint.
    pub seconds_per_liquidity_inside_last: BigInt,
}

impl Stake {
    /// Reward claimable at `now`, given the current x128 seconds-per-liquidity
    /// inside the staked range.
    pub fn unclaimed_reward(
        &self,
        seconds_per_liquidity_inside: &BigInt,
        now: u64,
    ) -> Result<BigInt, Error> {
        compute_unclaimed_reward(
            &self.incentive.total_reward_unclaimed,
            &self.incentive.total_seconds_claimed,
            self.incentive.start_time,
            self.incentive.end_time,
            now,
            &self.liquidity,
            &self.seconds_per_liquidity_inside_last,
            seconds_per_liquidity_inside,
        )
    }
}
