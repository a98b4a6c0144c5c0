//! Liquidity positions.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::error::{Error, StateError};
use crate::math::fee_math::{compute_position_fee, BalanceNatx128};
use crate::math::liquidity_math::{amount_from_liquidity, BalanceNat};
use crate::math::tick_math::sqrt_price_from_tick;
use crate::pool::pool::Pool;
use crate::MAX_TICK;

/// A liquidity position in a pool, between two usable ticks.
#[derive(Debug, Clone)]
pub struct Position {
    pub pool: Pool,
    pub lower_tick_index: i32,
    pub upper_tick_index: i32,
    pub liquidity: BigInt,
    /// Fee growth inside the range at the position's last on-chain touch.
    /// `None` until the position has been read back from storage.
    pub fee_growth_inside_last: Option<BalanceNatx128>,
}

impl Position {
    pub fn new(
        pool: Pool,
        lower_tick_index: i32,
        upper_tick_index: i32,
        liquidity: BigInt,
        fee_growth_inside_last: Option<BalanceNatx128>,
    ) -> Result<Self, Error> {
        if lower_tick_index >= upper_tick_index {
            return Err(StateError::InvalidTickRange.into());
        }
        if lower_tick_index.unsigned_abs() > MAX_TICK as u32
            || upper_tick_index.unsigned_abs() > MAX_TICK as u32
        {
            return Err(StateError::TickOutOfBounds.into());
        }
        if liquidity.is_negative() {
            return Err(StateError::NegativeLiquidity.into());
        }
        Ok(Self {
            pool,
            lower_tick_index,
            upper_tick_index,
            liquidity,
            fee_growth_inside_last,
        })
    }

    /// Token amounts currently backing the position at the pool's price.
    pub fn token_amounts(&self) -> Result<BalanceNat, Error> {
        let sqrt_price_lower = sqrt_price_from_tick(self.lower_tick_index)?;
        let sqrt_price_upper = sqrt_price_from_tick(self.upper_tick_index)?;
        amount_from_liquidity(
            &self.liquidity,
            &self.pool.sqrt_price,
            &sqrt_price_lower,
            &sqrt_price_upper,
        )
    }

    /// Fees accrued since the last checkpoint, given the pool's global fee
    /// growth and the outside counters of the two boundary ticks.
    pub fn fees(
        &self,
        global: &BalanceNatx128,
        lower_outside: &BalanceNatx128,
        upper_outside: &BalanceNatx128,
    ) -> Result<BalanceNat, Error> {
        let inside_last = self
            .fee_growth_inside_last
            .as_ref()
            .ok_or(StateError::FeeBaselineNotSet)?;
        Ok(compute_position_fee(
            global,
            lower_outside,
            upper_outside,
            inside_last,
            self.pool.curr_tick_index,
            self.lower_tick_index,
            self.upper_tick_index,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenStandard};

    fn reference_pool() -> Pool {
        Pool::new(
            Token::new("KT1TokenX".into(), None, 18, TokenStandard::Fa12),
            Token::new("KT1TokenY".into(), Some(0), 6, TokenStandard::Fa2),
            -275_611,
            -275_730,
            10,
            BigInt::from(1251963215603107302u64),
            5,
            BigInt::from(1_259_480_907_161_538u64),
        )
        .unwrap()
    }

    fn x128(x: u64, y: u64) -> BalanceNatx128 {
        BalanceNatx128::new(BigInt::from(x) << 128u32, BigInt::from(y) << 128u32)
    }

    #[test]
    fn in_range_position_holds_both_tokens() {
        let position = Position::new(
            reference_pool(),
            -275_830,
            -275_450,
            BigInt::from(388_460_316_625_904u64),
            None,
        )
        .unwrap();
        let amounts = position.token_amounts().unwrap();
        assert_eq!(amounts.x, BigInt::from(2_999_999_999_999_997_037u64));
        assert_eq!(amounts.y, BigInt::from(4_389_045u64));
    }

    #[test]
    fn fees_use_the_stored_checkpoint() {
        let position = Position::new(
            reference_pool(),
            -275_830,
            -275_450,
            BigInt::from(10),
            Some(x128(30, 4)),
        )
        .unwrap();
        let fee = position
            .fees(&x128(50, 7), &x128(10, 2), &x128(5, 1))
            .unwrap();
        assert_eq!(fee.x, BigInt::from(5));
        assert_eq!(fee.y, BigInt::from(0));
    }

    #[test]
    fn fees_do_not_scale_with_position_size() {
        // The growth accumulators already carry the per-position share; two
        // positions with different liquidity but the same checkpoint see the
        // same fee.
        let small = Position::new(
            reference_pool(),
            -275_830,
            -275_450,
            BigInt::from(10),
            Some(BalanceNatx128::zero()),
        )
        .unwrap();
        let large = Position::new(
            reference_pool(),
            -275_830,
            -275_450,
            BigInt::from(10_000_000),
            Some(BalanceNatx128::zero()),
        )
        .unwrap();
        let fee_small = small.fees(&x128(50, 7), &x128(10, 2), &x128(5, 1)).unwrap();
        let fee_large = large.fees(&x128(50, 7), &x128(10, 2), &x128(5, 1)).unwrap();
        assert_eq!(fee_small.x, BigInt::from(35));
        assert_eq!(fee_small, fee_large);
    }

    #[test]
    fn fees_without_a_checkpoint_are_an_error() {
        let position = Position::new(
            reference_pool(),
            -275_830,
            -275_450,
            BigInt::from(10),
            None,
        )
        .unwrap();
        assert!(matches!(
            position.fees(&x128(50, 7), &x128(10, 2), &x128(5, 1)),
            Err(Error::StateError(StateError::FeeBaselineNotSet))
        ));
    }

    #[test]
    fn inverted_or_empty_ranges_are_rejected() {
        assert!(Position::new(reference_pool(), -275_450, -275_830, BigInt::from(1), None).is_err());
        assert!(Position::new(reference_pool(), -275_450, -275_450, BigInt::from(1), None).is_err());
    }

    #[test]
    fn out_of_bounds_ticks_are_rejected() {
        assert!(Position::new(
            reference_pool(),
            -MAX_TICK - 1,
            0,
            BigInt::from(1),
            None
        )
        .is_err());
    }
}
