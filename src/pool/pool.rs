//! Pool snapshot and deposit estimation.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::error::{Error, StateError};
use crate::math::liquidity_math::{
    amount_x_from_liquidity, amount_y_from_liquidity, liquidity_from_amount_x,
    liquidity_from_amount_y,
};
use crate::math::tick_math::nearest_usable_tick;
use crate::token::Token;
use crate::{FEE_BPS_DENOM, MAX_TICK};

/// Suggested half-width, in ticks, of a fresh position for each supported
/// tick spacing.
fn default_position_range(tick_spacing: i32) -> Result<i32, Error> {
    match tick_spacing {
        1 => Ok(10),
        10 => Ok(100),
        60 => Ok(200),
        200 => Ok(500),
        _ => Err(StateError::UnsupportedTickSpacing.into()),
    }
}

/// An immutable snapshot of a pool's storage, as needed for off-chain
/// estimation.
#[derive(Debug, Clone)]
pub struct Pool {
    pub token_x: Token,
    pub token_y: Token,
    pub curr_tick_index: i32,
    /// Greatest initialized tick at or below `curr_tick_index`.
    pub curr_tick_witness: i32,
    pub tick_spacing: i32,
    /// Current x80 sqrt price.
    pub sqrt_price: BigInt,
    pub fee_bps: u32,
    /// Liquidity active at the current tick.
    pub liquidity: BigInt,
}

impl Pool {
    /// Builds a pool snapshot, rejecting storage that could not have come
    /// from a live contract.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_x: Token,
        token_y: Token,
        curr_tick_index: i32,
        curr_tick_witness: i32,
        tick_spacing: i32,
        sqrt_price: BigInt,
        fee_bps: u32,
        liquidity: BigInt,
    ) -> Result<Self, Error> {
        if token_x.address == token_y.address && token_x.token_id == token_y.token_id {
            return Err(StateError::TokensNotDistinct.into());
        }
        if tick_spacing <= 0 {
            return Err(StateError::TickSpacingNotPositive.into());
        }
        if curr_tick_index.unsigned_abs() > MAX_TICK as u32
            || curr_tick_witness.unsigned_abs() > MAX_TICK as u32
        {
            return Err(StateError::TickOutOfBounds.into());
        }
        if curr_tick_witness > curr_tick_index {
            return Err(StateError::WitnessAboveCurrentTick.into());
        }
        if !sqrt_price.is_positive() {
            return Err(StateError::PriceNotPositive.into());
        }
        if fee_bps >= FEE_BPS_DENOM {
            return Err(StateError::FeeOutOfRange.into());
        }
        if liquidity.is_negative() {
            return Err(StateError::NegativeLiquidity.into());
        }
        Ok(Self {
            token_x,
            token_y,
            curr_tick_index,
            curr_tick_witness,
            tick_spacing,
            sqrt_price,
            fee_bps,
            liquidity,
        })
    }

    /// Starting lower and upper tick for a new position, one default range
    /// either side of the current tick, clamped to the tick bounds and
    /// snapped to the spacing grid.
    pub fn initial_boundaries(&self) -> Result<(i32, i32), Error> {
        let range = default_position_range(self.tick_spacing)?;
        let lower = nearest_usable_tick(
            (self.curr_tick_index - range).max(-MAX_TICK),
            self.tick_spacing,
        );
        let upper = nearest_usable_tick(
            (self.curr_tick_index + range).min(MAX_TICK),
            self.tick_spacing,
        );
        Ok((lower, upper))
    }

    /// Token X needed alongside `amount_y` for a balanced deposit into the
    /// price range `[sqrt_price_lower, sqrt_price_upper]` at the current
    /// pool price.
    pub fn estimate_amount_x_from_y(
        &self,
        amount_y: &BigInt,
        sqrt_price_lower: &BigInt,
        sqrt_price_upper: &BigInt,
    ) -> Result<BigInt, Error> {
        let liquidity = liquidity_from_amount_y(amount_y, sqrt_price_lower, &self.sqrt_price)?;
        amount_x_from_liquidity(&liquidity, &self.sqrt_price, sqrt_price_upper)
    }

    /// Token Y needed alongside `amount_x` for a balanced deposit into the
    /// price range `[sqrt_price_lower, sqrt_price_upper]` at the current
    /// pool price.
    pub fn estimate_amount_y_from_x(
        &self,
        amount_x: &BigInt,
        sqrt_price_lower: &BigInt,
        sqrt_price_upper: &BigInt,
    ) -> Result<BigInt, Error> {
        let liquidity = liquidity_from_amount_x(amount_x, &self.sqrt_price, sqrt_price_upper)?;
        amount_y_from_liquidity(&liquidity, sqrt_price_lower, &self.sqrt_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::sqrt_price_from_tick;
    use crate::token::TokenStandard;

    fn token_x() -> Token {
        Token::new("KT1TokenX".into(), None, 18, TokenStandard::Fa12)
    }

    fn token_y() -> Token {
        Token::new("KT1TokenY".into(), Some(0), 6, TokenStandard::Fa2)
    }

    fn reference_pool() -> Pool {
        Pool::new(
            token_x(),
            token_y(),
            -275_611,
            -275_730,
            10,
            BigInt::from(1251963215603107302u64),
            5,
            BigInt::from(1_259_480_907_161_538u64),
        )
        .unwrap()
    }

    // ---- construction ----

    #[test]
    fn accepts_consistent_storage() {
        let pool = reference_pool();
        assert_eq!(pool.curr_tick_index, -275_611);
        assert_eq!(pool.fee_bps, 5);
    }

    #[test]
    fn rejects_identical_tokens() {
        let result = Pool::new(
            token_x(),
            token_x(),
            0,
            0,
            10,
            crate::q80(),
            5,
            BigInt::from(0),
        );
        assert!(matches!(
            result,
            Err(Error::StateError(StateError::TokensNotDistinct))
        ));
    }

    #[test]
    fn rejects_witness_above_current_tick() {
        let result = Pool::new(
            token_x(),
            token_y(),
            -275_611,
            -275_610,
            10,
            BigInt::from(1251963215603107302u64),
            5,
            BigInt::from(0),
        );
        assert!(matches!(
            result,
            Err(Error::StateError(StateError::WitnessAboveCurrentTick))
        ));
    }

    #[test]
    fn rejects_bad_scalars() {
        let bad_spacing = Pool::new(token_x(), token_y(), 0, 0, 0, crate::q80(), 5, 0.into());
        assert!(bad_spacing.is_err());
        let bad_price = Pool::new(token_x(), token_y(), 0, 0, 10, 0.into(), 5, 0.into());
        assert!(bad_price.is_err());
        let bad_fee = Pool::new(token_x(), token_y(), 0, 0, 10, crate::q80(), 10_000, 0.into());
        assert!(bad_fee.is_err());
        let bad_liquidity = Pool::new(token_x(), token_y(), 0, 0, 10, crate::q80(), 5, (-1).into());
        assert!(bad_liquidity.is_err());
        let bad_tick = Pool::new(
            token_x(),
            token_y(),
            MAX_TICK + 1,
            0,
            10,
            crate::q80(),
            5,
            0.into(),
        );
        assert!(bad_tick.is_err());
    }

    // ---- initial boundaries ----

    #[test]
    fn boundaries_straddle_the_current_tick() {
        let (lower, upper) = reference_pool().initial_boundaries().unwrap();
        assert_eq!((lower, upper), (-275_720, -275_520));
    }

    #[test]
    fn boundaries_clamp_at_the_tick_limits() {
        let pool = Pool::new(
            token_x(),
            token_y(),
            MAX_TICK - 5,
            MAX_TICK - 15,
            1,
            sqrt_price_from_tick(MAX_TICK - 5).unwrap(),
            5,
            BigInt::from(0),
        )
        .unwrap();
        let (_, upper) = pool.initial_boundaries().unwrap();
        assert_eq!(upper, MAX_TICK);
    }

    #[test]
    fn unknown_spacing_has_no_default_range() {
        let pool = Pool::new(
            token_x(),
            token_y(),
            0,
            0,
            7,
            crate::q80(),
            5,
            BigInt::from(0),
        )
        .unwrap();
        assert!(pool.initial_boundaries().is_err());
    }

    // ---- deposit estimation ----

    #[test]
    fn estimates_y_for_a_given_x() {
        let pool = reference_pool();
        let lower = sqrt_price_from_tick(-275_830).unwrap();
        let upper = sqrt_price_from_tick(-275_450).unwrap();
        let y = pool
            .estimate_amount_y_from_x(&BigInt::from(3u64 * 10u64.pow(18)), &lower, &upper)
            .unwrap();
        assert_eq!(y, BigInt::from(4_389_045u64));
    }

    #[test]
    fn estimates_x_for_a_given_y() {
        let pool = reference_pool();
        let lower = sqrt_price_from_tick(-275_830).unwrap();
        let upper = sqrt_price_from_tick(-275_450).unwrap();
        let x = pool
            .estimate_amount_x_from_y(&BigInt::from(5_000_000u64), &lower, &upper)
            .unwrap();
        assert_eq!(x, BigInt::from(3_417_599_960_074_599_237u64));
    }
}
