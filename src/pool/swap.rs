//! Cross-tick swap estimation.
//!
//! Swaps run in steps. Within one step the active liquidity is constant, so
//! the price move and output follow closed formulas; when the move would
//! leave the range tracked by the witness tick, the step consumes exactly
//! enough input to reach the range boundary, crosses it (adjusting liquidity
//! by the tick's net), and the loop continues with whatever input remains.
//! Tick data is pulled through the [`TickProvider`] only when a boundary is
//! actually reached.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::debug;

use crate::error::{Error, StateError};
use crate::math::math_helpers::{ceil_div, floor_div};
use crate::math::swap_math::{calc_new_curr_tick_index, sqrt_price_move_x, sqrt_price_move_y};
use crate::pool::pool::Pool;
use crate::pool::ticks::TickProvider;
use crate::{q80, FEE_BPS_DENOM};

/// Most tick crossings a single estimate may perform. A swap that walks
/// further than this through the tick list is almost certainly fed by a
/// corrupt tick map.
const MAX_SWAP_STEPS: u32 = 512;

/// Outcome of a simulated swap.
///
/// `dx` and `dy` are the amounts still owed on each side when the loop
/// stopped: for an X-to-Y swap `dy` is the output and `dx` is the input the
/// pool could not absorb (non-zero only when liquidity ran out), and
/// symmetrically for Y-to-X. The remaining fields are the pool state the
/// swap would leave behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapEstimate {
    pub curr_tick_index: i32,
    pub curr_tick_witness: i32,
    pub sqrt_price: BigInt,
    pub liquidity: BigInt,
    pub dx: BigInt,
    pub dy: BigInt,
}

impl Pool {
    /// Simulates selling `amount` of token X for token Y.
    pub async fn estimate_swap_x_to_y<P: TickProvider + Sync>(
        &self,
        amount: &BigInt,
        provider: &P,
    ) -> Result<SwapEstimate, Error> {
        if amount.is_negative() {
            return Err(StateError::NegativeAmount.into());
        }
        let fee_bps = BigInt::from(self.fee_bps);
        let fee_denom = BigInt::from(FEE_BPS_DENOM);
        let regross_denom = BigInt::from(FEE_BPS_DENOM - self.fee_bps);

        let mut curr_tick_index = self.curr_tick_index;
        let mut curr_tick_witness = self.curr_tick_witness;
        let mut sqrt_price = self.sqrt_price.clone();
        let mut liquidity = self.liquidity.clone();
        let mut remaining = amount.clone();
        let mut total_dy = BigInt::zero();

        for step in 0..MAX_SWAP_STEPS {
            if liquidity.is_zero() {
                return Ok(SwapEstimate {
                    curr_tick_index,
                    curr_tick_witness,
                    sqrt_price,
                    liquidity,
                    dx: remaining,
                    dy: total_dy,
                });
            }

            let fee = ceil_div(&(&remaining * &fee_bps), &fee_denom)?;
            let new_sqrt_price = sqrt_price_move_x(&sqrt_price, &(&remaining - &fee), &liquidity)?;
            let new_tick_index =
                calc_new_curr_tick_index(curr_tick_index, &sqrt_price, &new_sqrt_price)?;

            if new_tick_index >= curr_tick_witness {
                // Stays inside the witness range; the whole remainder fits.
                let dy = floor_div(&((&sqrt_price - &new_sqrt_price) * &liquidity), &q80())?;
                return Ok(SwapEstimate {
                    curr_tick_index: new_tick_index,
                    curr_tick_witness,
                    sqrt_price: new_sqrt_price,
                    liquidity,
                    dx: BigInt::zero(),
                    dy: total_dy + dy,
                });
            }

            let tick = provider.get_tick(curr_tick_witness).await?;
            // Stop one below the boundary price so the crossed tick's own
            // range is not entered at its exact edge.
            let boundary = &tick.sqrt_price - 1;
            let dy = floor_div(&((&sqrt_price - &boundary) * &liquidity), &q80())?;
            let dx_for_dy = ceil_div(
                &((&liquidity * (&sqrt_price - &boundary)) << 80u32),
                &(&sqrt_price * &boundary),
            )?;
            let dx_consumed = ceil_div(&(dx_for_dy * &fee_denom), &regross_denom)?;
            remaining = (remaining - dx_consumed).max(BigInt::zero());
            total_dy += dy;
            liquidity -= &tick.liquidity_net;
            curr_tick_index = tick.index;
            curr_tick_witness = tick.prev_index;
            sqrt_price = boundary;
            debug!(
                step,
                crossed = tick.index,
                remaining = %remaining,
                liquidity = %liquidity,
                "crossed tick downward"
            );
        }
        Err(StateError::SwapStepLimitExceeded.into())
    }

    /// Simulates selling `amount` of token Y for token X.
    pub async fn estimate_swap_y_to_x<P: TickProvider + Sync>(
        &self,
        amount: &BigInt,
        provider: &P,
    ) -> Result<SwapEstimate, Error> {
        if amount.is_negative() {
            return Err(StateError::NegativeAmount.into());
        }
        let fee_bps = BigInt::from(self.fee_bps);
        let fee_denom = BigInt::from(FEE_BPS_DENOM);
        let regross_denom = BigInt::from(FEE_BPS_DENOM - self.fee_bps);

        let mut curr_tick_index = self.curr_tick_index;
        let mut curr_tick_witness = self.curr_tick_witness;
        let mut sqrt_price = self.sqrt_price.clone();
        let mut liquidity = self.liquidity.clone();
        let mut remaining = amount.clone();
        let mut total_dx = BigInt::zero();

        for step in 0..MAX_SWAP_STEPS {
            if liquidity.is_zero() {
                return Ok(SwapEstimate {
                    curr_tick_index,
                    curr_tick_witness,
                    sqrt_price,
                    liquidity,
                    dx: total_dx,
                    dy: remaining,
                });
            }

            let fee = ceil_div(&(&remaining * &fee_bps), &fee_denom)?;
            let new_sqrt_price = sqrt_price_move_y(&sqrt_price, &(&remaining - &fee), &liquidity)?;
            let new_tick_index =
                calc_new_curr_tick_index(curr_tick_index, &sqrt_price, &new_sqrt_price)?;

            let witness = provider.get_tick(curr_tick_witness).await?;
            if new_tick_index < witness.next_index {
                // Stays below the next initialized tick.
                let dx = floor_div(
                    &((&liquidity * (&new_sqrt_price - &sqrt_price)) << 80u32),
                    &(&sqrt_price * &new_sqrt_price),
                )?;
                return Ok(SwapEstimate {
                    curr_tick_index: new_tick_index,
                    curr_tick_witness,
                    sqrt_price: new_sqrt_price,
                    liquidity,
                    dx: total_dx + dx,
                    dy: BigInt::zero(),
                });
            }

            let next = provider.get_tick(witness.next_index).await?;
            let dx = floor_div(
                &((&liquidity * (&next.sqrt_price - &sqrt_price)) << 80u32),
                &(&sqrt_price * &next.sqrt_price),
            )?;
            let dy_for_dx = ceil_div(&(&liquidity * (&next.sqrt_price - &sqrt_price)), &q80())?;
            let dy_consumed = ceil_div(&(dy_for_dx * &fee_denom), &regross_denom)?;
            remaining = (remaining - dy_consumed).max(BigInt::zero());
            total_dx += dx;
            liquidity += &next.liquidity_net;
            curr_tick_index = next.index;
            curr_tick_witness = next.index;
            sqrt_price = next.sqrt_price.clone();
            debug!(
                step,
                crossed = next.index,
                remaining = %remaining,
                liquidity = %liquidity,
                "crossed tick upward"
            );
        }
        Err(StateError::SwapStepLimitExceeded.into())
    }
}
