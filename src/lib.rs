//! Off-chain math and swap estimation for x80 concentrated-liquidity pools.
//!
//! This crate mirrors the fixed-point arithmetic of an on-chain concentrated
//! liquidity market maker so a client can predict swap outcomes, position
//! liquidity and fee/reward accrual without submitting a transaction.
//!
//! It exposes:
//! - Low-level math primitives (`math::*`) for ticks, sqrt prices, liquidity,
//!   fees and rewards, all on `num_bigint::BigInt` with explicit rounding.
//! - Immutable [`Pool`] / [`Position`] / [`Stake`] snapshots.
//! - An async [`TickProvider`] seam so the cross-tick swap estimator can fetch
//!   initialized ticks lazily from any backend.
//!
//! # Examples
//!
//! ## Pure math
//! ```
//! use clmm_quote::math::tick_math;
//!
//! let sqrt_price = tick_math::sqrt_price_from_tick(0).unwrap();
//! assert_eq!(sqrt_price, clmm_quote::q80());
//! assert_eq!(tick_math::nearest_usable_tick(-275_611, 10), -275_620);
//! ```
//!
//! ## Estimating a swap against prefetched tick data
//! ```no_run
//! use clmm_quote::{MapTickIndex, Pool, Token, TokenStandard};
//! use num_bigint::BigInt;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), clmm_quote::Error> {
//! let token_x = Token::new("KT1TokenX".into(), None, 18, TokenStandard::Fa12);
//! let token_y = Token::new("KT1TokenY".into(), Some(0), 6, TokenStandard::Fa2);
//!
//! let pool = Pool::new(
//!     token_x,
//!     token_y,
//!     -275_611,                               // current tick
//!     -275_730,                               // witness tick
//!     10,                                     // tick spacing
//!     "1251963215603107302".parse().unwrap(), // sqrt price, x80
//!     5,                                      // fee in bps
//!     BigInt::from(1_259_480_907_161_538u64), // in-range liquidity
//! )?;
//!
//! let mut ticks = MapTickIndex::new();
//! // ... insert TickElement values read from contract storage ...
//!
//! let estimate = pool
//!     .estimate_swap_x_to_y(&BigInt::from(10u64.pow(18)), &ticks)
//!     .await?;
//! println!("dy out: {}", estimate.dy);
//! # Ok(()) }
//! ```

use std::sync::LazyLock;

use num_bigint::BigInt;
use num_traits::One;

pub mod error;
mod hash;
pub mod math;
pub mod pool;
pub mod token;

pub use error::{Error, MathError, ProviderError, StateError};
pub use hash::FastMap;
pub use math::fee_math::BalanceNatx128;
pub use math::liquidity_math::BalanceNat;
pub use pool::pool::Pool;
pub use pool::position::Position;
pub use pool::stake::{Incentive, Stake};
pub use pool::swap::SwapEstimate;
pub use pool::ticks::{MapTickIndex, TickElement, TickProvider};
pub use token::{Token, TokenStandard};

/// Greatest valid tick magnitude; valid indices lie in `[-MAX_TICK, MAX_TICK]`.
pub const MAX_TICK: i32 = 1_048_575;

/// Denominator for fees expressed in basis points.
pub const FEE_BPS_DENOM: u32 = 10_000;

static Q80: LazyLock<BigInt> = LazyLock::new(|| BigInt::one() << 80u32);
static Q128: LazyLock<BigInt> = LazyLock::new(|| BigInt::one() << 128u32);

/// The 2^80 fixed-point scale used by sqrt prices and liquidity formulas.
pub fn q80() -> BigInt {
    Q80.clone()
}

/// The 2^128 fixed-point scale used by fee-growth and reward accumulators.
pub fn q128() -> BigInt {
    Q128.clone()
}
