pub mod fee_math;
pub mod liquidity_math;
pub mod math_helpers;
pub mod price_math;
pub mod reward_math;
pub mod swap_math;
pub mod tick_math;
