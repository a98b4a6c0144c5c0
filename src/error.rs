use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("Math error - square root of negative value")]
    NegativeSqrt,
    #[error("Math error - log out of bounds")]
    LogOutOfBounds,
    #[error("Math error - value not representable")]
    Unrepresentable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - tick out of bounds")]
    TickOutOfBounds,

    #[error("State error - price must be positive")]
    PriceNotPositive,

    #[error("State error - tick spacing must be positive")]
    TickSpacingNotPositive,

    #[error("State error - witness tick above current tick")]
    WitnessAboveCurrentTick,

    #[error("State error - tokens must be distinct")]
    TokensNotDistinct,

    #[error("State error - lower tick must be below upper tick")]
    InvalidTickRange,

    #[error("State error - amount must be non-negative")]
    NegativeAmount,

    #[error("State error - liquidity must be non-negative")]
    NegativeLiquidity,

    #[error("State error - fee must be below the bps denominator")]
    FeeOutOfRange,

    #[error("State error - no initial price range for this tick spacing")]
    UnsupportedTickSpacing,

    #[error("State error - fee baseline not initialised for position")]
    FeeBaselineNotSet,

    #[error("State error - incentive window ends before it starts")]
    InvalidTimeWindow,

    #[error("State error - tick correction search did not converge")]
    TickSearchExceeded,

    #[error("State error - swap crossed too many ticks")]
    SwapStepLimitExceeded,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider error - tick {0} is not initialized")]
    TickNotFound(i32),

    #[error("Provider error - backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] MathError),

    #[error(transparent)]
    StateError(#[from] StateError),

    #[error(transparent)]
    ProviderError(#[from] ProviderError),
}
