pub mod pool;
pub mod position;
pub mod stake;
pub mod swap;
pub mod ticks;
