pub mod cache;
pub mod expression;
pub mod sampling;
