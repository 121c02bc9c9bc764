//! Application layer: the payoff engine and the views built on top of it.
//!
//! Everything here is synchronous and pure. `comparison::compare_async` is the
//! one place that hands work to `tokio`, running each strategy on a blocking
//! task.

pub mod comparison;
pub mod engine;
pub mod outlook;
