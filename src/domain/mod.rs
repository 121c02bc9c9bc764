//! Domain types: debts, money, strategies and the payoff plan shapes.

pub mod debt;
pub mod money;
pub mod plan;
pub mod strategy;
