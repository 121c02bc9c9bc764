pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;
pub mod logging;

pub use application::engine::{
    MAX_INTEREST_RATE, MAX_MONTHS, SimulationRequest, simulate, simulate_with,
};
pub use domain::debt::{Debt, DebtId, DebtLike};
pub use domain::money::{MAX_AMOUNT, Money};
pub use domain::plan::{DebtSummary, Outcome, PayoffLine, PayoffMonth, PayoffPlan};
pub use domain::strategy::Strategy;
