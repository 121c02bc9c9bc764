use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller-assigned debt identifier.
pub type DebtId = u32;

/// Read-only view of anything that can be fed to the payoff engine.
///
/// Persistence-layer records implement this instead of being converted into
/// [`Debt`] first; the engine copies what it needs and never holds on to them.
pub trait DebtLike {
    fn id(&self) -> DebtId;
    fn name(&self) -> &str;
    /// Outstanding principal.
    fn balance(&self) -> Decimal;
    /// Annual percentage rate, e.g. `19.99` for 19.99%.
    fn interest_rate(&self) -> Decimal;
    fn minimum_payment(&self) -> Decimal;
}

impl<T: DebtLike + ?Sized> DebtLike for &T {
    fn id(&self) -> DebtId {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn balance(&self) -> Decimal {
        (**self).balance()
    }

    fn interest_rate(&self) -> Decimal {
        (**self).interest_rate()
    }

    fn minimum_payment(&self) -> Decimal {
        (**self).minimum_payment()
    }
}

/// A debt as entered by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub name: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
}

impl Debt {
    pub fn new(
        id: DebtId,
        name: impl Into<String>,
        balance: Decimal,
        interest_rate: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment,
        }
    }
}

impl DebtLike for Debt {
    fn id(&self) -> DebtId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn balance(&self) -> Decimal {
        self.balance
    }

    fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    fn minimum_payment(&self) -> Decimal {
        self.minimum_payment
    }
}
