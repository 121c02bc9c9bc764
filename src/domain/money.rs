use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Threshold at or below which a balance counts as paid off.
pub const PAID_OFF_EPSILON: Money = Money(dec!(0.01));

/// Largest amount the engine works with (one quadrillion). Keeps sums of
/// balances, interest and payments far below `Decimal::MAX`.
pub const MAX_AMOUNT: Money = Money(dec!(1000000000000000));

/// A currency amount.
///
/// Wraps `rust_decimal::Decimal` so arithmetic never drifts the way floats do.
/// Running balances keep full precision; [`Money::round2`] is applied only where
/// an amount is recorded for display or aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Clamps into `0..=MAX_AMOUNT`.
    pub fn clamped(amount: Decimal) -> Self {
        Self(amount.clamp(Decimal::ZERO, MAX_AMOUNT.0))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to cents, half away from zero.
    pub fn round2(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_paid_off(&self) -> bool {
        *self <= PAID_OFF_EPSILON
    }

    /// Subtraction floored at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self::clamped(self.0 - rhs.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round2().0)
    }
}

// Always two decimals on the wire, so CSV and JSON consumers see "100.00", not "100".
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
