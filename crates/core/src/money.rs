use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Signed amount rounded to cents. Positive is money received, negative is money spent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn to_cents(self) -> i64 {
        (self.0 * Decimal::from(100)).to_i64().unwrap_or_default()
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Strictly greater than zero.
    pub fn is_credit(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// `self * numerator / denominator`, rounded to cents. A zero denominator yields zero.
    pub fn prorate(self, numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Money::zero();
        }
        Money::from_decimal(self.0 * Decimal::from(numerator) / Decimal::from(denominator))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(decimal: Decimal) -> Self {
        Money::from_decimal(decimal)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_round_trip() {
        assert_eq!(Money::from_cents(-4250).to_cents(), -4250);
    }

    #[test]
    fn from_decimal_rounds_to_cents() {
        let m = Money::from_decimal(Decimal::new(123456, 4)); // 12.3456
        assert_eq!(m.to_cents(), 1235);
    }

    #[test]
    fn abs_and_sign() {
        let spent = Money::from_cents(-3000);
        assert!(spent.is_negative());
        assert!(!spent.is_credit());
        assert_eq!(spent.abs(), Money::from_cents(3000));
        assert!(!Money::zero().is_credit());
    }

    #[test]
    fn prorate_monthly_share() {
        let yearly = Money::from_cents(120_000);
        assert_eq!(yearly.prorate(1, 12), Money::from_cents(10_000));
        assert_eq!(yearly.prorate(12, 12), yearly);
        assert_eq!(Money::from_cents(100_000).prorate(1, 12), Money::from_cents(8333));
        assert_eq!(yearly.prorate(1, 0), Money::zero());
    }

    #[test]
    fn sum_of_amounts() {
        let total: Money = [Money::from_cents(4250), Money::from_cents(3000)].iter().sum();
        assert_eq!(total, Money::from_cents(7250));
    }

    #[test]
    fn display_two_places() {
        assert_eq!(Money::from_cents(7250).to_string(), "72.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }
}
