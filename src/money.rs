//! Integer-cent money arithmetic.
//!
//! Every monetary quantity in the engine is carried as whole cents and only
//! divided by 100 at the rendering boundary, so sums never accumulate
//! floating-point drift.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A signed amount of money in integer cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn abs(self) -> Self {
        Money(self.0.abs())
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Convert an amount in decimal currency units (e.g. `1234.50`) to cents,
    /// rounding half away from zero. Values outside the representable range
    /// degrade to zero.
    pub fn from_decimal(amount: Decimal) -> Self {
        (amount * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
            .unwrap_or(Money::ZERO)
    }

    /// Round-half-up share of this amount: `cents × part / whole`.
    ///
    /// Non-positive operands yield zero. Intermediate math widens to 128
    /// bits so large rents cannot overflow.
    pub fn prorate(self, part: i64, whole: i64) -> Self {
        if part <= 0 || whole <= 0 {
            return Money::ZERO;
        }
        let scaled = i128::from(self.0) * i128::from(part);
        let whole = i128::from(whole);
        Money(((scaled * 2 + whole) / (whole * 2)) as i64)
    }

    /// Divide by a positive count, rounding half away from zero.
    /// A non-positive divisor yields zero.
    pub fn div_round(self, divisor: i64) -> Self {
        if divisor <= 0 {
            return Money::ZERO;
        }
        let (n, d) = (i128::from(self.0), i128::from(divisor));
        let half = if n >= 0 { d } else { -d };
        Money(((2 * n + half) / (2 * d)) as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, item| acc + item)
    }
}

impl fmt::Display for Money {
    /// Renders cents as decimal currency text with exactly two decimals,
    /// the format the CSV export emits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_decimal_units_to_cents() {
        assert_eq!(Money::from_decimal(dec!(1000.00)).cents(), 100_000);
        assert_eq!(Money::from_decimal(dec!(0.005)).cents(), 1);
        assert_eq!(Money::from_decimal(dec!(-12.345)).cents(), -1235);
        assert_eq!(Money::from_decimal(dec!(0)).cents(), 0);
    }

    #[test]
    fn prorates_with_round_half_up() {
        // 17 of January's 31 days at $1,000.00/month.
        assert_eq!(Money::from_cents(100_000).prorate(17, 31).cents(), 54_839);
        // 10 of 29 leap-February days.
        assert_eq!(Money::from_cents(100_000).prorate(10, 29).cents(), 34_483);
        // Full month passes through unchanged.
        assert_eq!(Money::from_cents(100_000).prorate(31, 31).cents(), 100_000);
        assert_eq!(Money::from_cents(100_000).prorate(0, 31), Money::ZERO);
    }

    #[test]
    fn divides_with_rounding_and_zero_guard() {
        assert_eq!(Money::from_cents(7500).div_round(3).cents(), 2500);
        assert_eq!(Money::from_cents(100).div_round(3).cents(), 33);
        assert_eq!(Money::from_cents(101).div_round(2).cents(), 51);
        assert_eq!(Money::from_cents(-101).div_round(2).cents(), -51);
        assert_eq!(Money::from_cents(500).div_round(0), Money::ZERO);
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(Money::from_cents(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn sums_and_signs() {
        let total: Money = [100, -40, 15].map(Money::from_cents).into_iter().sum();
        assert_eq!(total.cents(), 75);
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::from_cents(-75).abs().cents(), 75);
        assert_eq!((-Money::from_cents(20)).cents(), -20);
    }
}
