//! Exact monetary amounts in a single fixed currency.
//!
//! Amounts are `rust_decimal::Decimal` under the hood so sums never drift the
//! way binary floats do (`0.10 * 100` is exactly `10.00`). Formatting follows
//! the en_NZ convention: `$1,234.50`, `-$42.50`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Currencies a statement can be denominated in. Only NZD today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Nzd,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Nzd => "NZD",
        }
    }

    /// Symbol used when rendering for the en_NZ locale
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Nzd => "$",
        }
    }

    /// Digits after the decimal point when displayed
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::Nzd => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text that could not be read as an amount of money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a monetary amount: {text:?}")]
pub struct MoneyParseError {
    pub text: String,
}

/// An exact amount of money in one currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Amount in New Zealand dollars
    pub fn nzd(amount: Decimal) -> Self {
        Self::new(amount, Currency::Nzd)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Parse statement text such as `-42.50` or ` 100.00 `.
    ///
    /// Surrounding whitespace is ignored. Thousands separators, currency
    /// symbols and exponents are rejected.
    pub fn parse(text: &str, currency: Currency) -> Result<Self, MoneyParseError> {
        let amount = Decimal::from_str(text.trim()).map_err(|_| MoneyParseError {
            text: text.to_string(),
        })?;
        Ok(Self::new(amount, currency))
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn assert_same_currency(&self, other: &Money) {
        assert_eq!(
            self.currency, other.currency,
            "cannot combine {} with {}",
            self.currency, other.currency
        );
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.assert_same_currency(&rhs);
        Money::new(self.amount + rhs.amount, self.currency)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        self.assert_same_currency(&rhs);
        Money::new(self.amount - rhs.amount, self.currency)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::new(-self.amount, self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money::new(self.amount * Decimal::from(rhs), self.currency)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(Currency::default()), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.minor_units();
        let mut rounded = self
            .amount
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded.set_sign_positive(true);
        rounded.rescale(dp);

        let digits = rounded.to_string();
        let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        if negative {
            f.write_str("-")?;
        }
        f.write_str(self.currency.symbol())?;
        f.write_str(&group_thousands(whole))?;
        if !frac.is_empty() {
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}

fn group_thousands(whole: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.amount)
    }
}
