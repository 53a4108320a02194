//! Non-negative money amounts backed by decimal arithmetic.
//!
//! Wallet balances, product prices, and transaction totals all carry this
//! type, so a negative amount cannot be constructed in the first place.
//! Arithmetic that could go below zero is explicit (`checked_sub`).

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is negative.
    #[error("amount cannot be negative")]
    Negative,
    /// The input string is not a decimal number.
    #[error("not a decimal number: {0}")]
    NotANumber(String),
}

/// A non-negative monetary amount in the store's single currency.
///
/// Serializes as a decimal string with at least two fractional digits,
/// so a freshly-defaulted balance reads `"0.00"` rather than `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut amount = self.0;
        if amount.scale() < 2 {
            amount.rescale(2);
        }
        serializer.serialize_str(&amount.to_string())
    }
}

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a `Money` value from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a `Money` value from a decimal string such as `"4.00"`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NotANumber` for non-numeric input and
    /// `MoneyError::Negative` for negative amounts.
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let amount: Decimal = s
            .trim()
            .parse()
            .map_err(|_| MoneyError::NotANumber(s.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Saturating-free addition; money amounts cannot overflow in practice
    /// but `Decimal` addition is checked anyway.
    #[must_use]
    pub fn add(&self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Subtraction that refuses to go below zero.
    ///
    /// Returns `None` when `other` exceeds `self`.
    #[must_use]
    pub fn checked_sub(&self, other: Self) -> Option<Self> {
        if other.0 > self.0 {
            None
        } else {
            Some(Self(self.0 - other.0))
        }
    }

    /// Multiply a unit amount by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Money {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Money {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).expect("valid money literal")
    }

    #[test]
    fn test_new_rejects_negative() {
        assert_eq!(Money::new(Decimal::new(-1, 2)), Err(MoneyError::Negative));
        assert!(Money::new(Decimal::ZERO).is_ok());
        assert!(Money::new(Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn test_parse() {
        assert_eq!(money("4.00").amount(), Decimal::new(400, 2));
        assert!(matches!(
            Money::parse("four dollars"),
            Err(MoneyError::NotANumber(_))
        ));
        assert_eq!(Money::parse("-1"), Err(MoneyError::Negative));
    }

    #[test]
    fn test_checked_sub() {
        assert_eq!(
            money("10.00").checked_sub(money("8.00")),
            Some(money("2.00"))
        );
        assert_eq!(money("8.00").checked_sub(money("10.00")), None);
    }

    #[test]
    fn test_times() {
        assert_eq!(money("4.00").times(2), money("8.00"));
        assert!(money("4.00").times(0).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(money("2.5").to_string(), "$2.50");
    }

    #[test]
    fn test_serialize_pads_to_cents() {
        // A NUMERIC DEFAULT 0 column decodes at scale zero; the wire
        // shape stays "0.00" regardless.
        let encode = |m: &Money| serde_json::to_string(m).expect("serializable");
        assert_eq!(encode(&Money::ZERO), r#""0.00""#);
        assert_eq!(encode(&money("2.5")), r#""2.50""#);
        assert_eq!(encode(&money("1.234")), r#""1.234""#);
    }
}
