use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------       Cents       -----------------------------------------------------------
/// A monetary amount in centavos. All prices and totals are stored as integer cents to keep arithmetic exact;
/// conversion to decimal reais only happens at the payment-processor boundary.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Cents(i64);

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Cents {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<i64> for Cents {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in centavos: {0}")]
pub struct CentsConversionError(String);

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Cents {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Cents {}

impl TryFrom<f64> for Cents {
    type Error = CentsConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(CentsConversionError(format!("{value} is not a finite amount")));
        }
        let cents = (value * 100.0).round();
        if cents.abs() > i64::MAX as f64 {
            return Err(CentsConversionError(format!("Value {value} is too large to convert to Cents")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(cents as i64))
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reais = self.0 as f64 / 100.0;
        write!(f, "R${reais:0.2}")
    }
}

impl Cents {
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_reais(reais: i64) -> Self {
        Self(reais * 100)
    }

    /// The amount as decimal reais, the unit the payment processor expects.
    pub fn to_reais(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }
}

#[cfg(test)]
mod test {
    use super::Cents;

    #[test]
    fn decimal_round_trip() {
        let price = Cents::try_from(19.90).unwrap();
        assert_eq!(price.value(), 1990);
        assert_eq!(price.to_reais(), 19.90);
        assert_eq!(price * 2, Cents::from(3980));
    }

    #[test]
    fn rejects_non_finite_amounts() {
        assert!(Cents::try_from(f64::NAN).is_err());
        assert!(Cents::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn display_formats_reais() {
        assert_eq!(Cents::from(3980).to_string(), "R$39.80");
        assert_eq!(Cents::from(5).to_string(), "R$0.05");
    }
}
