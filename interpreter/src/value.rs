// Copyright (C) 2019-2022 The Railway Team.
// This file is part of the Railway library.

// The Railway library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Railway library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Railway library. If not, see <https://www.gnu.org/licenses/>.

use railway_errors::{InterpreterError, Result};
use railway_span::Span;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Railway runtime value: an exact rational or an array of values.
///
/// These are the only two types in the language. Rationals are kept
/// reduced with a positive denominator by [`BigRational`]; arrays are
/// heterogeneous and grow only at the tail.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// An exact rational number.
    Rational(BigRational),
    /// An ordered, heterogeneous array of values.
    Array(Vec<Value>),
}

impl Value {
    /// The rational zero.
    pub fn zero() -> Self {
        Self::Rational(BigRational::zero())
    }

    /// Builds a rational value from an integer.
    pub fn integer(n: i64) -> Self {
        Self::Rational(BigRational::from(BigInt::from(n)))
    }

    /// Builds the rational 0 or 1 from a boolean.
    pub fn from_bool(b: bool) -> Self {
        Self::integer(b as i64)
    }

    /// Truthiness: a nonzero rational or a non-empty array.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Rational(rational) => !rational.is_zero(),
            Self::Array(elements) => !elements.is_empty(),
        }
    }

    /// A short description of the value's type for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rational(_) => "a number",
            Self::Array(_) => "an array",
        }
    }

    /// Views the value as a rational, or fails with the given operation name.
    pub fn as_rational(&self, operation: &str, span: Span) -> Result<&BigRational> {
        match self {
            Self::Rational(rational) => Ok(rational),
            Self::Array(_) => Err(InterpreterError::type_mismatch(operation, self.kind(), span).into()),
        }
    }

    /// Views the value as an array index: a non-negative integer.
    pub fn as_index(&self, span: Span) -> Result<usize> {
        let index = match self {
            Self::Rational(rational) if rational.is_integer() && !rational.is_negative() => {
                rational.to_integer().to_usize()
            }
            _ => None,
        };
        index.ok_or_else(|| InterpreterError::invalid_index(self, span).into())
    }
}

impl From<BigRational> for Value {
    fn from(rational: BigRational) -> Self {
        Self::Rational(rational)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `BigRational` prints `p` when the denominator is one, `p/q` otherwise.
            Self::Rational(rational) => write!(f, "{rational}"),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!Value::zero().is_truthy());
        assert!(Value::integer(-3).is_truthy());
        assert!(!Value::Array(Vec::new()).is_truthy());
        assert!(Value::Array(vec![Value::zero()]).is_truthy());
    }

    #[test]
    fn display_reduces_rationals() {
        let value = Value::Rational(BigRational::new(BigInt::from(10), BigInt::from(8)));
        assert_eq!(value.to_string(), "5/4");
        assert_eq!(Value::integer(7).to_string(), "7");
        let nested = Value::Array(vec![Value::integer(1), Value::Array(vec![Value::integer(2)])]);
        assert_eq!(nested.to_string(), "[1, [2]]");
    }

    #[test]
    fn indices_must_be_whole_and_non_negative() {
        assert_eq!(Value::integer(3).as_index(Span::dummy()).unwrap(), 3);
        assert!(Value::integer(-1).as_index(Span::dummy()).is_err());
        let half = Value::Rational(BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert!(half.as_index(Span::dummy()).is_err());
    }
}
