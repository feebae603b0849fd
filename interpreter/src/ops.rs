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

//! The operator tables: pure functions over [`Value`]s.
//!
//! Binary and unary operators serve expressions; the modification table
//! additionally serves statements like `x += e`, whose backward execution
//! applies the designated inverse operator.

use crate::Value;

use railway_ast::{BinaryOperation, ModOperation, UnaryOperation};
use railway_errors::{InterpreterError, Result};
use railway_span::Span;

use num_rational::BigRational;
use num_traits::{Pow, Signed, ToPrimitive, Zero};

/// Applies a binary operator to two values.
pub fn evaluate_binary(op: BinaryOperation, left: &Value, right: &Value, span: Span) -> Result<Value> {
    use BinaryOperation::*;
    match op {
        Pow => power(left, right, span),
        Mul => Ok(Value::from(rational(left, "multiply", span)? * rational(right, "multiply", span)?)),
        Div => divide(left, right, span),
        IntDiv => Ok(Value::from(floor_div(left, right, span)?)),
        Rem => {
            let (l, r) = (rational(left, "take the modulo of", span)?, rational(right, "take the modulo of", span)?);
            let floored = floor_div(left, right, span)?;
            Ok(Value::from(l - r * floored))
        }
        Add => Ok(Value::from(rational(left, "add", span)? + rational(right, "add", span)?)),
        Sub => Ok(Value::from(rational(left, "subtract", span)? - rational(right, "subtract", span)?)),
        Lt => compare(left, right, span, |ordering| ordering.is_lt()),
        Le => compare(left, right, span, |ordering| ordering.is_le()),
        Gt => compare(left, right, span, |ordering| ordering.is_gt()),
        Ge => compare(left, right, span, |ordering| ordering.is_ge()),
        // Equality is structural and legal across types.
        Eq => Ok(Value::from_bool(left == right)),
        Neq => Ok(Value::from_bool(left != right)),
        Xor => Ok(Value::from_bool(left.is_truthy() ^ right.is_truthy())),
        Or => Ok(Value::from_bool(left.is_truthy() | right.is_truthy())),
        And => Ok(Value::from_bool(left.is_truthy() & right.is_truthy())),
    }
}

/// Applies a unary operator to a value.
pub fn evaluate_unary(op: UnaryOperation, operand: &Value, span: Span) -> Result<Value> {
    match op {
        UnaryOperation::Negate => Ok(Value::from(-operand.as_rational("negate", span)?.clone())),
        UnaryOperation::Not => Ok(Value::from_bool(!operand.is_truthy())),
    }
}

/// Applies a modification operator to the current content of a cell.
///
/// The engine passes the forward operator when running forwards and its
/// inverse when running backwards; the reversibility bookkeeping lives
/// there, not here.
pub fn evaluate_modification(op: ModOperation, current: &Value, operand: &Value, span: Span) -> Result<Value> {
    use ModOperation::*;
    match op {
        Add => evaluate_binary(BinaryOperation::Add, current, operand, span),
        Sub => evaluate_binary(BinaryOperation::Sub, current, operand, span),
        Mul => {
            // In-place multiplication by zero destroys the cell's content;
            // its reversal would be a division by zero.
            if !operand.is_truthy() {
                return Err(InterpreterError::zero_multiplication(span).into());
            }
            evaluate_binary(BinaryOperation::Mul, current, operand, span)
        }
        Div => evaluate_binary(BinaryOperation::Div, current, operand, span),
        Pow => evaluate_binary(BinaryOperation::Pow, current, operand, span),
        Rem => evaluate_binary(BinaryOperation::Rem, current, operand, span),
        Xor => evaluate_binary(BinaryOperation::Xor, current, operand, span),
        And => evaluate_binary(BinaryOperation::And, current, operand, span),
        Or => evaluate_binary(BinaryOperation::Or, current, operand, span),
    }
}

fn rational<'a>(value: &'a Value, operation: &str, span: Span) -> Result<&'a BigRational> {
    value.as_rational(operation, span)
}

fn divide(left: &Value, right: &Value, span: Span) -> Result<Value> {
    let l = rational(left, "divide", span)?;
    let r = rational(right, "divide", span)?;
    if r.is_zero() {
        return Err(InterpreterError::division_by_zero(span).into());
    }
    Ok(Value::from(l / r))
}

/// Exact floor of `left / right`, shared by `//` and `%`.
fn floor_div(left: &Value, right: &Value, span: Span) -> Result<BigRational> {
    let l = rational(left, "floor-divide", span)?;
    let r = rational(right, "floor-divide", span)?;
    if r.is_zero() {
        return Err(InterpreterError::division_by_zero(span).into());
    }
    Ok((l / r).floor())
}

fn compare(left: &Value, right: &Value, span: Span, truth: impl Fn(std::cmp::Ordering) -> bool) -> Result<Value> {
    let l = rational(left, "compare", span)?;
    let r = rational(right, "compare", span)?;
    Ok(Value::from_bool(truth(l.cmp(r))))
}

/// Exact exponentiation. The exponent must be a whole number; negative
/// exponents invert, which stays closed over the rationals.
fn power(left: &Value, right: &Value, span: Span) -> Result<Value> {
    let base = rational(left, "exponentiate", span)?;
    let exponent = rational(right, "exponentiate", span)?;
    if !exponent.is_integer() {
        return Err(InterpreterError::fractional_exponent(exponent, span).into());
    }
    let magnitude = exponent
        .to_integer()
        .abs()
        .to_u32()
        .ok_or_else(|| InterpreterError::exponent_too_large(exponent, span))?;
    if exponent.is_negative() && base.is_zero() {
        return Err(InterpreterError::division_by_zero(span).into());
    }
    let raised = Pow::pow(base.clone(), magnitude);
    Ok(Value::from(if exponent.is_negative() { raised.recip() } else { raised }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::BigInt;

    fn int(n: i64) -> Value {
        Value::integer(n)
    }

    fn ratio(p: i64, q: i64) -> Value {
        Value::Rational(BigRational::new(BigInt::from(p), BigInt::from(q)))
    }

    fn binary(op: BinaryOperation, l: &Value, r: &Value) -> Value {
        evaluate_binary(op, l, r, Span::dummy()).unwrap()
    }

    #[test]
    fn exact_thirds_sum_to_one() {
        let third = ratio(1, 3);
        let two_thirds = binary(BinaryOperation::Add, &third, &third);
        let one = binary(BinaryOperation::Add, &two_thirds, &third);
        assert_eq!(one, int(1));
    }

    #[test]
    fn floor_division_and_modulo_agree() {
        assert_eq!(binary(BinaryOperation::IntDiv, &int(7), &int(2)), int(3));
        assert_eq!(binary(BinaryOperation::IntDiv, &int(-7), &int(2)), int(-4));
        assert_eq!(binary(BinaryOperation::Rem, &int(7), &int(2)), int(1));
        assert_eq!(binary(BinaryOperation::Rem, &int(-7), &int(2)), int(1));
        assert_eq!(binary(BinaryOperation::Rem, &ratio(7, 2), &int(2)), ratio(3, 2));
    }

    #[test]
    fn negative_exponents_invert() {
        assert_eq!(binary(BinaryOperation::Pow, &int(2), &int(-3)), ratio(1, 8));
        assert_eq!(binary(BinaryOperation::Pow, &ratio(2, 3), &int(2)), ratio(4, 9));
    }

    #[test]
    fn fractional_exponents_are_rejected() {
        let err = evaluate_binary(BinaryOperation::Pow, &int(2), &ratio(1, 2), Span::dummy()).unwrap_err();
        assert!(err.to_string().contains("whole number"), "{err}");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(evaluate_binary(BinaryOperation::Div, &int(1), &int(0), Span::dummy()).is_err());
        assert!(evaluate_binary(BinaryOperation::IntDiv, &int(1), &int(0), Span::dummy()).is_err());
        assert!(evaluate_binary(BinaryOperation::Pow, &int(0), &int(-1), Span::dummy()).is_err());
    }

    #[test]
    fn in_place_zero_multiplication_is_an_error() {
        let err = evaluate_modification(ModOperation::Mul, &int(5), &int(0), Span::dummy()).unwrap_err();
        assert_eq!(err.error_code(), InterpreterError::zero_multiplication(Span::dummy()).error_code());
        // Expression-level multiplication by zero is fine.
        assert_eq!(binary(BinaryOperation::Mul, &int(5), &int(0)), int(0));
    }

    #[test]
    fn comparisons_reject_arrays() {
        let array = Value::Array(vec![int(1)]);
        assert!(evaluate_binary(BinaryOperation::Lt, &int(1), &array, Span::dummy()).is_err());
        // Equality is structural and fine across types.
        assert_eq!(binary(BinaryOperation::Eq, &int(1), &array), int(0));
        assert_eq!(binary(BinaryOperation::Neq, &int(1), &array), int(1));
    }

    #[test]
    fn logical_operators_coerce_truthiness() {
        let array = Value::Array(vec![int(0)]);
        assert_eq!(binary(BinaryOperation::And, &array, &int(2)), int(1));
        assert_eq!(binary(BinaryOperation::Xor, &array, &int(2)), int(0));
        assert_eq!(binary(BinaryOperation::Or, &Value::Array(Vec::new()), &int(0)), int(0));
    }

    #[test]
    fn modification_inverses_round_trip() {
        let span = Span::dummy();
        for (op, value) in [
            (ModOperation::Add, ratio(5, 3)),
            (ModOperation::Sub, int(11)),
            (ModOperation::Mul, ratio(-2, 7)),
            (ModOperation::Div, int(4)),
        ] {
            let start = ratio(9, 2);
            let forward = evaluate_modification(op, &start, &value, span).unwrap();
            let inverse = op.inverse().unwrap();
            let back = evaluate_modification(inverse, &forward, &value, span).unwrap();
            assert_eq!(back, start, "{op:?} then {inverse:?} must cancel");
        }
    }
}
