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

use crate::Value;

use railway_errors::{InterpreterError, Result};
use railway_span::Span;

use parking_lot::RwLock;
use std::sync::Arc;

/// A variable cell: the owning handle behind every binding.
///
/// Borrowed parameters clone the handle, so caller and callee (and every
/// lane of a parallel call) see the same content; stolen parameters move
/// the handle between scopes. The lock is uncontended in sequential code
/// and serialises raw cell access across lanes -- ordering between lanes is
/// still the program's job, via `mutex`.
#[derive(Clone, Debug)]
pub struct Variable {
    value: Arc<RwLock<Value>>,
}

impl Variable {
    /// Creates a fresh cell owning `value`.
    pub fn new(value: Value) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
        }
    }

    /// Do two handles name the same cell?
    pub fn same_cell(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }

    /// Deep-copies the cell's content.
    pub fn copy(&self) -> Value {
        self.value.read().clone()
    }

    /// Takes the content out of the cell, consuming the handle.
    pub fn into_value(self) -> Value {
        match Arc::try_unwrap(self.value) {
            Ok(lock) => lock.into_inner(),
            // The cell is still shared somewhere; leave that copy alone.
            Err(shared) => shared.read().clone(),
        }
    }

    /// Copies the value at `indices` out of the cell.
    pub fn get(&self, indices: &[usize], span: Span) -> Result<Value> {
        let guard = self.value.read();
        Ok(index_into(&guard, indices, span)?.clone())
    }

    /// Overwrites the value at `indices`.
    pub fn set(&self, indices: &[usize], value: Value, span: Span) -> Result<()> {
        let mut guard = self.value.write();
        *index_into_mut(&mut guard, indices, span)? = value;
        Ok(())
    }

    /// Applies `f` to the value at `indices`, replacing it with the result.
    /// The whole step happens under one write lock.
    pub fn modify(&self, indices: &[usize], span: Span, f: impl FnOnce(&Value) -> Result<Value>) -> Result<()> {
        let mut guard = self.value.write();
        let slot = index_into_mut(&mut guard, indices, span)?;
        *slot = f(slot)?;
        Ok(())
    }

    /// Appends `value` to the array at `indices`.
    pub fn push(&self, indices: &[usize], value: Value, span: Span) -> Result<()> {
        let mut guard = self.value.write();
        match index_into_mut(&mut guard, indices, span)? {
            Value::Array(elements) => {
                elements.push(value);
                Ok(())
            }
            other => Err(InterpreterError::type_mismatch("push onto", other.kind(), span).into()),
        }
    }

    /// Removes and returns the last element of the array at `indices`.
    pub fn pop(&self, indices: &[usize], span: Span) -> Result<Value> {
        let mut guard = self.value.write();
        match index_into_mut(&mut guard, indices, span)? {
            Value::Array(elements) => elements
                .pop()
                .ok_or_else(|| InterpreterError::pop_from_empty_array(span).into()),
            other => Err(InterpreterError::type_mismatch("pop from", other.kind(), span).into()),
        }
    }
}

/// Walks nested arrays down an index path.
fn index_into<'a>(mut value: &'a Value, indices: &[usize], span: Span) -> Result<&'a Value> {
    for &index in indices {
        value = match value {
            Value::Array(elements) => elements
                .get(index)
                .ok_or_else(|| InterpreterError::index_out_of_bounds(index, elements.len(), span))?,
            Value::Rational(_) => {
                return Err(InterpreterError::type_mismatch("index into", value.kind(), span).into());
            }
        };
    }
    Ok(value)
}

/// Walks nested arrays down an index path, mutably.
fn index_into_mut<'a>(mut value: &'a mut Value, indices: &[usize], span: Span) -> Result<&'a mut Value> {
    for &index in indices {
        value = match value {
            Value::Array(elements) => {
                let length = elements.len();
                elements
                    .get_mut(index)
                    .ok_or_else(|| InterpreterError::index_out_of_bounds(index, length, span))?
            }
            Value::Rational(_) => {
                return Err(InterpreterError::type_mismatch("index into", "a number", span).into());
            }
        };
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(values: Vec<i64>) -> Value {
        Value::Array(values.into_iter().map(Value::integer).collect())
    }

    #[test]
    fn nested_get_and_set() {
        let cell = Variable::new(Value::Array(vec![array(vec![1, 2]), array(vec![3, 4])]));
        assert_eq!(cell.get(&[1, 0], Span::dummy()).unwrap(), Value::integer(3));
        cell.set(&[1, 0], Value::integer(9), Span::dummy()).unwrap();
        assert_eq!(cell.get(&[1, 0], Span::dummy()).unwrap(), Value::integer(9));
    }

    #[test]
    fn out_of_bounds_and_type_errors() {
        let cell = Variable::new(array(vec![1, 2]));
        assert!(cell.get(&[2], Span::dummy()).is_err());
        let scalar = Variable::new(Value::integer(5));
        assert!(scalar.get(&[0], Span::dummy()).is_err());
    }

    #[test]
    fn borrowed_handles_share_content() {
        let cell = Variable::new(Value::integer(1));
        let borrowed = cell.clone();
        borrowed.set(&[], Value::integer(2), Span::dummy()).unwrap();
        assert_eq!(cell.copy(), Value::integer(2));
        assert!(cell.same_cell(&borrowed));
    }

    #[test]
    fn push_then_pop_round_trips() {
        let cell = Variable::new(array(vec![1]));
        cell.push(&[], Value::integer(2), Span::dummy()).unwrap();
        assert_eq!(cell.pop(&[], Span::dummy()).unwrap(), Value::integer(2));
        assert_eq!(cell.copy(), array(vec![1]));
    }

    #[test]
    fn popping_an_empty_array_fails() {
        let cell = Variable::new(Value::Array(Vec::new()));
        assert!(cell.pop(&[], Span::dummy()).is_err());
    }
}
