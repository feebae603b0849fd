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

use crate::Variable;

use railway_errors::{InterpreterError, Result};
use railway_span::Span;

use indexmap::IndexMap;
use std::sync::Arc;

/// One function activation's bindings, plus read access to the globals.
///
/// Scopes are flat: nested blocks share the function's scope, and a name
/// introduced inside a block lives until something explicitly destroys it.
/// A local binding shadows a same-named global while it exists.
#[derive(Debug)]
pub struct Scope {
    bindings: IndexMap<String, Variable>,
    globals: Arc<IndexMap<String, Variable>>,
}

impl Scope {
    /// Creates an empty scope over the given global table.
    pub fn new(globals: Arc<IndexMap<String, Variable>>) -> Self {
        Self {
            bindings: IndexMap::new(),
            globals,
        }
    }

    /// Binds `name` to `cell`. Fails if the name is already bound.
    pub fn bind(&mut self, name: &str, cell: Variable, span: Span) -> Result<()> {
        if self.bindings.contains_key(name) {
            return Err(InterpreterError::variable_exists(name, span).into());
        }
        self.bindings.insert(name.to_string(), cell);
        Ok(())
    }

    /// Removes the binding for `name` and returns its cell.
    pub fn unbind(&mut self, name: &str, span: Span) -> Result<Variable> {
        self.bindings
            .shift_remove(name)
            .ok_or_else(|| InterpreterError::undefined_variable(name, span).into())
    }

    /// Resolves `name` to its cell: locals first, then the globals.
    pub fn resolve(&self, name: &str, span: Span) -> Result<Variable> {
        self.bindings
            .get(name)
            .or_else(|| self.globals.get(name))
            .cloned()
            .ok_or_else(|| InterpreterError::undefined_variable(name, span).into())
    }

    /// Resolves `name` for writing. Globals are read-only, so a name that
    /// only exists globally is an error rather than a silent fallback.
    pub fn resolve_local(&self, name: &str, span: Span) -> Result<Variable> {
        match self.bindings.get(name) {
            Some(cell) => Ok(cell.clone()),
            None if self.globals.contains_key(name) => {
                Err(InterpreterError::write_to_global(name, span).into())
            }
            None => Err(InterpreterError::undefined_variable(name, span).into()),
        }
    }

    /// Is `name` locally bound?
    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// The names of all live bindings, in binding order. Drives the
    /// information-leak check at scope exit.
    pub fn snapshot_names(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }

    /// Consumes the scope, yielding its bindings.
    pub fn into_bindings(self) -> IndexMap<String, Variable> {
        self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn empty_globals() -> Arc<IndexMap<String, Variable>> {
        Arc::new(IndexMap::new())
    }

    #[test]
    fn bind_resolve_unbind() {
        let mut scope = Scope::new(empty_globals());
        scope.bind("x", Variable::new(Value::integer(6)), Span::dummy()).unwrap();
        assert_eq!(scope.resolve("x", Span::dummy()).unwrap().copy(), Value::integer(6));
        scope.unbind("x", Span::dummy()).unwrap();
        assert!(scope.resolve("x", Span::dummy()).is_err());
    }

    #[test]
    fn no_shadowing_within_a_scope() {
        let mut scope = Scope::new(empty_globals());
        scope.bind("x", Variable::new(Value::integer(1)), Span::dummy()).unwrap();
        let err = scope.bind("x", Variable::new(Value::integer(2)), Span::dummy()).unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");
    }

    #[test]
    fn locals_shadow_globals_and_globals_are_read_only() {
        let mut globals = IndexMap::new();
        globals.insert("size".to_string(), Variable::new(Value::integer(8)));
        let mut scope = Scope::new(Arc::new(globals));

        assert_eq!(scope.resolve("size", Span::dummy()).unwrap().copy(), Value::integer(8));
        assert!(scope.resolve_local("size", Span::dummy()).is_err());

        scope.bind("size", Variable::new(Value::integer(3)), Span::dummy()).unwrap();
        assert_eq!(scope.resolve("size", Span::dummy()).unwrap().copy(), Value::integer(3));
        scope.resolve_local("size", Span::dummy()).unwrap();

        scope.unbind("size", Span::dummy()).unwrap();
        assert_eq!(scope.resolve("size", Span::dummy()).unwrap().copy(), Value::integer(8));
    }
}
