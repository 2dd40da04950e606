// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Symbol and literal tables consulted by the code generator
//!
//! The generator only depends on the [`SymbolLookup`] seam. [`SymbolTable`] is
//! the in-tree implementation, populated from a program's global declarations.

pub mod literal_pool;

pub use literal_pool::{LiteralPool, escape_literal};

use crate::ast::{AstNode, ValueKind};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building a symbol table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("duplicate declaration of '{name}'")]
    Duplicate { name: String },

    #[error("global '{name}' has the same name as a function")]
    ClashesWithFunction { name: String },
}

/// A declared global variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub value_kind: ValueKind,
}

/// Name resolution used by variable reads and writes
#[cfg_attr(test, mockall::automock)]
pub trait SymbolLookup {
    /// Find a symbol by name
    fn lookup(&self, name: &str) -> Option<Symbol>;

    /// Whether `name` is declared
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// Insertion-ordered table of global symbols
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the global declarations of a `Program` node.
    /// Non-program nodes yield an empty table.
    pub fn from_program(program: &AstNode) -> Result<Self, SymbolError> {
        let mut table = Self::new();
        if let AstNode::Program { globals, functions } = program {
            for decl in globals {
                if let AstNode::VarDecl { name, value_kind } = decl {
                    table.insert(name.clone(), *value_kind)?;
                }
            }
            for function in functions {
                if let AstNode::Function { name, .. } = function {
                    if table.contains(name) {
                        return Err(SymbolError::ClashesWithFunction { name: name.clone() });
                    }
                }
            }
        }
        Ok(table)
    }

    /// Declare a symbol; redeclaring a name is an error
    pub fn insert(&mut self, name: impl Into<String>, value_kind: ValueKind) -> Result<(), SymbolError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(SymbolError::Duplicate { name });
        }
        self.index.insert(name.clone(), self.symbols.len());
        self.symbols.push(Symbol { name, value_kind });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    /// Symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolLookup for SymbolTable {
    fn lookup(&self, name: &str) -> Option<Symbol> {
        self.get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}
