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

//! Error types for assembly generation

use crate::ast::{NodeKind, ValueKind};
use thiserror::Error;

/// Errors that can occur during assembly generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("Undefined symbol: {name}")]
    UnresolvedReference { name: String },

    #[error("Malformed tree: {found} cannot appear as {context}")]
    MalformedTree { found: NodeKind, context: &'static str },

    #[error("Call to {callee} passes {count} arguments, at most {max} are supported")]
    TooManyArguments { callee: String, count: usize, max: usize },

    #[error("Type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("String literal index {index} out of range for a pool of {len}")]
    LiteralIndexOutOfRange { index: usize, len: usize },

    #[error("Output size limit exceeded: {actual} > {limit}")]
    OutputSizeLimitExceeded { actual: usize, limit: usize },

    #[error("Label numbering starting at {base} ran out of labels")]
    LabelSpaceExhausted { base: u32 },

    #[error("Symbol {name} is defined more than once in the output")]
    SymbolCollision { name: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for assembly generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;
