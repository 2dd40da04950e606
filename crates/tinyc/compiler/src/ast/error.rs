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

//! Error types for tree construction and decoding

use thiserror::Error;

/// Errors raised while building or decoding a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("unsupported arithmetic operator '{0}'")]
    UnsupportedArithmeticOperator(char),

    #[error("unsupported relational operator '{0}'")]
    UnsupportedRelationalOperator(char),
}

/// Result type for tree operations
pub type AstResult<T> = Result<T, AstError>;
