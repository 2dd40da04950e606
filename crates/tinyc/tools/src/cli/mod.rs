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

//! Command implementations for the `tinyc` driver
//!
//! Input is a JSON-serialized `Program` tree. Loading interns its string
//! literals and collects its globals, which is the work a parser would
//! otherwise have done before code generation.

pub mod check;
pub mod generate;
pub mod print;

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tinyc_compiler::{AstNode, CodegenConfig, CodegenError, LiteralPool, SymbolError, SymbolTable};
use tracing::debug;

/// Errors raised by the driver commands
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid syntax tree in {}: {source}", .path.display())]
    Tree { path: PathBuf, source: serde_json::Error },

    #[error("Invalid configuration in {}: {source}", .path.display())]
    Config { path: PathBuf, source: toml::de::Error },

    #[error("Symbol table error: {0}")]
    Symbols(#[from] SymbolError),

    #[error("Code generation failed: {0}")]
    Codegen(#[from] CodegenError),

    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// A tree ready for generation along with its tables
#[derive(Debug)]
pub struct LoadedProgram {
    pub tree: AstNode,
    pub symbols: SymbolTable,
    pub literals: LiteralPool,
}

/// Read a JSON tree, intern its literals and collect its globals
pub fn load_program(path: &Path) -> ToolResult<LoadedProgram> {
    let content = fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut tree: AstNode = serde_json::from_str(&content).map_err(|source| ToolError::Tree {
        path: path.to_path_buf(),
        source,
    })?;

    let mut literals = LiteralPool::new();
    literals.intern_tree(&mut tree);
    let symbols = SymbolTable::from_program(&tree)?;

    debug!(path = %path.display(), nodes = tree.node_count(), globals = symbols.len(), literals = literals.len(), "loaded program");
    Ok(LoadedProgram { tree, symbols, literals })
}

/// Load generator configuration from TOML, or the default when no file is given
pub fn load_config(path: Option<&Path>) -> ToolResult<CodegenConfig> {
    let Some(path) = path else {
        return Ok(CodegenConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ToolError::Config {
        path: path.to_path_buf(),
        source,
    })
}
