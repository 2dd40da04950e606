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

//! tinyc compiler library
//!
//! This crate provides the typed syntax tree of the tinyc language, the tree
//! printer, the symbol and literal tables, and a code generator that lowers
//! programs into x86-64 assembly for the GNU assembler.
//!
//! ```
//! use tinyc_compiler::{AsmGenerator, AstNode, LiteralPool, SymbolTable, ValueKind};
//!
//! let mut program = AstNode::program(
//!     vec![AstNode::var_decl("x", ValueKind::Int)],
//!     vec![AstNode::function("main", vec![], vec![AstNode::assign("x", AstNode::int(42))])],
//! );
//! let mut literals = LiteralPool::new();
//! literals.intern_tree(&mut program);
//! let symbols = SymbolTable::from_program(&program).unwrap();
//!
//! let output = AsmGenerator::new().generate(&program, &symbols, &literals).unwrap();
//! assert!(output.text.contains("movl\t%eax, x(%rip)"));
//! ```

pub mod ast;
pub mod codegen;
pub mod symbols;

// Re-export main types for easy access
pub use ast::{ArithOp, AstError, AstNode, Constant, NodeKind, RelOp, ReleaseStats, ValueKind, print_tree};
pub use codegen::{AsmGenerator, CodegenConfig, CodegenError, CodegenResult, GeneratedAssembly, GenerationStats};
pub use symbols::{LiteralPool, Symbol, SymbolError, SymbolLookup, SymbolTable};
