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

//! Code generation module
//!
//! Lowers a tinyc program into GNU assembler (AT&T syntax) text for x86-64.
//!
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `writer`: Line-oriented assembly output buffer
//! - `context`: Per-invocation state (labels, statistics, output)
//! - `operand`: Value location/width descriptors and register tables
//! - `sections`: Data, read-only data and function frame emission
//! - `lower`: Statement, expression and condition lowering
//! - `generator`: Main entry point that coordinates all phases

pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod lower;
pub mod operand;
pub mod sections;
pub mod writer;

// Re-export main types
pub use config::CodegenConfig;
pub use context::{GenerationContext, GenerationStats, Label};
pub use error::{CodegenError, CodegenResult};
pub use generator::{AsmGenerator, GeneratedAssembly};
pub use operand::{ARGUMENT_REGISTERS, MAX_CALL_ARGUMENTS, Operand, Register, Width};
pub use writer::AsmWriter;
