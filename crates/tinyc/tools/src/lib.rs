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

//! tinyc tools library
//!
//! This crate provides the `tinyc` command-line driver: loading serialized
//! syntax trees, printing them, and generating or checking assembly.

pub mod cli;

// Re-export main CLI entry points for easy access
pub use cli::{
    LoadedProgram, ToolError, ToolResult,
    check::{CheckArgs, run_check},
    generate::{GenerateArgs, run_generate},
    load_config, load_program,
    print::{PrintArgs, run_print},
};
