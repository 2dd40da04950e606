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

//! Assembly section generators
//!
//! This module contains specialized generators for the parts of the output
//! that do not depend on expression lowering:
//! - Data section (global storage)
//! - Read-only data section (string literal pool)
//! - Function frames (symbol export, prologue, epilogue)

pub mod data;
pub mod function;
pub mod rodata;

pub use data::DataGenerator;
pub use function::FunctionFrame;
pub use rodata::RodataGenerator;
