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

//! Register tables and value descriptors
//!
//! Every lowered expression leaves its result in the accumulator. The
//! [`Operand`] it returns records how wide that result is: integers are
//! 32-bit (`%eax`), string references are 64-bit addresses (`%rax`).

use crate::ast::ValueKind;

/// Operand width of an integer register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// 32 bits
    Long,
    /// 64 bits
    Quad,
}

impl Width {
    /// AT&T mnemonic suffix
    pub fn suffix(self) -> char {
        match self {
            Width::Long => 'l',
            Width::Quad => 'q',
        }
    }
}

/// A general purpose register with its 64-bit and 32-bit names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    quad: &'static str,
    long: &'static str,
}

impl Register {
    const fn new(quad: &'static str, long: &'static str) -> Self {
        Self { quad, long }
    }

    pub fn name(self, width: Width) -> &'static str {
        match width {
            Width::Long => self.long,
            Width::Quad => self.quad,
        }
    }
}

/// Holds the current result between sub-expression evaluations
pub const ACCUMULATOR: Register = Register::new("%rax", "%eax");

/// Receives the saved left or right operand of a binary operation. It is not
/// an argument register, so evaluating an argument never clobbers the
/// arguments already placed.
pub const SPILL: Register = Register::new("%r11", "%r11d");

/// System V integer argument registers in positional order
pub const ARGUMENT_REGISTERS: [Register; 6] = [
    Register::new("%rdi", "%edi"),
    Register::new("%rsi", "%esi"),
    Register::new("%rdx", "%edx"),
    Register::new("%rcx", "%ecx"),
    Register::new("%r8", "%r8d"),
    Register::new("%r9", "%r9d"),
];

/// Maximum number of arguments a call may pass
pub const MAX_CALL_ARGUMENTS: usize = ARGUMENT_REGISTERS.len();

/// What a lowered value is. Lowered values always live in the accumulator,
/// so only the kind is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub value_kind: ValueKind,
}

impl Operand {
    /// 32-bit integer in the accumulator
    pub fn int() -> Self {
        Self { value_kind: ValueKind::Int }
    }

    /// 64-bit string address in the accumulator
    pub fn address() -> Self {
        Self { value_kind: ValueKind::Str }
    }

    pub fn width(&self) -> Width {
        match self.value_kind {
            ValueKind::Int => Width::Long,
            ValueKind::Str => Width::Quad,
        }
    }

    /// Accumulator name at this operand's width
    pub fn name(&self) -> &'static str {
        ACCUMULATOR.name(self.width())
    }
}
