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

//! Comparison lowering
//!
//! A condition is lowered against an explicit false target: control falls
//! through when the condition holds and jumps to the target otherwise. The
//! condition itself never allocates labels.

use super::{Lowerer, expect_int};
use crate::{
    ast::{AstNode, RelOp},
    codegen::{
        context::Label,
        error::CodegenResult,
        operand::{ACCUMULATOR, Operand, SPILL, Width},
    },
    symbols::SymbolLookup,
};

/// Jump taken when `op` does not hold for the flags set by `cmpl %eax, %r11d`
fn jump_unless(op: RelOp) -> &'static str {
    match op {
        RelOp::Less => "jge",
        RelOp::Greater => "jle",
        RelOp::NotEqual => "je",
        RelOp::Equal => "jne",
    }
}

/// Byte set taken when `op` holds
fn set_if(op: RelOp) -> &'static str {
    match op {
        RelOp::Less => "setl",
        RelOp::Greater => "setg",
        RelOp::NotEqual => "setne",
        RelOp::Equal => "sete",
    }
}

impl<S: SymbolLookup + ?Sized> Lowerer<'_, '_, S> {
    /// Lower `condition`, branching to `false_target` when it does not hold
    pub fn lower_condition(&mut self, condition: &AstNode, false_target: Label) -> CodegenResult<()> {
        match condition {
            AstNode::RelExpr { op, lhs, rhs } => {
                self.compare(lhs, rhs)?;
                self.ctx.jump(jump_unless(*op), false_target)
            }
            // Any other integer expression is true when non-zero
            other => {
                expect_int(self.lower_expr(other)?, "condition")?;
                self.ctx.instruction("cmpl", "$0, %eax")?;
                self.ctx.jump("je", false_target)
            }
        }
    }

    /// Relational expression used as a value: 1 when it holds, else 0
    pub(super) fn lower_relational_value(&mut self, op: RelOp, lhs: &AstNode, rhs: &AstNode) -> CodegenResult<Operand> {
        self.compare(lhs, rhs)?;
        self.ctx.instruction(set_if(op), "%al")?;
        self.ctx.instruction("movzbl", "%al, %eax")?;
        Ok(Operand::int())
    }

    /// Evaluate `lhs` then `rhs` and set flags from `lhs - rhs`
    fn compare(&mut self, lhs: &AstNode, rhs: &AstNode) -> CodegenResult<()> {
        expect_int(self.lower_expr(lhs)?, "comparison operand")?;
        self.save_accumulator()?;
        expect_int(self.lower_expr(rhs)?, "comparison operand")?;
        self.restore_into_spill()?;
        self.ctx.instruction("cmpl", &format!("{}, {}", ACCUMULATOR.name(Width::Long), SPILL.name(Width::Long)))
    }
}
