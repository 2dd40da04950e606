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

//! Expression lowering
//!
//! Every expression leaves its value in the accumulator and returns an
//! [`Operand`] describing it. Binary operations save one side on the stack
//! and restore it into the spill register before combining.

use super::{Lowerer, expect_int};
use crate::{
    ast::{ArithOp, AstNode, Constant},
    codegen::{
        error::{CodegenError, CodegenResult},
        operand::{ACCUMULATOR, Operand, SPILL, Width},
        sections::RodataGenerator,
    },
    symbols::SymbolLookup,
};

impl<S: SymbolLookup + ?Sized> Lowerer<'_, '_, S> {
    /// Lower an expression into the accumulator
    pub fn lower_expr(&mut self, node: &AstNode) -> CodegenResult<Operand> {
        match node {
            AstNode::Constant { value } => self.lower_constant(value),
            AstNode::VarRef { name } => {
                self.resolve(name)?;
                self.ctx.instruction("movl", &format!("{name}(%rip), %eax"))?;
                Ok(Operand::int())
            }
            AstNode::BinaryExpr { op, lhs, rhs } => self.lower_binary(*op, lhs, rhs),
            AstNode::RelExpr { op, lhs, rhs } => self.lower_relational_value(*op, lhs, rhs),
            other => Err(CodegenError::MalformedTree {
                found: other.kind(),
                context: "an expression",
            }),
        }
    }

    fn lower_constant(&mut self, value: &Constant) -> CodegenResult<Operand> {
        match value {
            Constant::Int(v) => {
                self.ctx.instruction("movl", &format!("${v}, %eax"))?;
                Ok(Operand::int())
            }
            Constant::Str { index, .. } => {
                if *index >= self.literals.len() {
                    return Err(CodegenError::LiteralIndexOutOfRange {
                        index: *index,
                        len: self.literals.len(),
                    });
                }
                let label = RodataGenerator::label(*index);
                self.ctx.instruction("leaq", &format!("{label}(%rip), %rax"))?;
                Ok(Operand::address())
            }
        }
    }

    /// `+` evaluates left then right; `-` evaluates right first so the saved
    /// right operand lands in the spill register and `subl` computes left - right.
    fn lower_binary(&mut self, op: ArithOp, lhs: &AstNode, rhs: &AstNode) -> CodegenResult<Operand> {
        let (first, second) = match op {
            ArithOp::Add => (lhs, rhs),
            ArithOp::Sub => (rhs, lhs),
        };

        expect_int(self.lower_expr(first)?, "arithmetic operand")?;
        self.save_accumulator()?;
        expect_int(self.lower_expr(second)?, "arithmetic operand")?;
        self.restore_into_spill()?;

        let mnemonic = match op {
            ArithOp::Add => "addl",
            ArithOp::Sub => "subl",
        };
        self.ctx.instruction(mnemonic, &format!("{}, {}", SPILL.name(Width::Long), ACCUMULATOR.name(Width::Long)))?;
        Ok(Operand::int())
    }

    pub(super) fn save_accumulator(&mut self) -> CodegenResult<()> {
        self.ctx.instruction("pushq", ACCUMULATOR.name(Width::Quad))
    }

    pub(super) fn restore_into_spill(&mut self) -> CodegenResult<()> {
        self.ctx.instruction("popq", SPILL.name(Width::Quad))
    }
}
