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

//! Statement lowering

use super::{Lowerer, expect_int};
use crate::{
    ast::AstNode,
    codegen::{
        error::{CodegenError, CodegenResult},
        operand::{ACCUMULATOR, ARGUMENT_REGISTERS, MAX_CALL_ARGUMENTS, Width},
    },
    symbols::SymbolLookup,
};
use tracing::trace;

impl<S: SymbolLookup + ?Sized> Lowerer<'_, '_, S> {
    /// Lower a statement list in order
    pub fn lower_statements(&mut self, statements: &[AstNode]) -> CodegenResult<()> {
        statements.iter().try_for_each(|statement| self.lower_statement(statement))
    }

    pub fn lower_statement(&mut self, node: &AstNode) -> CodegenResult<()> {
        match node {
            AstNode::StmtBlock { statements } => self.lower_statements(statements),
            AstNode::FunCall { name, args } => self.lower_call(name, args),
            AstNode::Assignment { name, value } => self.lower_assignment(name, value),
            AstNode::While { condition, body } => self.lower_while(condition, body),
            AstNode::IfThen {
                condition,
                then_body,
                else_body,
            } => self.lower_if(condition, then_body, else_body),
            other => Err(CodegenError::MalformedTree {
                found: other.kind(),
                context: "a statement",
            }),
        }
    }

    /// Arguments are placed left to right, slot `i` going to the `i`-th
    /// argument register at the width of the value
    fn lower_call(&mut self, name: &str, args: &[AstNode]) -> CodegenResult<()> {
        if args.len() > MAX_CALL_ARGUMENTS {
            return Err(CodegenError::TooManyArguments {
                callee: name.to_string(),
                count: args.len(),
                max: MAX_CALL_ARGUMENTS,
            });
        }

        for (slot, arg) in args.iter().enumerate() {
            let AstNode::Argument { expr } = arg else {
                return Err(CodegenError::MalformedTree {
                    found: arg.kind(),
                    context: "a call argument",
                });
            };
            let operand = self.lower_expr(expr)?;
            let target = ARGUMENT_REGISTERS[slot].name(operand.width());
            let mnemonic = format!("mov{}", operand.width().suffix());
            self.ctx.instruction(&mnemonic, &format!("{}, {target}", operand.name()))?;
        }

        trace!(callee = name, args = args.len(), "lowered call");
        self.ctx.instruction("call", name)
    }

    fn lower_assignment(&mut self, name: &str, value: &AstNode) -> CodegenResult<()> {
        self.resolve(name)?;
        expect_int(self.lower_expr(value)?, "assignment")?;
        self.ctx.instruction("movl", &format!("{}, {name}(%rip)", ACCUMULATOR.name(Width::Long)))
    }

    /// Bottom-tested loop: the condition sits after the body and is entered
    /// through an initial jump
    fn lower_while(&mut self, condition: &AstNode, body: &[AstNode]) -> CodegenResult<()> {
        let body_label = self.ctx.allocate_label()?;
        let cond_label = self.ctx.allocate_label()?;
        let exit_label = self.ctx.allocate_label()?;

        self.ctx.jump("jmp", cond_label)?;
        self.ctx.place_label(body_label)?;
        self.lower_statements(body)?;
        self.ctx.place_label(cond_label)?;
        self.lower_condition(condition, exit_label)?;
        self.ctx.jump("jmp", body_label)?;
        self.ctx.place_label(exit_label)
    }

    fn lower_if(&mut self, condition: &AstNode, then_body: &[AstNode], else_body: &[AstNode]) -> CodegenResult<()> {
        if else_body.is_empty() {
            let end_label = self.ctx.allocate_label()?;
            self.lower_condition(condition, end_label)?;
            self.lower_statements(then_body)?;
            return self.ctx.place_label(end_label);
        }

        let else_label = self.ctx.allocate_label()?;
        let end_label = self.ctx.allocate_label()?;

        self.lower_condition(condition, else_label)?;
        self.lower_statements(then_body)?;
        self.ctx.jump("jmp", end_label)?;
        self.ctx.place_label(else_label)?;
        self.lower_statements(else_body)?;
        self.ctx.place_label(end_label)
    }
}
