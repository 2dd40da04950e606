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

//! Tree lowering
//!
//! [`Lowerer`] walks function bodies and emits instructions through a
//! [`GenerationContext`]. Lowering is split by the role a node plays:
//!
//! - `statements`: blocks, calls, assignments, loops and conditionals
//! - `expressions`: values left in the accumulator
//! - `conditions`: comparisons that branch to an explicit false target
//!
//! Control constructs allocate their own labels and hand the false target to
//! the condition they lower; no label state is shared between constructs.

mod conditions;
mod expressions;
mod statements;

use crate::{
    ast::{AstNode, ValueKind},
    codegen::{
        context::GenerationContext,
        error::{CodegenError, CodegenResult},
        operand::Operand,
        sections::FunctionFrame,
    },
    symbols::{LiteralPool, Symbol, SymbolLookup},
};
use tracing::{debug, instrument};

/// Lowers function definitions into a generation context
pub struct Lowerer<'ctx, 'a, S: SymbolLookup + ?Sized> {
    ctx: &'ctx mut GenerationContext<'a>,
    symbols: &'ctx S,
    literals: &'ctx LiteralPool,
}

impl<'ctx, 'a, S: SymbolLookup + ?Sized> Lowerer<'ctx, 'a, S> {
    pub fn new(ctx: &'ctx mut GenerationContext<'a>, symbols: &'ctx S, literals: &'ctx LiteralPool) -> Self {
        Self { ctx, symbols, literals }
    }

    /// Lower one entry of a program's function list
    pub fn lower_function(&mut self, node: &AstNode) -> CodegenResult<()> {
        match node {
            // Declared parameters are not bound to storage, only the body is lowered
            AstNode::Function { name, body, .. } => self.lower_function_body(name, body),
            other => Err(CodegenError::MalformedTree {
                found: other.kind(),
                context: "a function definition",
            }),
        }
    }

    #[instrument(level = "debug", skip(self, body), fields(statements = body.len()))]
    fn lower_function_body(&mut self, name: &str, body: &[AstNode]) -> CodegenResult<()> {
        FunctionFrame::prologue(self.ctx, name)?;
        self.lower_statements(body)?;
        FunctionFrame::epilogue(self.ctx, name)?;

        debug!(function = name, "lowered function");
        Ok(())
    }

    /// Resolve a variable read or write
    fn resolve(&self, name: &str) -> CodegenResult<Symbol> {
        self.symbols.lookup(name).ok_or_else(|| CodegenError::UnresolvedReference { name: name.to_string() })
    }
}

/// Require an integer operand
fn expect_int(operand: Operand, context: &'static str) -> CodegenResult<Operand> {
    match operand.value_kind {
        ValueKind::Int => Ok(operand),
        found => Err(CodegenError::TypeMismatch {
            context,
            expected: ValueKind::Int,
            found,
        }),
    }
}
