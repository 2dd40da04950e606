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

//! Function frame generator

use crate::codegen::{context::GenerationContext, error::CodegenResult};

/// Emits the symbol export, prologue and epilogue around a function body
pub struct FunctionFrame;

impl FunctionFrame {
    /// Generate function prologue
    pub fn prologue(ctx: &mut GenerationContext<'_>, name: &str) -> CodegenResult<()> {
        let cfi = ctx.config().emit_cfi;
        let endbr = ctx.config().emit_endbr64;

        ctx.directive(".text")?;
        ctx.directive(&format!(".globl\t{name}"))?;
        ctx.directive(&format!(".type\t{name}, @function"))?;
        ctx.symbol(name)?;

        if cfi {
            ctx.directive(".cfi_startproc")?;
        }
        if endbr {
            ctx.instruction("endbr64", "")?;
        }

        // Save the caller's frame pointer and establish our own
        ctx.instruction("pushq", "%rbp")?;
        if cfi {
            ctx.directive(".cfi_def_cfa_offset 16")?;
            ctx.directive(".cfi_offset 6, -16")?;
        }
        ctx.instruction("movq", "%rsp, %rbp")?;
        if cfi {
            ctx.directive(".cfi_def_cfa_register 6")?;
        }

        ctx.stats_mut().functions += 1;
        Ok(())
    }

    /// Generate function epilogue
    pub fn epilogue(ctx: &mut GenerationContext<'_>, name: &str) -> CodegenResult<()> {
        let cfi = ctx.config().emit_cfi;

        ctx.instruction("popq", "%rbp")?;
        if cfi {
            ctx.directive(".cfi_def_cfa 7, 8")?;
        }
        ctx.instruction("ret", "")?;
        if cfi {
            ctx.directive(".cfi_endproc")?;
        }
        ctx.directive(&format!(".size\t{name}, .-{name}"))?;

        Ok(())
    }
}
