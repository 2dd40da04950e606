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

//! Assembly generator
//!
//! [`AsmGenerator`] is the entry point for lowering a whole translation unit.
//! Each call to [`AsmGenerator::generate`] builds its own
//! [`GenerationContext`], so one generator can serve any number of
//! concurrent callers.

use super::{
    config::CodegenConfig,
    context::{GenerationContext, GenerationStats},
    error::{CodegenError, CodegenResult},
    lower::Lowerer,
    sections::{DataGenerator, RodataGenerator},
};
use crate::{
    ast::AstNode,
    symbols::{LiteralPool, SymbolLookup},
};
use std::collections::HashSet;
use tracing::debug;

/// Assembly text with generation metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAssembly {
    /// The complete assembly listing
    pub text: String,
    /// Generation statistics
    pub stats: GenerationStats,
}

/// Lowers programs to x86-64 assembly
#[derive(Debug, Clone, Default)]
pub struct AsmGenerator {
    config: CodegenConfig,
}

impl AsmGenerator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with a validated configuration
    pub fn with_config(config: CodegenConfig) -> CodegenResult<Self> {
        config.validate().map_err(CodegenError::Configuration)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate assembly for a `Program` root.
    ///
    /// String constants must already carry their pool index (see
    /// [`LiteralPool::intern_tree`]). Nothing is returned on error.
    pub fn generate<S>(&self, program: &AstNode, symbols: &S, literals: &LiteralPool) -> CodegenResult<GeneratedAssembly>
    where
        S: SymbolLookup + ?Sized,
    {
        let AstNode::Program { globals, functions } = program else {
            return Err(CodegenError::MalformedTree {
                found: program.kind(),
                context: "the root of a translation unit",
            });
        };

        debug!(globals = globals.len(), functions = functions.len(), literals = literals.len(), "generating program");
        self.check_symbols(globals.iter().chain(functions))?;

        let mut ctx = GenerationContext::new(&self.config);
        DataGenerator::generate(&mut ctx, globals)?;
        RodataGenerator::generate(&mut ctx, literals)?;

        {
            let mut lowerer = Lowerer::new(&mut ctx, symbols, literals);
            for function in functions {
                lowerer.lower_function(function)?;
            }
        }

        let (text, stats) = ctx.finish();
        debug!(lines = stats.lines, instructions = stats.instructions, labels = stats.labels, "generated program");
        Ok(GeneratedAssembly { text, stats })
    }

    /// Globals and functions share one assembler namespace with the generated labels
    fn check_symbols<'n>(&self, definitions: impl Iterator<Item = &'n AstNode>) -> CodegenResult<()> {
        let mut seen = HashSet::new();
        for node in definitions {
            let name = match node {
                AstNode::VarDecl { name, .. } | AstNode::Function { name, .. } => name,
                // reported with context by the section that emits it
                _ => continue,
            };
            if self.config.is_reserved_label(name) || !seen.insert(name.as_str()) {
                return Err(CodegenError::SymbolCollision { name: name.clone() });
            }
        }
        Ok(())
    }
}
