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

//! Per-invocation generation state
//!
//! A fresh [`GenerationContext`] is created for every call to
//! `AsmGenerator::generate`, so independent translation units never share a
//! label counter or an output buffer.

use super::{
    config::CodegenConfig,
    error::{CodegenError, CodegenResult},
    writer::AsmWriter,
};
use tracing::trace;

/// A control-flow label, unique within one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(u32);

impl Label {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Generation statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Number of functions emitted
    pub functions: usize,
    /// Number of global storage declarations
    pub globals: usize,
    /// Number of literal pool entries
    pub literals: usize,
    /// Number of labels allocated
    pub labels: usize,
    /// Number of instructions emitted
    pub instructions: usize,
    /// Total output lines
    pub lines: usize,
}

/// Mutable state threaded through lowering
pub struct GenerationContext<'a> {
    config: &'a CodegenConfig,
    writer: AsmWriter,
    next_label: u32,
    stats: GenerationStats,
}

impl<'a> GenerationContext<'a> {
    pub fn new(config: &'a CodegenConfig) -> Self {
        let writer = match config.max_output_size {
            Some(limit) => AsmWriter::with_max_size(limit),
            None => AsmWriter::new(),
        };
        Self {
            config,
            writer,
            next_label: config.label_base,
            stats: GenerationStats::default(),
        }
    }

    pub fn config(&self) -> &CodegenConfig {
        self.config
    }

    pub fn stats_mut(&mut self) -> &mut GenerationStats {
        &mut self.stats
    }

    /// Allocate a fresh label
    pub fn allocate_label(&mut self) -> CodegenResult<Label> {
        let label = Label(self.next_label);
        self.next_label = self
            .next_label
            .checked_add(1)
            .ok_or(CodegenError::LabelSpaceExhausted { base: self.config.label_base })?;
        self.stats.labels += 1;
        trace!(label = label.0, "allocated label");
        Ok(label)
    }

    /// Assembler name of `label`
    pub fn label_name(&self, label: Label) -> String {
        format!("{}{}", self.config.label_prefix, label.0)
    }

    /// Define `label` at the current position
    pub fn place_label(&mut self, label: Label) -> CodegenResult<()> {
        let name = self.label_name(label);
        self.writer.label(&name)
    }

    /// Unconditional or conditional jump to `label`
    pub fn jump(&mut self, mnemonic: &str, label: Label) -> CodegenResult<()> {
        let name = self.label_name(label);
        self.writer.instruction(mnemonic, &name)
    }

    pub fn instruction(&mut self, mnemonic: &str, operands: &str) -> CodegenResult<()> {
        self.writer.instruction(mnemonic, operands)
    }

    pub fn directive(&mut self, directive: &str) -> CodegenResult<()> {
        self.writer.directive(directive)
    }

    /// Define a named label such as a function or literal symbol
    pub fn symbol(&mut self, name: &str) -> CodegenResult<()> {
        self.writer.label(name)
    }

    pub fn write_line(&mut self, line: &str) -> CodegenResult<()> {
        self.writer.write_line(line)
    }

    /// Finish generation, returning the text and final statistics
    pub fn finish(self) -> (String, GenerationStats) {
        let mut stats = self.stats;
        stats.instructions = self.writer.instructions();
        stats.lines = self.writer.lines();
        (self.writer.into_string(), stats)
    }
}
