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

//! Read-only string literal pool

use crate::ast::{AstNode, Constant};
use std::collections::HashMap;

/// Ordered, deduplicated table of string literals. Index `i` is emitted as
/// the `.LC<i>` rodata label.
#[derive(Debug, Clone, Default)]
pub struct LiteralPool {
    entries: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl LiteralPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `text` if it is not already pooled and return its index
    pub fn intern(&mut self, text: &str) -> usize {
        if let Some(&index) = self.lookup.get(text) {
            return index;
        }
        let index = self.entries.len();
        self.entries.push(text.to_string());
        self.lookup.insert(text.to_string(), index);
        index
    }

    /// Intern every string constant in `node` in source order and store the
    /// resulting pool index on the constant
    pub fn intern_tree(&mut self, node: &mut AstNode) {
        match node {
            AstNode::Constant {
                value: Constant::Str { index, text },
            } => *index = self.intern(text),
            AstNode::Constant { .. } | AstNode::VarDecl { .. } | AstNode::VarRef { .. } => {}
            AstNode::Program { globals, functions } => {
                self.intern_list(globals);
                self.intern_list(functions);
            }
            AstNode::Function { params, body, .. } => {
                self.intern_list(params);
                self.intern_list(body);
            }
            AstNode::StmtBlock { statements } => self.intern_list(statements),
            AstNode::FunCall { args, .. } => self.intern_list(args),
            AstNode::Argument { expr } => self.intern_tree(expr),
            AstNode::Assignment { value, .. } => self.intern_tree(value),
            AstNode::While { condition, body } => {
                self.intern_tree(condition);
                self.intern_list(body);
            }
            AstNode::IfThen {
                condition,
                then_body,
                else_body,
            } => {
                self.intern_tree(condition);
                self.intern_list(then_body);
                self.intern_list(else_body);
            }
            AstNode::BinaryExpr { lhs, rhs, .. } | AstNode::RelExpr { lhs, rhs, .. } => {
                self.intern_tree(lhs);
                self.intern_tree(rhs);
            }
        }
    }

    fn intern_list(&mut self, nodes: &mut [AstNode]) {
        for node in nodes {
            self.intern_tree(node);
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Literals in pool order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LiteralPool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pool = Self::new();
        for text in iter {
            pool.intern(text.as_ref());
        }
        pool
    }
}

/// Quote `text` for a `.string` directive. Non-printable bytes become
/// three-digit octal escapes.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for byte in text.bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7e => out.push(byte as char),
            other => out.push_str(&format!("\\{other:03o}")),
        }
    }
    out.push('"');
    out
}
