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

//! Tree release
//!
//! Dropping an `AstNode` frees the whole tree. `release` does the same walk
//! explicitly and reports what it freed, so callers (and tests) can check that
//! every node and every owned string was visited exactly once.

use super::{AstNode, Constant};

/// Counts gathered while releasing a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseStats {
    /// Nodes released
    pub nodes: usize,
    /// Owned string payloads released (names and literal text)
    pub strings: usize,
}

impl ReleaseStats {
    fn merge(&mut self, other: ReleaseStats) {
        self.nodes += other.nodes;
        self.strings += other.strings;
    }
}

impl AstNode {
    /// Consume the tree, releasing children before the siblings that follow
    /// them, and return how many nodes and strings were freed.
    pub fn release(self) -> ReleaseStats {
        let mut stats = ReleaseStats { nodes: 1, strings: 0 };

        match self {
            AstNode::Program { globals, functions } => {
                stats.merge(release_list(globals));
                stats.merge(release_list(functions));
            }
            AstNode::VarDecl { name, .. } | AstNode::VarRef { name } => {
                stats.strings += release_string(name);
            }
            AstNode::Function { name, params, body } => {
                stats.merge(release_list(params));
                stats.merge(release_list(body));
                stats.strings += release_string(name);
            }
            AstNode::StmtBlock { statements } => stats.merge(release_list(statements)),
            AstNode::FunCall { name, args } => {
                stats.merge(release_list(args));
                stats.strings += release_string(name);
            }
            AstNode::Argument { expr } => stats.merge(expr.release()),
            AstNode::Assignment { name, value } => {
                stats.merge(value.release());
                stats.strings += release_string(name);
            }
            AstNode::While { condition, body } => {
                stats.merge(condition.release());
                stats.merge(release_list(body));
            }
            AstNode::IfThen {
                condition,
                then_body,
                else_body,
            } => {
                stats.merge(condition.release());
                stats.merge(release_list(then_body));
                stats.merge(release_list(else_body));
            }
            AstNode::BinaryExpr { lhs, rhs, .. } | AstNode::RelExpr { lhs, rhs, .. } => {
                stats.merge(lhs.release());
                stats.merge(rhs.release());
            }
            AstNode::Constant { value } => {
                if let Constant::Str { text, .. } = value {
                    stats.strings += release_string(text);
                }
            }
        }

        stats
    }
}

fn release_list(nodes: Vec<AstNode>) -> ReleaseStats {
    let mut stats = ReleaseStats::default();
    for node in nodes {
        stats.merge(node.release());
    }
    stats
}

fn release_string(s: String) -> usize {
    drop(s);
    1
}
