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

//! Abstract syntax tree for the tinyc language
//!
//! The tree is a closed sum type: one variant per syntactic construct, each
//! carrying exactly the payload that construct needs. Ordered lists
//! (declarations, functions, parameters, arguments, statements) are owned
//! `Vec`s, so sibling order is vector order and a list can never form a cycle.
//!
//! - `error`: operator decoding errors
//! - `lifecycle`: consuming release with visit accounting
//! - `printer`: indentation-aware diagnostic dump

pub mod error;
pub mod lifecycle;
pub mod printer;

pub use error::{AstError, AstResult};
pub use lifecycle::ReleaseStats;
pub use printer::{INDENT_WIDTH, print_tree};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of an [`AstNode`], used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    VarDecl,
    Function,
    StmtBlock,
    FunCall,
    Argument,
    Assignment,
    While,
    IfThen,
    BinaryExpr,
    RelExpr,
    VarRef,
    Constant,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Program => "program",
            NodeKind::VarDecl => "variable declaration",
            NodeKind::Function => "function definition",
            NodeKind::StmtBlock => "statement block",
            NodeKind::FunCall => "function call",
            NodeKind::Argument => "call argument",
            NodeKind::Assignment => "assignment",
            NodeKind::While => "while loop",
            NodeKind::IfThen => "if statement",
            NodeKind::BinaryExpr => "arithmetic expression",
            NodeKind::RelExpr => "relational expression",
            NodeKind::VarRef => "variable reference",
            NodeKind::Constant => "constant",
        };
        f.write_str(name)
    }
}

/// Value kinds supported by the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Int,
    Str,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => f.write_str("int"),
            ValueKind::Str => f.write_str("string"),
        }
    }
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum ArithOp {
    Add,
    Sub,
}

impl ArithOp {
    /// Source character of the operator
    pub fn symbol(self) -> char {
        match self {
            ArithOp::Add => '+',
            ArithOp::Sub => '-',
        }
    }

    /// Integer operator code, as shown by the tree printer
    pub fn code(self) -> i32 {
        self.symbol() as i32
    }
}

impl TryFrom<char> for ArithOp {
    type Error = AstError;

    fn try_from(c: char) -> AstResult<Self> {
        match c {
            '+' => Ok(ArithOp::Add),
            '-' => Ok(ArithOp::Sub),
            other => Err(AstError::UnsupportedArithmeticOperator(other)),
        }
    }
}

impl From<ArithOp> for char {
    fn from(op: ArithOp) -> Self {
        op.symbol()
    }
}

/// Relational operators; `!` is not-equal and `=` is equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum RelOp {
    Less,
    Greater,
    NotEqual,
    Equal,
}

impl RelOp {
    /// Source character of the operator
    pub fn symbol(self) -> char {
        match self {
            RelOp::Less => '<',
            RelOp::Greater => '>',
            RelOp::NotEqual => '!',
            RelOp::Equal => '=',
        }
    }
}

impl TryFrom<char> for RelOp {
    type Error = AstError;

    fn try_from(c: char) -> AstResult<Self> {
        match c {
            '<' => Ok(RelOp::Less),
            '>' => Ok(RelOp::Greater),
            '!' => Ok(RelOp::NotEqual),
            '=' => Ok(RelOp::Equal),
            other => Err(AstError::UnsupportedRelationalOperator(other)),
        }
    }
}

impl From<RelOp> for char {
    fn from(op: RelOp) -> Self {
        op.symbol()
    }
}

/// A literal value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constant {
    Int(i32),
    /// String literal; `index` refers to its entry in the literal pool
    Str {
        #[serde(default)]
        index: usize,
        text: String,
    },
}

impl Constant {
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Constant::Int(_) => ValueKind::Int,
            Constant::Str { .. } => ValueKind::Str,
        }
    }
}

/// One syntactic construct of a tinyc program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AstNode {
    Program {
        #[serde(default)]
        globals: Vec<AstNode>,
        #[serde(default)]
        functions: Vec<AstNode>,
    },
    VarDecl {
        name: String,
        #[serde(default)]
        value_kind: ValueKind,
    },
    Function {
        name: String,
        #[serde(default)]
        params: Vec<AstNode>,
        #[serde(default)]
        body: Vec<AstNode>,
    },
    StmtBlock {
        #[serde(default)]
        statements: Vec<AstNode>,
    },
    FunCall {
        name: String,
        #[serde(default)]
        args: Vec<AstNode>,
    },
    Argument {
        expr: Box<AstNode>,
    },
    Assignment {
        name: String,
        value: Box<AstNode>,
    },
    While {
        condition: Box<AstNode>,
        #[serde(default)]
        body: Vec<AstNode>,
    },
    IfThen {
        condition: Box<AstNode>,
        #[serde(default)]
        then_body: Vec<AstNode>,
        #[serde(default)]
        else_body: Vec<AstNode>,
    },
    BinaryExpr {
        op: ArithOp,
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
    },
    RelExpr {
        op: RelOp,
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
    },
    VarRef {
        name: String,
    },
    Constant {
        value: Constant,
    },
}

impl AstNode {
    pub fn program(globals: Vec<AstNode>, functions: Vec<AstNode>) -> Self {
        AstNode::Program { globals, functions }
    }

    pub fn var_decl(name: impl Into<String>, value_kind: ValueKind) -> Self {
        AstNode::VarDecl { name: name.into(), value_kind }
    }

    pub fn function(name: impl Into<String>, params: Vec<AstNode>, body: Vec<AstNode>) -> Self {
        AstNode::Function { name: name.into(), params, body }
    }

    pub fn block(statements: Vec<AstNode>) -> Self {
        AstNode::StmtBlock { statements }
    }

    /// Call statement; each expression is wrapped in an `Argument` node
    pub fn call(name: impl Into<String>, args: Vec<AstNode>) -> Self {
        AstNode::FunCall {
            name: name.into(),
            args: args.into_iter().map(AstNode::argument).collect(),
        }
    }

    pub fn argument(expr: AstNode) -> Self {
        AstNode::Argument { expr: Box::new(expr) }
    }

    pub fn assign(name: impl Into<String>, value: AstNode) -> Self {
        AstNode::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn while_loop(condition: AstNode, body: Vec<AstNode>) -> Self {
        AstNode::While {
            condition: Box::new(condition),
            body,
        }
    }

    pub fn if_then(condition: AstNode, then_body: Vec<AstNode>, else_body: Vec<AstNode>) -> Self {
        AstNode::IfThen {
            condition: Box::new(condition),
            then_body,
            else_body,
        }
    }

    pub fn binary(op: ArithOp, lhs: AstNode, rhs: AstNode) -> Self {
        AstNode::BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn relational(op: RelOp, lhs: AstNode, rhs: AstNode) -> Self {
        AstNode::RelExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn var_ref(name: impl Into<String>) -> Self {
        AstNode::VarRef { name: name.into() }
    }

    pub fn int(value: i32) -> Self {
        AstNode::Constant { value: Constant::Int(value) }
    }

    /// String constant with pool index 0; `LiteralPool::intern_tree` assigns the real index.
    pub fn str(text: impl Into<String>) -> Self {
        AstNode::Constant {
            value: Constant::Str { index: 0, text: text.into() },
        }
    }

    /// String constant with an explicit literal pool index
    pub fn str_at(index: usize, text: impl Into<String>) -> Self {
        AstNode::Constant {
            value: Constant::Str { index, text: text.into() },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Program { .. } => NodeKind::Program,
            AstNode::VarDecl { .. } => NodeKind::VarDecl,
            AstNode::Function { .. } => NodeKind::Function,
            AstNode::StmtBlock { .. } => NodeKind::StmtBlock,
            AstNode::FunCall { .. } => NodeKind::FunCall,
            AstNode::Argument { .. } => NodeKind::Argument,
            AstNode::Assignment { .. } => NodeKind::Assignment,
            AstNode::While { .. } => NodeKind::While,
            AstNode::IfThen { .. } => NodeKind::IfThen,
            AstNode::BinaryExpr { .. } => NodeKind::BinaryExpr,
            AstNode::RelExpr { .. } => NodeKind::RelExpr,
            AstNode::VarRef { .. } => NodeKind::VarRef,
            AstNode::Constant { .. } => NodeKind::Constant,
        }
    }

    /// Value kind of the node; declarations report their declared kind,
    /// constants their literal kind, everything else `Int`.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            AstNode::VarDecl { value_kind, .. } => *value_kind,
            AstNode::Constant { value } => value.value_kind(),
            _ => ValueKind::Int,
        }
    }

    /// Child regions of this node in source order. Lists and single
    /// children are both returned as slices.
    pub fn regions(&self) -> Vec<&[AstNode]> {
        match self {
            AstNode::Program { globals, functions } => vec![globals.as_slice(), functions.as_slice()],
            AstNode::Function { params, body, .. } => vec![params.as_slice(), body.as_slice()],
            AstNode::StmtBlock { statements } => vec![statements.as_slice()],
            AstNode::FunCall { args, .. } => vec![args.as_slice()],
            AstNode::Argument { expr } => vec![std::slice::from_ref(&**expr)],
            AstNode::Assignment { value, .. } => vec![std::slice::from_ref(&**value)],
            AstNode::While { condition, body } => vec![std::slice::from_ref(&**condition), body.as_slice()],
            AstNode::IfThen {
                condition,
                then_body,
                else_body,
            } => vec![std::slice::from_ref(&**condition), then_body.as_slice(), else_body.as_slice()],
            AstNode::BinaryExpr { lhs, rhs, .. } | AstNode::RelExpr { lhs, rhs, .. } => vec![std::slice::from_ref(&**lhs), std::slice::from_ref(&**rhs)],
            AstNode::VarDecl { .. } | AstNode::VarRef { .. } | AstNode::Constant { .. } => Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.regions().iter().flat_map(|region| region.iter()).map(AstNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.regions().iter().flat_map(|region| region.iter()).map(AstNode::depth).max().unwrap_or(0)
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_tree(self, 0, f)
    }
}
