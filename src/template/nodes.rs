//! Syntax tree produced by the template parser.
//!
//! Every node carries the 1-based line and column of the token that opened
//! it. The set of node kinds is closed: consumers match on [`NodeKind`]
//! exhaustively, so a new kind is a compile-time decision for every walker.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    In,
    NotIn,
    Is,
    IsNot,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

/// The three loop tags share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    For,
    AsyncEach,
    AsyncAll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub key: Node,
    pub value: Node,
}

/// A `name=value` argument of a call, macro signature or caller block.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordArg {
    pub name: String,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub cond: Node,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    /// `{% set x = expr %}`
    Expr(Box<Node>),
    /// `{% set x %}…{% endset %}`
    Body(Vec<Node>),
}

/// An imported name in `{% from "x" import name as alias %}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportName {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root(Vec<Node>),
    /// Template text between tags.
    Data(String),
    /// `{{ expr }}`
    Output(Box<Node>),
    Literal(Literal),
    Symbol(String),
    Group(Box<Node>),
    Array(Vec<Node>),
    Dict(Vec<Pair>),
    /// Named arguments of a call, always the last entry of its argument list.
    KeywordArgs(Vec<KeywordArg>),
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    /// `target | name(args)`
    Filter {
        name: String,
        target: Box<Node>,
        args: Vec<Node>,
    },
    /// `target.key` and `target[key]`
    LookupVal {
        target: Box<Node>,
        key: Box<Node>,
    },
    /// `body if cond else otherwise`
    InlineIf {
        cond: Box<Node>,
        body: Box<Node>,
        otherwise: Option<Box<Node>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `elif` chains nest as a single `If` in `otherwise`.
    If {
        cond: Box<Node>,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Switch {
        expr: Box<Node>,
        cases: Vec<SwitchCase>,
        default: Vec<Node>,
    },
    Loop {
        kind: LoopKind,
        targets: Vec<Node>,
        iterable: Box<Node>,
        body: Vec<Node>,
        otherwise: Vec<Node>,
    },
    Block {
        name: String,
        body: Vec<Node>,
    },
    Macro {
        name: String,
        params: Vec<Node>,
        body: Vec<Node>,
    },
    /// `{% call(params) expr %}…{% endcall %}`
    CallBlock {
        params: Vec<Node>,
        call: Box<Node>,
        body: Vec<Node>,
    },
    Set {
        targets: Vec<Node>,
        value: SetValue,
    },
    Include {
        template: Box<Node>,
        ignore_missing: bool,
    },
    Import {
        template: Box<Node>,
        target: String,
    },
    FromImport {
        template: Box<Node>,
        names: Vec<ImportName>,
    },
    Extends {
        template: Box<Node>,
    },
    /// `{% filter name(args) %}…{% endfilter %}`
    FilterBlock {
        name: String,
        args: Vec<Node>,
        body: Vec<Node>,
    },
}

impl Node {
    pub fn new(kind: NodeKind, line: usize, col: usize) -> Self {
        Self { kind, line, col }
    }

    /// Short discriminator name, used in logs and error messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Root(_) => "Root",
            NodeKind::Data(_) => "Data",
            NodeKind::Output(_) => "Output",
            NodeKind::Literal(_) => "Literal",
            NodeKind::Symbol(_) => "Symbol",
            NodeKind::Group(_) => "Group",
            NodeKind::Array(_) => "Array",
            NodeKind::Dict(_) => "Dict",
            NodeKind::KeywordArgs(_) => "KeywordArgs",
            NodeKind::Call { .. } => "Call",
            NodeKind::Filter { .. } => "Filter",
            NodeKind::LookupVal { .. } => "LookupVal",
            NodeKind::InlineIf { .. } => "InlineIf",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::If { .. } => "If",
            NodeKind::Switch { .. } => "Switch",
            NodeKind::Loop { .. } => "Loop",
            NodeKind::Block { .. } => "Block",
            NodeKind::Macro { .. } => "Macro",
            NodeKind::CallBlock { .. } => "CallBlock",
            NodeKind::Set { .. } => "Set",
            NodeKind::Include { .. } => "Include",
            NodeKind::Import { .. } => "Import",
            NodeKind::FromImport { .. } => "FromImport",
            NodeKind::Extends { .. } => "Extends",
            NodeKind::FilterBlock { .. } => "FilterBlock",
        }
    }

    /// The callee's name when this is a call to a plain symbol.
    pub fn callee_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Call { callee, .. } => match &callee.kind {
                NodeKind::Symbol(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Ordered argument list of a call node.
    pub fn arguments(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Call { args, .. } => Some(args),
            _ => None,
        }
    }

    pub fn as_str_literal(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Literal(Literal::String(value)) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopKind::For => write!(f, "for"),
            LoopKind::AsyncEach => write!(f, "asyncEach"),
            LoopKind::AsyncAll => write!(f, "asyncAll"),
        }
    }
}
