//! Input-boundary AST for event schema declarations.
//!
//! The extraction engine does not read source text. An external parser walks
//! the source syntax (const-object enumerations, interfaces, type aliases)
//! and hands the engine these nodes, restricted to the closed set of shapes
//! the canonical model supports. Anything the parser recognizes but the
//! engine does not cover arrives as [`TypeExpr::Unsupported`] so the engine
//! can reject it with a named construct instead of guessing.

use serde::{Deserialize, Serialize};

/// A primitive type keyword as spelled in source.
///
/// `Number` is the source language's single numeric keyword; the engine
/// canonicalizes it to a float. `Integer` and `Float` exist for parsers
/// whose source syntax distinguishes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    String,
    Number,
    Integer,
    Float,
    Boolean,
}

/// A single literal as written in source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralExpr {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// One type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// A reference to a top-level declaration by name.
    Named(String),
    /// A primitive keyword.
    Keyword(Keyword),
    /// A single pinned literal, e.g. `"push"` or `1` or `true`.
    Literal(LiteralExpr),
    /// A union of member expressions. Members may themselves be unions;
    /// the engine flattens them.
    Union(Vec<TypeExpr>),
    /// An inline (anonymous) object type.
    Object(Vec<FieldExpr>),
    /// A homogeneous sequence, `Array<T>` or `T[]`.
    Array(Box<TypeExpr>),
    /// The derived union over a const object's values,
    /// `typeof X[keyof typeof X]`.
    ValuesOf(String),
    /// A construct outside the supported shape set (intersection, generic
    /// parameter, conditional type, ...). Carries the parser's description
    /// of the construct for diagnostics.
    Unsupported(String),
}

/// One field of an interface or inline object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExpr {
    pub name: String,
    pub ty: TypeExpr,
    pub optional: bool,
    /// Default value declared in source, if any. Carried verbatim for the
    /// downstream generator; the engine does not interpret it.
    pub default: Option<LiteralExpr>,
}

impl FieldExpr {
    pub fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
            default: None,
        }
    }

    pub fn with_default(mut self, default: LiteralExpr) -> Self {
        self.default = Some(default);
        self
    }
}

/// One `label: value` entry of a const-object declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstEntry {
    pub label: String,
    pub value: LiteralExpr,
}

impl ConstEntry {
    pub fn new(label: impl Into<String>, value: LiteralExpr) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A top-level declaration as produced by the parser, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclExpr {
    /// A frozen, non-widening object literal used as an enumeration
    /// (`const X = { ... } as const`). Entries preserve declaration order.
    ConstObject {
        name: String,
        entries: Vec<ConstEntry>,
    },
    /// A type alias over any type expression.
    TypeAlias { name: String, ty: TypeExpr },
    /// An interface or type-literal declaration.
    Interface {
        name: String,
        fields: Vec<FieldExpr>,
    },
}

impl DeclExpr {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            DeclExpr::ConstObject { name, .. }
            | DeclExpr::TypeAlias { name, .. }
            | DeclExpr::Interface { name, .. } => name,
        }
    }
}
