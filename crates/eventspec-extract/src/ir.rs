//! Canonical schema model.
//!
//! Everything the extraction engine produces is expressed in these types.
//! The model is a closed, explicitly enumerated set: the source's structural
//! type system is abstractly infinite, and restricting the output language
//! makes the downstream generator total over a finite input.

use std::fmt;

use serde::{Deserialize, Serialize};

use eventspec_ast::LiteralExpr;

/// Primitive kind of a scalar type or literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

/// A concrete literal value. Its primitive kind is fixed by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl LiteralValue {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            LiteralValue::Str(_) => PrimitiveKind::String,
            LiteralValue::Int(_) => PrimitiveKind::Integer,
            LiteralValue::Float(_) => PrimitiveKind::Float,
            LiteralValue::Bool(_) => PrimitiveKind::Boolean,
        }
    }
}

impl From<&LiteralExpr> for LiteralValue {
    fn from(lit: &LiteralExpr) -> Self {
        match lit {
            LiteralExpr::Str(s) => LiteralValue::Str(s.clone()),
            LiteralExpr::Int(i) => LiteralValue::Int(*i),
            LiteralExpr::Float(x) => LiteralValue::Float(*x),
            LiteralExpr::Bool(b) => LiteralValue::Bool(*b),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Str(s) => write!(f, "{s:?}"),
            LiteralValue::Int(i) => write!(f, "{i}"),
            LiteralValue::Float(x) => write!(f, "{x}"),
            LiteralValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A canonical type node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanonicalType {
    /// A bare primitive.
    Primitive(PrimitiveKind),
    /// A single pinned literal.
    Literal(LiteralValue),
    /// An anonymous closed union of literal values of one primitive kind.
    /// Values preserve declaration order and contain no duplicates.
    LiteralSet {
        kind: PrimitiveKind,
        values: Vec<LiteralValue>,
    },
    /// A non-enum, non-literal-set union. At least two distinct members,
    /// order preserved, no member is itself a union.
    Union(Vec<CanonicalType>),
    /// An anonymous object type.
    Object(ObjectShape),
    /// A homogeneous sequence.
    Array(Box<CanonicalType>),
    /// A name-based reference into the declaration table. Never an
    /// ownership edge; validated at assembly time and left unexpanded so
    /// recursive declarations terminate and share one memoized entity.
    Reference(String),
}

/// One field of an object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: CanonicalType,
    pub optional: bool,
    /// Source-declared default, carried verbatim for the generator.
    pub default: Option<LiteralValue>,
}

impl Field {
    pub fn required(name: impl Into<String>, ty: CanonicalType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: CanonicalType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
            default: None,
        }
    }
}

/// An ordered set of uniquely named fields. Order is significant: it drives
/// generated struct/record layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectShape {
    pub fields: Vec<Field>,
}

impl ObjectShape {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One (label, value) pair of an enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub label: String,
    pub value: LiteralValue,
}

/// A named closed set of literal variants. Labels and values are unique;
/// insertion order is preserved and significant (generated ordinal and name
/// tables depend on it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub kind: PrimitiveKind,
    pub variants: Vec<Variant>,
}

/// The shape of an event declaration: an interface with a reserved `name`
/// field and structured payload sections. The full field list is preserved
/// in declaration order; the reserved sections get accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    pub shape: ObjectShape,
}

impl EventDef {
    /// The `data` payload section, when declared as an inline object.
    pub fn data(&self) -> Option<&ObjectShape> {
        self.section("data")
    }

    /// The `allow` metadata section, when declared as an inline object.
    pub fn allow(&self) -> Option<&ObjectShape> {
        self.section("allow")
    }

    fn section(&self, name: &str) -> Option<&ObjectShape> {
        match self.shape.field(name).map(|f| &f.ty) {
            Some(CanonicalType::Object(shape)) => Some(shape),
            _ => None,
        }
    }
}

/// Payload-free declaration kind, used for table registration and use-site
/// compatibility checks before bodies are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclTag {
    Enum,
    Alias,
    Event,
}

impl fmt::Display for DeclTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclTag::Enum => "enum",
            DeclTag::Alias => "type alias",
            DeclTag::Event => "event",
        };
        f.write_str(s)
    }
}

/// A resolved declaration body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclKind {
    Enum(EnumDef),
    Alias(CanonicalType),
    Event(EventDef),
}

impl DeclKind {
    pub fn tag(&self) -> DeclTag {
        match self {
            DeclKind::Enum(_) => DeclTag::Enum,
            DeclKind::Alias(_) => DeclTag::Alias,
            DeclKind::Event(_) => DeclTag::Event,
        }
    }
}

/// One top-level named schema entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
}

/// The canonical schema document: every declaration of one extraction run,
/// in declaration order. `Reference` nodes anywhere in the document resolve
/// by name through [`Schema::get`] to exactly one declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub declarations: Vec<Declaration>,
}

impl Schema {
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
