//! Canonical schema extraction from event type declarations.
//!
//! `eventspec-extract` walks statically-declared event schemas (const-object
//! enumerations, interfaces, type aliases, inline literal types) and produces
//! a deterministic, language-neutral schema document for a downstream
//! marshalling-code generator.
//!
//! # Architecture
//!
//! ```text
//! Source AST                  Engine                 Canonical document
//! ───────────────       ─────────────────────       ──────────────────
//! eventspec-ast    ──>   Schema Assembler       ──>  Schema
//!   DeclExpr                │  (assemble.rs)           Declaration
//!   TypeExpr                ├─ Declaration Table       ├─ Enum
//!                           │  (table.rs)              ├─ TypeAlias
//!                           └─ Type Resolver           └─ Event
//!                              (resolve.rs)
//!                              ├─ Enum Normalizer (enums.rs)
//!                              └─ Literal Collapser (literals.rs)
//! ```
//!
//! The engine normalizes syntactic idioms into one semantic form: a frozen
//! const-object plus its derived union alias become a single named enum,
//! while anonymous literal unions collapse to literal sets. Cross-references
//! between declarations are name-based and validated against the declaration
//! table, never inlined, so recursive structures resolve without duplication.
//!
//! # Example
//!
//! ```
//! use eventspec_ast::{ConstEntry, DeclExpr, LiteralExpr, TypeExpr};
//! use eventspec_extract::{extract_schema, DeclKind};
//!
//! // const Status = { OPEN: "open", CLOSED: "closed" } as const;
//! // type Status = typeof Status[keyof typeof Status];
//! let decls = vec![
//!     DeclExpr::ConstObject {
//!         name: "Status".into(),
//!         entries: vec![
//!             ConstEntry::new("OPEN", LiteralExpr::Str("open".into())),
//!             ConstEntry::new("CLOSED", LiteralExpr::Str("closed".into())),
//!         ],
//!     },
//!     DeclExpr::TypeAlias {
//!         name: "Status".into(),
//!         ty: TypeExpr::ValuesOf("Status".into()),
//!     },
//! ];
//!
//! let schema = extract_schema(&decls).unwrap();
//! assert_eq!(schema.len(), 1);
//! assert!(matches!(schema.declarations[0].kind, DeclKind::Enum(_)));
//! ```
//!
//! Extraction is a pure, single-threaded, in-memory transformation: one run
//! owns one declaration table, and independent runs share no state. Every
//! error is fatal to its run; no partial schema is ever returned.

pub mod assemble;
pub mod enums;
pub mod error;
pub mod ir;
pub mod literals;
pub mod resolve;
pub mod table;

pub use error::ExtractError;
pub use ir::{
    CanonicalType, DeclKind, DeclTag, Declaration, EnumDef, EventDef, Field, LiteralValue,
    ObjectShape, PrimitiveKind, Schema, Variant,
};
pub use resolve::Resolver;
pub use table::DeclTable;

use eventspec_ast::DeclExpr;

/// Extract the canonical schema document from one source input's top-level
/// declarations, in source order.
pub fn extract_schema(decls: &[DeclExpr]) -> Result<Schema, ExtractError> {
    assemble::assemble(decls)
}
