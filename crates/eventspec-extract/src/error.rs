//! Extraction errors.
//!
//! Every error is fatal to the current run: the assembler surfaces the first
//! failure and never emits a partial schema. Locations are dotted paths
//! (`Event.data.action`) built during resolution so the caller can find the
//! offending source construct.

use crate::ir::{DeclTag, LiteralValue};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// An AST shape outside the supported closed set.
    #[error("unsupported type shape at {location}: {construct}")]
    UnsupportedTypeShape { location: String, construct: String },

    /// A const-object with two labels mapping to the same literal value.
    #[error("duplicate value {value} in enum {enum_name}")]
    DuplicateEnumValue {
        enum_name: String,
        value: LiteralValue,
    },

    /// A literal union mixing incompatible primitive kinds.
    #[error("mixed literal kinds in union at {location}")]
    MixedLiteralKinds { location: String },

    /// A type name used but never declared.
    #[error("unknown reference to {name} at {use_site}")]
    UnknownReference { use_site: String, name: String },

    /// A reference resolved to a declaration of the wrong kind for its
    /// use site.
    #[error("reference at {use_site} expects {expected} declaration, found {actual}")]
    KindMismatch {
        use_site: String,
        expected: DeclTag,
        actual: DeclTag,
    },
}
