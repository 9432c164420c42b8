//! Literal collapser.
//!
//! Folds a closed union of literal values into an anonymous
//! [`CanonicalType::LiteralSet`]. The set has exactly one primitive kind:
//! a numeric set widens to float when any member is non-integral, and
//! string or boolean literals mixed with numerics are rejected outright.

use eventspec_ast::LiteralExpr;

use crate::error::ExtractError;
use crate::ir::{CanonicalType, LiteralValue, PrimitiveKind};

/// Collapse an ordered list of literals into a literal set. Duplicates are
/// dropped; the first occurrence keeps its position.
pub fn collapse(site: &str, lits: &[LiteralExpr]) -> Result<CanonicalType, ExtractError> {
    let kind = set_kind(site, lits)?;
    let mut values: Vec<LiteralValue> = Vec::with_capacity(lits.len());
    for lit in lits {
        let value = coerce(lit, kind);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(CanonicalType::LiteralSet { kind, values })
}

/// The single primitive kind shared by all members, after numeric widening.
pub(crate) fn set_kind(site: &str, lits: &[LiteralExpr]) -> Result<PrimitiveKind, ExtractError> {
    let mut strings = 0usize;
    let mut bools = 0usize;
    let mut ints = 0usize;
    let mut floats = 0usize;
    for lit in lits {
        match lit {
            LiteralExpr::Str(_) => strings += 1,
            LiteralExpr::Bool(_) => bools += 1,
            LiteralExpr::Int(_) => ints += 1,
            LiteralExpr::Float(_) => floats += 1,
        }
    }
    let numerics = ints + floats;
    match (strings, bools, numerics) {
        (s, 0, 0) if s > 0 => Ok(PrimitiveKind::String),
        (0, b, 0) if b > 0 => Ok(PrimitiveKind::Boolean),
        (0, 0, n) if n > 0 => {
            if floats > 0 {
                Ok(PrimitiveKind::Float)
            } else {
                Ok(PrimitiveKind::Integer)
            }
        }
        _ => Err(ExtractError::MixedLiteralKinds {
            location: site.to_string(),
        }),
    }
}

/// Convert a literal to a value of the set's kind. Only integral literals
/// in a float set actually change representation.
pub(crate) fn coerce(lit: &LiteralExpr, kind: PrimitiveKind) -> LiteralValue {
    match (lit, kind) {
        (LiteralExpr::Int(i), PrimitiveKind::Float) => LiteralValue::Float(*i as f64),
        _ => LiteralValue::from(lit),
    }
}
