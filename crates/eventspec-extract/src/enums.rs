//! Enum normalizer.
//!
//! The source spells one semantic enumeration as two declarations: a frozen
//! const-object holding the labeled values, and a derived union alias over
//! those values (`typeof X[keyof typeof X]`). The normalizer folds the pair
//! into one canonical enum; a const without an alias still yields an enum,
//! while a bare literal-union alias with no backing const stays an anonymous
//! literal set (there are no labels to emit).

use eventspec_ast::{ConstEntry, LiteralExpr, TypeExpr};

use crate::error::ExtractError;
use crate::ir::{EnumDef, Variant};
use crate::literals;

/// Normalize a const-object declaration into an enum definition, variants in
/// declaration order.
pub fn normalize(name: &str, entries: &[ConstEntry]) -> Result<EnumDef, ExtractError> {
    let lits: Vec<LiteralExpr> = entries.iter().map(|e| e.value.clone()).collect();
    let kind = literals::set_kind(name, &lits)?;

    let mut variants: Vec<Variant> = Vec::with_capacity(entries.len());
    for entry in entries {
        let value = literals::coerce(&entry.value, kind);
        if variants.iter().any(|v| v.value == value) {
            return Err(ExtractError::DuplicateEnumValue {
                enum_name: name.to_string(),
                value,
            });
        }
        if variants.iter().any(|v| v.label == entry.label) {
            return Err(ExtractError::UnsupportedTypeShape {
                location: format!("{name}.{}", entry.label),
                construct: "duplicate enum label".to_string(),
            });
        }
        variants.push(Variant {
            label: entry.label.clone(),
            value,
        });
    }

    Ok(EnumDef { kind, variants })
}

/// Whether a same-named alias spells exactly the derived union of the enum's
/// values, and may therefore be folded into it. Matching is order-sensitive:
/// variant order is significant downstream, so an order-scrambled union is
/// not the derived union.
pub fn alias_matches(name: &str, alias_ty: &TypeExpr, def: &EnumDef) -> bool {
    match alias_ty {
        TypeExpr::ValuesOf(target) => target == name,
        TypeExpr::Union(members) => {
            members.len() == def.variants.len()
                && members.iter().zip(&def.variants).all(|(member, variant)| {
                    matches!(member, TypeExpr::Literal(lit)
                        if literals::coerce(lit, def.kind) == variant.value)
                })
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{LiteralValue, PrimitiveKind};

    fn status_entries() -> Vec<ConstEntry> {
        vec![
            ConstEntry::new("OPEN", LiteralExpr::Str("open".into())),
            ConstEntry::new("CLOSED", LiteralExpr::Str("closed".into())),
        ]
    }

    #[test]
    fn variants_in_declaration_order() {
        let def = normalize("Status", &status_entries()).unwrap();
        assert_eq!(def.kind, PrimitiveKind::String);
        assert_eq!(def.variants.len(), 2);
        assert_eq!(def.variants[0].label, "OPEN");
        assert_eq!(def.variants[0].value, LiteralValue::Str("open".into()));
        assert_eq!(def.variants[1].label, "CLOSED");
    }

    #[test]
    fn duplicate_value_rejected() {
        let entries = vec![
            ConstEntry::new("A", LiteralExpr::Str("same".into())),
            ConstEntry::new("B", LiteralExpr::Str("same".into())),
        ];
        let err = normalize("Bad", &entries).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::DuplicateEnumValue { enum_name, value }
                if enum_name == "Bad" && value == LiteralValue::Str("same".into())
        ));
    }

    #[test]
    fn mixed_value_kinds_rejected() {
        let entries = vec![
            ConstEntry::new("A", LiteralExpr::Str("a".into())),
            ConstEntry::new("ONE", LiteralExpr::Int(1)),
        ];
        assert!(matches!(
            normalize("Bad", &entries),
            Err(ExtractError::MixedLiteralKinds { .. })
        ));
    }

    #[test]
    fn numeric_const_widens_like_literal_sets() {
        let entries = vec![
            ConstEntry::new("ONE", LiteralExpr::Int(1)),
            ConstEntry::new("PI", LiteralExpr::Float(3.14159)),
        ];
        let def = normalize("Numbers", &entries).unwrap();
        assert_eq!(def.kind, PrimitiveKind::Float);
        assert_eq!(def.variants[0].value, LiteralValue::Float(1.0));
    }

    #[test]
    fn derived_union_alias_matches() {
        let def = normalize("Status", &status_entries()).unwrap();
        assert!(alias_matches(
            "Status",
            &TypeExpr::ValuesOf("Status".into()),
            &def
        ));
        assert!(!alias_matches(
            "Status",
            &TypeExpr::ValuesOf("Action".into()),
            &def
        ));
    }

    #[test]
    fn spelled_out_union_matches_in_order_only() {
        let def = normalize("Status", &status_entries()).unwrap();
        let in_order = TypeExpr::Union(vec![
            TypeExpr::Literal(LiteralExpr::Str("open".into())),
            TypeExpr::Literal(LiteralExpr::Str("closed".into())),
        ]);
        assert!(alias_matches("Status", &in_order, &def));

        let scrambled = TypeExpr::Union(vec![
            TypeExpr::Literal(LiteralExpr::Str("closed".into())),
            TypeExpr::Literal(LiteralExpr::Str("open".into())),
        ]);
        assert!(!alias_matches("Status", &scrambled, &def));
    }
}
