//! Type resolver.
//!
//! Converts one AST type expression into a canonical type node, recursively
//! resolving nested expressions against the (possibly still partially
//! resolved) declaration table. Named references are validated for existence
//! and kind but never expanded here; expansion is the assembler's job and
//! happens once per declaration.

use eventspec_ast::{FieldExpr, Keyword, LiteralExpr, TypeExpr};

use crate::error::ExtractError;
use crate::ir::{CanonicalType, DeclTag, Field, LiteralValue, ObjectShape, PrimitiveKind};
use crate::literals;
use crate::table::DeclTable;

pub struct Resolver<'a> {
    table: &'a DeclTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a DeclTable) -> Self {
        Self { table }
    }

    /// Resolve one type expression. `site` is the dotted path of the use
    /// site, used for error locations.
    pub fn resolve(&self, site: &str, expr: &TypeExpr) -> Result<CanonicalType, ExtractError> {
        match expr {
            TypeExpr::Named(name) => self.reference(site, name),
            TypeExpr::Keyword(kw) => Ok(CanonicalType::Primitive(primitive(*kw))),
            TypeExpr::Literal(lit) => Ok(CanonicalType::Literal(LiteralValue::from(lit))),
            TypeExpr::Union(members) => self.union(site, members),
            TypeExpr::Object(fields) => Ok(CanonicalType::Object(self.object(site, fields)?)),
            TypeExpr::Array(elem) => {
                let inner = self.resolve(&format!("{site}[]"), elem)?;
                Ok(CanonicalType::Array(Box::new(inner)))
            }
            TypeExpr::ValuesOf(name) => self.value_union(site, name),
            TypeExpr::Unsupported(construct) => Err(ExtractError::UnsupportedTypeShape {
                location: site.to_string(),
                construct: construct.clone(),
            }),
        }
    }

    /// Resolve an ordered field list into an object shape.
    pub fn object(&self, site: &str, fields: &[FieldExpr]) -> Result<ObjectShape, ExtractError> {
        let mut out: Vec<Field> = Vec::with_capacity(fields.len());
        for field in fields {
            let path = format!("{site}.{}", field.name);
            if out.iter().any(|f| f.name == field.name) {
                return Err(ExtractError::UnsupportedTypeShape {
                    location: path,
                    construct: "duplicate field name".to_string(),
                });
            }
            let ty = self.resolve(&path, &field.ty)?;
            out.push(Field {
                name: field.name.clone(),
                ty,
                optional: field.optional,
                default: field.default.as_ref().map(LiteralValue::from),
            });
        }
        Ok(ObjectShape { fields: out })
    }

    /// A named use of a declaration. Enums and aliases are valid in type
    /// position; events are not.
    fn reference(&self, site: &str, name: &str) -> Result<CanonicalType, ExtractError> {
        match self.table.tag_of(name) {
            Some(DeclTag::Enum | DeclTag::Alias) => Ok(CanonicalType::Reference(name.to_string())),
            Some(actual) => Err(ExtractError::KindMismatch {
                use_site: site.to_string(),
                expected: DeclTag::Alias,
                actual,
            }),
            None => Err(ExtractError::UnknownReference {
                use_site: site.to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// The derived value union of a const-object, `typeof X[keyof typeof X]`,
    /// used in type position away from the declaring alias.
    fn value_union(&self, site: &str, name: &str) -> Result<CanonicalType, ExtractError> {
        match self.table.tag_of(name) {
            Some(DeclTag::Enum) => Ok(CanonicalType::Reference(name.to_string())),
            Some(actual) => Err(ExtractError::KindMismatch {
                use_site: site.to_string(),
                expected: DeclTag::Enum,
                actual,
            }),
            None => Err(ExtractError::UnknownReference {
                use_site: site.to_string(),
                name: name.to_string(),
            }),
        }
    }

    fn union(&self, site: &str, members: &[TypeExpr]) -> Result<CanonicalType, ExtractError> {
        let mut flat: Vec<&TypeExpr> = Vec::new();
        flatten(members, &mut flat);
        if flat.is_empty() {
            return Err(ExtractError::UnsupportedTypeShape {
                location: site.to_string(),
                construct: "empty union".to_string(),
            });
        }

        // A closed union of >= 2 literals collapses to an anonymous
        // literal set.
        let lits: Vec<&LiteralExpr> = flat
            .iter()
            .filter_map(|m| match m {
                TypeExpr::Literal(lit) => Some(lit),
                _ => None,
            })
            .collect();
        if lits.len() == flat.len() && lits.len() >= 2 {
            let owned: Vec<LiteralExpr> = lits.into_iter().cloned().collect();
            return literals::collapse(site, &owned);
        }

        let mut resolved: Vec<CanonicalType> = Vec::with_capacity(flat.len());
        for member in flat {
            match self.resolve(site, member)? {
                CanonicalType::Union(inner) => {
                    for ty in inner {
                        push_distinct(&mut resolved, ty);
                    }
                }
                ty => push_distinct(&mut resolved, ty),
            }
        }

        if resolved.len() == 1 {
            return Ok(resolved.remove(0));
        }
        Ok(CanonicalType::Union(resolved))
    }
}

/// Splice nested AST unions into one member list, preserving source order.
fn flatten<'e>(members: &'e [TypeExpr], out: &mut Vec<&'e TypeExpr>) {
    for member in members {
        match member {
            TypeExpr::Union(inner) => flatten(inner, out),
            other => out.push(other),
        }
    }
}

fn push_distinct(members: &mut Vec<CanonicalType>, ty: CanonicalType) {
    if !members.contains(&ty) {
        members.push(ty);
    }
}

fn primitive(kw: Keyword) -> PrimitiveKind {
    match kw {
        Keyword::String => PrimitiveKind::String,
        // The source's single numeric keyword covers both classes; float is
        // the superset representation.
        Keyword::Number | Keyword::Float => PrimitiveKind::Float,
        Keyword::Integer => PrimitiveKind::Integer,
        Keyword::Boolean => PrimitiveKind::Boolean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DeclTable {
        let mut t = DeclTable::new();
        t.register("Status", DeclTag::Enum).unwrap();
        t.register("Mixed", DeclTag::Alias).unwrap();
        t.register("Event", DeclTag::Event).unwrap();
        t
    }

    #[test]
    fn primitives() {
        let t = table();
        let r = Resolver::new(&t);
        assert_eq!(
            r.resolve("x", &TypeExpr::Keyword(Keyword::Number)).unwrap(),
            CanonicalType::Primitive(PrimitiveKind::Float)
        );
        assert_eq!(
            r.resolve("x", &TypeExpr::Keyword(Keyword::String)).unwrap(),
            CanonicalType::Primitive(PrimitiveKind::String)
        );
    }

    #[test]
    fn pinned_literal() {
        let t = table();
        let r = Resolver::new(&t);
        let ty = r
            .resolve(
                "x",
                &TypeExpr::Literal(LiteralExpr::Str("lol this is content".into())),
            )
            .unwrap();
        assert_eq!(
            ty,
            CanonicalType::Literal(LiteralValue::Str("lol this is content".into()))
        );
    }

    #[test]
    fn named_references() {
        let t = table();
        let r = Resolver::new(&t);
        assert_eq!(
            r.resolve("f", &TypeExpr::Named("Status".into())).unwrap(),
            CanonicalType::Reference("Status".into())
        );
        assert_eq!(
            r.resolve("f", &TypeExpr::Named("Mixed".into())).unwrap(),
            CanonicalType::Reference("Mixed".into())
        );
    }

    #[test]
    fn event_in_type_position_is_kind_mismatch() {
        let t = table();
        let r = Resolver::new(&t);
        let err = r.resolve("f", &TypeExpr::Named("Event".into())).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::KindMismatch {
                actual: DeclTag::Event,
                ..
            }
        ));
    }

    #[test]
    fn unknown_name() {
        let t = table();
        let r = Resolver::new(&t);
        let err = r
            .resolve("Event.data.x", &TypeExpr::Named("Nope".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnknownReference { use_site, name }
                if use_site == "Event.data.x" && name == "Nope"
        ));
    }

    #[test]
    fn values_of_requires_enum() {
        let t = table();
        let r = Resolver::new(&t);
        assert_eq!(
            r.resolve("f", &TypeExpr::ValuesOf("Status".into())).unwrap(),
            CanonicalType::Reference("Status".into())
        );
        let err = r
            .resolve("f", &TypeExpr::ValuesOf("Mixed".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::KindMismatch {
                expected: DeclTag::Enum,
                actual: DeclTag::Alias,
                ..
            }
        ));
    }

    #[test]
    fn literal_union_collapses() {
        let t = table();
        let r = Resolver::new(&t);
        let ty = r
            .resolve(
                "n",
                &TypeExpr::Union(vec![
                    TypeExpr::Literal(LiteralExpr::Int(1)),
                    TypeExpr::Literal(LiteralExpr::Int(2)),
                ]),
            )
            .unwrap();
        assert!(matches!(ty, CanonicalType::LiteralSet { .. }));
    }

    #[test]
    fn mixed_union_keeps_members() {
        let t = table();
        let r = Resolver::new(&t);
        let ty = r
            .resolve(
                "m",
                &TypeExpr::Union(vec![
                    TypeExpr::Keyword(Keyword::String),
                    TypeExpr::Keyword(Keyword::Number),
                ]),
            )
            .unwrap();
        assert_eq!(
            ty,
            CanonicalType::Union(vec![
                CanonicalType::Primitive(PrimitiveKind::String),
                CanonicalType::Primitive(PrimitiveKind::Float),
            ])
        );
    }

    #[test]
    fn nested_unions_flatten() {
        let t = table();
        let r = Resolver::new(&t);
        let ty = r
            .resolve(
                "m",
                &TypeExpr::Union(vec![
                    TypeExpr::Union(vec![
                        TypeExpr::Keyword(Keyword::String),
                        TypeExpr::Keyword(Keyword::Boolean),
                    ]),
                    TypeExpr::Keyword(Keyword::Number),
                ]),
            )
            .unwrap();
        match ty {
            CanonicalType::Union(members) => assert_eq!(members.len(), 3),
            other => panic!("expected flattened union, got {other:?}"),
        }
    }

    #[test]
    fn one_member_union_unwraps() {
        let t = table();
        let r = Resolver::new(&t);
        // string | string has one distinct member after flattening.
        let ty = r
            .resolve(
                "m",
                &TypeExpr::Union(vec![
                    TypeExpr::Keyword(Keyword::String),
                    TypeExpr::Keyword(Keyword::String),
                ]),
            )
            .unwrap();
        assert_eq!(ty, CanonicalType::Primitive(PrimitiveKind::String));
    }

    #[test]
    fn mixed_literal_kinds_fail_not_silently_union() {
        let t = table();
        let r = Resolver::new(&t);
        let err = r
            .resolve(
                "m",
                &TypeExpr::Union(vec![
                    TypeExpr::Literal(LiteralExpr::Str("a".into())),
                    TypeExpr::Literal(LiteralExpr::Int(1)),
                ]),
            )
            .unwrap_err();
        assert!(matches!(err, ExtractError::MixedLiteralKinds { .. }));
    }

    #[test]
    fn object_fields_keep_order_and_optionality() {
        let t = table();
        let r = Resolver::new(&t);
        let shape = r
            .object(
                "Some",
                &[
                    FieldExpr::required("with", TypeExpr::Keyword(Keyword::String)),
                    FieldExpr::optional("maybe", TypeExpr::Keyword(Keyword::Boolean)),
                ],
            )
            .unwrap();
        assert_eq!(shape.fields[0].name, "with");
        assert!(!shape.fields[0].optional);
        assert_eq!(shape.fields[1].name, "maybe");
        assert!(shape.fields[1].optional);
    }

    #[test]
    fn field_default_carried_verbatim() {
        let t = table();
        let r = Resolver::new(&t);
        let shape = r
            .object(
                "Cfg",
                &[
                    FieldExpr::optional("retries", TypeExpr::Keyword(Keyword::Number))
                        .with_default(LiteralExpr::Int(3)),
                ],
            )
            .unwrap();
        assert_eq!(shape.fields[0].default, Some(LiteralValue::Int(3)));
    }

    #[test]
    fn duplicate_field_rejected() {
        let t = table();
        let r = Resolver::new(&t);
        let err = r
            .object(
                "Some",
                &[
                    FieldExpr::required("x", TypeExpr::Keyword(Keyword::String)),
                    FieldExpr::required("x", TypeExpr::Keyword(Keyword::Number)),
                ],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnsupportedTypeShape { location, .. } if location == "Some.x"
        ));
    }

    #[test]
    fn array_of_literal_set() {
        let t = table();
        let r = Resolver::new(&t);
        let ty = r
            .resolve(
                "fixedNumber",
                &TypeExpr::Array(Box::new(TypeExpr::Union(vec![
                    TypeExpr::Literal(LiteralExpr::Int(1)),
                    TypeExpr::Literal(LiteralExpr::Int(2)),
                    TypeExpr::Literal(LiteralExpr::Float(3.14159)),
                ]))),
            )
            .unwrap();
        match ty {
            CanonicalType::Array(elem) => match *elem {
                CanonicalType::LiteralSet { kind, ref values } => {
                    assert_eq!(kind, PrimitiveKind::Float);
                    assert_eq!(values.len(), 3);
                }
                ref other => panic!("expected literal set element, got {other:?}"),
            },
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_construct_named_in_error() {
        let t = table();
        let r = Resolver::new(&t);
        let err = r
            .resolve(
                "f",
                &TypeExpr::Unsupported("intersection type".into()),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnsupportedTypeShape { construct, .. } if construct == "intersection type"
        ));
    }
}
