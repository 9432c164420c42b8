//! Schema assembler.
//!
//! Orchestrates one extraction run: pairs const-objects with their derived
//! union aliases, registers every top-level name so declaration order and
//! use order are independent, then resolves each declaration exactly once in
//! source order. The first error aborts the run; no partial schema is ever
//! returned.

use eventspec_ast::{ConstEntry, DeclExpr, FieldExpr, Keyword, TypeExpr};

use crate::enums;
use crate::error::ExtractError;
use crate::ir::{CanonicalType, DeclKind, DeclTag, Declaration, EventDef, Schema};
use crate::resolve::Resolver;
use crate::table::DeclTable;

/// Assemble the canonical schema document from the parser's top-level
/// declarations.
pub fn assemble(decls: &[DeclExpr]) -> Result<Schema, ExtractError> {
    let plan = plan(decls);

    let mut table = DeclTable::new();
    for item in &plan {
        table.register(item.name(), item.tag())?;
    }

    for item in &plan {
        let decl = resolve_item(&table, item)?;
        table.memoize(decl);
    }

    Ok(table.into_schema())
}

/// One planned declaration after enum pairing.
enum Pending<'a> {
    /// A const-object, possibly folded with its same-named alias. The merged
    /// enum takes the const's slot in declaration order.
    Enum {
        name: &'a str,
        entries: &'a [ConstEntry],
        alias: Option<&'a TypeExpr>,
    },
    Alias {
        name: &'a str,
        ty: &'a TypeExpr,
    },
    /// A plain interface: an alias over its object shape.
    Shape {
        name: &'a str,
        fields: &'a [FieldExpr],
    },
    Event {
        name: &'a str,
        fields: &'a [FieldExpr],
    },
}

impl Pending<'_> {
    fn name(&self) -> &str {
        match self {
            Pending::Enum { name, .. }
            | Pending::Alias { name, .. }
            | Pending::Shape { name, .. }
            | Pending::Event { name, .. } => name,
        }
    }

    fn tag(&self) -> DeclTag {
        match self {
            Pending::Enum { .. } => DeclTag::Enum,
            Pending::Alias { .. } | Pending::Shape { .. } => DeclTag::Alias,
            Pending::Event { .. } => DeclTag::Event,
        }
    }
}

/// Pair const-objects with same-named aliases and classify interfaces.
fn plan(decls: &[DeclExpr]) -> Vec<Pending<'_>> {
    let mut out = Vec::with_capacity(decls.len());
    for decl in decls {
        match decl {
            DeclExpr::ConstObject { name, entries } => {
                let alias = decls.iter().find_map(|d| match d {
                    DeclExpr::TypeAlias { name: n, ty } if n == name => Some(ty),
                    _ => None,
                });
                out.push(Pending::Enum {
                    name,
                    entries,
                    alias,
                });
            }
            DeclExpr::TypeAlias { name, ty } => {
                let has_const = decls.iter().any(
                    |d| matches!(d, DeclExpr::ConstObject { name: n, .. } if n == name),
                );
                if !has_const {
                    out.push(Pending::Alias { name, ty });
                }
                // Otherwise the alias folds into the const's enum slot.
            }
            DeclExpr::Interface { name, fields } => {
                if is_event(fields) {
                    out.push(Pending::Event { name, fields });
                } else {
                    out.push(Pending::Shape { name, fields });
                }
            }
        }
    }
    out
}

/// An event-shaped interface carries a required `name: string` field and an
/// inline-object `data` payload section.
fn is_event(fields: &[FieldExpr]) -> bool {
    let named = fields.iter().any(|f| {
        f.name == "name" && !f.optional && matches!(f.ty, TypeExpr::Keyword(Keyword::String))
    });
    let has_data = fields
        .iter()
        .any(|f| f.name == "data" && matches!(f.ty, TypeExpr::Object(_)));
    named && has_data
}

fn resolve_item(table: &DeclTable, item: &Pending<'_>) -> Result<Declaration, ExtractError> {
    let resolver = Resolver::new(table);
    match item {
        Pending::Enum {
            name,
            entries,
            alias,
        } => {
            let def = enums::normalize(name, entries)?;
            if let Some(alias_ty) = alias {
                if !enums::alias_matches(name, alias_ty, &def) {
                    return Err(ExtractError::UnsupportedTypeShape {
                        location: (*name).to_string(),
                        construct: "type alias does not derive from its const object".to_string(),
                    });
                }
            }
            Ok(Declaration {
                name: (*name).to_string(),
                kind: DeclKind::Enum(def),
            })
        }
        Pending::Alias { name, ty } => {
            let resolved = resolver.resolve(name, ty)?;
            Ok(Declaration {
                name: (*name).to_string(),
                kind: DeclKind::Alias(resolved),
            })
        }
        Pending::Shape { name, fields } => {
            let shape = resolver.object(name, fields)?;
            Ok(Declaration {
                name: (*name).to_string(),
                kind: DeclKind::Alias(CanonicalType::Object(shape)),
            })
        }
        Pending::Event { name, fields } => {
            let shape = resolver.object(name, fields)?;
            Ok(Declaration {
                name: (*name).to_string(),
                kind: DeclKind::Event(EventDef { shape }),
            })
        }
    }
}
