//! Per-run declaration table.
//!
//! The table is populated in two phases. The assembler first registers every
//! top-level name with its kind tag so a declaration may reference names
//! declared before or after it. It then resolves bodies in declaration order,
//! memoizing each resolved declaration exactly once; references elsewhere in
//! the document stay name-based and share that single entity.

use std::collections::HashMap;

use crate::error::ExtractError;
use crate::ir::{DeclTag, Declaration, Schema};

#[derive(Debug, Default)]
pub struct DeclTable {
    order: Vec<String>,
    tags: HashMap<String, DeclTag>,
    resolved: HashMap<String, Declaration>,
}

impl DeclTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declared name and its kind. Names are unique per run.
    pub fn register(&mut self, name: &str, tag: DeclTag) -> Result<(), ExtractError> {
        if self.tags.contains_key(name) {
            return Err(ExtractError::UnsupportedTypeShape {
                location: name.to_string(),
                construct: "duplicate declaration name".to_string(),
            });
        }
        self.order.push(name.to_string());
        self.tags.insert(name.to_string(), tag);
        Ok(())
    }

    /// The registered kind of a name, if declared anywhere in the input.
    pub fn tag_of(&self, name: &str) -> Option<DeclTag> {
        self.tags.get(name).copied()
    }

    /// Store a fully resolved declaration. Later lookups reuse this node;
    /// a body is never resolved twice.
    pub fn memoize(&mut self, decl: Declaration) {
        self.resolved.insert(decl.name.clone(), decl);
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved.contains_key(name)
    }

    /// Freeze the table into the canonical schema document, preserving
    /// registration order.
    pub fn into_schema(mut self) -> Schema {
        let declarations = self
            .order
            .iter()
            .filter_map(|name| self.resolved.remove(name))
            .collect();
        Schema { declarations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{CanonicalType, DeclKind, PrimitiveKind};

    #[test]
    fn register_and_lookup() {
        let mut table = DeclTable::new();
        table.register("Status", DeclTag::Enum).unwrap();
        table.register("Event", DeclTag::Event).unwrap();
        assert_eq!(table.tag_of("Status"), Some(DeclTag::Enum));
        assert_eq!(table.tag_of("Missing"), None);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut table = DeclTable::new();
        table.register("Status", DeclTag::Enum).unwrap();
        let err = table.register("Status", DeclTag::Alias).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnsupportedTypeShape { location, .. } if location == "Status"
        ));
    }

    #[test]
    fn schema_preserves_registration_order() {
        let mut table = DeclTable::new();
        table.register("B", DeclTag::Alias).unwrap();
        table.register("A", DeclTag::Alias).unwrap();
        // Memoized out of order; the frozen document follows registration.
        table.memoize(Declaration {
            name: "A".into(),
            kind: DeclKind::Alias(CanonicalType::Primitive(PrimitiveKind::String)),
        });
        table.memoize(Declaration {
            name: "B".into(),
            kind: DeclKind::Alias(CanonicalType::Primitive(PrimitiveKind::Boolean)),
        });
        let schema = table.into_schema();
        assert_eq!(schema.declarations[0].name, "B");
        assert_eq!(schema.declarations[1].name, "A");
    }
}
