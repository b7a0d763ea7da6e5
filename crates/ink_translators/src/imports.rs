//! The annotations a translation had to import

use indexmap::{IndexMap, IndexSet};
use ink_ast::expr::AnnotationExpr;

/// Prefix of every local name an annotation is imported as
pub const MANGLE_PREFIX: &str = "ink";

/// The local name an annotation is imported as, `ink__<namespace>_<property>`
pub fn mangle(namespace: &str, property: &str) -> String {
    format!("{MANGLE_PREFIX}__{namespace}_{property}")
}

/// Accumulates the annotations referenced during a translation.
///
/// Namespaces keep the order they were first referenced in, and so do the properties
/// within a namespace. Referencing the same annotation twice records it once.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportTable {
    namespaces: IndexMap<String, IndexSet<String>>,
}

/// One imported property of a namespace
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSymbol<'a> {
    pub property: &'a str,
    /// The mangled name the property is bound to
    pub local: String,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an annotation, returning the local name it is bound to
    pub fn import(&mut self, annotation: &AnnotationExpr) -> String {
        self.insert(annotation.namespace(), annotation.property())
    }

    /// Records a property of a namespace, returning the local name it is bound to
    pub fn insert(&mut self, namespace: &str, property: &str) -> String {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(property.to_string());
        mangle(namespace, property)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Each imported namespace with its symbols
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<ImportedSymbol<'_>>)> + '_ {
        self.namespaces.iter().map(|(namespace, properties)| {
            let symbols = properties
                .iter()
                .map(|property| ImportedSymbol {
                    property,
                    local: mangle(namespace, property),
                })
                .collect();
            (namespace.as_str(), symbols)
        })
    }
}
