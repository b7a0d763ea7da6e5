//! Type references

use crate::expr::AnnotationExpr;
use ink_tokens::token::Token;

/// A type as written in a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A primitive, record or enum name
    Named(Token),
    /// An annotation used as a type, `@namespace::property<generic>`
    Annotation(AnnotationExpr),
}

impl TypeRef {
    /// The line this type reference starts on
    pub fn line(&self) -> usize {
        match self {
            TypeRef::Named(name) => name.line(),
            TypeRef::Annotation(annotation) => annotation.namespace.line(),
        }
    }
}
