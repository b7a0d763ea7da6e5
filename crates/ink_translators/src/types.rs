//! The ink type table

use crate::declarations::Declarations;
use crate::error::{TranslateError, TranslateResult};
use crate::scope::TypeTag;
use ink_ast::expr::{Expr, LiteralExpr, LiteralValue};
use ink_ast::types::TypeRef;
use ink_tokens::token::Token;

/// A built in ink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
    U16,
    U32,
    U64,
    I16,
    I32,
    F32,
    F64,
    Boolean,
    String,
    Void,
}

/// What a plain type name refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NamedType<'a> {
    Primitive(Primitive),
    Record(&'a str),
    Enum(&'a str),
}

/// Resolves a type name against the primitives and the declarations seen so far
pub fn resolve_named<'a>(
    name: &'a Token,
    declarations: &Declarations,
) -> TranslateResult<NamedType<'a>> {
    let lexeme = name.lexeme();
    if let Ok(primitive) = lexeme.parse::<Primitive>() {
        Ok(NamedType::Primitive(primitive))
    } else if declarations.is_record(lexeme) {
        Ok(NamedType::Record(lexeme))
    } else if declarations.is_enum(lexeme) {
        Ok(NamedType::Enum(lexeme))
    } else {
        Err(TranslateError::UnknownType {
            name: lexeme.to_string(),
            line: name.line(),
        })
    }
}

/// The scope tag for a declared type
pub fn type_tag(ty: &TypeRef, declarations: &Declarations) -> TranslateResult<TypeTag> {
    match ty {
        TypeRef::Named(name) => Ok(match resolve_named(name, declarations)? {
            NamedType::Primitive(primitive) => TypeTag::Primitive(primitive),
            NamedType::Record(record) => TypeTag::Record(record.to_string()),
            NamedType::Enum(enumeration) => TypeTag::Enum(enumeration.to_string()),
        }),
        TypeRef::Annotation(annotation) => Ok(TypeTag::Annotation {
            namespace: annotation.namespace().to_string(),
            property: annotation.property().to_string(),
        }),
    }
}

/// The scope tag of an untyped variable, inferred from its initializer
pub fn infer(initializer: Option<&Expr>) -> TypeTag {
    match initializer {
        Some(Expr::Literal(LiteralExpr {
            value: LiteralValue::String(_),
        })) => TypeTag::Primitive(Primitive::String),
        Some(Expr::RecordInstantiation(instantiation)) => {
            TypeTag::Record(instantiation.name.lexeme().to_string())
        }
        Some(Expr::Grouping(grouping)) => infer(Some(grouping.inner.as_ref())),
        _ => TypeTag::Unknown,
    }
}
