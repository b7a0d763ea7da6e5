use super::{ErrorKind, Parser, SyntaxResult};
use ink_ast::types::TypeRef;
use ink_tokens::token::TokenKind;

impl Parser {
    /// Parses a type: a name, or an annotation with an optional `<generic>`
    pub(super) fn type_ref(&mut self) -> SyntaxResult<TypeRef> {
        if self.consume_if(&[TokenKind::At]).is_some() {
            let mut annotation = self.annotation()?;
            if self.consume_if(&[TokenKind::Less]).is_some() {
                annotation.generic = Some(Box::new(self.type_ref()?));
                self.consume(TokenKind::Greater, "after generic type")?;
            }
            if self.check(TokenKind::LParen) {
                return Err(self.error(ErrorKind::AnnotationCallInType));
            }
            return Ok(TypeRef::Annotation(annotation));
        }
        match self.consume_if(&[TokenKind::Identifier]) {
            Some(name) => Ok(TypeRef::Named(name)),
            None => Err(self.error(ErrorKind::ExpectedType)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse, parse_err};
    use super::*;
    use ink_ast::statements::{Stmt, VariableStmt};
    use test_log::test;

    fn declared_type(source: &str) -> TypeRef {
        match parse(source).unwrap_or_else(|e| panic!("{e}")).pop() {
            Some(Stmt::Variable(VariableStmt { ty: Some(ty), .. })) => ty,
            other => panic!("expected a typed variable, got {other:?}"),
        }
    }

    #[test]
    fn named_type() {
        let TypeRef::Named(name) = declared_type("var count: u32 = 0;") else {
            panic!("expected a named type")
        };
        assert_eq!(name.lexeme(), "u32");
    }

    #[test]
    fn nested_generic_annotation() {
        let TypeRef::Annotation(outer) = declared_type("var names: @list::of<@list::of<string>>;")
        else {
            panic!("expected an annotation type")
        };
        assert_eq!((outer.namespace(), outer.property()), ("list", "of"));
        let Some(TypeRef::Annotation(inner)) = outer.generic.as_deref() else {
            panic!("expected an annotation generic")
        };
        assert!(matches!(inner.generic.as_deref(), Some(TypeRef::Named(name)) if name.lexeme() == "string"));
    }

    #[test]
    fn annotation_call_in_type_position() {
        assert_eq!(
            parse_err("var response: @fetch(\"url\");"),
            ErrorKind::AnnotationCallInType
        );
    }

    #[test]
    fn missing_type() {
        assert_eq!(parse_err("var x: = 3;"), ErrorKind::ExpectedType);
    }
}
