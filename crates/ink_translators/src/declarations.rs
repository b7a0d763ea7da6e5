//! Records and enums declared by a program.
//!
//! Backends register every record and enum before rendering anything, so a type can be
//! referenced before the line it is declared on.

use crate::error::{TranslateError, TranslateResult};
use indexmap::IndexMap;
use ink_ast::expr::{Expr, LiteralValue, RecordInstantiationExpr};
use ink_ast::statements::{EnumStmt, RecordStmt, Stmt};
use ink_tokens::token::TokenKind;
use tracing::trace;

/// A member of a declared enum with its resolved value, always within `i32`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// A field of a record instantiation, placed in declared order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrangedField<'e> {
    pub name: &'e str,
    /// `None` when the instantiation left this field out
    pub value: Option<&'e Expr>,
}

#[derive(Debug, Default, Clone)]
pub struct Declarations {
    records: IndexMap<String, Vec<String>>,
    enums: IndexMap<String, Vec<EnumMember>>,
}

impl Declarations {
    /// Registers every top level record and enum of a program
    pub fn collect(program: &[Stmt]) -> TranslateResult<Self> {
        let mut declarations = Self::default();
        for statement in program {
            match statement {
                Stmt::Record(record) => declarations.declare_record(record),
                Stmt::Enum(enumeration) => declarations.declare_enum(enumeration)?,
                _ => {}
            }
        }
        Ok(declarations)
    }

    pub fn declare_record(&mut self, record: &RecordStmt) {
        let fields = record
            .fields
            .iter()
            .map(|field| field.name.lexeme().to_string())
            .collect();
        trace!("declared record {} with fields {fields:?}", record.name.lexeme());
        self.records.insert(record.name.lexeme().to_string(), fields);
    }

    /// Registers an enum, resolving the value of every member
    pub fn declare_enum(&mut self, enumeration: &EnumStmt) -> TranslateResult {
        let mut members = Vec::with_capacity(enumeration.fields.len());
        let mut next = 0;
        for field in &enumeration.fields {
            let value = match &field.value {
                Some(value) => integer_value(value),
                None => Some(next),
            }
            .filter(|value| i32::try_from(*value).is_ok())
            .ok_or_else(|| TranslateError::InvalidEnumValue {
                enumeration: enumeration.name.lexeme().to_string(),
                member: field.name.lexeme().to_string(),
            })?;
            next = value + 1;
            members.push(EnumMember {
                name: field.name.lexeme().to_string(),
                value,
            });
        }
        trace!("declared enum {} with members {members:?}", enumeration.name.lexeme());
        self.enums
            .insert(enumeration.name.lexeme().to_string(), members);
        Ok(())
    }

    pub fn is_record(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// The members of an enum, in declared order
    pub fn members(&self, enumeration: &str) -> Option<&[EnumMember]> {
        self.enums.get(enumeration).map(Vec::as_slice)
    }

    /// Orders the fields of an instantiation the way the record declares them.
    ///
    /// Every declared field appears exactly once. Fields the record does not declare are
    /// an error.
    pub fn arrange<'e>(
        &'e self,
        instantiation: &'e RecordInstantiationExpr,
    ) -> TranslateResult<Vec<ArrangedField<'e>>> {
        let record = instantiation.name.lexeme();
        let declared = self
            .records
            .get(record)
            .ok_or_else(|| TranslateError::UndeclaredRecord(record.to_string()))?;
        if let Some(unknown) = instantiation
            .fields
            .iter()
            .find(|field| !declared.iter().any(|name| name == field.name.lexeme()))
        {
            return Err(TranslateError::UnknownField {
                record: record.to_string(),
                field: unknown.name.lexeme().to_string(),
            });
        }
        Ok(declared
            .iter()
            .map(|name| ArrangedField {
                name,
                value: instantiation.field(name),
            })
            .collect())
    }
}

/// The value of an integer literal, optionally negated
fn integer_value(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Literal(literal) => match literal.value {
            LiteralValue::Number(number) if number.fract() == 0.0 => Some(number as i64),
            _ => None,
        },
        Expr::Unary(unary) if unary.operator.kind() == TokenKind::Minus => {
            integer_value(&unary.right).and_then(i64::checked_neg)
        }
        Expr::Grouping(grouping) => integer_value(&grouping.inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_ast_parsing::parse;
    use test_log::test;

    fn declarations(source: &str) -> Declarations {
        let program = parse(source).expect("should parse");
        Declarations::collect(&program).expect("should collect")
    }

    #[test]
    fn enum_values_continue_from_explicit_ones() {
        let declarations = declarations("enum level { low, mid = 5, high, bottom = -2, next }");
        let values = declarations
            .members("level")
            .expect("declared")
            .iter()
            .map(|member| (member.name.as_str(), member.value))
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            [("low", 0), ("mid", 5), ("high", 6), ("bottom", -2), ("next", -1)]
        );
    }

    #[test]
    fn non_integer_enum_values_are_rejected() {
        let program = parse("enum level { low = \"low\" }").expect("should parse");
        assert!(matches!(
            Declarations::collect(&program),
            Err(TranslateError::InvalidEnumValue { .. })
        ));
        let program = parse("enum level { low = 1.5 }").expect("should parse");
        assert!(Declarations::collect(&program).is_err());
    }

    #[test]
    fn enum_values_must_fit_an_int() {
        let out_of_range = |source: &str| {
            let program = parse(source).expect("should parse");
            matches!(
                Declarations::collect(&program),
                Err(TranslateError::InvalidEnumValue { member, .. }) if member == "a"
            )
        };
        assert!(out_of_range("enum big { a = 9223372036854775807 }"));
        assert!(out_of_range("enum big { a = 2147483648 }"));
        assert!(out_of_range("enum big { a = -2147483649 }"));
        let program = parse("enum big { b = 2147483647, a }").expect("should parse");
        assert!(matches!(
            Declarations::collect(&program),
            Err(TranslateError::InvalidEnumValue { member, .. }) if member == "a"
        ));

        let limits = declarations("enum big { low = -2147483648, high = 2147483647 }");
        let values = limits
            .members("big")
            .expect("declared")
            .iter()
            .map(|member| member.value)
            .collect::<Vec<_>>();
        assert_eq!(values, [i64::from(i32::MIN), i64::from(i32::MAX)]);
    }

    #[test]
    fn fields_are_arranged_in_declared_order() {
        let program = parse(
            "record person { name: string, age: u16, nickname: string }\n\
             var someone = person { age: 3, name: \"ink\" };",
        )
        .expect("should parse");
        let declarations = Declarations::collect(&program).expect("should collect");
        let Stmt::Variable(variable) = &program[1] else {
            panic!("expected a variable")
        };
        let Some(Expr::RecordInstantiation(instantiation)) = &variable.initializer else {
            panic!("expected an instantiation")
        };
        let arranged = declarations.arrange(instantiation).expect("arranged");
        let names = arranged.iter().map(|field| field.name).collect::<Vec<_>>();
        assert_eq!(names, ["name", "age", "nickname"]);
        assert!(arranged[0].value.is_some());
        assert!(arranged[2].value.is_none());
    }

    #[test]
    fn unknown_fields_and_records() {
        let program = parse(
            "record person { name: string }\n\
             var a = person { name: \"a\", age: 1 };\n\
             var b = robot { name: \"b\" };",
        )
        .expect("should parse");
        let declarations = Declarations::collect(&program).expect("should collect");
        let instantiation = |index: usize| match &program[index] {
            Stmt::Variable(variable) => match &variable.initializer {
                Some(Expr::RecordInstantiation(instantiation)) => instantiation.clone(),
                _ => panic!("expected an instantiation"),
            },
            _ => panic!("expected a variable"),
        };
        let with_unknown_field = instantiation(1);
        assert!(matches!(
            declarations.arrange(&with_unknown_field),
            Err(TranslateError::UnknownField { .. })
        ));
        let undeclared = instantiation(2);
        assert!(matches!(
            declarations.arrange(&undeclared),
            Err(TranslateError::UndeclaredRecord(record)) if record == "robot"
        ));
    }
}
