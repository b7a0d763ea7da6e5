//! Expressions

use crate::types::TypeRef;
use ink_tokens::token::Token;

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Grouping(GroupingExpr),
    Literal(LiteralExpr),
    Unary(UnaryExpr),
    Variable(VariableExpr),
    Logical(LogicalExpr),
    Assign(AssignExpr),
    Call(CallExpr),
    Get(GetExpr),
    Set(SetExpr),
    Annotation(AnnotationExpr),
    RecordInstantiation(RecordInstantiationExpr),
}

/// An arithmetic, equality or comparison operation
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// A parenthesized expression
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub inner: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: LiteralValue,
}

/// The value of a literal expression
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Raw string contents, escapes are kept as written
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub right: Box<Expr>,
}

/// A reference to a named value
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: Token,
}

/// An `and`/`or` expression
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub name: Token,
    pub value: Box<Expr>,
}

/// A call expression
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    /// Set when the callee is an [`AnnotationExpr`]
    pub is_annotation_call: bool,
    /// Set when the call was prefixed with `await`
    pub is_awaited: bool,
}

/// Accesses a property of an object
#[derive(Debug, Clone, PartialEq)]
pub struct GetExpr {
    pub object: Box<Expr>,
    pub name: Token,
}

/// Assigns a property of an object
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

/// An externally supplied capability, `@namespace::property`.
///
/// The short form `@namespace` refers to the property of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationExpr {
    pub namespace: Token,
    pub property: Option<Token>,
    /// Only ever present when the annotation is used as a type
    pub generic: Option<Box<TypeRef>>,
}

impl AnnotationExpr {
    pub fn namespace(&self) -> &str {
        self.namespace.lexeme()
    }

    /// The referenced property, defaulting to the namespace itself
    pub fn property(&self) -> &str {
        self.property
            .as_ref()
            .unwrap_or(&self.namespace)
            .lexeme()
    }
}

/// Constructs a record, `name { field: value, ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInstantiationExpr {
    pub name: Token,
    pub fields: Vec<RecordFieldExpr>,
}

impl RecordInstantiationExpr {
    /// Finds the value given for a field
    pub fn field(&self, name: &str) -> Option<&Expr> {
        self.fields
            .iter()
            .find(|field| field.name.lexeme() == name)
            .map(|field| &field.value)
    }
}

/// A single `field: value` of a record instantiation
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFieldExpr {
    pub name: Token,
    pub value: Expr,
}

/// A member of an enum declaration, `name` or `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumFieldExpr {
    pub name: Token,
    pub value: Option<Expr>,
}
