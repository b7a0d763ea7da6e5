//! Statements and declarations

use crate::expr::{EnumFieldExpr, Expr};
use crate::types::TypeRef;
use ink_tokens::token::Token;

/// A statement or a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    Return(ReturnStmt),
    Function(FunctionStmt),
    Variable(VariableStmt),
    Record(RecordStmt),
    Enum(EnumStmt),
    While(WhileStmt),
    For(ForStmt),
}

impl Stmt {
    /// Short name of the statement kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Block(_) => "block",
            Stmt::Expression(_) => "expression statement",
            Stmt::If(_) => "if statement",
            Stmt::Return(_) => "return statement",
            Stmt::Function(_) => "function declaration",
            Stmt::Variable(_) => "variable declaration",
            Stmt::Record(_) => "record declaration",
            Stmt::Enum(_) => "enum declaration",
            Stmt::While(_) => "while loop",
            Stmt::For(_) => "for loop",
        }
    }
}

/// `{ ... }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: BlockStmt,
    /// Either a [`Stmt::Block`] or a chained [`Stmt::If`]
    pub else_block: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
}

/// A function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub name: Token,
    pub parameters: Vec<FunctionParameter>,
    pub body: Vec<Stmt>,
    pub return_type: TypeRef,
    pub exposed: bool,
    pub is_async: bool,
}

/// `name: type` in a function signature
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub name: Token,
    pub ty: TypeRef,
}

/// `var name: type = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableStmt {
    pub name: Token,
    pub ty: Option<TypeRef>,
    pub initializer: Option<Expr>,
}

/// A record declaration. Field order is the order every instantiation renders in.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStmt {
    pub name: Token,
    pub fields: Vec<RecordField>,
    pub exposed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: Token,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumStmt {
    pub name: Token,
    pub fields: Vec<EnumFieldExpr>,
    pub exposed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
}

/// `for name: type in iterable { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub variable: Token,
    pub element_type: Option<TypeRef>,
    pub iterable: Expr,
    pub body: BlockStmt,
}
