//! Declaration and statement rules

use super::{ErrorKind, Parser, SyntaxError, SyntaxResult};
use ink_ast::expr::EnumFieldExpr;
use ink_ast::statements::{
    BlockStmt, EnumStmt, ExpressionStmt, ForStmt, FunctionParameter, FunctionStmt, IfStmt,
    RecordField, RecordStmt, ReturnStmt, Stmt, VariableStmt, WhileStmt,
};
use ink_tokens::token::TokenKind;
use tracing::trace;

impl Parser {
    /// A declaration, with its optional `expose` and `async` modifiers
    pub(super) fn declaration(&mut self) -> SyntaxResult<Stmt> {
        let exposed = self.consume_if(&[TokenKind::Expose]).is_some();
        let asynchronous = self.consume_if(&[TokenKind::Async]).is_some();

        if self.consume_if(&[TokenKind::Function]).is_some() {
            return self.function(exposed, asynchronous);
        }
        if asynchronous {
            return Err(self.illegal_modifier(TokenKind::Async));
        }
        if self.consume_if(&[TokenKind::Record]).is_some() {
            return self.record(exposed);
        }
        if self.consume_if(&[TokenKind::Enum]).is_some() {
            return self.enumeration(exposed);
        }
        if exposed {
            return Err(self.illegal_modifier(TokenKind::Expose));
        }
        if self.consume_if(&[TokenKind::Var]).is_some() {
            return self.var_declaration();
        }
        self.statement()
    }

    fn illegal_modifier(&self, modifier: TokenKind) -> SyntaxError {
        self.error(ErrorKind::IllegalModifier {
            modifier,
            target: self.peek().to_string(),
        })
    }

    fn function(&mut self, exposed: bool, is_async: bool) -> SyntaxResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "as function name")?;
        trace!(name = name.lexeme(), exposed, is_async, "parsing function");
        self.consume(TokenKind::LParen, "after function name")?;
        let mut parameters = vec![];
        if !self.check(TokenKind::RParen) {
            loop {
                let name = self.consume(TokenKind::Identifier, "as parameter name")?;
                self.consume(TokenKind::Colon, "after parameter name")?;
                parameters.push(FunctionParameter {
                    name,
                    ty: self.type_ref()?,
                });
                if self.consume_if(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen, "after parameters")?;
        self.consume(TokenKind::Arrow, "before return type")?;
        let return_type = self.type_ref()?;
        self.consume(TokenKind::LBrace, "before function body")?;
        let body = self.block()?;
        Ok(Stmt::Function(FunctionStmt {
            name,
            parameters,
            body,
            return_type,
            exposed,
            is_async,
        }))
    }

    fn record(&mut self, exposed: bool) -> SyntaxResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "as record name")?;
        trace!(name = name.lexeme(), exposed, "parsing record");
        self.consume(TokenKind::LBrace, "after record name")?;
        let mut fields = vec![];
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let name = self.consume(TokenKind::Identifier, "as field name")?;
            self.consume(TokenKind::Colon, "after field name")?;
            fields.push(RecordField {
                name,
                ty: self.type_ref()?,
            });
            self.consume_if(&[TokenKind::Comma]);
        }
        self.consume(TokenKind::RBrace, "after record fields")?;
        Ok(Stmt::Record(RecordStmt {
            name,
            fields,
            exposed,
        }))
    }

    fn enumeration(&mut self, exposed: bool) -> SyntaxResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "as enum name")?;
        trace!(name = name.lexeme(), exposed, "parsing enum");
        self.consume(TokenKind::LBrace, "after enum name")?;
        let mut fields = vec![];
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let name = self.consume(TokenKind::Identifier, "as enum member")?;
            let value = match self.consume_if(&[TokenKind::Equal]) {
                Some(_) => Some(self.expression()?),
                None => None,
            };
            fields.push(EnumFieldExpr { name, value });
            self.consume_if(&[TokenKind::Comma]);
        }
        self.consume(TokenKind::RBrace, "after enum members")?;
        Ok(Stmt::Enum(EnumStmt {
            name,
            fields,
            exposed,
        }))
    }

    fn var_declaration(&mut self) -> SyntaxResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "as variable name")?;
        let ty = match self.consume_if(&[TokenKind::Colon]) {
            Some(_) => Some(self.type_ref()?),
            None => None,
        };
        let initializer = match self.consume_if(&[TokenKind::Equal]) {
            Some(_) => Some(self.expression()?),
            None => None,
        };
        if ty.is_none() && initializer.is_none() {
            return Err(SyntaxError::new(ErrorKind::UntypedVariable, &name));
        }
        self.consume(TokenKind::Semicolon, "after variable declaration")?;
        Ok(Stmt::Variable(VariableStmt {
            name,
            ty,
            initializer,
        }))
    }

    fn statement(&mut self) -> SyntaxResult<Stmt> {
        if self.consume_if(&[TokenKind::If]).is_some() {
            return self.if_statement();
        }
        if self.consume_if(&[TokenKind::While]).is_some() {
            return self.while_statement();
        }
        if self.consume_if(&[TokenKind::For]).is_some() {
            return self.for_statement();
        }
        if let Some(keyword) = self.consume_if(&[TokenKind::Return]) {
            let value = match self.check(TokenKind::Semicolon) {
                true => None,
                false => Some(self.expression()?),
            };
            self.consume(TokenKind::Semicolon, "after return value")?;
            return Ok(Stmt::Return(ReturnStmt { keyword, value }));
        }
        if self.consume_if(&[TokenKind::LBrace]).is_some() {
            return Ok(Stmt::Block(BlockStmt {
                statements: self.block()?,
            }));
        }

        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "after expression")?;
        Ok(Stmt::Expression(ExpressionStmt { expr }))
    }

    fn if_statement(&mut self) -> SyntaxResult<Stmt> {
        let condition = self.expression()?;
        self.consume(TokenKind::LBrace, "before if body")?;
        let then_block = BlockStmt {
            statements: self.block()?,
        };
        let else_block = match self.consume_if(&[TokenKind::Else]) {
            None => None,
            Some(_) if self.consume_if(&[TokenKind::If]).is_some() => {
                Some(Box::new(self.if_statement()?))
            }
            Some(_) => {
                self.consume(TokenKind::LBrace, "before else body")?;
                Some(Box::new(Stmt::Block(BlockStmt {
                    statements: self.block()?,
                })))
            }
        };
        Ok(Stmt::If(IfStmt {
            condition,
            then_block,
            else_block,
        }))
    }

    fn while_statement(&mut self) -> SyntaxResult<Stmt> {
        let condition = self.expression()?;
        self.consume(TokenKind::LBrace, "before loop body")?;
        let body = BlockStmt {
            statements: self.block()?,
        };
        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    fn for_statement(&mut self) -> SyntaxResult<Stmt> {
        let variable = self.consume(TokenKind::Identifier, "as loop variable")?;
        let element_type = match self.consume_if(&[TokenKind::Colon]) {
            Some(_) => Some(self.type_ref()?),
            None => None,
        };
        if self.check(TokenKind::From) {
            return Err(self.error(ErrorKind::RangeLoop));
        }
        self.consume(TokenKind::In, "after loop variable")?;
        let iterable = self.expression()?;
        self.consume(TokenKind::LBrace, "before loop body")?;
        let body = BlockStmt {
            statements: self.block()?,
        };
        Ok(Stmt::For(ForStmt {
            variable,
            element_type,
            iterable,
            body,
        }))
    }

    /// The declarations of a block, the `{` already consumed
    fn block(&mut self) -> SyntaxResult<Vec<Stmt>> {
        let mut statements = vec![];
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        self.consume(TokenKind::RBrace, "after block")?;
        Ok(statements)
    }
}
