//! Expression rules, from lowest to highest precedence

use super::{ErrorKind, Parser, SyntaxError, SyntaxResult};
use ink_ast::expr::{
    AnnotationExpr, AssignExpr, BinaryExpr, CallExpr, Expr, GetExpr, GroupingExpr, LiteralExpr,
    LiteralValue, LogicalExpr, RecordFieldExpr, RecordInstantiationExpr, SetExpr, UnaryExpr,
    VariableExpr,
};
use ink_tokens::token::{Literal, Token, TokenKind};

impl Parser {
    pub(super) fn expression(&mut self) -> SyntaxResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> SyntaxResult<Expr> {
        let expr = self.or()?;
        let Some(equals) = self.consume_if(&[TokenKind::Equal]) else {
            return Ok(expr);
        };
        let value = Box::new(self.assignment()?);
        match expr {
            Expr::Variable(VariableExpr { name }) => Ok(Expr::Assign(AssignExpr { name, value })),
            Expr::Get(GetExpr { object, name }) => Ok(Expr::Set(SetExpr {
                object,
                name,
                value,
            })),
            _ => Err(SyntaxError::new(ErrorKind::InvalidAssignmentTarget, &equals)),
        }
    }

    fn or(&mut self) -> SyntaxResult<Expr> {
        self.logical(TokenKind::Or, Self::and)
    }

    fn and(&mut self) -> SyntaxResult<Expr> {
        self.logical(TokenKind::And, Self::equality)
    }

    fn equality(&mut self) -> SyntaxResult<Expr> {
        self.binary(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> SyntaxResult<Expr> {
        self.binary(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> SyntaxResult<Expr> {
        self.binary(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self) -> SyntaxResult<Expr> {
        self.binary(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// A left associative chain of `operand (operator operand)*`
    fn binary(
        &mut self,
        operators: &[TokenKind],
        mut operand: impl FnMut(&mut Self) -> SyntaxResult<Expr>,
    ) -> SyntaxResult<Expr> {
        let mut expr = operand(self)?;
        while let Some(operator) = self.consume_if(operators) {
            let right = operand(self)?;
            expr = Expr::Binary(BinaryExpr {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn logical(
        &mut self,
        kind: TokenKind,
        mut operand: impl FnMut(&mut Self) -> SyntaxResult<Expr>,
    ) -> SyntaxResult<Expr> {
        let mut expr = operand(self)?;
        while let Some(operator) = self.consume_if(&[kind]) {
            let right = operand(self)?;
            expr = Expr::Logical(LogicalExpr {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn unary(&mut self) -> SyntaxResult<Expr> {
        if let Some(operator) = self.consume_if(&[TokenKind::Bang, TokenKind::Minus]) {
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary(UnaryExpr { operator, right }));
        }
        let awaited = self.consume_if(&[TokenKind::Await]).is_some();
        self.call(awaited)
    }

    /// Parses a chain of calls and property accesses. When `awaited` is set, the
    /// outermost call of the chain is the awaited one.
    fn call(&mut self, awaited: bool) -> SyntaxResult<Expr> {
        let start = self.peek().clone();
        let mut expr = self.primary()?;
        loop {
            if self.consume_if(&[TokenKind::LParen]).is_some() {
                expr = self.finish_call(expr)?;
            } else if self.consume_if(&[TokenKind::Dot]).is_some() {
                let name = self.consume(TokenKind::Identifier, "after '.'")?;
                expr = Expr::Get(GetExpr {
                    object: Box::new(expr),
                    name,
                });
            } else {
                break;
            }
        }

        if !awaited {
            return Ok(expr);
        }
        match expr {
            Expr::Call(call) => Ok(Expr::Call(CallExpr {
                is_awaited: true,
                ..call
            })),
            _ => Err(SyntaxError::new(ErrorKind::AwaitWithoutCall, &start)),
        }
    }

    fn finish_call(&mut self, callee: Expr) -> SyntaxResult<Expr> {
        let mut arguments = vec![];
        if !self.check(TokenKind::RParen) {
            loop {
                arguments.push(self.expression()?);
                if self.consume_if(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen, "after arguments")?;
        Ok(Expr::Call(CallExpr {
            is_annotation_call: matches!(callee, Expr::Annotation(_)),
            callee: Box::new(callee),
            arguments,
            is_awaited: false,
        }))
    }

    fn primary(&mut self) -> SyntaxResult<Expr> {
        let token = self.advance();
        let value = match token.kind() {
            TokenKind::False => LiteralValue::Boolean(false),
            TokenKind::True => LiteralValue::Boolean(true),
            TokenKind::Null => LiteralValue::Null,
            TokenKind::Number | TokenKind::String => match token.literal() {
                Some(Literal::Number(number)) => LiteralValue::Number(*number),
                Some(Literal::String(string)) => LiteralValue::String(string.clone()),
                None => return Err(SyntaxError::new(ErrorKind::ExpectedExpression, &token)),
            },
            TokenKind::LParen => {
                let inner = Box::new(self.expression()?);
                self.consume(TokenKind::RParen, "after expression")?;
                return Ok(Expr::Grouping(GroupingExpr { inner }));
            }
            TokenKind::At => return Ok(Expr::Annotation(self.annotation()?)),
            TokenKind::Identifier if self.starts_record_instantiation() => {
                return self.record_instantiation(token);
            }
            TokenKind::Identifier => return Ok(Expr::Variable(VariableExpr { name: token })),
            _ => return Err(SyntaxError::new(ErrorKind::ExpectedExpression, &token)),
        };
        Ok(Expr::Literal(LiteralExpr { value }))
    }

    /// An identifier directly followed by `{` starts a record instantiation, unless it is
    /// the iterable of a loop header (`in list {`) or a range bound (`to end {`).
    fn starts_record_instantiation(&self) -> bool {
        self.check(TokenKind::LBrace)
            && !matches!(
                self.previous(2).map(Token::kind),
                Some(TokenKind::In | TokenKind::To)
            )
    }

    fn record_instantiation(&mut self, name: Token) -> SyntaxResult<Expr> {
        self.consume(TokenKind::LBrace, "after record name")?;
        let mut fields = vec![];
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let field = self.consume(TokenKind::Identifier, "as field name")?;
            self.consume(TokenKind::Colon, "after field name")?;
            fields.push(RecordFieldExpr {
                name: field,
                value: self.expression()?,
            });
            if self.consume_if(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
        self.consume(TokenKind::RBrace, "after record fields")?;
        Ok(Expr::RecordInstantiation(RecordInstantiationExpr {
            name,
            fields,
        }))
    }

    /// Parses an annotation path, the `@` already consumed
    pub(super) fn annotation(&mut self) -> SyntaxResult<AnnotationExpr> {
        let namespace = self.consume(TokenKind::Identifier, "after '@'")?;
        let property = match self.consume_if(&[TokenKind::Colon]) {
            Some(_) => {
                self.consume(TokenKind::Colon, "in annotation path")?;
                Some(self.consume(TokenKind::Identifier, "as annotation property")?)
            }
            None => None,
        };
        Ok(AnnotationExpr {
            namespace,
            property,
            generic: None,
        })
    }
}
