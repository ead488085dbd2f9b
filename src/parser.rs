use crate::ast::{Expression, Program, Statement, VarType};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use tracing::debug;

/// Parses a token stream produced by [`crate::scanner::tokenize`]. The first
/// grammar violation aborts the parse; there is no recovery.
pub fn parse<'a>(tokens: &'a [Token<'a>]) -> Result<Program<'a>, ParseError> {
    Parser::new(tokens).parse()
}

pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Parser<'a> {
        Parser { tokens, current: 0 }
    }
    pub fn parse(&mut self) -> Result<Program<'a>, ParseError> {
        match self.tokens.last() {
            Some(token) if token.kind == TokenKind::EOF => (),
            last => {
                return Err(ParseError {
                    line: last.map_or(0, |token| token.line),
                    message: "token stream does not end with end of input".to_string(),
                })
            }
        }
        let mut statements: Vec<Statement<'a>> = Vec::new();
        self.skip_newlines();
        while !self.is_at_end() {
            statements.push(self.statement()?);
            self.skip_newlines();
        }
        debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements })
    }
    fn statement(&mut self) -> Result<Statement<'a>, ParseError> {
        self.skip_newlines();
        match self.peek().kind {
            TokenKind::Int | TokenKind::StringType | TokenKind::BooleanType => {
                self.var_declaration()
            }
            TokenKind::If => {
                self.advance();
                self.if_statement()
            }
            TokenKind::While => {
                self.advance();
                self.while_statement()
            }
            TokenKind::Print => {
                self.advance();
                self.print_statement()
            }
            TokenKind::LeftBrace => {
                self.advance();
                self.block()
            }
            TokenKind::Identifier => self.assignment(),
            _ => self.expression_statement(),
        }
    }
    fn var_declaration(&mut self) -> Result<Statement<'a>, ParseError> {
        let keyword = self.advance();
        let var_type = match VarType::from_keyword(keyword.kind) {
            Some(var_type) => var_type,
            None => return Err(self.error("expected a variable type")),
        };
        let name = self.consume(TokenKind::Identifier, "expected variable name")?;
        let initializer = if self.peek().kind == TokenKind::Assign {
            self.advance();
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(
            TokenKind::Semicolon,
            "expected ';' after variable declaration",
        )?;
        Ok(Statement::VarDeclaration {
            var_type,
            name,
            initializer,
        })
    }
    fn assignment(&mut self) -> Result<Statement<'a>, ParseError> {
        let name = self.advance();
        self.consume(TokenKind::Assign, "expected '=' in assignment")?;
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "expected ';' after assignment")?;
        Ok(Statement::Assignment { name, value })
    }
    fn if_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        self.consume(TokenKind::LeftParen, "expected '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "expected ')' after if condition")?;
        let then_branch = Box::new(self.statement()?);
        // `else` may sit on the line after the then-branch.
        let else_branch = if self.peek_past_newlines().kind == TokenKind::Else {
            self.skip_newlines();
            self.advance();
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }
    fn while_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        self.consume(TokenKind::LeftParen, "expected '(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "expected ')' after while condition")?;
        let body = Box::new(self.statement()?);
        Ok(Statement::While { condition, body })
    }
    fn print_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        self.consume(TokenKind::LeftParen, "expected '(' after 'print'")?;
        let expression = self.expression()?;
        self.consume(TokenKind::RightParen, "expected ')' after print expression")?;
        self.consume(TokenKind::Semicolon, "expected ';' after print statement")?;
        Ok(Statement::Print(expression))
    }
    fn block(&mut self) -> Result<Statement<'a>, ParseError> {
        let mut statements: Vec<Statement<'a>> = Vec::new();
        self.skip_newlines();
        while !self.is_at_end() && self.peek().kind != TokenKind::RightBrace {
            statements.push(self.statement()?);
            self.skip_newlines();
        }
        self.consume(TokenKind::RightBrace, "expected '}' to close block")?;
        Ok(Statement::Block(statements))
    }
    fn expression_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        let expression = self.expression()?;
        self.consume(TokenKind::Semicolon, "expected ';' after expression")?;
        Ok(Statement::Expression(expression))
    }
    fn expression(&mut self) -> Result<Expression<'a>, ParseError> {
        self.equality()
    }
    fn equality(&mut self) -> Result<Expression<'a>, ParseError> {
        let mut expr = self.comparison()?;
        while let TokenKind::EqualEqual | TokenKind::BangEqual = self.peek().kind {
            let operator = self.advance();
            let right = self.comparison()?;
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }
    fn comparison(&mut self) -> Result<Expression<'a>, ParseError> {
        let mut expr = self.term()?;
        while let TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::Less
        | TokenKind::LessEqual = self.peek().kind
        {
            let operator = self.advance();
            let right = self.term()?;
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }
    fn term(&mut self) -> Result<Expression<'a>, ParseError> {
        let mut expr = self.factor()?;
        while let TokenKind::Plus | TokenKind::Minus = self.peek().kind {
            let operator = self.advance();
            let right = self.factor()?;
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }
    fn factor(&mut self) -> Result<Expression<'a>, ParseError> {
        let mut expr = self.unary()?;
        while let TokenKind::Star | TokenKind::Slash = self.peek().kind {
            let operator = self.advance();
            let right = self.unary()?;
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }
    fn unary(&mut self) -> Result<Expression<'a>, ParseError> {
        match self.peek().kind {
            TokenKind::Minus | TokenKind::Plus => {
                let operator = self.advance();
                let operand = self.unary()?;
                Ok(Expression::Unary {
                    operator,
                    operand: Box::new(operand),
                })
            }
            _ => self.primary(),
        }
    }
    fn primary(&mut self) -> Result<Expression<'a>, ParseError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => match token.lexeme.parse::<f64>() {
                Ok(value) => {
                    self.advance();
                    Ok(Expression::Number(value))
                }
                Err(_) => Err(self.error("invalid number literal")),
            },
            TokenKind::String => {
                self.advance();
                Ok(Expression::String(token.lexeme))
            }
            TokenKind::Boolean => {
                self.advance();
                Ok(Expression::Boolean(token.lexeme == "true"))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Expression::Identifier(token))
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen, "expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.error("expected expression")),
        }
    }
    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&'a Token<'a>, ParseError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }
    fn skip_newlines(&mut self) {
        while self.peek().kind == TokenKind::Newline {
            self.advance();
        }
    }
    fn advance(&mut self) -> &'a Token<'a> {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }
    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EOF
    }
    fn peek(&self) -> &'a Token<'a> {
        &self.tokens[self.current]
    }
    fn peek_past_newlines(&self) -> &'a Token<'a> {
        let tokens: &'a [Token<'a>] = self.tokens;
        tokens[self.current..]
            .iter()
            .find(|token| token.kind != TokenKind::Newline)
            .unwrap_or_else(|| self.peek())
    }
    fn error(&self, message: &str) -> ParseError {
        let token = self.peek();
        ParseError {
            line: token.line,
            message: format!("{}, found {}", message, token),
        }
    }
}
