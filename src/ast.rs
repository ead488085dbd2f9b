use crate::token::{Token, TokenKind};
use crate::value::Value;
use std::fmt;
use std::fmt::Formatter;
use strum_macros::Display;

/// The declared type of a variable. It only chooses the default value of an
/// uninitialized declaration; assignments are never checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum VarType {
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "boolean")]
    Boolean,
}

impl VarType {
    pub fn from_keyword(kind: TokenKind) -> Option<VarType> {
        match kind {
            TokenKind::Int => Some(VarType::Int),
            TokenKind::StringType => Some(VarType::String),
            TokenKind::BooleanType => Some(VarType::Boolean),
            _ => None,
        }
    }
    pub fn default_value(self) -> Value {
        match self {
            VarType::Int => Value::Number(0.0),
            VarType::String => Value::String(String::new()),
            VarType::Boolean => Value::Boolean(false),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Expression<'a> {
    Binary {
        left: Box<Expression<'a>>,
        operator: &'a Token<'a>,
        right: Box<Expression<'a>>,
    },
    Unary {
        operator: &'a Token<'a>,
        operand: Box<Expression<'a>>,
    },
    Identifier(&'a Token<'a>),
    Number(f64),
    String(&'a str),
    Boolean(bool),
}

#[derive(Debug, PartialEq)]
pub enum Statement<'a> {
    Block(Vec<Statement<'a>>),
    VarDeclaration {
        var_type: VarType,
        name: &'a Token<'a>,
        initializer: Option<Expression<'a>>,
    },
    Assignment {
        name: &'a Token<'a>,
        value: Expression<'a>,
    },
    If {
        condition: Expression<'a>,
        then_branch: Box<Statement<'a>>,
        else_branch: Option<Box<Statement<'a>>>,
    },
    While {
        condition: Expression<'a>,
        body: Box<Statement<'a>>,
    },
    Print(Expression<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, PartialEq, Default)]
pub struct Program<'a> {
    pub statements: Vec<Statement<'a>>,
}

// The Display impls below print the tree in parenthesized prefix form, e.g.
// `(+ 1 (* 2 3))`.

fn parenthesize(f: &mut Formatter<'_>, name: &str, args: &[&dyn fmt::Display]) -> fmt::Result {
    write!(f, "({}", name)?;
    for arg in args {
        write!(f, " {}", arg)?;
    }
    write!(f, ")")
}

impl<'a> fmt::Display for Expression<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Binary {
                left,
                operator,
                right,
            } => parenthesize(f, operator.lexeme, &[left, right]),
            Expression::Unary { operator, operand } => {
                parenthesize(f, operator.lexeme, &[operand])
            }
            Expression::Identifier(name) => write!(f, "{}", name.lexeme),
            Expression::Number(x) => write!(f, "{}", x),
            Expression::String(x) => write!(f, "{:?}", x),
            Expression::Boolean(x) => write!(f, "{}", x),
        }
    }
}

impl<'a> fmt::Display for Statement<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Block(statements) => {
                write!(f, "(block")?;
                for statement in statements {
                    write!(f, " {}", statement)?;
                }
                write!(f, ")")
            }
            Statement::VarDeclaration {
                var_type,
                name,
                initializer: Some(initializer),
            } => parenthesize(f, "var", &[var_type, &name.lexeme, initializer]),
            Statement::VarDeclaration {
                var_type,
                name,
                initializer: None,
            } => parenthesize(f, "var", &[var_type, &name.lexeme]),
            Statement::Assignment { name, value } => {
                parenthesize(f, "assign", &[&name.lexeme, value])
            }
            Statement::If {
                condition,
                then_branch,
                else_branch: Some(else_branch),
            } => parenthesize(f, "if", &[condition, then_branch, else_branch]),
            Statement::If {
                condition,
                then_branch,
                else_branch: None,
            } => parenthesize(f, "if", &[condition, then_branch]),
            Statement::While { condition, body } => parenthesize(f, "while", &[condition, body]),
            Statement::Print(expression) => parenthesize(f, "print", &[expression]),
            Statement::Expression(expression) => parenthesize(f, "expr", &[expression]),
        }
    }
}

impl<'a> fmt::Display for Program<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
