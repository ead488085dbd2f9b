use std::fmt;
use std::fmt::Formatter;
use strum_macros::Display;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    // Literals.
    #[strum(serialize = "number")] Number,
    #[strum(serialize = "string literal")] String,
    #[strum(serialize = "boolean literal")] Boolean,
    #[strum(serialize = "identifier")] Identifier,

    // Keywords.
    #[strum(serialize = "int")] Int,
    #[strum(serialize = "string")] StringType,
    #[strum(serialize = "boolean")] BooleanType,
    #[strum(serialize = "if")] If,
    #[strum(serialize = "else")] Else,
    #[strum(serialize = "while")] While,
    #[strum(serialize = "for")] For,
    #[strum(serialize = "function")] Function,
    #[strum(serialize = "return")] Return,
    #[strum(serialize = "true")] True,
    #[strum(serialize = "false")] False,
    #[strum(serialize = "print")] Print,

    // Operators.
    #[strum(serialize = "=")] Assign,
    #[strum(serialize = "+")] Plus,
    #[strum(serialize = "-")] Minus,
    #[strum(serialize = "*")] Star,
    #[strum(serialize = "/")] Slash,
    #[strum(serialize = "==")] EqualEqual,
    #[strum(serialize = "!=")] BangEqual,
    #[strum(serialize = "<")] Less,
    #[strum(serialize = ">")] Greater,
    #[strum(serialize = "<=")] LessEqual,
    #[strum(serialize = ">=")] GreaterEqual,

    // Punctuation.
    #[strum(serialize = "(")] LeftParen,
    #[strum(serialize = ")")] RightParen,
    #[strum(serialize = "{")] LeftBrace,
    #[strum(serialize = "}")] RightBrace,
    #[strum(serialize = ";")] Semicolon,
    #[strum(serialize = ",")] Comma,

    #[strum(serialize = "newline")] Newline,
    #[strum(serialize = "end of input")] EOF,
}

/// A classified slice of the source. For string literals the lexeme is the
/// text between the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub line: usize,
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EOF | TokenKind::Newline => write!(f, "{}", self.kind),
            TokenKind::String => write!(f, "\"{}\"", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
