use crate::error::LexError;
use crate::token::{Token, TokenKind};
use phf::phf_map;
use tracing::debug;

use std::iter::Peekable;
use std::str::CharIndices;

struct Scanner<'a> {
    source: &'a str,
    iter: Peekable<CharIndices<'a>>,
    start: usize,
    line: usize,
}

/// Splits `source` into tokens, stopping at the first character that does not
/// belong to the language. The result always ends with a single EOF token.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut scanner = Scanner {
        source,
        iter: source.char_indices().peekable(),
        start: 0,
        line: 1,
    };
    let mut tokens: Vec<Token> = Vec::new();

    while let Some(&(idx, _)) = scanner.iter.peek() {
        scanner.start = idx;
        if let Some(token) = scanner.scan_token()? {
            tokens.push(token);
        }
    }
    tokens.push(Token {
        kind: TokenKind::EOF,
        lexeme: "",
        line: scanner.line,
    });
    debug!(tokens = tokens.len(), lines = scanner.line, "scanned source");
    Ok(tokens)
}

impl<'a> Scanner<'a> {
    fn scan_token(&mut self) -> Result<Option<Token<'a>>, LexError> {
        let c = match self.iter.next() {
            Some((_, c)) => c,
            None => return Ok(None),
        };
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '!' => {
                if self.next_if('=') {
                    TokenKind::BangEqual
                } else {
                    return Err(self.error("unexpected character '!'; did you mean '!='?"));
                }
            }
            '=' => {
                if self.next_if('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Assign
                }
            }
            '<' => {
                if self.next_if('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.next_if('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            ' ' | '\r' | '\t' => return Ok(None),
            '\n' => {
                let token = self.token(TokenKind::Newline);
                self.line += 1;
                return Ok(Some(token));
            }
            '"' => return self.string().map(Some),
            '0'..='9' => return self.number().map(Some),
            c if c.is_alphabetic() || c == '_' => return Ok(Some(self.identifier())),
            c => return Err(self.error(&format!("unexpected character '{}'", c))),
        };
        Ok(Some(self.token(kind)))
    }
    fn current(&mut self) -> usize {
        match self.iter.peek() {
            None => self.source.len(),
            Some((idx, _)) => *idx,
        }
    }
    fn token(&mut self, kind: TokenKind) -> Token<'a> {
        let current = self.current();
        Token {
            kind,
            lexeme: &self.source[self.start..current],
            line: self.line,
        }
    }
    fn next_if(&mut self, expected: char) -> bool {
        self.iter.next_if(|&(_, c)| c == expected).is_some()
    }
    fn error(&self, message: &str) -> LexError {
        LexError {
            line: self.line,
            message: message.to_string(),
        }
    }
    fn string(&mut self) -> Result<Token<'a>, LexError> {
        let line = self.line;
        loop {
            match self.iter.next() {
                Some((_, '"')) => break,
                Some((_, '\n')) => self.line += 1,
                Some(_) => (),
                None => {
                    return Err(LexError {
                        line,
                        message: "unterminated string".to_string(),
                    })
                }
            }
        }
        let current = self.current();
        Ok(Token {
            kind: TokenKind::String,
            lexeme: &self.source[self.start + 1..current - 1],
            line,
        })
    }
    fn number(&mut self) -> Result<Token<'a>, LexError> {
        let mut dots = 0;
        while let Some(&(_, c)) = self.iter.peek() {
            match c {
                '0'..='9' => (),
                '.' => dots += 1,
                _ => break,
            }
            self.iter.next();
        }
        let token = self.token(TokenKind::Number);
        if dots > 1 {
            return Err(self.error(&format!("malformed number '{}'", token.lexeme)));
        }
        Ok(token)
    }
    fn identifier(&mut self) -> Token<'a> {
        while let Some(&(_, c)) = self.iter.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.iter.next();
            } else {
                break;
            }
        }
        let current = self.current();
        let kind = match KEYWORDS.get(&self.source[self.start..current]) {
            Some(TokenKind::True) | Some(TokenKind::False) => TokenKind::Boolean,
            Some(kind) => *kind,
            None => TokenKind::Identifier,
        };
        self.token(kind)
    }
}

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "int" => TokenKind::Int,
    "string" => TokenKind::StringType,
    "boolean" => TokenKind::BooleanType,
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "while" => TokenKind::While,
    "for" => TokenKind::For,
    "function" => TokenKind::Function,
    "return" => TokenKind::Return,
    "true" => TokenKind::True,
    "false" => TokenKind::False,
    "print" => TokenKind::Print,
};
