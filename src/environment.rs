use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;
use tracing::trace;

use std::collections::BTreeMap;

/// The scope chain as a stack of frames. Frame `i - 1` is the enclosing scope
/// of frame `i`; frame 0 is the global scope and is never popped.
#[derive(Debug)]
pub struct Environment {
    values: Vec<BTreeMap<String, Value>>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            values: vec![BTreeMap::new()],
        }
    }
    pub fn start_block(&mut self) {
        self.values.push(BTreeMap::new());
        trace!(depth = self.values.len(), "entered scope");
    }
    pub fn end_block(&mut self) {
        if self.values.len() > 1 {
            self.values.pop();
        }
        trace!(depth = self.values.len(), "left scope");
    }
    /// Number of live frames, the global one included.
    pub fn depth(&self) -> usize {
        self.values.len()
    }
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.values.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }
    pub fn get(&self, token: &Token) -> Result<Value, RuntimeError> {
        for cur in self.values.iter().rev() {
            if let Some(x) = cur.get(token.lexeme) {
                return Ok(x.clone());
            }
        }
        Err(undefined(token))
    }
    pub fn assign(&mut self, token: &Token, value: Value) -> Result<(), RuntimeError> {
        for cur in self.values.iter_mut().rev() {
            if let Some(x) = cur.get_mut(token.lexeme) {
                *x = value;
                return Ok(());
            }
        }
        Err(undefined(token))
    }
}

fn undefined(token: &Token) -> RuntimeError {
    RuntimeError::NameError {
        name: token.lexeme.to_string(),
        line: token.line,
    }
}
