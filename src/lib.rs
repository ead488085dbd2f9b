//! An interpreter for bulang, a small imperative language with typed
//! declarations, arithmetic, `if`/`while`, block scoping and `print`.
//!
//! ```
//! let mut out = Vec::new();
//! let value = bulang::run("int x = 10; print(x * 2);", &mut out).unwrap();
//! assert_eq!(out, b"20\n");
//! assert_eq!(value, bulang::Value::Number(20.0));
//! ```

pub mod ast;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

pub use error::{Error, Result};
pub use interpreter::Interpreter;
pub use value::Value;

use std::io::Write;

/// Runs `source` to completion in a fresh interpreter, writing printed lines
/// to `out`. Returns the value of the last statement.
pub fn run<W: Write>(source: &str, out: W) -> Result<Value> {
    Interpreter::new(out).run(source)
}
