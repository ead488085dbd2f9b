use crate::ast::{Expression, Program, Statement};
use crate::environment::Environment;
use crate::error::{Error, RuntimeError};
use crate::parser;
use crate::scanner;
use crate::token::{Token, TokenKind};
use crate::value::Value;
use tracing::{debug, trace};

use std::io::Write;

/// Walks a [`Program`] and writes the output of `print` statements to `out`.
/// Global bindings survive between calls, so one interpreter can serve a
/// whole interactive session.
pub struct Interpreter<W: Write> {
    environment: Environment,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Interpreter<W> {
        Interpreter {
            environment: Environment::new(),
            out,
        }
    }
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
    pub fn into_output(self) -> W {
        self.out
    }
    /// Scans, parses and evaluates `source` against this interpreter's globals.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let tokens = scanner::tokenize(source)?;
        let program = parser::parse(&tokens)?;
        Ok(self.interpret(&program)?)
    }
    /// Evaluates every statement in order and returns the value of the last
    /// one, or `Null` for an empty program.
    pub fn interpret(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        let value = self.execute_all(&program.statements)?;
        debug!(%value, "program finished");
        Ok(value)
    }
    fn execute_all(&mut self, statements: &[Statement]) -> Result<Value, RuntimeError> {
        let mut result = Value::Null;
        for statement in statements {
            result = self.execute(statement)?;
        }
        Ok(result)
    }
    pub fn execute(&mut self, statement: &Statement) -> Result<Value, RuntimeError> {
        match statement {
            Statement::VarDeclaration {
                var_type,
                name,
                initializer,
            } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => var_type.default_value(),
                };
                trace!(name = name.lexeme, %value, "define");
                self.environment.define(name.lexeme, value.clone());
                Ok(value)
            }
            Statement::Assignment { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.assign(name, value.clone())?;
                Ok(value)
            }
            Statement::Block(statements) => {
                self.environment.start_block();
                let result = self.execute_all(statements);
                self.environment.end_block();
                result
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Value::Null)
                }
            }
            Statement::While { condition, body } => {
                let mut result = Value::Null;
                while self.evaluate(condition)?.is_truthy() {
                    result = self.execute(body)?;
                }
                Ok(result)
            }
            Statement::Print(expression) => {
                let value = self.evaluate(expression)?;
                writeln!(self.out, "{}", value)?;
                Ok(value)
            }
            Statement::Expression(expression) => self.evaluate(expression),
        }
    }
    fn evaluate(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Number(x) => Ok(Value::Number(*x)),
            Expression::String(x) => Ok(Value::String(x.to_string())),
            Expression::Boolean(x) => Ok(Value::Boolean(*x)),
            Expression::Identifier(name) => self.environment.get(name),
            Expression::Unary { operator, operand } => {
                let value = self.evaluate(operand)?;
                unary(operator, value)
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(left, operator, right)
            }
        }
    }
}

fn unary(operator: &Token, operand: Value) -> Result<Value, RuntimeError> {
    match (operator.kind, operand) {
        (TokenKind::Minus, Value::Number(x)) => Ok(Value::Number(-x)),
        (TokenKind::Plus, Value::Number(x)) => Ok(Value::Number(x)),
        (_, operand) => Err(RuntimeError::TypeError {
            message: format!(
                "unsupported operand type for unary {}: {}",
                operator.kind,
                operand.type_name()
            ),
            line: operator.line,
        }),
    }
}

fn binary(left: Value, operator: &Token, right: Value) -> Result<Value, RuntimeError> {
    use Value::{Boolean, Number};

    match (operator.kind, left, right) {
        (TokenKind::EqualEqual, l, r) => Ok(Boolean(l == r)),
        (TokenKind::BangEqual, l, r) => Ok(Boolean(l != r)),
        (TokenKind::Plus, Number(l), Number(r)) => Ok(Number(l + r)),
        (TokenKind::Plus, Value::String(mut l), Value::String(r)) => {
            l.push_str(&r);
            Ok(Value::String(l))
        }
        (TokenKind::Minus, Number(l), Number(r)) => Ok(Number(l - r)),
        (TokenKind::Star, Number(l), Number(r)) => Ok(Number(l * r)),
        (TokenKind::Slash, Number(_), Number(r)) if r == 0.0 => {
            Err(RuntimeError::ArithmeticError {
                line: operator.line,
            })
        }
        (TokenKind::Slash, Number(l), Number(r)) => Ok(Number(l / r)),
        (TokenKind::Greater, Number(l), Number(r)) => Ok(Boolean(l > r)),
        (TokenKind::GreaterEqual, Number(l), Number(r)) => Ok(Boolean(l >= r)),
        (TokenKind::Less, Number(l), Number(r)) => Ok(Boolean(l < r)),
        (TokenKind::LessEqual, Number(l), Number(r)) => Ok(Boolean(l <= r)),
        (kind, l, r) => Err(RuntimeError::TypeError {
            message: format!(
                "unsupported operand types for {}: {} and {}",
                kind,
                l.type_name(),
                r.type_name()
            ),
            line: operator.line,
        }),
    }
}

#[cfg(test)]
mod interpreter_tests {
    use crate::error::{Error, RuntimeError};
    use crate::interpreter::Interpreter;
    use crate::value::Value;

    fn eval(source: &str) -> Result<Value, Error> {
        Interpreter::new(Vec::new()).run(source)
    }

    fn runtime_error(source: &str) -> RuntimeError {
        match eval(source) {
            Err(Error::Runtime(err)) => err,
            other => panic!("expected a runtime error, got {:?}", other),
        }
    }

    #[test]
    fn program_yields_last_statement_value() {
        assert_eq!(eval("2 + 3 * 4;").unwrap(), Value::Number(14.0));
        assert_eq!(eval("").unwrap(), Value::Null);
        assert_eq!(eval("int x = 3; x = x * 2;").unwrap(), Value::Number(6.0));
        assert_eq!(eval("-(1 - 4);").unwrap(), Value::Number(3.0));
        assert_eq!(eval("+7;").unwrap(), Value::Number(7.0));
    }

    #[test]
    fn declarations_default_by_type() {
        assert_eq!(eval("int x; (x);").unwrap(), Value::Number(0.0));
        assert_eq!(eval("string s; (s);").unwrap(), Value::String(String::new()));
        assert_eq!(eval("boolean b; (b);").unwrap(), Value::Boolean(false));
        // The declared type is not enforced.
        assert_eq!(
            eval("int x = \"text\"; (x);").unwrap(),
            Value::String("text".to_string())
        );
    }

    #[test]
    fn equality_across_kinds() {
        assert_eq!(eval("1 == 1;").unwrap(), Value::Boolean(true));
        assert_eq!(eval("\"a\" != \"a\";").unwrap(), Value::Boolean(false));
        assert_eq!(eval("0 == false;").unwrap(), Value::Boolean(false));
        assert_eq!(eval("\"1\" != 1;").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn strings_concatenate() {
        assert_eq!(
            eval("string a = \"Hello, \"; (a + \"World\");").unwrap(),
            Value::String("Hello, World".to_string())
        );
    }

    #[test]
    fn operand_kinds_are_checked() {
        let err = runtime_error("\"a\" < 1;");
        assert_eq!(
            err.to_string(),
            "[line 1] TypeError: unsupported operand types for <: string and number"
        );
        assert!(matches!(runtime_error("true + 1;"), RuntimeError::TypeError { .. }));
        assert!(matches!(runtime_error("-\"x\";"), RuntimeError::TypeError { .. }));
        assert!(matches!(runtime_error("\"ab\" * 2;"), RuntimeError::TypeError { .. }));
    }

    #[test]
    fn division_by_zero() {
        for source in &["5 / 0;", "-5 / 0;", "0 / 0;", "1 / (2 - 2);"] {
            assert!(matches!(
                runtime_error(source),
                RuntimeError::ArithmeticError { line: 1 }
            ));
        }
        assert_eq!(eval("7 / 2;").unwrap(), Value::Number(3.5));
    }

    #[test]
    fn block_scopes_are_popped_on_failure() {
        let mut interpreter = Interpreter::new(Vec::new());
        assert!(interpreter.run("int x = 1; { { int y = 1 / 0; } }").is_err());
        assert_eq!(interpreter.environment().depth(), 1);
        assert_eq!(interpreter.run("(x);").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn while_and_if_results() {
        assert_eq!(eval("while (false) { 1; }").unwrap(), Value::Null);
        assert_eq!(eval("if (0) 1;").unwrap(), Value::Null);
        assert_eq!(eval("if (\"\") 1; else 2;").unwrap(), Value::Number(2.0));
        assert_eq!(
            eval("int i = 0; while (i < 3) { i = i + 1; }").unwrap(),
            Value::Number(3.0)
        );
    }

    #[test]
    fn globals_persist_between_runs() {
        let mut interpreter = Interpreter::new(Vec::new());
        interpreter.run("int count = 1;").unwrap();
        interpreter.run("count = count + 1;").unwrap();
        interpreter.run("print(count);").unwrap();
        assert_eq!(interpreter.into_output(), b"2\n");
    }

    #[test]
    fn undefined_names_report_line() {
        let err = runtime_error("int a = 1;\nprint(b);");
        assert!(matches!(err, RuntimeError::NameError { ref name, line: 2 } if name == "b"));
    }
}
