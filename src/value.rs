use std::fmt;
use std::fmt::Formatter;

/// A runtime value. `Null` is never written in source; it is what statements
/// without a value evaluate to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(x) => *x,
            Value::Number(x) => *x != 0.0,
            Value::String(x) => !x.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(x) => write!(f, "{}", x),
            // -0 prints as 0.
            Value::Number(x) if *x == 0.0 => write!(f, "0"),
            Value::Number(x) => write!(f, "{}", x),
            Value::String(x) => write!(f, "{}", x),
        }
    }
}

#[cfg(test)]
mod value_tests {
    use super::Value;

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Number(-0.5).is_truthy());
        assert!(Value::String("0".to_string()).is_truthy());
    }

    #[test]
    fn equality_needs_matching_kinds() {
        assert_eq!(Value::Number(1.0), Value::Number(1.0));
        assert_ne!(Value::Number(0.0), Value::Boolean(false));
        assert_ne!(Value::String(String::new()), Value::Null);
        assert_eq!(Value::Null, Value::Null);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Number(50.0).to_string(), "50");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::String("Hello".to_string()).to_string(), "Hello");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(-0.5).to_string(), "-0.5");
    }
}
