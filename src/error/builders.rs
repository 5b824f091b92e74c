//! Builder methods for constructing Error instances

use super::types::{ArityPolicy, Error, ErrorKind};
use crate::value::Value;

impl Error {
    pub fn lexical(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Lexical {
            message: message.into(),
        })
    }

    pub fn syntax(form: impl Into<String>, message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Syntax {
            form: form.into(),
            message: message.into(),
            datum: None,
        })
    }

    /// A `bad syntax` error echoing the offending form.
    pub fn bad_syntax(form: impl Into<String>, detail: &str, datum: impl ToString) -> Self {
        let message = if detail.is_empty() {
            "bad syntax".to_string()
        } else {
            format!("bad syntax ({})", detail)
        };
        Error::new(ErrorKind::Syntax {
            form: form.into(),
            message,
            datum: Some(datum.to_string()),
        })
    }

    pub fn contract(op: impl Into<String>, expected: impl Into<String>, given: &Value) -> Self {
        Error::new(ErrorKind::Contract {
            op: op.into(),
            expected: expected.into(),
            given: given.to_string(),
        })
    }

    pub fn arity(op: impl Into<String>, expected: ArityPolicy, args: &[Value]) -> Self {
        Error::new(ErrorKind::Arity {
            op: op.into(),
            expected,
            given: args.len(),
            args: args.iter().map(|a| a.to_string()).collect(),
        })
    }

    /// Arity error whose arguments are already rendered, as the analyzer
    /// only has syntax in hand.
    pub fn arity_rendered(op: impl Into<String>, expected: ArityPolicy, args: Vec<String>) -> Self {
        Error::new(ErrorKind::Arity {
            op: op.into(),
            expected,
            given: args.len(),
            args,
        })
    }

    pub fn range(
        op: impl Into<String>,
        index: i64,
        len: usize,
        label: impl Into<String>,
        subject: &Value,
    ) -> Self {
        Error::new(ErrorKind::Range {
            op: op.into(),
            index,
            low: 0,
            high: len as i64 - 1,
            label: label.into(),
            subject: subject.to_string(),
        })
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        Error::new(ErrorKind::Unbound { name: name.into() })
    }

    pub fn division_by_zero(op: impl Into<String>) -> Self {
        Error::new(ErrorKind::DivisionByZero { op: op.into() })
    }

    pub fn limit(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Limit {
            message: message.into(),
        })
    }

    pub fn io(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Io {
            message: message.into(),
        })
    }
}
