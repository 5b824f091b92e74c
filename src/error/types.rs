//! Error type definitions

use crate::reader::Location;
use std::fmt;
use thiserror::Error;

/// How many arguments a callable accepts, rendered for arity messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityPolicy {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
}

impl fmt::Display for ArityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityPolicy::Exactly(n) => write!(f, "{}", n),
            ArityPolicy::AtLeast(n) => write!(f, "at least {}", n),
            ArityPolicy::AtMost(n) => write!(f, "at most {}", n),
        }
    }
}

/// Every failure the pipeline can raise, from the lexer to the VM.
///
/// Values that appear in a message are rendered when the error is built,
/// so an error never holds on to runtime data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Malformed literal token.
    #[error("read: {message}")]
    Lexical { message: String },

    /// Structural violation in the reader or in a special form.
    #[error("{form}: {message}{}", in_clause(.datum))]
    Syntax {
        form: String,
        message: String,
        datum: Option<String>,
    },

    /// A value of the wrong shape was handed to an operation.
    #[error("{op}: contract violation\n  expected: {expected}\n  given: {given}")]
    Contract {
        op: String,
        expected: String,
        given: String,
    },

    #[error(
        "{op}: arity mismatch;\n the expected number of arguments does not match the given number\n  expected: {expected}\n  given: {given}{}",
        argument_list(.args)
    )]
    Arity {
        op: String,
        expected: ArityPolicy,
        given: usize,
        args: Vec<String>,
    },

    #[error("{op}: index is out of range{}\n  index: {index}\n  valid range: [{low}, {high}]\n  {label}: {subject}", empty_suffix(.low, .high, .label))]
    Range {
        op: String,
        index: i64,
        low: i64,
        high: i64,
        label: String,
        subject: String,
    },

    /// A global was read before any definition.
    #[error("{name}: undefined;\n cannot reference an identifier before its definition")]
    Unbound { name: String },

    #[error("{op}: division by zero")]
    DivisionByZero { op: String },

    /// Call depth, instruction budget or an external interrupt stopped the run.
    #[error("{message}")]
    Limit { message: String },

    #[error("{message}")]
    Io { message: String },
}

fn in_clause(datum: &Option<String>) -> String {
    match datum {
        Some(d) => format!("\n  in: {}", d),
        None => String::new(),
    }
}

fn argument_list(args: &[String]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n  arguments...:");
    for arg in args {
        out.push_str("\n   ");
        out.push_str(arg);
    }
    out
}

fn empty_suffix(low: &i64, high: &i64, label: &str) -> String {
    if high < low {
        format!(" for empty {}", label)
    } else {
        String::new()
    }
}

/// An error plus the source position it was raised at, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub location: Option<Location>,
}

pub type LResult<T> = Result<T, Error>;

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            location: None,
        }
    }

    /// Attach a location, replacing any previous one.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach a location only if none is recorded yet. Inner positions win.
    pub fn or_location(mut self, location: &Location) -> Self {
        if self.location.is_none() {
            self.location = Some(location.clone());
        }
        self
    }

    /// The message without the location prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax { .. })
    }

    pub fn is_arity(&self) -> bool {
        matches!(self.kind, ErrorKind::Arity { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{}: ", loc)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(err.to_string())
    }
}
