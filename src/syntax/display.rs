//! Display implementations for Syntax
//!
//! Output re-reads to an equal tree: floats always carry a decimal point
//! or exponent, strings and characters use reader escapes.

use super::{Syntax, SyntaxKind};
use crate::value::display::{write_char_literal, write_float, write_string_literal};
use std::fmt;

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Syntax]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxKind::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            SyntaxKind::Int(n) => write!(f, "{}", n),
            SyntaxKind::Float(x) => write_float(f, *x),
            SyntaxKind::Char(c) => write_char_literal(f, *c),
            SyntaxKind::Str(s) => write_string_literal(f, s),
            SyntaxKind::Symbol(s) => write!(f, "{}", s),
            SyntaxKind::List(items) => {
                write!(f, "(")?;
                write_seq(f, items)?;
                write!(f, ")")
            }
            SyntaxKind::DottedList(items, tail) => {
                write!(f, "(")?;
                write_seq(f, items)?;
                write!(f, " . {})", tail)
            }
            SyntaxKind::Vector(items) => {
                write!(f, "#(")?;
                write_seq(f, items)?;
                write!(f, ")")
            }
        }
    }
}
