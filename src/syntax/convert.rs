//! Conversion between Syntax and Value, and location-blind comparison.

use super::{Syntax, SyntaxKind};
use crate::value::Value;

impl Syntax {
    /// The datum this node denotes, as used by `quote`.
    pub fn to_value(&self) -> Value {
        match &self.kind {
            SyntaxKind::Bool(b) => Value::Bool(*b),
            SyntaxKind::Int(n) => Value::Int(*n),
            SyntaxKind::Float(x) => Value::Float(*x),
            SyntaxKind::Char(c) => Value::Char(*c),
            SyntaxKind::Str(s) => Value::Str(s.clone()),
            SyntaxKind::Symbol(s) => Value::Symbol(*s),
            SyntaxKind::List(items) => Value::list(items.iter().map(Syntax::to_value).collect()),
            SyntaxKind::DottedList(items, tail) => items
                .iter()
                .rev()
                .fold(tail.to_value(), |acc, item| Value::cons(item.to_value(), acc)),
            SyntaxKind::Vector(items) => {
                Value::vector(items.iter().map(Syntax::to_value).collect())
            }
        }
    }

    /// Structural equality ignoring locations. Floats compare by bits so
    /// that NaN equals itself.
    pub fn same_datum(&self, other: &Syntax) -> bool {
        match (&self.kind, &other.kind) {
            (SyntaxKind::Bool(a), SyntaxKind::Bool(b)) => a == b,
            (SyntaxKind::Int(a), SyntaxKind::Int(b)) => a == b,
            (SyntaxKind::Float(a), SyntaxKind::Float(b)) => a.to_bits() == b.to_bits(),
            (SyntaxKind::Char(a), SyntaxKind::Char(b)) => a == b,
            (SyntaxKind::Str(a), SyntaxKind::Str(b)) => a == b,
            (SyntaxKind::Symbol(a), SyntaxKind::Symbol(b)) => a == b,
            (SyntaxKind::List(a), SyntaxKind::List(b))
            | (SyntaxKind::Vector(a), SyntaxKind::Vector(b)) => all_same(a, b),
            (SyntaxKind::DottedList(a, at), SyntaxKind::DottedList(b, bt)) => {
                all_same(a, b) && at.same_datum(bt)
            }
            _ => false,
        }
    }
}

fn all_same(a: &[Syntax], b: &[Syntax]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_datum(y))
}
