//! Located syntax trees produced by the reader.
//!
//! `Syntax` keeps the shape of the source (atoms, lists, dotted lists,
//! vectors) plus the location of the token that opened each node. The
//! analyzer walks it once; nothing mutates it after the reader is done.
//!
//! ```text
//! Source → Lexer → Token → Parser → Syntax → Expand → Ast → Template
//! ```

mod convert;
mod display;

use crate::reader::Location;
use crate::symbol::Symbol;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Syntax {
    pub kind: SyntaxKind,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub enum SyntaxKind {
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(Rc<str>),
    Symbol(Symbol),
    /// Proper list; `()` is the empty list.
    List(Vec<Syntax>),
    /// `(a b . c)`: at least one item before the dot.
    DottedList(Vec<Syntax>, Box<Syntax>),
    Vector(Vec<Syntax>),
}

impl Syntax {
    pub fn new(kind: SyntaxKind, loc: Location) -> Self {
        Syntax { kind, loc }
    }

    pub fn dotted(items: Vec<Syntax>, tail: Syntax, loc: Location) -> Self {
        Syntax::new(SyntaxKind::DottedList(items, Box::new(tail)), loc)
    }

    pub fn symbol(name: &str, loc: Location) -> Self {
        Syntax::new(SyntaxKind::Symbol(Symbol::intern(name)), loc)
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match &self.kind {
            SyntaxKind::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    /// Check if this is a symbol with the given name
    pub fn is_symbol(&self, name: &str) -> bool {
        match &self.kind {
            SyntaxKind::Symbol(s) => &*s.name() == name,
            _ => false,
        }
    }

    pub fn as_list(&self) -> Option<&[Syntax]> {
        match &self.kind {
            SyntaxKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// Head symbol of a non-empty proper list.
    pub fn head_symbol(&self) -> Option<Symbol> {
        self.as_list()?.first()?.as_symbol()
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            SyntaxKind::Bool(_) => "boolean",
            SyntaxKind::Int(_) => "integer",
            SyntaxKind::Float(_) => "float",
            SyntaxKind::Char(_) => "character",
            SyntaxKind::Str(_) => "string",
            SyntaxKind::Symbol(_) => "symbol",
            SyntaxKind::List(_) => "list",
            SyntaxKind::DottedList(..) => "dotted list",
            SyntaxKind::Vector(_) => "vector",
        }
    }
}
