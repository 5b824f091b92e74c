//! Runtime values.
//!
//! `Value` is a closed enum; printing and equality are plain `match`es over
//! it. Heap data is reference counted and never collected explicitly.

mod closure;
pub mod display;
mod table;
pub mod types;

pub use closure::{new_cell, Closure, UpCell};
pub use table::{HashTable, TableKey};
pub use types::{Arity, NativeFn};

use crate::primitives::PrimitiveDef;
use crate::symbol::Symbol;
use crate::syntax::Syntax;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub enum Value {
    /// The empty list.
    Nil,
    /// Result of forms evaluated only for effect.
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(Rc<str>),
    Symbol(Symbol),
    Pair(Rc<Pair>),
    Vector(Rc<RefCell<Vec<Value>>>),
    Table(Rc<RefCell<HashTable>>),
    Syntax(Rc<Syntax>),
    Closure(Rc<Closure>),
    Native(&'static PrimitiveDef),
}

/// An immutable cons cell.
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

impl Drop for Pair {
    // Unlink the spine iteratively so long lists do not recurse on drop.
    fn drop(&mut self) {
        let mut next = std::mem::replace(&mut self.cdr, Value::Nil);
        while let Value::Pair(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut pair) => next = std::mem::replace(&mut pair.cdr, Value::Nil),
                Err(_) => break,
            }
        }
    }
}

impl Value {
    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(Rc::new(Pair { car, cdr }))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::list_with_tail(items, Value::Nil)
    }

    pub fn list_with_tail(items: Vec<Value>, tail: Value) -> Value {
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| Value::cons(item, acc))
    }

    pub fn vector(items: Vec<Value>) -> Value {
        Value::Vector(Rc::new(RefCell::new(items)))
    }

    pub fn string(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    pub fn symbol(name: &str) -> Value {
        Value::Symbol(Symbol::intern(name))
    }

    pub fn table(table: HashTable) -> Value {
        Value::Table(Rc::new(RefCell::new(table)))
    }

    /// Only `#f` is false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Native(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a proper list, or `None` for anything else.
    pub fn list_to_vec(&self) -> Option<Vec<Value>> {
        let mut out = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Value::Nil => return Some(out),
                Value::Pair(p) => {
                    out.push(p.car.clone());
                    cur = &p.cdr;
                }
                _ => return None,
            }
        }
    }

    pub fn is_list(&self) -> bool {
        let mut cur = self;
        loop {
            match cur {
                Value::Nil => return true,
                Value::Pair(p) => cur = &p.cdr,
                _ => return false,
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "null",
            Value::Void => "void",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Vector(_) => "vector",
            Value::Table(_) => "hash",
            Value::Syntax(_) => "syntax",
            Value::Closure(_) | Value::Native(_) => "procedure",
        }
    }
}

/// `eqv?`: atoms by value, heap objects by identity.
pub fn eqv(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) | (Value::Void, Value::Void) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => Rc::ptr_eq(x, y),
        (Value::Pair(x), Value::Pair(y)) => Rc::ptr_eq(x, y),
        (Value::Vector(x), Value::Vector(y)) => Rc::ptr_eq(x, y),
        (Value::Table(x), Value::Table(y)) => Rc::ptr_eq(x, y),
        (Value::Syntax(x), Value::Syntax(y)) => Rc::ptr_eq(x, y),
        (Value::Closure(x), Value::Closure(y)) => Rc::ptr_eq(x, y),
        (Value::Native(x), Value::Native(y)) => std::ptr::eq(*x, *y),
        _ => false,
    }
}

/// `equal?`: structural over strings, pairs and vectors.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        equal(self, other, &mut Vec::new())
    }
}

type VectorPtr = *const RefCell<Vec<Value>>;

/// `equal?`. A pair of vectors met again while still being compared is
/// taken as equal, so cyclic structures terminate.
fn equal(a: &Value, b: &Value, active: &mut Vec<(VectorPtr, VectorPtr)>) -> bool {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Pair(_), Value::Pair(_)) => {
            let (mut a, mut b) = (a, b);
            loop {
                match (a, b) {
                    (Value::Pair(x), Value::Pair(y)) => {
                        if Rc::ptr_eq(x, y) {
                            return true;
                        }
                        if !equal(&x.car, &y.car, active) {
                            return false;
                        }
                        a = &x.cdr;
                        b = &y.cdr;
                    }
                    _ => return equal(a, b, active),
                }
            }
        }
        (Value::Vector(x), Value::Vector(y)) => {
            if Rc::ptr_eq(x, y) {
                return true;
            }
            let key = (Rc::as_ptr(x), Rc::as_ptr(y));
            if active.contains(&key) {
                return true;
            }
            active.push(key);
            let (xs, ys) = (x.borrow(), y.borrow());
            let same = xs.len() == ys.len()
                && xs.iter().zip(ys.iter()).all(|(p, q)| equal(p, q, active));
            active.pop();
            same
        }
        _ => eqv(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::Nil.is_truthy());
        assert!(Value::Int(0).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
    }

    #[test]
    fn test_list_round_trip() {
        let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert!(list.is_list());
        assert_eq!(list.list_to_vec(), Some(vec![Value::Int(1), Value::Int(2)]));
        let dotted = Value::cons(Value::Int(1), Value::Int(2));
        assert!(!dotted.is_list());
        assert_eq!(dotted.list_to_vec(), None);
    }

    #[test]
    fn test_eqv_vs_equal() {
        let a = Value::string("x");
        let b = Value::string("x");
        assert!(!eqv(&a, &b));
        assert_eq!(a, b);
        assert!(eqv(&Value::symbol("s"), &Value::symbol("s")));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn test_structural_equality() {
        let a = Value::list(vec![Value::Int(1), Value::vector(vec![Value::string("v")])]);
        let b = Value::list(vec![Value::Int(1), Value::vector(vec![Value::string("v")])]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_long_list_drops_without_overflow() {
        let items: Vec<Value> = (0..200_000).map(Value::Int).collect();
        let list = Value::list(items);
        drop(list);
    }

    #[test]
    fn test_equal_on_cyclic_vectors() {
        let make = || {
            let v = Value::vector(vec![Value::Int(1)]);
            if let Value::Vector(items) = &v {
                items.borrow_mut().push(v.clone());
            }
            v
        };
        let (a, b) = (make(), make());
        assert_eq!(a, b);
        assert_ne!(a, Value::vector(vec![Value::Int(1), Value::Int(2)]));
        for v in [a, b] {
            if let Value::Vector(items) = &v {
                items.borrow_mut().clear();
            }
        }
    }
}
