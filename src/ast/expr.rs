//! Analyzed expression tree.

use super::env::{BindingId, ScopeId};
use crate::primitives::PrimOp;
use crate::reader::Location;
use crate::symbol::Symbol;
use crate::value::{Arity, Value};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Ast {
    pub kind: AstKind,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub enum AstKind {
    Literal(Value),
    Ref(BindingId),
    /// `set!`, or `define` when `define` is true.
    Set {
        target: BindingId,
        value: Box<Ast>,
        define: bool,
    },
    If {
        test: Box<Ast>,
        then: Box<Ast>,
        otherwise: Option<Box<Ast>>,
    },
    Cond {
        clauses: Vec<CondClause>,
        otherwise: Option<Vec<Ast>>,
    },
    Lambda(Rc<Lambda>),
    Apply {
        callee: Box<Ast>,
        args: Vec<Ast>,
    },
    /// Fixed-arity operator compiled to a single opcode.
    Primitive {
        op: PrimOp,
        args: Vec<Ast>,
    },
    Begin(Vec<Ast>),
    And(Vec<Ast>),
    Or(Vec<Ast>),
}

#[derive(Debug, Clone)]
pub struct CondClause {
    pub test: Ast,
    /// Empty body yields the test value.
    pub body: Vec<Ast>,
}

/// Parameter shape of a lambda. Slots are laid out as required, optional,
/// rest, then key parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub required: u16,
    pub optional: u16,
    pub rest: bool,
    /// Keyword symbols (`:name`) in declaration order.
    pub keys: Vec<Symbol>,
}

impl Signature {
    pub fn positional(&self) -> usize {
        self.required as usize + self.optional as usize
    }

    pub fn rest_slot(&self) -> Option<usize> {
        self.rest.then(|| self.positional())
    }

    pub fn first_key_slot(&self) -> usize {
        self.positional() + self.rest as usize
    }

    pub fn param_count(&self) -> usize {
        self.first_key_slot() + self.keys.len()
    }

    pub fn arity(&self) -> Arity {
        Arity::for_lambda(
            self.rest || !self.keys.is_empty(),
            self.required as usize,
            self.positional(),
        )
    }
}

#[derive(Debug)]
pub struct Lambda {
    pub name: Option<Symbol>,
    pub scope: ScopeId,
    pub params: Vec<BindingId>,
    /// Internal defines, in slot order after the parameters.
    pub locals: Vec<BindingId>,
    pub signature: Signature,
    pub body: Vec<Ast>,
}

impl Ast {
    pub fn new(kind: AstKind, loc: Location) -> Self {
        Ast { kind, loc }
    }

    pub fn literal(value: Value, loc: Location) -> Self {
        Ast::new(AstKind::Literal(value), loc)
    }

    pub fn void(loc: Location) -> Self {
        Ast::literal(Value::Void, loc)
    }

    pub fn primitive(op: PrimOp, args: Vec<Ast>, loc: Location) -> Self {
        Ast::new(AstKind::Primitive { op, args }, loc)
    }

    pub fn apply(callee: Ast, args: Vec<Ast>, loc: Location) -> Self {
        Ast::new(
            AstKind::Apply {
                callee: Box::new(callee),
                args,
            },
            loc,
        )
    }
}
