//! Operators with a dedicated opcode.
//!
//! The analyzer rewrites calls of these names into `Primitive` nodes and
//! the VM executes them without a call frame. The implementations are the
//! same functions the natives of the same name use, so both paths raise
//! identical errors.

use super::{arithmetic, comparison, list, vector};
use crate::error::{ArityPolicy, Error, LResult};
use crate::value::{eqv, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimOp {
    Car,
    Cdr,
    Not,
    IsNull,
    IsPair,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    NumEq,
    Lt,
    Gt,
    Le,
    Ge,
    Cons,
    Eq,
    VectorRef,
    VectorSet,
}

impl PrimOp {
    /// Mnemonic used by the disassembler.
    pub fn name(self) -> &'static str {
        match self {
            PrimOp::Car => "car",
            PrimOp::Cdr => "cdr",
            PrimOp::Not => "not",
            PrimOp::IsNull => "null?",
            PrimOp::IsPair => "pair?",
            PrimOp::Neg => "neg",
            PrimOp::Add => "+",
            PrimOp::Sub => "-",
            PrimOp::Mul => "*",
            PrimOp::Div => "/",
            PrimOp::NumEq => "=",
            PrimOp::Lt => "<",
            PrimOp::Gt => ">",
            PrimOp::Le => "<=",
            PrimOp::Ge => ">=",
            PrimOp::Cons => "cons",
            PrimOp::Eq => "eq?",
            PrimOp::VectorRef => "vector-ref",
            PrimOp::VectorSet => "vector-set!",
        }
    }

    /// Fixed-arity operators and comparisons by source name. The variadic
    /// arithmetic operators are shaped by the analyzer and not listed.
    pub fn from_name(name: &str) -> Option<PrimOp> {
        Some(match name {
            "car" => PrimOp::Car,
            "cdr" => PrimOp::Cdr,
            "not" => PrimOp::Not,
            "null?" => PrimOp::IsNull,
            "pair?" => PrimOp::IsPair,
            "=" => PrimOp::NumEq,
            "<" => PrimOp::Lt,
            ">" => PrimOp::Gt,
            "<=" => PrimOp::Le,
            ">=" => PrimOp::Ge,
            "cons" => PrimOp::Cons,
            "eq?" => PrimOp::Eq,
            "vector-ref" => PrimOp::VectorRef,
            "vector-set!" => PrimOp::VectorSet,
            _ => return None,
        })
    }

    pub fn operand_count(self) -> usize {
        match self {
            PrimOp::Car | PrimOp::Cdr | PrimOp::Not | PrimOp::IsNull | PrimOp::IsPair | PrimOp::Neg => 1,
            PrimOp::VectorSet => 3,
            _ => 2,
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            PrimOp::NumEq | PrimOp::Lt | PrimOp::Gt | PrimOp::Le | PrimOp::Ge
        )
    }

    fn operand_mismatch(self, given: &[&Value]) -> Error {
        let args: Vec<Value> = given.iter().map(|v| (*v).clone()).collect();
        Error::arity(self.name(), ArityPolicy::Exactly(self.operand_count()), &args)
    }

    pub fn apply1(self, a: &Value) -> LResult<Value> {
        match self {
            PrimOp::Car => list::car(a),
            PrimOp::Cdr => list::cdr(a),
            PrimOp::Not => Ok(Value::Bool(!a.is_truthy())),
            PrimOp::IsNull => Ok(Value::Bool(a.is_nil())),
            PrimOp::IsPair => Ok(Value::Bool(matches!(a, Value::Pair(_)))),
            PrimOp::Neg => arithmetic::neg(a),
            _ => Err(self.operand_mismatch(&[a])),
        }
    }

    pub fn apply2(self, a: &Value, b: &Value) -> LResult<Value> {
        match self {
            PrimOp::Add => arithmetic::add(a, b),
            PrimOp::Sub => arithmetic::sub(a, b),
            PrimOp::Mul => arithmetic::mul(a, b),
            PrimOp::Div => arithmetic::div(a, b),
            PrimOp::NumEq | PrimOp::Lt | PrimOp::Gt | PrimOp::Le | PrimOp::Ge => {
                comparison::numeric_test(self.name(), a, b).map(Value::Bool)
            }
            PrimOp::Cons => Ok(Value::cons(a.clone(), b.clone())),
            PrimOp::Eq => Ok(Value::Bool(eqv(a, b))),
            PrimOp::VectorRef => vector::vector_ref(a, b),
            _ => Err(self.operand_mismatch(&[a, b])),
        }
    }

    pub fn apply3(self, a: &Value, b: &Value, c: &Value) -> LResult<Value> {
        match self {
            PrimOp::VectorSet => vector::vector_set(a, b, c),
            _ => Err(self.operand_mismatch(&[a, b, c])),
        }
    }
}

impl fmt::Display for PrimOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
