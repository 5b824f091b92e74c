//! Applications and primitive operator shapes.
//!
//! A call whose head names a primitive operator (and is not shadowed by a
//! lambda parameter or internal define) is rewritten into fixed-arity
//! `Primitive` nodes the code generator turns into single instructions.
//! Variadic operators fold rightmost first:
//!
//! ```text
//! (+ a b c)   => (+ a (+ b c))
//! (- a b c)   => (- a (+ b c))
//! (/ a b c)   => (/ a (* b c))
//! ```

use super::Expander;
use crate::ast::env::ScopeId;
use crate::ast::expr::Ast;
use crate::error::{ArityPolicy, Error, LResult};
use crate::primitives::{lookup_native, PrimOp};
use crate::reader::Location;
use crate::syntax::Syntax;
use crate::value::Value;

fn fold_right(op: PrimOp, args: Vec<Ast>, loc: &Location) -> Option<Ast> {
    let mut rev = args.into_iter().rev();
    let mut acc = rev.next()?;
    for arg in rev {
        acc = Ast::primitive(op, vec![arg, acc], loc.clone());
    }
    Some(acc)
}

fn arity_error(name: &str, policy: ArityPolicy, args: &[Syntax], loc: &Location) -> Error {
    let rendered = args.iter().map(|s| s.to_string()).collect();
    Error::arity_rendered(name, policy, rendered).with_location(loc.clone())
}

/// Call of the native named `name`, used where no opcode shape fits.
fn native_call(name: &str, args: Vec<Ast>, loc: &Location) -> Option<Ast> {
    let def = lookup_native(name)?;
    Some(Ast::apply(
        Ast::literal(Value::Native(def), loc.clone()),
        args,
        loc.clone(),
    ))
}

impl Expander {
    /// Rewrite a primitive operator form, or return `None` when `name` is
    /// not one or the shape has no opcode form.
    pub(super) fn expand_primitive(
        &mut self,
        name: &str,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Option<Ast>> {
        let operands = &items[1..];
        let loc = &syntax.loc;

        let ast = match name {
            "+" | "*" => {
                let (op, identity) = if name == "+" {
                    (PrimOp::Add, 0)
                } else {
                    (PrimOp::Mul, 1)
                };
                let args = self.expand_all(operands, scope)?;
                match args.len() {
                    0 => Some(Ast::literal(Value::Int(identity), loc.clone())),
                    1 => native_call(name, args, loc),
                    _ => fold_right(op, args, loc),
                }
            }
            "-" => {
                if operands.is_empty() {
                    return Err(arity_error(name, ArityPolicy::AtLeast(1), operands, loc));
                }
                let mut args = self.expand_all(operands, scope)?;
                let first = args.remove(0);
                match fold_right(PrimOp::Add, args, loc) {
                    None => Some(Ast::primitive(PrimOp::Neg, vec![first], loc.clone())),
                    Some(rest) => Some(Ast::primitive(PrimOp::Sub, vec![first, rest], loc.clone())),
                }
            }
            "/" => {
                if operands.is_empty() {
                    return Err(arity_error(name, ArityPolicy::AtLeast(1), operands, loc));
                }
                let mut args = self.expand_all(operands, scope)?;
                let first = args.remove(0);
                match fold_right(PrimOp::Mul, args, loc) {
                    None => {
                        let one = Ast::literal(Value::Int(1), loc.clone());
                        Some(Ast::primitive(PrimOp::Div, vec![one, first], loc.clone()))
                    }
                    Some(rest) => Some(Ast::primitive(PrimOp::Div, vec![first, rest], loc.clone())),
                }
            }
            _ => {
                let Some(op) = PrimOp::from_name(name) else {
                    return Ok(None);
                };
                if op.is_comparison() {
                    if operands.len() != 2 {
                        return Ok(None);
                    }
                } else if operands.len() != op.operand_count() {
                    return Err(arity_error(
                        name,
                        ArityPolicy::Exactly(op.operand_count()),
                        operands,
                        loc,
                    ));
                }
                let args = self.expand_all(operands, scope)?;
                Some(Ast::primitive(op, args, loc.clone()))
            }
        };
        Ok(ast)
    }

    pub(super) fn expand_application(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        let callee = self.expand(&items[0], scope)?;
        let args = self.expand_all(&items[1..], scope)?;
        Ok(Ast::apply(callee, args, syntax.loc.clone()))
    }
}
