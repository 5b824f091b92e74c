//! Syntax to AST analysis
//!
//! The expander walks [`Syntax`](crate::syntax::Syntax), dispatches special
//! forms, desugars n-ary primitive shapes and resolves every identifier to
//! a local, argument, upvalue or global binding. The result is one
//! [`Lambda`] per top-level form plus the [`Environment`] arena its
//! bindings live in.

mod env;
mod expand;
mod expr;

pub use env::{ArgKind, Binding, BindingId, BindingKind, Environment, Scope, ScopeId};
pub use expand::{expand_toplevel, Analysis, Expander};
pub use expr::{Ast, AstKind, CondClause, Lambda, Signature};
