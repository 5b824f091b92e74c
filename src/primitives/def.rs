//! Primitive definition type for declarative registration.
//!
//! Each primitive module exports a `const PRIMITIVES: &[PrimitiveDef]`
//! table. `register_primitives` walks all tables to install the natives
//! as globals of a VM.

use crate::value::{Arity, NativeFn};
use std::fmt;

/// Declarative definition of a native procedure.
pub struct PrimitiveDef {
    /// The name the global is bound to (e.g. "cons", "hash-ref").
    pub name: &'static str,
    pub func: NativeFn,
    /// Checked by the VM before `func` runs, so natives may index their
    /// arguments freely.
    pub arity: Arity,
    /// One-line description shown by the REPL's `:doc` command.
    pub doc: &'static str,
    /// Parameter names for the signature line.
    pub params: &'static [&'static str],
    pub category: &'static str,
    /// Runnable example, empty if none.
    pub example: &'static str,
}

impl PrimitiveDef {
    /// Human-readable documentation block.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push('(');
        out.push_str(self.name);
        for p in self.params {
            out.push(' ');
            out.push_str(p);
        }
        out.push_str(")\n");
        if !self.doc.is_empty() {
            out.push_str("  ");
            out.push_str(self.doc);
            out.push('\n');
        }
        out.push_str(&format!("  arity: {}\n", self.arity));
        if !self.category.is_empty() {
            out.push_str(&format!("  category: {}\n", self.category));
        }
        if !self.example.is_empty() {
            out.push_str("  example:\n");
            for line in self.example.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Debug for PrimitiveDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<primitive:{}>", self.name)
    }
}
