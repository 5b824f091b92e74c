//! Quasiquote expansion.
//!
//! Templates without any `unquote` become a single literal. Otherwise the
//! list is rebuilt right to left with primitive `cons`, splicing through
//! the `append` native. Nested quasiquotes raise the level; only level-1
//! unquotes are evaluated.

use super::{bad_syntax, Expander};
use crate::ast::env::ScopeId;
use crate::ast::expr::Ast;
use crate::error::LResult;
use crate::primitives::{lookup_native, PrimOp};
use crate::reader::Location;
use crate::symbol::Symbol;
use crate::syntax::{Syntax, SyntaxKind};
use crate::value::Value;

/// `(name x)` where `name` is one of the quasiquote keywords.
fn unary_form<'a>(syntax: &'a Syntax, name: &str) -> Option<&'a Syntax> {
    match syntax.as_list()? {
        [head, arg] if head.is_symbol(name) => Some(arg),
        _ => None,
    }
}

fn contains_unquote(syntax: &Syntax) -> bool {
    match &syntax.kind {
        SyntaxKind::List(items) => {
            items
                .first()
                .is_some_and(|h| h.is_symbol("unquote") || h.is_symbol("unquote-splicing"))
                || items.iter().any(contains_unquote)
        }
        SyntaxKind::DottedList(items, tail) => {
            items.iter().any(contains_unquote) || contains_unquote(tail)
        }
        SyntaxKind::Vector(items) => items.iter().any(contains_unquote),
        _ => false,
    }
}

fn native(name: &str, loc: &Location) -> LResult<Ast> {
    let def = lookup_native(name).ok_or_else(|| {
        crate::error::Error::unbound(name).with_location(loc.clone())
    })?;
    Ok(Ast::literal(Value::Native(def), loc.clone()))
}

impl Expander {
    pub(super) fn expand_quasi(
        &mut self,
        template: &Syntax,
        depth: usize,
        scope: ScopeId,
    ) -> LResult<Ast> {
        let loc = &template.loc;
        if !contains_unquote(template) {
            return Ok(Ast::literal(template.to_value(), loc.clone()));
        }

        if let Some(inner) = unary_form(template, "unquote") {
            if depth == 1 {
                return self.expand(inner, scope);
            }
            return self.tagged("unquote", inner, depth - 1, scope, loc);
        }
        if let Some(inner) = unary_form(template, "quasiquote") {
            return self.tagged("quasiquote", inner, depth + 1, scope, loc);
        }
        if let Some(inner) = unary_form(template, "unquote-splicing") {
            if depth == 1 {
                return Err(bad_syntax(
                    "unquote-splicing",
                    "invalid context within quasiquote",
                    template,
                ));
            }
            return self.tagged("unquote-splicing", inner, depth - 1, scope, loc);
        }

        match &template.kind {
            SyntaxKind::List(items) => {
                let tail = Ast::literal(Value::Nil, loc.clone());
                self.quasi_items(items, tail, depth, scope, loc)
            }
            SyntaxKind::DottedList(items, tail) => {
                let tail = self.expand_quasi(tail, depth, scope)?;
                self.quasi_items(items, tail, depth, scope, loc)
            }
            SyntaxKind::Vector(items) => {
                let tail = Ast::literal(Value::Nil, loc.clone());
                let list = self.quasi_items(items, tail, depth, scope, loc)?;
                Ok(Ast::apply(native("list->vector", loc)?, vec![list], loc.clone()))
            }
            _ => Ok(Ast::literal(template.to_value(), loc.clone())),
        }
    }

    /// Rebuild `(tag inner)` with `inner` expanded at `depth`.
    fn tagged(
        &mut self,
        tag: &str,
        inner: &Syntax,
        depth: usize,
        scope: ScopeId,
        loc: &Location,
    ) -> LResult<Ast> {
        let inner = self.expand_quasi(inner, depth, scope)?;
        let rest = Ast::primitive(
            PrimOp::Cons,
            vec![inner, Ast::literal(Value::Nil, loc.clone())],
            loc.clone(),
        );
        Ok(Ast::primitive(
            PrimOp::Cons,
            vec![Ast::literal(Value::Symbol(Symbol::intern(tag)), loc.clone()), rest],
            loc.clone(),
        ))
    }

    fn quasi_items(
        &mut self,
        items: &[Syntax],
        tail: Ast,
        depth: usize,
        scope: ScopeId,
        loc: &Location,
    ) -> LResult<Ast> {
        // Expand left to right so errors surface in source order, then
        // build the list from the end.
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            match unary_form(item, "unquote-splicing") {
                Some(spliced) if depth == 1 => parts.push((true, self.expand(spliced, scope)?)),
                _ => parts.push((false, self.expand_quasi(item, depth, scope)?)),
            }
        }
        let mut acc = tail;
        for (splice, part) in parts.into_iter().rev() {
            acc = if splice {
                Ast::apply(native("append", loc)?, vec![part, acc], loc.clone())
            } else {
                Ast::primitive(PrimOp::Cons, vec![part, acc], loc.clone())
            };
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{expand_toplevel, AstKind};
    use crate::reader::read_one;
    use crate::value::Value;

    fn expand_kind(src: &str) -> AstKind {
        let syntax = read_one("test", src).unwrap().unwrap();
        expand_toplevel(&syntax).unwrap().lambda.body[0].kind.clone()
    }

    #[test]
    fn test_constant_template_is_literal() {
        match expand_kind("`(a (b c) #(1 2))") {
            AstKind::Literal(v) => assert_eq!(v.to_string(), "(a (b c) #(1 2))"),
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn test_unquote_builds_cons_chain() {
        assert!(matches!(expand_kind("`(a ,x)"), AstKind::Primitive { .. }));
        assert!(matches!(expand_kind("`(,@xs)"), AstKind::Apply { .. }));
    }

    #[test]
    fn test_nested_quasiquote_keeps_inner_unquote() {
        // The inner unquote belongs to the inner quasiquote.
        match expand_kind("`(a `(b ,c))") {
            AstKind::Primitive { .. } | AstKind::Literal(_) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_splice_outside_list_is_error() {
        let syntax = read_one("test", "`,@x").unwrap().unwrap();
        assert!(expand_toplevel(&syntax).is_err());
        let syntax = read_one("test", "(unquote x)").unwrap().unwrap();
        assert!(expand_toplevel(&syntax).is_err());
        assert!(matches!(expand_kind("`()"), AstKind::Literal(Value::Nil)));
    }
}
