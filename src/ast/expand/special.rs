//! Special forms other than binding constructs.

use super::{bad_syntax, Expander};
use crate::ast::env::{BindingKind, ScopeId};
use crate::ast::expr::{Ast, AstKind, CondClause};
use crate::error::{ArityPolicy, Error, LResult};
use crate::syntax::{Syntax, SyntaxKind};
use crate::value::Value;
use std::rc::Rc;

impl Expander {
    pub(super) fn expand_quote(&mut self, syntax: &Syntax, items: &[Syntax]) -> LResult<Ast> {
        if items.len() != 2 {
            return Err(bad_syntax("quote", "wrong number of parts", syntax));
        }
        Ok(Ast::literal(items[1].to_value(), syntax.loc.clone()))
    }

    pub(super) fn expand_quote_syntax(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
    ) -> LResult<Ast> {
        if items.len() != 2 {
            return Err(bad_syntax("quote-syntax", "wrong number of parts", syntax));
        }
        Ok(Ast::literal(
            Value::Syntax(Rc::new(items[1].clone())),
            syntax.loc.clone(),
        ))
    }

    /// `(define name expr)` or `(define (name . params) body...)`.
    pub(super) fn expand_define(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        let target = items
            .get(1)
            .ok_or_else(|| bad_syntax("define", "", syntax))?;

        let (name, value) = match &target.kind {
            SyntaxKind::Symbol(name) => {
                let value = match items.len() {
                    2 => Ast::void(syntax.loc.clone()),
                    3 => self.expand_named(&items[2], *name, scope)?,
                    _ => return Err(bad_syntax("define", "multiple expressions after identifier", syntax)),
                };
                (*name, value)
            }
            SyntaxKind::List(parts) | SyntaxKind::DottedList(parts, _) if !parts.is_empty() => {
                let name = parts[0]
                    .as_symbol()
                    .ok_or_else(|| bad_syntax("define", "not an identifier", syntax))?;
                let params = match &target.kind {
                    SyntaxKind::DottedList(_, tail) if parts.len() == 1 => (**tail).clone(),
                    SyntaxKind::DottedList(_, tail) => Syntax::dotted(
                        parts[1..].to_vec(),
                        (**tail).clone(),
                        target.loc.clone(),
                    ),
                    _ => Syntax::new(SyntaxKind::List(parts[1..].to_vec()), target.loc.clone()),
                };
                let value =
                    self.lambda_from_parts(syntax, &params, &items[2..], scope, Some(name))?;
                (name, value)
            }
            _ => return Err(bad_syntax("define", "not an identifier", syntax)),
        };

        if name.is_keyword() || name.is_lambda_list_marker() {
            return Err(bad_syntax("define", "cannot define a keyword", syntax));
        }

        let target_id = if scope == self.env.root() {
            self.env.global(name, &target.loc)
        } else {
            match self.env.lookup_here(scope, name) {
                Some(id)
                    if matches!(
                        self.env.binding(id).kind,
                        BindingKind::Local { .. } | BindingKind::Argument { .. }
                    ) =>
                {
                    id
                }
                _ => {
                    return Err(bad_syntax(
                        "define",
                        "not allowed in an expression context",
                        syntax,
                    ))
                }
            }
        };

        Ok(Ast::new(
            AstKind::Set {
                target: target_id,
                value: Box::new(value),
                define: true,
            },
            syntax.loc.clone(),
        ))
    }

    /// Expand a value bound to `name`, naming it if it is a lambda.
    fn expand_named(&mut self, value: &Syntax, name: crate::symbol::Symbol, scope: ScopeId) -> LResult<Ast> {
        if let Some(items) = value.as_list() {
            if let Some(head) = items.first().and_then(Syntax::as_symbol) {
                if head.is_special_form()
                    && &*head.name() == "lambda"
                    && !self.env.is_lexically_bound(scope, head)
                {
                    return self.expand_lambda(value, items, scope, Some(name));
                }
            }
        }
        self.expand(value, scope)
    }

    pub(super) fn expand_set(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        if items.len() != 3 {
            return Err(bad_syntax("set!", "", syntax));
        }
        let name = items[1]
            .as_symbol()
            .ok_or_else(|| bad_syntax("set!", "not an identifier", syntax))?;
        if name.is_keyword() {
            return Err(bad_syntax("set!", "cannot mutate a keyword", syntax));
        }
        if name.is_special_form() && !self.env.is_lexically_bound(scope, name) {
            return Err(bad_syntax("set!", "cannot mutate syntax identifier", syntax));
        }
        let target = self.env.resolve(scope, name, &items[1].loc);
        let value = self.expand(&items[2], scope)?;
        Ok(Ast::new(
            AstKind::Set {
                target,
                value: Box::new(value),
                define: false,
            },
            syntax.loc.clone(),
        ))
    }

    pub(super) fn expand_if(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        let operands = &items[1..];
        let policy = match operands.len() {
            2 | 3 => None,
            n if n < 2 => Some(ArityPolicy::AtLeast(2)),
            _ => Some(ArityPolicy::AtMost(3)),
        };
        if let Some(policy) = policy {
            let rendered = operands.iter().map(|s| s.to_string()).collect();
            return Err(Error::arity_rendered("if", policy, rendered)
                .with_location(syntax.loc.clone()));
        }

        let test = self.expand(&operands[0], scope)?;
        let then = self.expand(&operands[1], scope)?;
        let otherwise = match operands.get(2) {
            Some(e) => Some(Box::new(self.expand(e, scope)?)),
            None => None,
        };
        Ok(Ast::new(
            AstKind::If {
                test: Box::new(test),
                then: Box::new(then),
                otherwise,
            },
            syntax.loc.clone(),
        ))
    }

    /// `(cond (test expr...) ... [(else expr...)])`; `else` must be last.
    pub(super) fn expand_cond(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        let clauses = &items[1..];
        let mut out = Vec::new();
        let mut otherwise = None;

        for (i, clause) in clauses.iter().enumerate() {
            let parts = match clause.as_list() {
                Some(parts) if !parts.is_empty() => parts,
                _ => return Err(bad_syntax("cond", "clause is not a test-value pair", syntax)),
            };
            let is_else = parts[0].is_symbol("else")
                && parts[0]
                    .as_symbol()
                    .is_some_and(|s| !self.env.is_lexically_bound(scope, s));
            if is_else {
                if i + 1 != clauses.len() {
                    return Err(bad_syntax("cond", "`else` clause must be last", syntax)
                        .with_location(clause.loc.clone()));
                }
                if parts.len() < 2 {
                    return Err(bad_syntax("cond", "missing expressions in `else` clause", syntax));
                }
                otherwise = Some(self.expand_all(&parts[1..], scope)?);
            } else {
                let test = self.expand(&parts[0], scope)?;
                let body = self.expand_all(&parts[1..], scope)?;
                out.push(CondClause { test, body });
            }
        }

        Ok(Ast::new(
            AstKind::Cond {
                clauses: out,
                otherwise,
            },
            syntax.loc.clone(),
        ))
    }

    pub(super) fn expand_begin(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        let forms = self.expand_all(&items[1..], scope)?;
        Ok(match forms.len() {
            0 => Ast::void(syntax.loc.clone()),
            _ => Ast::new(AstKind::Begin(forms), syntax.loc.clone()),
        })
    }

    pub(super) fn expand_logic(
        &mut self,
        name: &str,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        let forms = self.expand_all(&items[1..], scope)?;
        let kind = if name == "and" {
            AstKind::And(forms)
        } else {
            AstKind::Or(forms)
        };
        Ok(Ast::new(kind, syntax.loc.clone()))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{expand_toplevel, AstKind};
    use crate::error::ErrorKind;
    use crate::reader::read_one;

    fn analyze_err(src: &str) -> crate::error::Error {
        let syntax = read_one("test", src).unwrap().unwrap();
        match expand_toplevel(&syntax) {
            Ok(_) => panic!("expected an error for {}", src),
            Err(e) => e,
        }
    }

    #[test]
    fn test_if_operand_count() {
        let err = analyze_err("(if 1)");
        match err.kind {
            ErrorKind::Arity { ref op, given, .. } => {
                assert_eq!(op, "if");
                assert_eq!(given, 1);
            }
            ref other => panic!("unexpected {:?}", other),
        }
        assert!(analyze_err("(if 1 2 3 4)").is_arity());
    }

    #[test]
    fn test_cond_else_must_be_last() {
        let err = analyze_err("(cond (else 1) (#t 2))");
        assert!(err.is_syntax());
        assert!(err.to_string().contains("`else` clause must be last"));
        assert_eq!(err.location.map(|l| l.col), Some(7));
    }

    #[test]
    fn test_define_in_expression_context() {
        let err = analyze_err("(lambda () (if #t (define y 1)) 2)");
        assert!(err.to_string().contains("not allowed in an expression context"));
    }

    #[test]
    fn test_define_procedure_is_named() {
        let syntax = read_one("test", "(define (sq x) (* x x))").unwrap().unwrap();
        let analysis = expand_toplevel(&syntax).unwrap();
        match &analysis.lambda.body[0].kind {
            AstKind::Set { value, define, .. } => {
                assert!(*define);
                match &value.kind {
                    AstKind::Lambda(l) => {
                        assert_eq!(l.name.map(|s| s.to_string()), Some("sq".to_string()))
                    }
                    other => panic!("expected lambda, got {:?}", other),
                }
            }
            other => panic!("expected define, got {:?}", other),
        }
    }

    #[test]
    fn test_set_requires_identifier() {
        assert!(analyze_err("(set! (car x) 1)").is_syntax());
        assert!(analyze_err("(set! x)").is_syntax());
    }
}
