//! Expansion of syntax into the analyzed tree.
//!
//! Dispatch order for a list form:
//! 1. a special-form keyword that no enclosing lambda rebinds,
//! 2. a primitive operator shape (same shadowing rule),
//! 3. an ordinary application.

mod call;
mod lambda;
mod quasi;
mod special;

use super::env::{Environment, ScopeId};
use super::expr::{Ast, AstKind, Lambda, Signature};
use crate::error::{Error, LResult};
use crate::syntax::{Syntax, SyntaxKind};
use crate::value::Value;
use log::trace;
use std::rc::Rc;

/// Output of analyzing one top-level form.
#[derive(Debug)]
pub struct Analysis {
    pub env: Environment,
    /// The implicit zero-argument lambda wrapping the form.
    pub lambda: Rc<Lambda>,
}

/// Analyze one top-level form.
pub fn expand_toplevel(syntax: &Syntax) -> LResult<Analysis> {
    let mut expander = Expander::new();
    let root = expander.env.root();
    let body = vec![expander.expand(syntax, root)?];
    let lambda = Rc::new(Lambda {
        name: None,
        scope: root,
        params: Vec::new(),
        locals: Vec::new(),
        signature: Signature::default(),
        body,
    });
    Ok(Analysis {
        env: expander.env,
        lambda,
    })
}

/// Error for a malformed special form, echoing the whole form.
pub(super) fn bad_syntax(form: &str, detail: &str, s: &Syntax) -> Error {
    Error::bad_syntax(form, detail, s).with_location(s.loc.clone())
}

#[derive(Default)]
pub struct Expander {
    env: Environment,
}

impl Expander {
    pub fn new() -> Self {
        Expander::default()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    pub fn expand(&mut self, syntax: &Syntax, scope: ScopeId) -> LResult<Ast> {
        let loc = syntax.loc.clone();
        match &syntax.kind {
            SyntaxKind::Bool(_)
            | SyntaxKind::Int(_)
            | SyntaxKind::Float(_)
            | SyntaxKind::Char(_)
            | SyntaxKind::Str(_)
            | SyntaxKind::Vector(_) => Ok(Ast::literal(syntax.to_value(), loc)),
            SyntaxKind::Symbol(sym) => {
                let sym = *sym;
                if sym.is_keyword() {
                    return Ok(Ast::literal(Value::Symbol(sym), loc));
                }
                if sym.is_special_form() && !self.env.is_lexically_bound(scope, sym) {
                    return Err(bad_syntax(&sym.name(), "", syntax));
                }
                let id = self.env.resolve(scope, sym, &loc);
                Ok(Ast::new(AstKind::Ref(id), loc))
            }
            SyntaxKind::DottedList(..) => Err(bad_syntax(
                "#%app",
                "illegal use of `.`",
                syntax,
            )),
            SyntaxKind::List(items) if items.is_empty() => Err(Error::syntax(
                "#%app",
                "missing procedure expression;\n probably originally (), which is an illegal empty application",
            )
            .with_location(loc)),
            SyntaxKind::List(items) => self.expand_list(syntax, items, scope),
        }
    }

    fn expand_list(&mut self, syntax: &Syntax, items: &[Syntax], scope: ScopeId) -> LResult<Ast> {
        if let Some(head) = items[0].as_symbol() {
            if !self.env.is_lexically_bound(scope, head) {
                let name = head.name();
                if head.is_special_form() {
                    trace!("special form {} at {}", name, syntax.loc);
                    return self.expand_special(&name, syntax, items, scope);
                }
                if let Some(ast) = self.expand_primitive(&name, syntax, items, scope)? {
                    return Ok(ast);
                }
            }
        }
        self.expand_application(syntax, items, scope)
    }

    fn expand_special(
        &mut self,
        name: &str,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        match name {
            "quote" => self.expand_quote(syntax, items),
            "quote-syntax" => self.expand_quote_syntax(syntax, items),
            "quasiquote" => {
                if items.len() != 2 {
                    return Err(bad_syntax(name, "", syntax));
                }
                self.expand_quasi(&items[1], 1, scope)
            }
            "unquote" | "unquote-splicing" => Err(bad_syntax(name, "not in quasiquote", syntax)),
            "define" => self.expand_define(syntax, items, scope),
            "lambda" => self.expand_lambda(syntax, items, scope, None),
            "let" => self.expand_let(syntax, items, scope),
            "let*" => self.expand_let_star(syntax, items, scope),
            "if" => self.expand_if(syntax, items, scope),
            "cond" => self.expand_cond(syntax, items, scope),
            "set!" => self.expand_set(syntax, items, scope),
            "begin" => self.expand_begin(syntax, items, scope),
            "and" | "or" => self.expand_logic(name, syntax, items, scope),
            _ => Err(bad_syntax(name, "", syntax)),
        }
    }

    fn expand_all(&mut self, forms: &[Syntax], scope: ScopeId) -> LResult<Vec<Ast>> {
        forms.iter().map(|f| self.expand(f, scope)).collect()
    }

    /// Expand the body of a lambda. Internal defines anywhere at body level
    /// (including inside `begin`) are declared first, so they may refer to
    /// each other regardless of order.
    fn expand_body(
        &mut self,
        form: &str,
        forms: &[Syntax],
        scope: ScopeId,
        whole: &Syntax,
    ) -> LResult<Vec<Ast>> {
        if forms.is_empty() {
            return Err(bad_syntax(form, "no expression in body", whole));
        }
        if scope != self.env.root() {
            self.predeclare(forms, scope)?;
        }
        self.expand_all(forms, scope)
    }

    fn predeclare(&mut self, forms: &[Syntax], scope: ScopeId) -> LResult<()> {
        for form in forms {
            let Some(items) = form.as_list() else {
                continue;
            };
            let Some(head) = items.first().and_then(Syntax::as_symbol) else {
                continue;
            };
            if self.env.is_lexically_bound(scope, head) {
                continue;
            }
            match &*head.name() {
                "begin" => self.predeclare(&items[1..], scope)?,
                "define" => {
                    let Some(target) = items.get(1) else {
                        continue;
                    };
                    let name_syntax = match &target.kind {
                        SyntaxKind::List(parts) if !parts.is_empty() => &parts[0],
                        SyntaxKind::DottedList(parts, _) => &parts[0],
                        _ => target,
                    };
                    if let Some(name) = name_syntax.as_symbol() {
                        if self.env.lookup_here(scope, name).is_none() {
                            self.env.declare_local(scope, name, &name_syntax.loc)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}
