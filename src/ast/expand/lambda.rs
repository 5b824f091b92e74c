//! `lambda`, `let`, named `let` and `let*`.

use super::{bad_syntax, Expander};
use crate::ast::env::{ArgKind, ScopeId};
use crate::ast::expr::{Ast, AstKind, Lambda, Signature};
use crate::error::LResult;
use crate::reader::Location;
use crate::symbol::Symbol;
use crate::syntax::{Syntax, SyntaxKind};
use std::rc::Rc;

/// One `(name init)` pair of a `let`.
struct LetBinding<'a> {
    name: Symbol,
    init: &'a Syntax,
    loc: Location,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Required,
    Optional,
    Rest,
    Key,
}

impl Expander {
    pub(super) fn expand_lambda(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
        name: Option<Symbol>,
    ) -> LResult<Ast> {
        if items.len() < 2 {
            return Err(bad_syntax("lambda", "", syntax));
        }
        self.lambda_from_parts(syntax, &items[1], &items[2..], scope, name)
    }

    /// Build a lambda from its parameter list and body.
    pub(super) fn lambda_from_parts(
        &mut self,
        whole: &Syntax,
        params: &Syntax,
        body: &[Syntax],
        scope: ScopeId,
        name: Option<Symbol>,
    ) -> LResult<Ast> {
        let child = self.env.push_scope(scope);
        let signature = self.declare_params(whole, params, child)?;
        let body = self.expand_body("lambda", body, child, whole)?;
        let lambda = self.finish_lambda(name, child, signature, body);
        Ok(Ast::new(AstKind::Lambda(lambda), whole.loc.clone()))
    }

    fn finish_lambda(
        &self,
        name: Option<Symbol>,
        scope: ScopeId,
        signature: Signature,
        body: Vec<Ast>,
    ) -> Rc<Lambda> {
        let s = self.env.scope(scope);
        Rc::new(Lambda {
            name,
            scope,
            params: s.params.clone(),
            locals: s.locals.clone(),
            signature,
            body,
        })
    }

    /// Parse a lambda list into argument bindings of `scope`. Defaults are
    /// expanded before their own parameter is declared, so they see earlier
    /// parameters only.
    fn declare_params(
        &mut self,
        whole: &Syntax,
        params: &Syntax,
        scope: ScopeId,
    ) -> LResult<Signature> {
        let (items, tail): (&[Syntax], Option<&Syntax>) = match &params.kind {
            SyntaxKind::List(items) => (items.as_slice(), None),
            SyntaxKind::DottedList(items, tail) => (items.as_slice(), Some(&**tail)),
            SyntaxKind::Symbol(_) => (&[][..], Some(params)),
            _ => return Err(bad_syntax("lambda", "not an identifier", whole)),
        };

        let mut signature = Signature::default();
        let mut section = Section::Required;

        for item in items {
            if let Some(marker) = item.as_symbol().filter(|s| s.is_lambda_list_marker()) {
                let next = match &*marker.name() {
                    "&optional" => Section::Optional,
                    "&rest" => Section::Rest,
                    _ => Section::Key,
                };
                if next <= section {
                    return Err(bad_syntax("lambda", &format!("misplaced `{}`", marker), whole));
                }
                if section == Section::Rest && !signature.rest {
                    return Err(bad_syntax("lambda", "`&rest` needs exactly one identifier", whole));
                }
                section = next;
                continue;
            }

            let (name, default) = match section {
                Section::Required | Section::Rest => (self.param_name(whole, item)?, None),
                Section::Optional | Section::Key => match &item.kind {
                    SyntaxKind::List(parts) if parts.len() == 2 => {
                        let name = self.param_name(whole, &parts[0])?;
                        let default = self.expand(&parts[1], scope)?;
                        (name, Some(Rc::new(default)))
                    }
                    _ => (self.param_name(whole, item)?, None),
                },
            };
            if self.env.lookup_here(scope, name).is_some() {
                return Err(bad_syntax("lambda", "duplicate argument name", whole));
            }

            let kind = match section {
                Section::Required => {
                    signature.required += 1;
                    ArgKind::Required
                }
                Section::Optional => {
                    signature.optional += 1;
                    ArgKind::Optional
                }
                Section::Rest => {
                    if signature.rest {
                        return Err(bad_syntax("lambda", "`&rest` needs exactly one identifier", whole));
                    }
                    signature.rest = true;
                    ArgKind::Rest
                }
                Section::Key => {
                    signature.keys.push(name.keyword());
                    ArgKind::Key
                }
            };
            self.env.declare_argument(scope, name, kind, default, &item.loc)?;
        }

        if section == Section::Rest && !signature.rest {
            return Err(bad_syntax("lambda", "`&rest` needs exactly one identifier", whole));
        }

        if let Some(tail) = tail {
            if section > Section::Optional {
                return Err(bad_syntax("lambda", "illegal use of `.`", whole));
            }
            let name = self.param_name(whole, tail)?;
            if self.env.lookup_here(scope, name).is_some() {
                return Err(bad_syntax("lambda", "duplicate argument name", whole));
            }
            signature.rest = true;
            self.env
                .declare_argument(scope, name, ArgKind::Rest, None, &tail.loc)?;
        }

        Ok(signature)
    }

    fn param_name(&self, whole: &Syntax, item: &Syntax) -> LResult<Symbol> {
        match item.as_symbol() {
            Some(name) if !name.is_keyword() && !name.is_lambda_list_marker() => Ok(name),
            _ => Err(bad_syntax("lambda", "not an identifier", whole)),
        }
    }

    fn let_bindings<'a>(
        &self,
        form: &str,
        whole: &Syntax,
        list: &'a Syntax,
        unique: bool,
    ) -> LResult<Vec<LetBinding<'a>>> {
        let items = list
            .as_list()
            .ok_or_else(|| bad_syntax(form, "not a sequence of identifier--expression bindings", whole))?;
        let mut out: Vec<LetBinding<'a>> = Vec::with_capacity(items.len());
        for item in items {
            let pair = match item.as_list() {
                Some(pair) if pair.len() == 2 => pair,
                _ => {
                    return Err(bad_syntax(
                        form,
                        "not an identifier and expression for a binding",
                        whole,
                    ))
                }
            };
            let name = match pair[0].as_symbol() {
                Some(name) if !name.is_keyword() => name,
                _ => return Err(bad_syntax(form, "not an identifier", whole)),
            };
            if unique && out.iter().any(|b| b.name == name) {
                return Err(bad_syntax(form, "duplicate identifier", whole));
            }
            out.push(LetBinding {
                name,
                init: &pair[1],
                loc: pair[0].loc.clone(),
            });
        }
        Ok(out)
    }

    /// `(let ((x e) ...) body...)` is `((lambda (x ...) body...) e ...)`.
    pub(super) fn expand_let(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        if items.len() < 3 {
            return Err(bad_syntax("let", "", syntax));
        }
        if let Some(name) = items[1].as_symbol() {
            return self.expand_named_let(syntax, name, items, scope);
        }

        let bindings = self.let_bindings("let", syntax, &items[1], true)?;
        let inits = bindings
            .iter()
            .map(|b| self.expand(b.init, scope))
            .collect::<LResult<Vec<_>>>()?;

        let child = self.env.push_scope(scope);
        for b in &bindings {
            self.env
                .declare_argument(child, b.name, ArgKind::Required, None, &b.loc)?;
        }
        let signature = Signature {
            required: bindings.len() as u16,
            ..Signature::default()
        };
        let body = self.expand_body("let", &items[2..], child, syntax)?;
        let lambda = self.finish_lambda(None, child, signature, body);
        let callee = Ast::new(AstKind::Lambda(lambda), syntax.loc.clone());
        Ok(Ast::apply(callee, inits, syntax.loc.clone()))
    }

    /// `(let loop ((x e) ...) body...)`: `loop` is bound, in a scope of its
    /// own, to a procedure over the bindings, which is then applied to the
    /// initial values.
    fn expand_named_let(
        &mut self,
        syntax: &Syntax,
        name: Symbol,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        if items.len() < 4 || name.is_keyword() {
            return Err(bad_syntax("let", "", syntax));
        }
        let bindings = self.let_bindings("let", syntax, &items[2], true)?;
        let inits = bindings
            .iter()
            .map(|b| self.expand(b.init, scope))
            .collect::<LResult<Vec<_>>>()?;

        let holder = self.env.push_scope(scope);
        let local = self.env.declare_local(holder, name, &items[1].loc)?;

        let params = Syntax::new(
            SyntaxKind::List(
                bindings
                    .iter()
                    .map(|b| Syntax::new(SyntaxKind::Symbol(b.name), b.loc.clone()))
                    .collect(),
            ),
            items[2].loc.clone(),
        );
        let procedure = self.lambda_from_parts(syntax, &params, &items[3..], holder, Some(name))?;

        let loc = syntax.loc.clone();
        let holder_body = vec![
            Ast::new(
                AstKind::Set {
                    target: local,
                    value: Box::new(procedure),
                    define: true,
                },
                loc.clone(),
            ),
            Ast::new(AstKind::Ref(local), loc.clone()),
        ];
        let holder_lambda = self.finish_lambda(None, holder, Signature::default(), holder_body);
        let make = Ast::apply(
            Ast::new(AstKind::Lambda(holder_lambda), loc.clone()),
            Vec::new(),
            loc.clone(),
        );
        Ok(Ast::apply(make, inits, loc))
    }

    /// `let*` binds sequentially: each binding gets its own frame.
    pub(super) fn expand_let_star(
        &mut self,
        syntax: &Syntax,
        items: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        if items.len() < 3 {
            return Err(bad_syntax("let*", "", syntax));
        }
        let bindings = self.let_bindings("let*", syntax, &items[1], false)?;
        self.let_star_from(syntax, &bindings, &items[2..], scope)
    }

    fn let_star_from(
        &mut self,
        syntax: &Syntax,
        bindings: &[LetBinding<'_>],
        body: &[Syntax],
        scope: ScopeId,
    ) -> LResult<Ast> {
        let loc = syntax.loc.clone();
        let Some((first, rest)) = bindings.split_first() else {
            let child = self.env.push_scope(scope);
            let body = self.expand_body("let*", body, child, syntax)?;
            let lambda = self.finish_lambda(None, child, Signature::default(), body);
            return Ok(Ast::apply(
                Ast::new(AstKind::Lambda(lambda), loc.clone()),
                Vec::new(),
                loc,
            ));
        };

        let init = self.expand(first.init, scope)?;
        let child = self.env.push_scope(scope);
        self.env
            .declare_argument(child, first.name, ArgKind::Required, None, &first.loc)?;
        let inner = if rest.is_empty() {
            self.expand_body("let*", body, child, syntax)?
        } else {
            vec![self.let_star_from(syntax, rest, body, child)?]
        };
        let signature = Signature {
            required: 1,
            ..Signature::default()
        };
        let lambda = self.finish_lambda(None, child, signature, inner);
        Ok(Ast::apply(
            Ast::new(AstKind::Lambda(lambda), loc.clone()),
            vec![init],
            loc,
        ))
    }
}
