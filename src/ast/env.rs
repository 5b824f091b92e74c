//! Binding arena and lexical scopes.
//!
//! Every scope belongs to one lambda. Bindings live in a flat arena indexed
//! by [`BindingId`]; the AST refers to them only by id, so a binding's
//! `captured` flag can still change after references to it were built.
//! Code generation reads the arena once analysis of the whole form is over.

use super::expr::Ast;
use crate::error::{Error, LResult};
use crate::reader::Location;
use crate::symbol::Symbol;
use indexmap::IndexMap;
use std::rc::Rc;

/// Unique per binding site: two `x` parameters of different lambdas get
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Required,
    Optional,
    Rest,
    Key,
}

#[derive(Debug, Clone)]
pub enum BindingKind {
    /// Internal `define` inside a lambda body.
    Local { slot: u16 },
    /// Lambda parameter; optional and key parameters may carry a default
    /// that runs only when the caller omitted the argument.
    Argument {
        slot: u16,
        kind: ArgKind,
        default: Option<Rc<Ast>>,
    },
    /// A variable of an enclosing lambda seen from this one. `depth` counts
    /// lambdas outward to the owner and `slot` is the owner's slot. `source`
    /// is the binding one level out that this capture copies from, and
    /// `index` is the position in this lambda's upvalue array.
    UpValue {
        depth: u16,
        slot: u16,
        index: u16,
        source: BindingId,
    },
    Global(Symbol),
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Symbol,
    pub scope: ScopeId,
    pub kind: BindingKind,
    /// Set once any inner lambda references this variable; such variables
    /// live in a shared cell.
    pub captured: bool,
    pub loc: Location,
}

impl Binding {
    /// Register slot for locals and arguments.
    pub fn slot(&self) -> Option<u16> {
        match self.kind {
            BindingKind::Local { slot } | BindingKind::Argument { slot, .. } => Some(slot),
            _ => None,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self.kind, BindingKind::Global(_))
    }
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// Number of enclosing lambdas; the top-level scope is 0.
    pub depth: u16,
    pub names: IndexMap<Symbol, BindingId>,
    pub params: Vec<BindingId>,
    pub locals: Vec<BindingId>,
    pub upvalues: Vec<BindingId>,
    pub slot_count: u16,
}

impl Scope {
    fn new(parent: Option<ScopeId>, depth: u16) -> Self {
        Scope {
            parent,
            depth,
            names: IndexMap::new(),
            params: Vec::new(),
            locals: Vec::new(),
            upvalues: Vec::new(),
            slot_count: 0,
        }
    }
}

/// Analysis state for one top-level form.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new(None, 0)],
            bindings: Vec::new(),
        }
    }

    /// The scope of the implicit top-level lambda; names bound here are globals.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let depth = self.scope(parent).depth + 1;
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(Some(parent), depth));
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0 as usize]
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0 as usize]
    }

    fn binding_mut(&mut self, id: BindingId) -> &mut Binding {
        &mut self.bindings[id.0 as usize]
    }

    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, b)| (BindingId(i as u32), b))
    }

    fn push_binding(&mut self, binding: Binding) -> BindingId {
        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(binding);
        id
    }

    fn next_slot(&mut self, scope: ScopeId, loc: &Location) -> LResult<u16> {
        let s = self.scope_mut(scope);
        let slot = s.slot_count;
        s.slot_count = slot.checked_add(1).ok_or_else(|| {
            Error::syntax("lambda", "too many variables in one procedure").with_location(loc.clone())
        })?;
        Ok(slot)
    }

    pub fn declare_argument(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        kind: ArgKind,
        default: Option<Rc<Ast>>,
        loc: &Location,
    ) -> LResult<BindingId> {
        let slot = self.next_slot(scope, loc)?;
        let id = self.push_binding(Binding {
            name,
            scope,
            kind: BindingKind::Argument {
                slot,
                kind,
                default,
            },
            captured: false,
            loc: loc.clone(),
        });
        let s = self.scope_mut(scope);
        s.names.insert(name, id);
        s.params.push(id);
        Ok(id)
    }

    pub fn declare_local(
        &mut self,
        scope: ScopeId,
        name: Symbol,
        loc: &Location,
    ) -> LResult<BindingId> {
        let slot = self.next_slot(scope, loc)?;
        let id = self.push_binding(Binding {
            name,
            scope,
            kind: BindingKind::Local { slot },
            captured: false,
            loc: loc.clone(),
        });
        let s = self.scope_mut(scope);
        s.names.insert(name, id);
        s.locals.push(id);
        Ok(id)
    }

    /// The global binding for `name`, created in the root scope on first use.
    pub fn global(&mut self, name: Symbol, loc: &Location) -> BindingId {
        let root = self.root();
        if let Some(&id) = self.scope(root).names.get(&name) {
            return id;
        }
        let id = self.push_binding(Binding {
            name,
            scope: root,
            kind: BindingKind::Global(name),
            captured: false,
            loc: loc.clone(),
        });
        self.scope_mut(root).names.insert(name, id);
        id
    }

    /// Whether `name` is bound by some enclosing lambda (globals do not count).
    pub fn is_lexically_bound(&self, scope: ScopeId, name: Symbol) -> bool {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let s = self.scope(id);
            if let Some(&b) = s.names.get(&name) {
                return !self.binding(b).is_global();
            }
            cur = s.parent;
        }
        false
    }

    /// Binding declared directly in `scope`, if any.
    pub fn lookup_here(&self, scope: ScopeId, name: Symbol) -> Option<BindingId> {
        self.scope(scope).names.get(&name).copied()
    }

    /// Find `name` through the enclosing chain. A hit in an enclosing lambda
    /// materializes an UpValue binding in every lambda between the owner and
    /// `scope`, so each level captures only from its immediate parent.
    pub fn lookup(&mut self, scope: ScopeId, name: Symbol) -> Option<BindingId> {
        if let Some(id) = self.lookup_here(scope, name) {
            return Some(id);
        }
        let parent = self.scope(scope).parent?;
        let outer = self.lookup(parent, name)?;
        if self.binding(outer).is_global() {
            return Some(outer);
        }
        Some(self.capture(scope, name, outer))
    }

    /// Resolve a reference; unbound names become globals.
    pub fn resolve(&mut self, scope: ScopeId, name: Symbol, loc: &Location) -> BindingId {
        match self.lookup(scope, name) {
            Some(id) => id,
            None => self.global(name, loc),
        }
    }

    /// The local or argument binding an upvalue chain ends at.
    pub fn origin(&self, mut id: BindingId) -> BindingId {
        while let BindingKind::UpValue { source, .. } = self.binding(id).kind {
            id = source;
        }
        id
    }

    fn capture(&mut self, scope: ScopeId, name: Symbol, outer: BindingId) -> BindingId {
        let origin = self.origin(outer);
        self.binding_mut(origin).captured = true;

        let owner = self.binding(origin);
        let owner_depth = self.scope(owner.scope).depth;
        let slot = owner.slot().unwrap_or(0);
        let loc = owner.loc.clone();

        let s = self.scope(scope);
        let depth = s.depth - owner_depth;
        let index = s.upvalues.len() as u16;

        let id = self.push_binding(Binding {
            name,
            scope,
            kind: BindingKind::UpValue {
                depth,
                slot,
                index,
                source: outer,
            },
            captured: false,
            loc,
        });
        let s = self.scope_mut(scope);
        s.names.insert(name, id);
        s.upvalues.push(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::intern;

    fn loc() -> Location {
        Location::start("test")
    }

    #[test]
    fn test_unbound_names_become_globals() {
        let mut env = Environment::new();
        let inner = env.push_scope(env.root());
        let id = env.resolve(inner, intern("env-test-free"), &loc());
        assert!(env.binding(id).is_global());
        assert!(env.scope(inner).upvalues.is_empty());
    }

    #[test]
    fn test_capture_flattens_through_intermediate_lambdas() {
        let mut env = Environment::new();
        let outer = env.push_scope(env.root());
        let x = intern("x");
        let arg = env
            .declare_argument(outer, x, ArgKind::Required, None, &loc())
            .unwrap();
        let middle = env.push_scope(outer);
        let inner = env.push_scope(middle);

        let seen = env.resolve(inner, x, &loc());
        assert!(env.binding(arg).captured);
        assert!(matches!(
            env.binding(arg).kind,
            BindingKind::Argument { slot: 0, .. }
        ));

        match env.binding(seen).kind {
            BindingKind::UpValue {
                depth,
                slot,
                index,
                source,
            } => {
                assert_eq!((depth, slot, index), (2, 0, 0));
                // The middle lambda got its own capture to copy from.
                assert_eq!(env.scope(middle).upvalues, vec![source]);
                assert_eq!(env.origin(seen), arg);
            }
            ref other => panic!("expected upvalue, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_lookup_reuses_capture() {
        let mut env = Environment::new();
        let outer = env.push_scope(env.root());
        let y = intern("y");
        env.declare_local(outer, y, &loc()).unwrap();
        let inner = env.push_scope(outer);
        let a = env.resolve(inner, y, &loc());
        let b = env.resolve(inner, y, &loc());
        assert_eq!(a, b);
        assert_eq!(env.scope(inner).upvalues.len(), 1);
    }

    #[test]
    fn test_is_lexically_bound_ignores_globals() {
        let mut env = Environment::new();
        let car = intern("car");
        env.global(car, &loc());
        let inner = env.push_scope(env.root());
        assert!(!env.is_lexically_bound(inner, car));
        env.declare_argument(inner, car, ArgKind::Required, None, &loc())
            .unwrap();
        assert!(env.is_lexically_bound(inner, car));
    }
}
