//! AST to Template lowering.
//!
//! Runs strictly after analysis of the whole top-level form, when every
//! binding's `captured` flag and every scope's upvalue list is final.
//! Each lambda gets its own [`Generator`]; nested lambdas are generated
//! recursively and stored as children of the enclosing template.

use super::template::{Instr, Reg, Template, UpvalueSource};
use crate::ast::{ArgKind, Ast, AstKind, BindingId, BindingKind, Environment, Lambda};
use crate::error::{Error, LResult};
use crate::reader::Location;
use crate::value::Value;
use log::trace;
use std::rc::Rc;

/// Generate the template for `lambda` and, recursively, its children.
pub fn generate(env: &Environment, lambda: &Lambda) -> LResult<Rc<Template>> {
    let scope = env.scope(lambda.scope);
    let mut gen = Generator {
        env,
        code: Vec::new(),
        locations: Vec::new(),
        consts: Vec::new(),
        children: Vec::new(),
        next_reg: scope.slot_count,
        max_reg: scope.slot_count,
    };
    gen.prologue(lambda)?;
    gen.body(lambda)?;

    let upvalues = scope
        .upvalues
        .iter()
        .map(|&id| upvalue_source(env, id))
        .collect();

    let template = Template {
        name: lambda.name,
        signature: lambda.signature.clone(),
        code: gen.code,
        locations: gen.locations,
        consts: gen.consts,
        children: gen.children,
        upvalues,
        slot_count: scope.slot_count,
        register_count: gen.max_reg,
    };
    trace!(
        "generated {} ({} instructions, {} registers)",
        template.display_name(),
        template.code.len(),
        template.register_count
    );
    Ok(Rc::new(template))
}

/// How the closure instruction in the parent frame finds the cell for the
/// upvalue binding `id` of a child lambda.
fn upvalue_source(env: &Environment, id: BindingId) -> UpvalueSource {
    let source = match env.binding(id).kind {
        BindingKind::UpValue { source, .. } => source,
        _ => id,
    };
    match env.binding(source).kind {
        BindingKind::UpValue { index, .. } => UpvalueSource::ParentUpvalue(index),
        _ => UpvalueSource::ParentSlot(env.binding(source).slot().unwrap_or(0)),
    }
}

struct Generator<'e> {
    env: &'e Environment,
    code: Vec<Instr>,
    locations: Vec<Location>,
    consts: Vec<Value>,
    children: Vec<Rc<Template>>,
    /// First free temporary register.
    next_reg: u16,
    max_reg: u16,
}

impl Generator<'_> {
    fn emit(&mut self, instr: Instr, loc: &Location) -> usize {
        self.code.push(instr);
        self.locations.push(loc.clone());
        self.code.len() - 1
    }

    fn here(&self) -> u32 {
        self.code.len() as u32
    }

    /// Point the jump at `at` to the next instruction to be emitted.
    fn patch(&mut self, at: usize) {
        let here = self.here();
        match &mut self.code[at] {
            Instr::Jump { target }
            | Instr::JumpIfFalse { target, .. }
            | Instr::JumpIfTrue { target, .. }
            | Instr::JumpIfSupplied { target, .. } => *target = here,
            _ => {}
        }
    }

    fn alloc(&mut self, n: usize) -> LResult<Reg> {
        let base = self.next_reg;
        let end = (base as usize) + n;
        if end > u16::MAX as usize {
            return Err(Error::limit("too many registers in one procedure"));
        }
        self.next_reg = end as u16;
        self.max_reg = self.max_reg.max(self.next_reg);
        Ok(Reg(base))
    }

    fn ret(&mut self, dst: Reg, tail: bool, loc: &Location) {
        if tail {
            self.emit(Instr::Return { src: dst }, loc);
        }
    }

    /// Lazy default initializers for omitted optional and key arguments.
    fn prologue(&mut self, lambda: &Lambda) -> LResult<()> {
        let env = self.env;
        for &id in &lambda.params {
            let binding = env.binding(id);
            let BindingKind::Argument {
                slot,
                kind,
                default: Some(default),
            } = &binding.kind
            else {
                continue;
            };
            debug_assert!(matches!(kind, ArgKind::Optional | ArgKind::Key));
            let slot = Reg(*slot);
            let loc = binding.loc.clone();
            let skip = self.emit(Instr::JumpIfSupplied { slot, target: 0 }, &loc);
            self.compile(default, slot, false)?;
            self.patch(skip);
        }
        Ok(())
    }

    fn body(&mut self, lambda: &Lambda) -> LResult<()> {
        let dst = self.alloc(1)?;
        match lambda.body.last() {
            Some(last) => self.sequence(&lambda.body, dst, true, &last.loc),
            None => {
                let loc = Location::start("<empty>");
                self.emit(Instr::LoadVoid { dst }, &loc);
                self.emit(Instr::Return { src: dst }, &loc);
                Ok(())
            }
        }
    }

    fn sequence(&mut self, forms: &[Ast], dst: Reg, tail: bool, loc: &Location) -> LResult<()> {
        let Some((last, init)) = forms.split_last() else {
            self.emit(Instr::LoadVoid { dst }, loc);
            self.ret(dst, tail, loc);
            return Ok(());
        };
        for form in init {
            self.compile(form, dst, false)?;
        }
        self.compile(last, dst, tail)
    }

    /// Compile `ast` so its value ends up in `dst`. In tail position the
    /// code returns from the frame instead.
    fn compile(&mut self, ast: &Ast, dst: Reg, tail: bool) -> LResult<()> {
        let loc = &ast.loc;
        match &ast.kind {
            AstKind::Literal(value) => {
                self.load_literal(value, dst, loc);
                self.ret(dst, tail, loc);
            }
            AstKind::Ref(id) => {
                self.load_ref(*id, dst, loc);
                self.ret(dst, tail, loc);
            }
            AstKind::Set {
                target,
                value,
                define,
            } => {
                self.compile(value, dst, false)?;
                self.store(*target, dst, *define, loc);
                self.emit(Instr::LoadVoid { dst }, loc);
                self.ret(dst, tail, loc);
            }
            AstKind::If {
                test,
                then,
                otherwise,
            } => {
                self.compile(test, dst, false)?;
                let to_else = self.emit(Instr::JumpIfFalse { test: dst, target: 0 }, loc);
                self.compile(then, dst, tail)?;
                let to_end = (!tail).then(|| self.emit(Instr::Jump { target: 0 }, loc));
                self.patch(to_else);
                match otherwise {
                    Some(e) => self.compile(e, dst, tail)?,
                    None => {
                        self.emit(Instr::LoadVoid { dst }, loc);
                        self.ret(dst, tail, loc);
                    }
                }
                if let Some(j) = to_end {
                    self.patch(j);
                }
            }
            AstKind::Cond { clauses, otherwise } => {
                let mut to_end = Vec::new();
                for clause in clauses {
                    self.compile(&clause.test, dst, false)?;
                    if clause.body.is_empty() {
                        if tail {
                            let next = self.emit(Instr::JumpIfFalse { test: dst, target: 0 }, loc);
                            self.emit(Instr::Return { src: dst }, loc);
                            self.patch(next);
                        } else {
                            to_end.push(self.emit(Instr::JumpIfTrue { test: dst, target: 0 }, loc));
                        }
                        continue;
                    }
                    let next = self.emit(Instr::JumpIfFalse { test: dst, target: 0 }, loc);
                    self.sequence(&clause.body, dst, tail, loc)?;
                    if !tail {
                        to_end.push(self.emit(Instr::Jump { target: 0 }, loc));
                    }
                    self.patch(next);
                }
                match otherwise {
                    Some(body) => self.sequence(body, dst, tail, loc)?,
                    None => {
                        self.emit(Instr::LoadVoid { dst }, loc);
                        self.ret(dst, tail, loc);
                    }
                }
                for j in to_end {
                    self.patch(j);
                }
            }
            AstKind::Lambda(lambda) => {
                let child = generate(self.env, lambda)?;
                let index = u16::try_from(self.children.len())
                    .map_err(|_| Error::limit("too many nested procedures").with_location(loc.clone()))?;
                self.children.push(child);
                self.emit(Instr::Closure { dst, index }, loc);
                self.ret(dst, tail, loc);
            }
            AstKind::Apply { callee, args } => self.apply(callee, args, dst, tail, loc)?,
            AstKind::Primitive { op, args } => {
                let mark = self.next_reg;
                let base = self.alloc(args.len())?;
                for (i, arg) in args.iter().enumerate() {
                    self.compile(arg, Reg(base.0 + i as u16), false)?;
                }
                let r = |i: u16| Reg(base.0 + i);
                let instr = match args.len() {
                    1 => Instr::Prim1 { op: *op, dst, a: r(0) },
                    2 => Instr::Prim2 { op: *op, dst, a: r(0), b: r(1) },
                    _ => Instr::Prim3 { op: *op, dst, a: r(0), b: r(1), c: r(2) },
                };
                self.emit(instr, loc);
                self.next_reg = mark;
                self.ret(dst, tail, loc);
            }
            AstKind::Begin(forms) => self.sequence(forms, dst, tail, loc)?,
            AstKind::And(forms) => self.logic(forms, true, dst, tail, loc)?,
            AstKind::Or(forms) => self.logic(forms, false, dst, tail, loc)?,
        }
        Ok(())
    }

    fn apply(&mut self, callee: &Ast, args: &[Ast], dst: Reg, tail: bool, loc: &Location) -> LResult<()> {
        let b = u16::try_from(args.len() + 1)
            .map_err(|_| Error::limit("too many arguments in one call").with_location(loc.clone()))?;
        let mark = self.next_reg;
        let base = self.alloc(args.len() + 1)?;
        self.compile(callee, base, false)?;
        for (i, arg) in args.iter().enumerate() {
            self.compile(arg, Reg(base.0 + 1 + i as u16), false)?;
        }
        if tail {
            self.emit(Instr::TailCall { a: base, b }, loc);
        } else {
            self.emit(Instr::Call { a: base, b, c: 2 }, loc);
            if dst != base {
                self.emit(Instr::Move { dst, src: base }, loc);
            }
        }
        self.next_reg = mark;
        Ok(())
    }

    /// `and` stops at the first false value, `or` at the first true one.
    fn logic(&mut self, forms: &[Ast], is_and: bool, dst: Reg, tail: bool, loc: &Location) -> LResult<()> {
        let Some((last, init)) = forms.split_last() else {
            self.emit(Instr::LoadBool { dst, value: is_and }, loc);
            self.ret(dst, tail, loc);
            return Ok(());
        };
        let mut exits = Vec::new();
        for form in init {
            self.compile(form, dst, false)?;
            let jump = if is_and {
                Instr::JumpIfFalse { test: dst, target: 0 }
            } else {
                Instr::JumpIfTrue { test: dst, target: 0 }
            };
            exits.push(self.emit(jump, loc));
        }
        self.compile(last, dst, tail)?;
        for j in exits {
            self.patch(j);
        }
        if tail && !init.is_empty() {
            self.emit(Instr::Return { src: dst }, loc);
        }
        Ok(())
    }

    fn load_literal(&mut self, value: &Value, dst: Reg, loc: &Location) {
        let instr = match value {
            Value::Nil => Instr::LoadNil { dst },
            Value::Void => Instr::LoadVoid { dst },
            Value::Bool(b) => Instr::LoadBool { dst, value: *b },
            other => {
                let index = self.consts.len() as u32;
                self.consts.push(other.clone());
                Instr::LoadConst { dst, index }
            }
        };
        self.emit(instr, loc);
    }

    fn load_ref(&mut self, id: BindingId, dst: Reg, loc: &Location) {
        let binding = self.env.binding(id);
        let instr = match binding.kind {
            BindingKind::Local { slot } | BindingKind::Argument { slot, .. } => {
                if binding.captured {
                    Instr::GetCell { dst, slot: Reg(slot) }
                } else if dst.0 == slot {
                    return;
                } else {
                    Instr::Move { dst, src: Reg(slot) }
                }
            }
            BindingKind::UpValue { index, .. } => Instr::GetUpval { dst, index },
            BindingKind::Global(name) => Instr::GetGlobal { dst, name },
        };
        self.emit(instr, loc);
    }

    fn store(&mut self, id: BindingId, src: Reg, define: bool, loc: &Location) {
        let binding = self.env.binding(id);
        let instr = match binding.kind {
            BindingKind::Local { slot } | BindingKind::Argument { slot, .. } => {
                if binding.captured {
                    Instr::SetCell { slot: Reg(slot), src }
                } else if src.0 == slot {
                    return;
                } else {
                    Instr::Move { dst: Reg(slot), src }
                }
            }
            BindingKind::UpValue { index, .. } => Instr::SetUpval { index, src },
            BindingKind::Global(name) if define => Instr::DefGlobal { name, src },
            BindingKind::Global(name) => Instr::SetGlobal { name, src },
        };
        self.emit(instr, loc);
    }
}
