//! Instruction dispatch.
//!
//! Closure calls never recurse on the host stack: `Call` pushes a frame on
//! an explicit stack and `TailCall` replaces the current one. Only natives
//! that call back into procedures (`map`, `apply`, ...) re-enter
//! [`Vm::execute`].

use super::frame::Frame;
use super::Vm;
use crate::codegen::{Instr, Reg, UpvalueSource};
use crate::error::{Error, LResult};
use crate::primitives::PrimitiveDef;
use crate::value::{Closure, Value};
use log::trace;
use smallvec::SmallVec;
use std::rc::Rc;

/// Budget and interrupt are polled once per this many instructions.
const CHECK_INTERVAL: u64 = 1024;

type Args = SmallVec<[Value; 8]>;

enum Step {
    Call(Frame),
    TailCall(Frame),
    Return(Value),
}

impl Vm {
    /// Run `entry` and every frame it calls until it returns.
    pub(super) fn execute(&mut self, entry: Frame) -> LResult<Value> {
        let base = self.depth;
        self.depth += 1;
        let mut frames = vec![entry];
        let result = self.dispatch(&mut frames);
        self.depth = base;
        result
    }

    fn dispatch(&mut self, frames: &mut Vec<Frame>) -> LResult<Value> {
        loop {
            let Some(frame) = frames.last_mut() else {
                return Ok(Value::Void);
            };
            let step = match self.run_frame(frame) {
                Ok(step) => step,
                Err(e) => {
                    return Err(match frame.location() {
                        Some(loc) => e.or_location(loc),
                        None => e,
                    })
                }
            };
            match step {
                Step::Call(callee) => {
                    self.depth += 1;
                    frames.push(callee);
                }
                Step::TailCall(callee) => {
                    if let Some(top) = frames.last_mut() {
                        *top = callee;
                    }
                }
                Step::Return(value) => {
                    let ret = frames.pop().and_then(|f| f.ret);
                    self.depth -= 1;
                    match frames.last_mut() {
                        None => return Ok(value),
                        Some(caller) => {
                            if let Some(reg) = ret {
                                caller.set(reg, value);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Execute instructions of `frame` until it calls, tail calls or returns.
    fn run_frame(&mut self, frame: &mut Frame) -> LResult<Step> {
        let template = Rc::clone(&frame.closure.template);
        loop {
            self.tick()?;
            let Some(&instr) = template.code.get(frame.pc) else {
                return Ok(Step::Return(Value::Void));
            };
            frame.pc += 1;
            match instr {
                Instr::LoadConst { dst, index } => {
                    frame.set(dst, template.consts[index as usize].clone());
                }
                Instr::LoadNil { dst } => frame.set(dst, Value::Nil),
                Instr::LoadVoid { dst } => frame.set(dst, Value::Void),
                Instr::LoadBool { dst, value } => frame.set(dst, Value::Bool(value)),
                Instr::Move { dst, src } => {
                    let v = frame.get(src).clone();
                    frame.set(dst, v);
                }
                Instr::GetCell { dst, slot } => {
                    let v = frame.cell(slot).borrow().clone();
                    frame.set(dst, v);
                }
                Instr::SetCell { slot, src } => {
                    let v = frame.get(src).clone();
                    *frame.cell(slot).borrow_mut() = v;
                }
                Instr::GetUpval { dst, index } => {
                    let v = frame.upvalue(index).borrow().clone();
                    frame.set(dst, v);
                }
                Instr::SetUpval { index, src } => {
                    let v = frame.get(src).clone();
                    *frame.upvalue(index).borrow_mut() = v;
                }
                Instr::GetGlobal { dst, name } => match self.globals.get(&name) {
                    Some(v) => frame.set(dst, v.clone()),
                    None => return Err(Error::unbound(name.to_string())),
                },
                Instr::SetGlobal { name, src } => {
                    let v = frame.get(src).clone();
                    match self.globals.get_mut(&name) {
                        Some(slot) => *slot = v,
                        None => return Err(Error::unbound(name.to_string())),
                    }
                }
                Instr::DefGlobal { name, src } => {
                    let v = frame.get(src).clone();
                    self.globals.insert(name, v);
                }
                Instr::Jump { target } => frame.pc = target as usize,
                Instr::JumpIfFalse { test, target } => {
                    if !frame.get(test).is_truthy() {
                        frame.pc = target as usize;
                    }
                }
                Instr::JumpIfTrue { test, target } => {
                    if frame.get(test).is_truthy() {
                        frame.pc = target as usize;
                    }
                }
                Instr::JumpIfSupplied { slot, target } => {
                    if frame.supplied(slot) {
                        frame.pc = target as usize;
                    }
                }
                Instr::Prim1 { op, dst, a } => {
                    let v = op.apply1(frame.get(a))?;
                    frame.set(dst, v);
                }
                Instr::Prim2 { op, dst, a, b } => {
                    let v = op.apply2(frame.get(a), frame.get(b))?;
                    frame.set(dst, v);
                }
                Instr::Prim3 { op, dst, a, b, c } => {
                    let v = op.apply3(frame.get(a), frame.get(b), frame.get(c))?;
                    frame.set(dst, v);
                }
                Instr::Closure { dst, index } => {
                    let child = Rc::clone(&template.children[index as usize]);
                    let cells: Vec<_> = child
                        .upvalues
                        .iter()
                        .map(|source| match *source {
                            UpvalueSource::ParentSlot(slot) => frame.cell(Reg(slot)),
                            UpvalueSource::ParentUpvalue(i) => Rc::clone(frame.upvalue(i)),
                        })
                        .collect();
                    let closure = Closure::new(child, cells.into_boxed_slice());
                    frame.set(dst, Value::Closure(Rc::new(closure)));
                }
                Instr::Call { a, b, c } => {
                    let (callee, args) = call_window(frame, a, b);
                    let ret = (c >= 2).then_some(a);
                    match callee {
                        Value::Native(def) => {
                            let v = self.call_native(def, &args)?;
                            if let Some(reg) = ret {
                                frame.set(reg, v);
                            }
                        }
                        Value::Closure(closure) => {
                            self.check_depth()?;
                            trace!("call {} with {} arguments", closure.display_name(), args.len());
                            return Ok(Step::Call(Frame::new(closure, &args, ret)?));
                        }
                        other => return Err(Error::contract("application", "procedure?", &other)),
                    }
                }
                Instr::TailCall { a, b } => {
                    let (callee, args) = call_window(frame, a, b);
                    return match callee {
                        Value::Native(def) => Ok(Step::Return(self.call_native(def, &args)?)),
                        Value::Closure(closure) => {
                            trace!("tail call {} with {} arguments", closure.display_name(), args.len());
                            Ok(Step::TailCall(Frame::new(closure, &args, frame.ret)?))
                        }
                        other => Err(Error::contract("application", "procedure?", &other)),
                    };
                }
                Instr::Return { src } => return Ok(Step::Return(frame.take(src))),
            }
        }
    }

    pub(super) fn call_native(&mut self, def: &'static PrimitiveDef, args: &[Value]) -> LResult<Value> {
        if !def.arity.matches(args.len()) {
            return Err(Error::arity(def.name, def.arity.policy_for(args.len()), args));
        }
        (def.func)(self, args)
    }

    pub(super) fn check_depth(&self) -> LResult<()> {
        if self.depth >= self.config.max_call_depth {
            return Err(Error::limit(format!(
                "maximum call depth of {} exceeded",
                self.config.max_call_depth
            )));
        }
        Ok(())
    }

    #[inline]
    fn tick(&mut self) -> LResult<()> {
        self.steps += 1;
        if self.steps % CHECK_INTERVAL != 0 {
            return Ok(());
        }
        if self.config.interrupted() {
            return Err(Error::limit("interrupted"));
        }
        match self.config.instruction_limit {
            Some(limit) if self.steps > limit => Err(Error::limit(format!(
                "instruction limit of {} exceeded",
                limit
            ))),
            _ => Ok(()),
        }
    }
}

/// Callee in `a`, arguments in `a+1 .. a+b`.
fn call_window(frame: &Frame, a: Reg, b: u16) -> (Value, Args) {
    let base = a.0 as usize;
    let callee = frame.regs[base].clone();
    let args = frame.regs[base + 1..base + b as usize].iter().cloned().collect();
    (callee, args)
}
