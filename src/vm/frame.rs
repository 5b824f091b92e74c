//! Activation records and argument binding.

use crate::codegen::Reg;
use crate::error::{Error, LResult};
use crate::reader::Location;
use crate::value::{new_cell, Closure, UpCell, Value};
use smallvec::{smallvec, SmallVec};
use std::rc::Rc;

/// One active procedure invocation.
pub(super) struct Frame {
    pub closure: Rc<Closure>,
    pub regs: Vec<Value>,
    /// Cells of captured slots, created the first time the slot is
    /// captured or accessed through a cell.
    cells: Vec<Option<UpCell>>,
    /// Which parameters the caller passed explicitly.
    supplied: SmallVec<[bool; 16]>,
    pub pc: usize,
    /// Caller register receiving the result. `None` discards it, or ends
    /// the run for the entry frame.
    pub ret: Option<Reg>,
}

impl Frame {
    /// Bind `args` to the parameters of `closure`.
    ///
    /// Positional arguments fill required then optional slots, surplus
    /// arguments go to the rest list, and `:key value` pairs after the
    /// positional ones fill key slots. Omitted optional and key parameters
    /// start as `#f`; the template's prologue replaces them with their
    /// defaults when it has any.
    pub fn new(closure: Rc<Closure>, args: &[Value], ret: Option<Reg>) -> LResult<Frame> {
        let template = &closure.template;
        let sig = &template.signature;
        let arity = sig.arity();
        if !arity.matches(args.len()) {
            return Err(Error::arity(
                closure.display_name(),
                arity.policy_for(args.len()),
                args,
            ));
        }

        let size = (template.register_count as usize).max(sig.param_count());
        let mut regs = vec![Value::Void; size];
        let mut supplied: SmallVec<[bool; 16]> = smallvec![false; sig.param_count()];

        let positional = sig.positional();
        for (i, arg) in args.iter().take(positional).enumerate() {
            regs[i] = arg.clone();
            supplied[i] = true;
        }
        for reg in regs.iter_mut().take(positional).skip(args.len()) {
            *reg = Value::Bool(false);
        }

        let extra = args.get(positional..).unwrap_or(&[]);
        if let Some(slot) = sig.rest_slot() {
            regs[slot] = Value::list(extra.to_vec());
            supplied[slot] = true;
        }

        if !sig.keys.is_empty() {
            let first = sig.first_key_slot();
            for reg in &mut regs[first..first + sig.keys.len()] {
                *reg = Value::Bool(false);
            }
            if extra.len() % 2 != 0 {
                return Err(Error::contract(
                    closure.display_name(),
                    "an even number of keyword arguments",
                    &Value::list(extra.to_vec()),
                ));
            }
            for pair in extra.chunks(2) {
                let position = pair[0]
                    .as_symbol()
                    .and_then(|key| sig.keys.iter().position(|k| *k == key));
                match position {
                    Some(k) => {
                        regs[first + k] = pair[1].clone();
                        supplied[first + k] = true;
                    }
                    None if sig.rest => {}
                    None => {
                        return Err(Error::contract(
                            closure.display_name(),
                            "a declared keyword",
                            &pair[0],
                        ))
                    }
                }
            }
        }

        let cells = vec![None; template.slot_count as usize];
        Ok(Frame {
            closure,
            regs,
            cells,
            supplied,
            pc: 0,
            ret,
        })
    }

    #[inline]
    pub fn get(&self, reg: Reg) -> &Value {
        &self.regs[reg.0 as usize]
    }

    #[inline]
    pub fn set(&mut self, reg: Reg, value: Value) {
        self.regs[reg.0 as usize] = value;
    }

    pub fn take(&mut self, reg: Reg) -> Value {
        std::mem::replace(&mut self.regs[reg.0 as usize], Value::Void)
    }

    pub fn supplied(&self, slot: Reg) -> bool {
        self.supplied.get(slot.0 as usize).copied().unwrap_or(true)
    }

    /// The shared cell of a captured slot.
    pub fn cell(&mut self, slot: Reg) -> UpCell {
        let i = slot.0 as usize;
        if let Some(cell) = &self.cells[i] {
            return Rc::clone(cell);
        }
        let cell = new_cell(self.regs[i].clone());
        self.cells[i] = Some(Rc::clone(&cell));
        cell
    }

    pub fn upvalue(&self, index: u16) -> &UpCell {
        &self.closure.upvalues[index as usize]
    }

    /// Location of the instruction executing (or last executed).
    pub fn location(&self) -> Option<&Location> {
        self.closure.template.location(self.pc.saturating_sub(1))
    }
}
