//! Closure type for the runtime
//!
//! A closure pairs a compiled template with the cells it captured when it
//! was created. Cells are shared with the frame that owned the variable and
//! with every other closure that captured it.

use crate::codegen::Template;
use crate::symbol::Symbol;
use crate::value::types::Arity;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// A captured variable.
pub type UpCell = Rc<RefCell<Value>>;

pub fn new_cell(value: Value) -> UpCell {
    Rc::new(RefCell::new(value))
}

#[derive(Debug)]
pub struct Closure {
    pub template: Rc<Template>,
    /// One cell per entry of `template.upvalues`, in the same order.
    pub upvalues: Box<[UpCell]>,
}

impl Closure {
    pub fn new(template: Rc<Template>, upvalues: Box<[UpCell]>) -> Self {
        Closure { template, upvalues }
    }

    pub fn name(&self) -> Option<Symbol> {
        self.template.name
    }

    pub fn arity(&self) -> Arity {
        self.template.signature.arity()
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> String {
        self.template.display_name()
    }
}
