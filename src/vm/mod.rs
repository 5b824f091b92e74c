//! Register virtual machine
//!
//! Executes [`Template`]s produced by the code generator. The VM owns the
//! global table, the output sink natives print to, and the runtime limits
//! from [`Config`].

mod dispatch;
mod frame;

use crate::codegen::Template;
use crate::config::Config;
use crate::error::{Error, LResult};
use crate::primitives::register_primitives;
use crate::symbol::Symbol;
use crate::value::{new_cell, Closure, Value};
use frame::Frame;
use log::debug;
use rustc_hash::FxHashMap;
use std::io::{self, Write};
use std::rc::Rc;

pub struct Vm {
    globals: FxHashMap<Symbol, Value>,
    config: Config,
    output: Box<dyn Write>,
    /// Procedure frames currently live, across nested entries.
    depth: usize,
    /// Instructions executed since the outermost `run`.
    steps: u64,
}

impl Vm {
    /// A VM with every native installed as a global.
    pub fn new(config: Config) -> Self {
        let mut vm = Vm {
            globals: FxHashMap::default(),
            config,
            output: Box::new(io::stdout()),
            depth: 0,
            steps: 0,
        };
        let count = register_primitives(&mut vm);
        debug!("registered {} primitives", count);
        vm
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_global(&mut self, name: Symbol, value: Value) {
        self.globals.insert(name, value);
    }

    pub fn get_global(&self, name: Symbol) -> Option<&Value> {
        self.globals.get(&name)
    }

    /// Names of all globals, sorted.
    pub fn global_names(&self) -> Vec<Symbol> {
        let mut names: Vec<Symbol> = self.globals.keys().copied().collect();
        names.sort_by_key(|s| s.name());
        names
    }

    /// Sink for `display`, `write` and `newline`.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    /// Run a top-level template with `args`.
    pub fn run(&mut self, template: Rc<Template>, args: &[Value]) -> LResult<Value> {
        if self.depth == 0 {
            self.steps = 0;
        }
        let cells = template
            .upvalues
            .iter()
            .map(|_| new_cell(Value::Void))
            .collect();
        let closure = Rc::new(Closure::new(template, cells));
        self.check_depth()?;
        let frame = Frame::new(closure, args, None)?;
        self.execute(frame)
    }

    /// Call any procedure value. Natives use this to call back into
    /// closures.
    pub fn call_value(&mut self, f: &Value, args: Vec<Value>) -> LResult<Value> {
        match f {
            Value::Native(def) => self.call_native(def, &args),
            Value::Closure(closure) => {
                self.check_depth()?;
                let frame = Frame::new(Rc::clone(closure), &args, None)?;
                self.execute(frame)
            }
            other => Err(Error::contract("application", "procedure?", other)),
        }
    }
}

impl Default for Vm {
    fn default() -> Self {
        Vm::new(Config::default())
    }
}
