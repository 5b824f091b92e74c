//! Shared test helpers for the skein test suite.

use skein::{Config, Error, Interpreter, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Output sink whose contents stay readable after the VM takes it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Evaluate every form of `source` in a fresh interpreter.
pub fn eval(source: &str) -> Result<Value, Error> {
    Interpreter::new().eval_source("test", source)
}

/// The printed result of a successful evaluation.
pub fn eval_ok(source: &str) -> String {
    match eval(source) {
        Ok(value) => value.to_string(),
        Err(e) => panic!("`{}` failed: {}", source, e),
    }
}

/// The full message of a failing evaluation, location prefix included.
pub fn eval_err(source: &str) -> String {
    match eval(source) {
        Ok(value) => panic!("`{}` unexpectedly returned {}", source, value),
        Err(e) => e.to_string(),
    }
}

#[allow(dead_code)]
pub fn eval_with_config(config: Config, source: &str) -> Result<Value, Error> {
    Interpreter::with_config(config).eval_source("test", source)
}

/// Evaluate and capture everything written by `display` and friends.
pub fn eval_output(source: &str) -> (Result<Value, Error>, String) {
    let buffer = SharedBuffer::default();
    let mut interp = Interpreter::new();
    interp.vm().set_output(Box::new(buffer.clone()));
    let result = interp.eval_source("test", source);
    (result, buffer.contents())
}
