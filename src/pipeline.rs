//! Compilation pipeline: Source → Syntax → AST → Template → Value
//!
//! Top-level forms are processed one at a time so that each form sees the
//! globals defined by the forms before it. A failing form leaves earlier
//! definitions untouched.

use crate::ast::expand_toplevel;
use crate::codegen::{disassemble, generate, Template};
use crate::config::Config;
use crate::error::{Error, ErrorKind, LResult};
use crate::reader::parser;
use crate::syntax::Syntax;
use crate::value::Value;
use crate::vm::Vm;
use log::{debug, trace};
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Name used for sources without a file.
pub const STRING_SOURCE: &str = "<string>";

/// Analyze and generate one top-level form.
pub fn compile(syntax: &Syntax) -> LResult<Rc<Template>> {
    let analysis = expand_toplevel(syntax)?;
    trace!(
        "{}: analyzed with {} bindings",
        syntax.loc,
        analysis.env.bindings().count()
    );
    generate(&analysis.env, &analysis.lambda)
}

/// Whether `err` only means the input stopped in the middle of a form.
pub fn is_incomplete(err: &Error) -> bool {
    match &err.kind {
        ErrorKind::Syntax { message, .. } => {
            message.contains("unexpected end of input") || message.contains("to close")
        }
        ErrorKind::Lexical { message } => message.starts_with("unterminated"),
        _ => false,
    }
}

/// A VM plus the read-analyze-generate-run loop around it.
pub struct Interpreter {
    vm: Vm,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Interpreter {
            vm: Vm::new(config),
        }
    }

    pub fn vm(&mut self) -> &mut Vm {
        &mut self.vm
    }

    /// Compile and run one form.
    pub fn eval_form(&mut self, syntax: &Syntax) -> LResult<Value> {
        let template = compile(syntax)?;
        debug!(
            "{}: {} instructions, {} registers, {} children",
            syntax.loc,
            template.code.len(),
            template.register_count,
            template.children.len()
        );
        if self.vm.config().trace_templates {
            debug!("\n{}", disassemble(&template));
        }
        self.vm.run(template, &[])
    }

    /// Evaluate every form of `source`, returning the last value.
    pub fn eval_source(&mut self, file: &str, source: &str) -> LResult<Value> {
        let mut last = Value::Void;
        for form in parser(file, source) {
            last = self.eval_form(&form?)?;
        }
        Ok(last)
    }

    pub fn eval_str(&mut self, source: &str) -> LResult<Value> {
        self.eval_source(STRING_SOURCE, source)
    }

    pub fn load_file(&mut self, path: &Path) -> LResult<Value> {
        let source = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("{}: {}", path.display(), e)))?;
        debug!("loading {} ({} bytes)", path.display(), source.len());
        self.eval_source(&path.display().to_string(), &source)
    }

    /// Disassembly of every form of `source`, without running anything.
    pub fn disassemble_source(&self, file: &str, source: &str) -> LResult<String> {
        let mut out = String::new();
        for form in parser(file, source) {
            let template = compile(&form?)?;
            out.push_str(&disassemble(&template));
        }
        Ok(out)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_forms_see_earlier_definitions() {
        let mut interp = Interpreter::new();
        let v = interp.eval_str("(define x 4) (define (sq n) (* n n)) (sq x)").unwrap();
        assert_eq!(v, Value::Int(16));
    }

    #[test]
    fn test_failed_form_keeps_globals() {
        let mut interp = Interpreter::new();
        interp.eval_str("(define x 1)").unwrap();
        assert!(interp.eval_str("(define x (car 5))").is_err());
        assert_eq!(interp.eval_str("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_incomplete_input() {
        let mut interp = Interpreter::new();
        let err = interp.eval_str("(+ 1").unwrap_err();
        assert!(is_incomplete(&err));
        let err = interp.eval_str("\"abc").unwrap_err();
        assert!(is_incomplete(&err));
        let err = interp.eval_str("(+ 1 'a)").unwrap_err();
        assert!(!is_incomplete(&err));
    }

    #[test]
    fn test_missing_file() {
        let mut interp = Interpreter::new();
        let err = interp.load_file(Path::new("/nonexistent/skein.scm")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io { .. }));
    }

    #[test]
    fn test_disassemble_source() {
        let interp = Interpreter::new();
        let text = interp.disassemble_source("t", "(define (f) 1)").unwrap();
        assert!(text.contains("defglobal f"));
        let text = interp.disassemble_source("t", "(+ 1 2) (car '(1))").unwrap();
        assert!(text.contains("(+ r"), "{}", text);
        assert!(text.contains("(car r"), "{}", text);
    }
}
