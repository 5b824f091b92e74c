//! # Skein - a small Lisp with a register bytecode VM
//!
//! ## Quick Start
//!
//! ```
//! use skein::{Interpreter, Value};
//!
//! let mut interp = Interpreter::new();
//! let result = interp.eval_str("(define (sq x) (* x x)) (sq 7)").unwrap();
//! assert_eq!(result, Value::Int(49));
//! ```
//!
//! ## Architecture
//!
//! Each top-level form goes through:
//!
//! 1. **Reader** - characters to tokens to located [`syntax::Syntax`]
//! 2. **Analyzer** - special forms, primitive shapes and binding resolution
//!    into an [`ast::Ast`] with local, argument, upvalue and global references
//! 3. **Code generator** - one [`codegen::Template`] of register
//!    instructions per lambda
//! 4. **VM** - executes templates with explicit frames and shared cells for
//!    captured variables
//!
//! Errors from every stage are [`error::Error`] values rendered as
//! `file(line,col): message`.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod reader;
pub mod repl;
pub mod symbol;
pub mod syntax;
pub mod value;
pub mod vm;

pub use config::Config;
pub use error::{Error, ErrorKind, LResult};
pub use pipeline::{compile, Interpreter};
pub use primitives::register_primitives;
pub use reader::{read_one, read_str, Location};
pub use symbol::Symbol;
pub use value::Value;
pub use vm::Vm;
