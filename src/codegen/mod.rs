//! Register bytecode generation
//!
//! Lowers an analyzed [`Lambda`](crate::ast::Lambda) into a [`Template`]:
//! a flat instruction vector with a parallel table of source locations,
//! a constant pool and one child template per nested lambda.

mod disasm;
mod generate;
mod template;

pub use disasm::disassemble;
pub use generate::generate;
pub use template::{Instr, Reg, Template, UpvalueSource};
