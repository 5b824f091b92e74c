//! Native procedures and opcode-level operators.
//!
//! Every native is declared in a `PRIMITIVES` table of its module and bound
//! as a global by [`register_primitives`]. [`PrimOp`] covers the subset the
//! analyzer compiles to single instructions.

pub mod arithmetic;
pub mod comparison;
pub mod def;
pub mod display;
pub mod higher_order;
pub mod list;
mod ops;
pub mod registration;
pub mod string;
pub mod syntax;
pub mod table;
pub mod type_check;
pub mod vector;

pub use def::PrimitiveDef;
pub use ops::PrimOp;
pub use registration::{lookup_native, register_primitives};
