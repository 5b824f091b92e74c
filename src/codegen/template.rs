//! Template and instruction definitions.

use crate::ast::Signature;
use crate::primitives::PrimOp;
use crate::reader::Location;
use crate::symbol::Symbol;
use crate::value::Value;
use std::rc::Rc;

/// Register index within a frame. Parameters and internal defines occupy
/// the low registers, temporaries follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(pub u16);

/// Register instruction set.
///
/// `Call` follows the classic register convention: the callee sits in `a`,
/// its arguments in `a+1 .. a+b-1`, and `c - 1` results are written back
/// starting at `a`. `b == 1` means no arguments, `c == 1` means no result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instr {
    LoadConst { dst: Reg, index: u32 },
    LoadNil { dst: Reg },
    LoadVoid { dst: Reg },
    LoadBool { dst: Reg, value: bool },
    Move { dst: Reg, src: Reg },
    /// Read a captured parameter or local through its cell.
    GetCell { dst: Reg, slot: Reg },
    SetCell { slot: Reg, src: Reg },
    GetUpval { dst: Reg, index: u16 },
    SetUpval { index: u16, src: Reg },
    GetGlobal { dst: Reg, name: Symbol },
    /// `set!` of a global; the global must exist.
    SetGlobal { name: Symbol, src: Reg },
    DefGlobal { name: Symbol, src: Reg },
    Jump { target: u32 },
    JumpIfFalse { test: Reg, target: u32 },
    JumpIfTrue { test: Reg, target: u32 },
    /// Skip a default initializer when the caller passed the argument.
    JumpIfSupplied { slot: Reg, target: u32 },
    Prim1 { op: PrimOp, dst: Reg, a: Reg },
    Prim2 { op: PrimOp, dst: Reg, a: Reg, b: Reg },
    Prim3 { op: PrimOp, dst: Reg, a: Reg, b: Reg, c: Reg },
    /// Instantiate `children[index]`, capturing per its upvalue sources.
    Closure { dst: Reg, index: u16 },
    Call { a: Reg, b: u16, c: u16 },
    /// Call in tail position: the callee's result is this frame's result.
    TailCall { a: Reg, b: u16 },
    Return { src: Reg },
}

/// Where a closure's captured cell comes from, relative to the frame that
/// executes the `Closure` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvalueSource {
    /// The cell of a parameter or local of the creating frame.
    ParentSlot(u16),
    /// An entry of the creating closure's own upvalue array.
    ParentUpvalue(u16),
}

/// Compiled form of one lambda.
#[derive(Debug)]
pub struct Template {
    pub name: Option<Symbol>,
    pub signature: Signature,
    pub code: Vec<Instr>,
    /// Source position of each instruction, parallel to `code`.
    pub locations: Vec<Location>,
    pub consts: Vec<Value>,
    pub children: Vec<Rc<Template>>,
    pub upvalues: Vec<UpvalueSource>,
    /// Registers holding parameters and internal defines.
    pub slot_count: u16,
    /// Total registers, temporaries included.
    pub register_count: u16,
}

impl Template {
    pub fn location(&self, pc: usize) -> Option<&Location> {
        self.locations.get(pc)
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => "#<procedure>".to_string(),
        }
    }
}
