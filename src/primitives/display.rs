//! Output primitives. They write to the VM's configured output.
use super::def::PrimitiveDef;
use crate::error::LResult;
use crate::value::{Arity, Value};
use crate::vm::Vm;

fn prim_display(vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    write!(vm.output(), "{}", args[0].display_string())?;
    Ok(Value::Void)
}

fn prim_write(vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    write!(vm.output(), "{}", args[0])?;
    Ok(Value::Void)
}

fn prim_newline(vm: &mut Vm, _args: &[Value]) -> LResult<Value> {
    writeln!(vm.output())?;
    vm.output().flush()?;
    Ok(Value::Void)
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "display",
        func: prim_display,
        arity: Arity::Exact(1),
        doc: "Print a value; strings and characters are printed raw.",
        params: &["x"],
        category: "io",
        example: "(display \"hi\") ; prints hi",
    },
    PrimitiveDef {
        name: "write",
        func: prim_write,
        arity: Arity::Exact(1),
        doc: "Print a value in its readable form.",
        params: &["x"],
        category: "io",
        example: "(write \"hi\") ; prints \"hi\"",
    },
    PrimitiveDef {
        name: "newline",
        func: prim_newline,
        arity: Arity::Exact(0),
        doc: "Print a line break and flush.",
        params: &[],
        category: "io",
        example: "",
    },
];
