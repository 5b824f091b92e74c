//! Procedures that call back into the VM.
use super::def::PrimitiveDef;
use super::list::list_items;
use crate::error::{Error, LResult};
use crate::value::{Arity, Value};
use crate::vm::Vm;

fn procedure_arg(op: &str, v: &Value) -> LResult<()> {
    if v.is_procedure() {
        Ok(())
    } else {
        Err(Error::contract(op, "procedure?", v))
    }
}

/// `(apply f a ... lst)`
fn prim_apply(vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    procedure_arg("apply", &args[0])?;
    let (last, middle) = match args[1..].split_last() {
        Some(split) => split,
        None => return vm.call_value(&args[0], Vec::new()),
    };
    let mut call_args = middle.to_vec();
    call_args.extend(list_items("apply", last)?);
    vm.call_value(&args[0], call_args)
}

/// Rows of equal-length lists, transposed into argument vectors.
fn transpose(op: &str, lists: &[Value]) -> LResult<Vec<Vec<Value>>> {
    let columns = lists
        .iter()
        .map(|l| list_items(op, l))
        .collect::<LResult<Vec<_>>>()?;
    let len = columns.first().map_or(0, Vec::len);
    if let Some(i) = columns.iter().position(|c| c.len() != len) {
        return Err(Error::contract(op, "lists of the same length", &lists[i]));
    }
    Ok((0..len)
        .map(|row| columns.iter().map(|c| c[row].clone()).collect())
        .collect())
}

fn prim_map(vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    procedure_arg("map", &args[0])?;
    let mut out = Vec::new();
    for row in transpose("map", &args[1..])? {
        out.push(vm.call_value(&args[0], row)?);
    }
    Ok(Value::list(out))
}

fn prim_for_each(vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    procedure_arg("for-each", &args[0])?;
    for row in transpose("for-each", &args[1..])? {
        vm.call_value(&args[0], row)?;
    }
    Ok(Value::Void)
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "apply",
        func: prim_apply,
        arity: Arity::AtLeast(1),
        doc: "Call f with the given arguments followed by the elements of a list.",
        params: &["f", "args", "list"],
        category: "higher-order",
        example: "(apply + 1 '(2 3)) ;=> 6",
    },
    PrimitiveDef {
        name: "map",
        func: prim_map,
        arity: Arity::AtLeast(2),
        doc: "Results of f on corresponding elements, as a list.",
        params: &["f", "lists"],
        category: "higher-order",
        example: "(map + '(1 2) '(10 20)) ;=> (11 22)",
    },
    PrimitiveDef {
        name: "for-each",
        func: prim_for_each,
        arity: Arity::AtLeast(2),
        doc: "Call f on corresponding elements for effect.",
        params: &["f", "lists"],
        category: "higher-order",
        example: "",
    },
];
