//! Mutable vectors.
use super::def::PrimitiveDef;
use super::list::{index_arg, list_items};
use crate::error::{Error, LResult};
use crate::value::{Arity, Value};
use crate::vm::Vm;

pub(crate) fn vector_ref(v: &Value, index: &Value) -> LResult<Value> {
    let Value::Vector(items) = v else {
        return Err(Error::contract("vector-ref", "vector?", v));
    };
    let k = index_arg("vector-ref", index)?;
    let items = items.borrow();
    items
        .get(k)
        .cloned()
        .ok_or_else(|| Error::range("vector-ref", k as i64, items.len(), "vector", v))
}

pub(crate) fn vector_set(v: &Value, index: &Value, value: &Value) -> LResult<Value> {
    let Value::Vector(items) = v else {
        return Err(Error::contract("vector-set!", "vector?", v));
    };
    let k = index_arg("vector-set!", index)?;
    let len = items.borrow().len();
    if k >= len {
        return Err(Error::range("vector-set!", k as i64, len, "vector", v));
    }
    items.borrow_mut()[k] = value.clone();
    Ok(Value::Void)
}

fn prim_vector(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::vector(args.to_vec()))
}

fn prim_make_vector(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let n = index_arg("make-vector", &args[0])?;
    let fill = args.get(1).cloned().unwrap_or(Value::Int(0));
    Ok(Value::vector(vec![fill; n]))
}

fn prim_vector_length(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    match &args[0] {
        Value::Vector(items) => Ok(Value::Int(items.borrow().len() as i64)),
        other => Err(Error::contract("vector-length", "vector?", other)),
    }
}

fn prim_vector_ref(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    vector_ref(&args[0], &args[1])
}

fn prim_vector_set(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    vector_set(&args[0], &args[1], &args[2])
}

fn prim_vector_to_list(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    match &args[0] {
        Value::Vector(items) => Ok(Value::list(items.borrow().clone())),
        other => Err(Error::contract("vector->list", "vector?", other)),
    }
}

fn prim_list_to_vector(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::vector(list_items("list->vector", &args[0])?))
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "vector",
        func: prim_vector,
        arity: Arity::AtLeast(0),
        doc: "Vector of the arguments.",
        params: &["xs"],
        category: "vector",
        example: "(vector 1 2) ;=> #(1 2)",
    },
    PrimitiveDef {
        name: "make-vector",
        func: prim_make_vector,
        arity: Arity::Range(1, 2),
        doc: "Vector of n copies of fill (default 0).",
        params: &["n", "fill"],
        category: "vector",
        example: "(make-vector 2 'a) ;=> #(a a)",
    },
    PrimitiveDef {
        name: "vector-length",
        func: prim_vector_length,
        arity: Arity::Exact(1),
        doc: "Number of slots.",
        params: &["vec"],
        category: "vector",
        example: "",
    },
    PrimitiveDef {
        name: "vector-ref",
        func: prim_vector_ref,
        arity: Arity::Exact(2),
        doc: "Element at a zero-based index.",
        params: &["vec", "k"],
        category: "vector",
        example: "(vector-ref #(a b) 1) ;=> b",
    },
    PrimitiveDef {
        name: "vector-set!",
        func: prim_vector_set,
        arity: Arity::Exact(3),
        doc: "Replace the element at an index.",
        params: &["vec", "k", "value"],
        category: "vector",
        example: "",
    },
    PrimitiveDef {
        name: "vector->list",
        func: prim_vector_to_list,
        arity: Arity::Exact(1),
        doc: "Elements as a fresh list.",
        params: &["vec"],
        category: "vector",
        example: "",
    },
    PrimitiveDef {
        name: "list->vector",
        func: prim_list_to_vector,
        arity: Arity::Exact(1),
        doc: "Elements of a proper list as a fresh vector.",
        params: &["list"],
        category: "vector",
        example: "",
    },
];
