//! Mutable hash tables.
use super::def::PrimitiveDef;
use crate::error::{Error, LResult};
use crate::value::{Arity, HashTable, Value};
use crate::vm::Vm;
use std::cell::RefCell;
use std::rc::Rc;

fn table_arg<'a>(op: &str, v: &'a Value) -> LResult<&'a Rc<RefCell<HashTable>>> {
    match v {
        Value::Table(t) => Ok(t),
        _ => Err(Error::contract(op, "hash?", v)),
    }
}

/// `(make-hash-table key value ...)`
fn prim_make_hash_table(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    if args.len() % 2 != 0 {
        return Err(Error::contract(
            "make-hash-table",
            "an even number of arguments",
            &Value::list(args.to_vec()),
        ));
    }
    let mut table = HashTable::new();
    for pair in args.chunks(2) {
        table.insert(pair[0].clone(), pair[1].clone());
    }
    Ok(Value::table(table))
}

/// `(hash-ref table key [default])`; a missing key without a default is an
/// error.
fn prim_hash_ref(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let table = table_arg("hash-ref", &args[0])?;
    if let Some(v) = table.borrow().get(&args[1]) {
        return Ok(v.clone());
    }
    match args.get(2) {
        Some(default) => Ok(default.clone()),
        None => Err(Error::contract("hash-ref", "a key present in the table", &args[1])),
    }
}

fn prim_hash_set(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let table = table_arg("hash-set!", &args[0])?;
    table.borrow_mut().insert(args[1].clone(), args[2].clone());
    Ok(Value::Void)
}

fn prim_hash_remove(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let table = table_arg("hash-remove!", &args[0])?;
    table.borrow_mut().remove(&args[1]);
    Ok(Value::Void)
}

fn prim_hash_count(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let table = table_arg("hash-count", &args[0])?;
    let n = table.borrow().len();
    Ok(Value::Int(n as i64))
}

fn prim_hash_keys(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let table = table_arg("hash-keys", &args[0])?;
    let keys: Vec<Value> = table.borrow().keys().cloned().collect();
    Ok(Value::list(keys))
}

fn prim_hash_has_key(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let table = table_arg("hash-has-key?", &args[0])?;
    let found = table.borrow().contains(&args[1]);
    Ok(Value::Bool(found))
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "make-hash-table",
        func: prim_make_hash_table,
        arity: Arity::AtLeast(0),
        doc: "New table from alternating keys and values.",
        params: &["kvs"],
        category: "hash",
        example: "(make-hash-table 'a 1) ;=> #hash((a . 1))",
    },
    PrimitiveDef {
        name: "hash-ref",
        func: prim_hash_ref,
        arity: Arity::Range(2, 3),
        doc: "Value for key, or default when absent.",
        params: &["table", "key", "default"],
        category: "hash",
        example: "(hash-ref (make-hash-table) 'x 0) ;=> 0",
    },
    PrimitiveDef {
        name: "hash-set!",
        func: prim_hash_set,
        arity: Arity::Exact(3),
        doc: "Insert or replace an entry.",
        params: &["table", "key", "value"],
        category: "hash",
        example: "",
    },
    PrimitiveDef {
        name: "hash-remove!",
        func: prim_hash_remove,
        arity: Arity::Exact(2),
        doc: "Delete an entry if present.",
        params: &["table", "key"],
        category: "hash",
        example: "",
    },
    PrimitiveDef {
        name: "hash-count",
        func: prim_hash_count,
        arity: Arity::Exact(1),
        doc: "Number of entries.",
        params: &["table"],
        category: "hash",
        example: "",
    },
    PrimitiveDef {
        name: "hash-keys",
        func: prim_hash_keys,
        arity: Arity::Exact(1),
        doc: "Keys in insertion order.",
        params: &["table"],
        category: "hash",
        example: "",
    },
    PrimitiveDef {
        name: "hash-has-key?",
        func: prim_hash_has_key,
        arity: Arity::Exact(2),
        doc: "Whether the key has an entry.",
        params: &["table", "key"],
        category: "hash",
        example: "",
    },
];
