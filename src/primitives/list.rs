//! Pairs and lists.
use super::def::PrimitiveDef;
use crate::error::{Error, LResult};
use crate::value::{Arity, Value};
use crate::vm::Vm;

pub(crate) fn car(v: &Value) -> LResult<Value> {
    match v {
        Value::Pair(p) => Ok(p.car.clone()),
        _ => Err(Error::contract("car", "pair?", v)),
    }
}

pub(crate) fn cdr(v: &Value) -> LResult<Value> {
    match v {
        Value::Pair(p) => Ok(p.cdr.clone()),
        _ => Err(Error::contract("cdr", "pair?", v)),
    }
}

/// Elements of a proper list, or a `list?` contract error naming `op`.
pub(crate) fn list_items(op: &str, v: &Value) -> LResult<Vec<Value>> {
    v.list_to_vec().ok_or_else(|| Error::contract(op, "list?", v))
}

pub(crate) fn index_arg(op: &str, v: &Value) -> LResult<usize> {
    match v {
        Value::Int(n) if *n >= 0 => Ok(*n as usize),
        _ => Err(Error::contract(op, "exact-nonnegative-integer?", v)),
    }
}

fn prim_car(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    car(&args[0])
}

fn prim_cdr(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    cdr(&args[0])
}

fn prim_cadr(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    match &args[0] {
        Value::Pair(p) => match &p.cdr {
            Value::Pair(q) => Ok(q.car.clone()),
            _ => Err(Error::contract("cadr", "(cons/c any/c pair?)", &args[0])),
        },
        other => Err(Error::contract("cadr", "(cons/c any/c pair?)", other)),
    }
}

fn prim_cddr(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    match &args[0] {
        Value::Pair(p) => match &p.cdr {
            Value::Pair(q) => Ok(q.cdr.clone()),
            _ => Err(Error::contract("cddr", "(cons/c any/c pair?)", &args[0])),
        },
        other => Err(Error::contract("cddr", "(cons/c any/c pair?)", other)),
    }
}

fn prim_caddr(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let items = args[0].list_to_vec().unwrap_or_default();
    match items.get(2) {
        Some(v) => Ok(v.clone()),
        None => Err(Error::contract("caddr", "(cons/c any/c (cons/c any/c pair?))", &args[0])),
    }
}

fn prim_cons(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}

fn prim_list(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::list(args.to_vec()))
}

fn prim_length(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Int(list_items("length", &args[0])?.len() as i64))
}

/// All arguments but the last must be proper lists; the last becomes the
/// tail unchanged.
pub(crate) fn append(args: &[Value]) -> LResult<Value> {
    let Some((last, init)) = args.split_last() else {
        return Ok(Value::Nil);
    };
    let mut items = Vec::new();
    for list in init {
        items.extend(list_items("append", list)?);
    }
    Ok(Value::list_with_tail(items, last.clone()))
}

fn prim_append(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    append(args)
}

fn prim_reverse(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let mut items = list_items("reverse", &args[0])?;
    items.reverse();
    Ok(Value::list(items))
}

fn prim_list_ref(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let index = index_arg("list-ref", &args[1])?;
    let items = list_items("list-ref", &args[0])?;
    items
        .get(index)
        .cloned()
        .ok_or_else(|| Error::range("list-ref", index as i64, items.len(), "list", &args[0]))
}

fn prim_is_null(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(args[0].is_nil()))
}

fn prim_is_pair(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Pair(_))))
}

fn prim_is_list(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(args[0].is_list()))
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "car",
        func: prim_car,
        arity: Arity::Exact(1),
        doc: "First element of a pair.",
        params: &["pair"],
        category: "list",
        example: "(car '(1 2)) ;=> 1",
    },
    PrimitiveDef {
        name: "cdr",
        func: prim_cdr,
        arity: Arity::Exact(1),
        doc: "Rest of a pair.",
        params: &["pair"],
        category: "list",
        example: "(cdr '(1 2)) ;=> (2)",
    },
    PrimitiveDef {
        name: "cadr",
        func: prim_cadr,
        arity: Arity::Exact(1),
        doc: "Second element.",
        params: &["pair"],
        category: "list",
        example: "",
    },
    PrimitiveDef {
        name: "cddr",
        func: prim_cddr,
        arity: Arity::Exact(1),
        doc: "Everything after the second element.",
        params: &["pair"],
        category: "list",
        example: "",
    },
    PrimitiveDef {
        name: "caddr",
        func: prim_caddr,
        arity: Arity::Exact(1),
        doc: "Third element of a proper list.",
        params: &["list"],
        category: "list",
        example: "",
    },
    PrimitiveDef {
        name: "cons",
        func: prim_cons,
        arity: Arity::Exact(2),
        doc: "Construct a pair.",
        params: &["car", "cdr"],
        category: "list",
        example: "(cons 1 '(2)) ;=> (1 2)",
    },
    PrimitiveDef {
        name: "list",
        func: prim_list,
        arity: Arity::AtLeast(0),
        doc: "Proper list of the arguments.",
        params: &["xs"],
        category: "list",
        example: "(list 1 2 3) ;=> (1 2 3)",
    },
    PrimitiveDef {
        name: "length",
        func: prim_length,
        arity: Arity::Exact(1),
        doc: "Number of elements in a proper list.",
        params: &["list"],
        category: "list",
        example: "",
    },
    PrimitiveDef {
        name: "append",
        func: prim_append,
        arity: Arity::AtLeast(0),
        doc: "Concatenate lists; the last argument is shared, not copied.",
        params: &["lists"],
        category: "list",
        example: "(append '(1) '(2 3)) ;=> (1 2 3)",
    },
    PrimitiveDef {
        name: "reverse",
        func: prim_reverse,
        arity: Arity::Exact(1),
        doc: "Reversed copy of a proper list.",
        params: &["list"],
        category: "list",
        example: "",
    },
    PrimitiveDef {
        name: "list-ref",
        func: prim_list_ref,
        arity: Arity::Exact(2),
        doc: "Element at a zero-based index.",
        params: &["list", "k"],
        category: "list",
        example: "(list-ref '(a b c) 1) ;=> b",
    },
    PrimitiveDef {
        name: "null?",
        func: prim_is_null,
        arity: Arity::Exact(1),
        doc: "Whether the value is the empty list.",
        params: &["x"],
        category: "list",
        example: "",
    },
    PrimitiveDef {
        name: "pair?",
        func: prim_is_pair,
        arity: Arity::Exact(1),
        doc: "Whether the value is a pair.",
        params: &["x"],
        category: "list",
        example: "",
    },
    PrimitiveDef {
        name: "list?",
        func: prim_is_list,
        arity: Arity::Exact(1),
        doc: "Whether the value is a proper list.",
        params: &["x"],
        category: "list",
        example: "",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Value {
        Value::list(ns.iter().map(|n| Value::Int(*n)).collect())
    }

    #[test]
    fn test_append_shares_last() {
        let out = append(&[ints(&[1, 2]), ints(&[3])]).unwrap();
        assert_eq!(out, ints(&[1, 2, 3]));
        let dotted = append(&[ints(&[1]), Value::Int(2)]).unwrap();
        assert_eq!(dotted.to_string(), "(1 . 2)");
        assert_eq!(append(&[]).unwrap(), Value::Nil);
        assert!(append(&[Value::Int(1), Value::Nil]).is_err());
    }

    #[test]
    fn test_car_contract() {
        let err = car(&Value::Int(5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "car: contract violation\n  expected: pair?\n  given: 5"
        );
    }
}
