//! String primitives. Indices count characters, not bytes.
use super::def::PrimitiveDef;
use super::list::index_arg;
use crate::error::{Error, LResult};
use crate::value::{Arity, Value};
use crate::vm::Vm;

fn string_arg<'a>(op: &str, v: &'a Value) -> LResult<&'a str> {
    v.as_str().ok_or_else(|| Error::contract(op, "string?", v))
}

fn prim_string_length(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let s = string_arg("string-length", &args[0])?;
    Ok(Value::Int(s.chars().count() as i64))
}

fn prim_string_append(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let mut out = String::new();
    for arg in args {
        out.push_str(string_arg("string-append", arg)?);
    }
    Ok(Value::string(&out))
}

fn prim_string_ref(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let s = string_arg("string-ref", &args[0])?;
    let k = index_arg("string-ref", &args[1])?;
    s.chars().nth(k).map(Value::Char).ok_or_else(|| {
        Error::range("string-ref", k as i64, s.chars().count(), "string", &args[0])
    })
}

fn prim_substring(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let s = string_arg("substring", &args[0])?;
    let len = s.chars().count();
    let start = index_arg("substring", &args[1])?;
    let end = match args.get(2) {
        Some(v) => index_arg("substring", v)?,
        None => len,
    };
    if start > len {
        return Err(Error::range("substring", start as i64, len + 1, "string", &args[0]));
    }
    if end < start || end > len {
        return Err(Error::range("substring", end as i64, len + 1, "string", &args[0]));
    }
    let out: String = s.chars().skip(start).take(end - start).collect();
    Ok(Value::string(&out))
}

fn prim_number_to_string(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    if !args[0].is_number() {
        return Err(Error::contract("number->string", "number?", &args[0]));
    }
    Ok(Value::string(&args[0].to_string()))
}

fn prim_symbol_to_string(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    match args[0].as_symbol() {
        Some(sym) => Ok(Value::string(&sym.name())),
        None => Err(Error::contract("symbol->string", "symbol?", &args[0])),
    }
}

fn prim_string_to_symbol(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let s = string_arg("string->symbol", &args[0])?;
    Ok(Value::symbol(s))
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "string-length",
        func: prim_string_length,
        arity: Arity::Exact(1),
        doc: "Number of characters.",
        params: &["s"],
        category: "string",
        example: "(string-length \"héllo\") ;=> 5",
    },
    PrimitiveDef {
        name: "string-append",
        func: prim_string_append,
        arity: Arity::AtLeast(0),
        doc: "Concatenate strings.",
        params: &["strs"],
        category: "string",
        example: "(string-append \"a\" \"b\") ;=> \"ab\"",
    },
    PrimitiveDef {
        name: "string-ref",
        func: prim_string_ref,
        arity: Arity::Exact(2),
        doc: "Character at a zero-based index.",
        params: &["s", "k"],
        category: "string",
        example: "",
    },
    PrimitiveDef {
        name: "substring",
        func: prim_substring,
        arity: Arity::Range(2, 3),
        doc: "Characters from start (inclusive) to end (exclusive).",
        params: &["s", "start", "end"],
        category: "string",
        example: "(substring \"hello\" 1 3) ;=> \"el\"",
    },
    PrimitiveDef {
        name: "number->string",
        func: prim_number_to_string,
        arity: Arity::Exact(1),
        doc: "Printed form of a number.",
        params: &["n"],
        category: "string",
        example: "",
    },
    PrimitiveDef {
        name: "symbol->string",
        func: prim_symbol_to_string,
        arity: Arity::Exact(1),
        doc: "Name of a symbol.",
        params: &["sym"],
        category: "string",
        example: "",
    },
    PrimitiveDef {
        name: "string->symbol",
        func: prim_string_to_symbol,
        arity: Arity::Exact(1),
        doc: "Intern a string.",
        params: &["s"],
        category: "string",
        example: "",
    },
];
