//! Syntax object accessors, for values produced by `quote-syntax`.
use super::def::PrimitiveDef;
use crate::error::{Error, LResult};
use crate::syntax::Syntax;
use crate::value::{Arity, Value};
use crate::vm::Vm;
use std::rc::Rc;

fn syntax_arg<'a>(op: &str, v: &'a Value) -> LResult<&'a Rc<Syntax>> {
    match v {
        Value::Syntax(s) => Ok(s),
        _ => Err(Error::contract(op, "syntax?", v)),
    }
}

fn prim_is_syntax(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Syntax(_))))
}

fn prim_syntax_to_datum(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(syntax_arg("syntax->datum", &args[0])?.to_value())
}

fn prim_syntax_line(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Int(syntax_arg("syntax-line", &args[0])?.loc.line as i64))
}

fn prim_syntax_column(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Int(syntax_arg("syntax-column", &args[0])?.loc.col as i64))
}

fn prim_syntax_source(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::string(&syntax_arg("syntax-source", &args[0])?.loc.file))
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "syntax?",
        func: prim_is_syntax,
        arity: Arity::Exact(1),
        doc: "Whether the value is a syntax object.",
        params: &["x"],
        category: "syntax",
        example: "(syntax? (quote-syntax a)) ;=> #t",
    },
    PrimitiveDef {
        name: "syntax->datum",
        func: prim_syntax_to_datum,
        arity: Arity::Exact(1),
        doc: "Strip locations, yielding the quoted datum.",
        params: &["stx"],
        category: "syntax",
        example: "(syntax->datum (quote-syntax (a b))) ;=> (a b)",
    },
    PrimitiveDef {
        name: "syntax-line",
        func: prim_syntax_line,
        arity: Arity::Exact(1),
        doc: "1-based source line.",
        params: &["stx"],
        category: "syntax",
        example: "",
    },
    PrimitiveDef {
        name: "syntax-column",
        func: prim_syntax_column,
        arity: Arity::Exact(1),
        doc: "1-based source column.",
        params: &["stx"],
        category: "syntax",
        example: "",
    },
    PrimitiveDef {
        name: "syntax-source",
        func: prim_syntax_source,
        arity: Arity::Exact(1),
        doc: "Name of the source the syntax was read from.",
        params: &["stx"],
        category: "syntax",
        example: "",
    },
];
