//! Type predicates
use super::def::PrimitiveDef;
use crate::error::LResult;
use crate::value::{Arity, Value};
use crate::vm::Vm;

macro_rules! predicate {
    ($fn_name:ident, $pattern:pat) => {
        fn $fn_name(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
            Ok(Value::Bool(matches!(&args[0], $pattern)))
        }
    };
}

predicate!(prim_is_number, Value::Int(_) | Value::Float(_));
predicate!(prim_is_integer, Value::Int(_));
predicate!(prim_is_float, Value::Float(_));
predicate!(prim_is_string, Value::Str(_));
predicate!(prim_is_boolean, Value::Bool(_));
predicate!(prim_is_char, Value::Char(_));
predicate!(prim_is_vector, Value::Vector(_));
predicate!(prim_is_hash, Value::Table(_));
predicate!(prim_is_procedure, Value::Closure(_) | Value::Native(_));
predicate!(prim_is_void, Value::Void);

fn prim_is_symbol(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(args[0].as_symbol().is_some()))
}

fn prim_is_keyword(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(args[0].as_symbol().is_some_and(|s| s.is_keyword())))
}

const fn predicate_def(name: &'static str, func: crate::value::NativeFn, doc: &'static str) -> PrimitiveDef {
    PrimitiveDef {
        name,
        func,
        arity: Arity::Exact(1),
        doc,
        params: &["x"],
        category: "type",
        example: "",
    }
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    predicate_def("number?", prim_is_number, "Integer or float."),
    predicate_def("integer?", prim_is_integer, "Fixed-width integer."),
    predicate_def("float?", prim_is_float, "Floating-point number."),
    predicate_def("string?", prim_is_string, "String."),
    predicate_def("symbol?", prim_is_symbol, "Symbol, keywords included."),
    predicate_def("keyword?", prim_is_keyword, "Symbol whose name starts with `:`."),
    predicate_def("boolean?", prim_is_boolean, "#t or #f."),
    predicate_def("char?", prim_is_char, "Character."),
    predicate_def("vector?", prim_is_vector, "Vector."),
    predicate_def("hash?", prim_is_hash, "Hash table."),
    predicate_def("procedure?", prim_is_procedure, "Closure or native procedure."),
    predicate_def("void?", prim_is_void, "The void value."),
];
