use super::def::PrimitiveDef;
use super::{
    arithmetic, comparison, display, higher_order, list, string, syntax, table, type_check, vector,
};
use crate::symbol::Symbol;
use crate::value::Value;
use crate::vm::Vm;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// All primitive tables. Each module exports a `const PRIMITIVES`
/// array; this list is the single place that enumerates them.
pub(crate) static ALL_TABLES: &[&[PrimitiveDef]] = &[
    arithmetic::PRIMITIVES,
    comparison::PRIMITIVES,
    display::PRIMITIVES,
    higher_order::PRIMITIVES,
    list::PRIMITIVES,
    string::PRIMITIVES,
    syntax::PRIMITIVES,
    table::PRIMITIVES,
    type_check::PRIMITIVES,
    vector::PRIMITIVES,
];

static BY_NAME: Lazy<FxHashMap<&'static str, &'static PrimitiveDef>> = Lazy::new(|| {
    ALL_TABLES
        .iter()
        .flat_map(|table| table.iter())
        .map(|def| (def.name, def))
        .collect()
});

/// The native registered under `name`, independent of any VM's globals.
pub fn lookup_native(name: &str) -> Option<&'static PrimitiveDef> {
    BY_NAME.get(name).copied()
}

/// Bind every native as a global of `vm`. Returns how many were bound.
pub fn register_primitives(vm: &mut Vm) -> usize {
    let mut count = 0;
    for table in ALL_TABLES {
        for def in *table {
            vm.set_global(Symbol::intern(def.name), Value::Native(def));
            count += 1;
        }
    }
    count
}
