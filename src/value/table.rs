//! Mutable hash tables keyed by `eqv?`, with strings compared by content.

use crate::symbol::Symbol;
use crate::value::Value;
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::rc::Rc;

/// Hashable projection of a key value.
///
/// Atoms hash by value. Heap values other than strings hash by address;
/// the table keeps the original key alive, so an address stays unique for
/// as long as its entry exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Nil,
    Void,
    Bool(bool),
    Int(i64),
    Float(u64),
    Char(char),
    Str(Rc<str>),
    Symbol(Symbol),
    Identity(usize),
}

impl TableKey {
    pub fn from_value(value: &Value) -> TableKey {
        match value {
            Value::Nil => TableKey::Nil,
            Value::Void => TableKey::Void,
            Value::Bool(b) => TableKey::Bool(*b),
            Value::Int(n) => TableKey::Int(*n),
            Value::Float(x) => TableKey::Float(x.to_bits()),
            Value::Char(c) => TableKey::Char(*c),
            Value::Str(s) => TableKey::Str(s.clone()),
            Value::Symbol(s) => TableKey::Symbol(*s),
            Value::Pair(p) => TableKey::Identity(Rc::as_ptr(p) as *const () as usize),
            Value::Vector(v) => TableKey::Identity(Rc::as_ptr(v) as *const () as usize),
            Value::Table(t) => TableKey::Identity(Rc::as_ptr(t) as *const () as usize),
            Value::Syntax(s) => TableKey::Identity(Rc::as_ptr(s) as *const () as usize),
            Value::Closure(c) => TableKey::Identity(Rc::as_ptr(c) as *const () as usize),
            Value::Native(def) => TableKey::Identity(*def as *const _ as *const () as usize),
        }
    }
}

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Insertion-ordered table; iteration and printing follow insertion order.
#[derive(Debug, Default)]
pub struct HashTable {
    entries: FxIndexMap<TableKey, (Value, Value)>,
}

impl HashTable {
    pub fn new() -> Self {
        HashTable::default()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .get(&TableKey::from_value(key))
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &Value) -> bool {
        self.entries.contains_key(&TableKey::from_value(key))
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        self.entries
            .insert(TableKey::from_value(&key), (key, value));
    }

    /// Remove an entry, keeping the order of the others.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.entries
            .shift_remove(&TableKey::from_value(key))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_keys_compare_by_content() {
        let mut table = HashTable::new();
        table.insert(Value::string("k"), Value::Int(1));
        assert_eq!(table.get(&Value::string("k")), Some(&Value::Int(1)));
    }

    #[test]
    fn test_pair_keys_compare_by_identity() {
        let mut table = HashTable::new();
        let key = Value::list(vec![Value::Int(1)]);
        table.insert(key.clone(), Value::Int(1));
        assert!(table.contains(&key));
        assert!(!table.contains(&Value::list(vec![Value::Int(1)])));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut table = HashTable::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            table.insert(Value::symbol(name), Value::Int(i as i64));
        }
        assert_eq!(table.remove(&Value::symbol("b")), Some(Value::Int(1)));
        let keys: Vec<String> = table.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(table.len(), 2);
    }
}
