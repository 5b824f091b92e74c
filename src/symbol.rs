//! Process-wide symbol interning.
//!
//! Names map to small integer handles; two symbols are identical iff their
//! names are equal. The table is created on first use, never evicts, and
//! is shared by every interpreter in the process. Lookups take a read lock,
//! inserts are serialized behind the write lock.

use bitflags::bitflags;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

bitflags! {
    /// Static facts about a name, computed once at intern time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u8 {
        /// Head of a special form (`define`, `lambda`, `if`, ...).
        const SPECIAL_FORM = 1 << 0;
        /// Self-evaluating `:name` symbol used for keyword arguments.
        const KEYWORD = 1 << 1;
        /// `&optional`, `&rest` or `&key` in a lambda list.
        const LAMBDA_LIST_MARKER = 1 << 2;
    }
}

const SPECIAL_FORMS: &[&str] = &[
    "quote",
    "quasiquote",
    "unquote",
    "unquote-splicing",
    "quote-syntax",
    "define",
    "lambda",
    "let",
    "let*",
    "if",
    "cond",
    "set!",
    "begin",
    "and",
    "or",
];

const LAMBDA_LIST_MARKERS: &[&str] = &["&optional", "&rest", "&key"];

/// Interned identifier handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

struct Entry {
    name: Arc<str>,
    flags: SymbolFlags,
}

#[derive(Default)]
struct SymbolTable {
    map: FxHashMap<Arc<str>, Symbol>,
    entries: Vec<Entry>,
}

impl SymbolTable {
    fn intern(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.map.get(name) {
            return sym;
        }
        let sym = Symbol(self.entries.len() as u32);
        let shared: Arc<str> = Arc::from(name);
        self.entries.push(Entry {
            name: shared.clone(),
            flags: classify(name),
        });
        self.map.insert(shared, sym);
        sym
    }
}

fn classify(name: &str) -> SymbolFlags {
    let mut flags = SymbolFlags::empty();
    if SPECIAL_FORMS.contains(&name) {
        flags |= SymbolFlags::SPECIAL_FORM;
    }
    if LAMBDA_LIST_MARKERS.contains(&name) {
        flags |= SymbolFlags::LAMBDA_LIST_MARKER;
    }
    if name.len() > 1 && name.starts_with(':') {
        flags |= SymbolFlags::KEYWORD;
    }
    flags
}

static TABLE: Lazy<RwLock<SymbolTable>> = Lazy::new(|| RwLock::new(SymbolTable::default()));

impl Symbol {
    pub fn intern(name: &str) -> Symbol {
        if let Some(&sym) = TABLE.read().map.get(name) {
            return sym;
        }
        TABLE.write().intern(name)
    }

    /// Look a name up without interning it.
    pub fn lookup(name: &str) -> Option<Symbol> {
        TABLE.read().map.get(name).copied()
    }

    pub fn name(self) -> Arc<str> {
        TABLE.read().entries[self.0 as usize].name.clone()
    }

    pub fn flags(self) -> SymbolFlags {
        TABLE.read().entries[self.0 as usize].flags
    }

    pub fn is_special_form(self) -> bool {
        self.flags().contains(SymbolFlags::SPECIAL_FORM)
    }

    pub fn is_keyword(self) -> bool {
        self.flags().contains(SymbolFlags::KEYWORD)
    }

    pub fn is_lambda_list_marker(self) -> bool {
        self.flags().contains(SymbolFlags::LAMBDA_LIST_MARKER)
    }

    /// The `:name` keyword paired with this symbol.
    pub fn keyword(self) -> Symbol {
        Symbol::intern(&format!(":{}", self.name()))
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Shorthand for [`Symbol::intern`].
pub fn intern(name: &str) -> Symbol {
    Symbol::intern(name)
}
