//! The value inspector.
//!
//! `Display` on [`Value`] is the `write` representation used by the REPL
//! and by every error message: strings quoted, characters as `#\x`, lists
//! parenthesized, vectors `#(...)`, hash tables `#hash(...)`.
//! [`Value::display_string`] is the `display` representation, which prints
//! strings and characters raw.
//!
//! A vector or table reached again while it is still being printed renders
//! as `...`.

use super::{Pair, Value};
use crate::reader::token::char_name;
use std::fmt;
use std::rc::Rc;

/// Containers currently being printed, innermost last.
type Active = Vec<*const ()>;

pub fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        write!(f, "+nan.0")
    } else if x.is_infinite() {
        write!(f, "{}", if x > 0.0 { "+inf.0" } else { "-inf.0" })
    } else {
        // Debug always keeps a `.` or an exponent, so the text reads back as a float.
        write!(f, "{:?}", x)
    }
}

pub fn write_char_literal(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match char_name(c) {
        Some(name) => write!(f, "#\\{}", name),
        None if c.is_control() => write!(f, "#\\x{:x}", c as u32),
        None => write!(f, "#\\{}", c),
    }
}

pub fn write_string_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            '\0' => write!(f, "\\0")?,
            '\u{7}' => write!(f, "\\a")?,
            c if c.is_control() => write!(f, "\\x{:x};", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

struct Render<'a> {
    value: &'a Value,
    write: bool,
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.value, self.write, &mut Active::new())
    }
}

fn render(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    write: bool,
    active: &mut Active,
) -> fmt::Result {
    match value {
        Value::Nil => write!(f, "()"),
        Value::Void => write!(f, "#<void>"),
        Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
        Value::Int(n) => write!(f, "{}", n),
        Value::Float(x) => write_float(f, *x),
        Value::Char(c) if write => write_char_literal(f, *c),
        Value::Char(c) => write!(f, "{}", c),
        Value::Str(s) if write => write_string_literal(f, s),
        Value::Str(s) => write!(f, "{}", s),
        Value::Symbol(s) => write!(f, "{}", s),
        Value::Pair(p) => render_pair(f, p, write, active),
        Value::Vector(items) => {
            let ptr = Rc::as_ptr(items) as *const ();
            if active.contains(&ptr) {
                return write!(f, "...");
            }
            active.push(ptr);
            write!(f, "#(")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                render(f, item, write, active)?;
            }
            active.pop();
            write!(f, ")")
        }
        Value::Table(table) => {
            let ptr = Rc::as_ptr(table) as *const ();
            if active.contains(&ptr) {
                return write!(f, "...");
            }
            active.push(ptr);
            write!(f, "#hash(")?;
            for (i, (k, v)) in table.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "(")?;
                render(f, k, write, active)?;
                write!(f, " . ")?;
                render(f, v, write, active)?;
                write!(f, ")")?;
            }
            active.pop();
            write!(f, ")")
        }
        Value::Syntax(s) => write!(
            f,
            "#<syntax:{}:{}:{} {}>",
            s.loc.file, s.loc.line, s.loc.col, s
        ),
        Value::Closure(c) => match c.name() {
            Some(name) => write!(f, "#<procedure:{}>", name),
            None => write!(f, "#<procedure>"),
        },
        Value::Native(def) => write!(f, "#<procedure:{}>", def.name),
    }
}

fn render_pair(
    f: &mut fmt::Formatter<'_>,
    pair: &Pair,
    write: bool,
    active: &mut Active,
) -> fmt::Result {
    write!(f, "(")?;
    render(f, &pair.car, write, active)?;
    let mut rest = &pair.cdr;
    loop {
        match rest {
            Value::Nil => break,
            Value::Pair(p) => {
                write!(f, " ")?;
                render(f, &p.car, write, active)?;
                rest = &p.cdr;
            }
            other => {
                write!(f, " . ")?;
                render(f, other, write, active)?;
                break;
            }
        }
    }
    write!(f, ")")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self, true, &mut Active::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self, true, &mut Active::new())
    }
}

impl Value {
    /// The `display` rendering: like `write` but strings and characters
    /// appear without quoting.
    pub fn display_string(&self) -> String {
        Render {
            value: self,
            write: false,
        }
        .to_string()
    }
}
