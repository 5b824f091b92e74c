//! Human-readable listing of a template and its children.

use super::template::{Instr, Template, UpvalueSource};
use std::fmt::Write;

/// Render `template` and every nested template, one instruction per line.
pub fn disassemble(template: &Template) -> String {
    let mut out = String::new();
    write_template(&mut out, template, 0);
    out
}

fn write_template(out: &mut String, t: &Template, indent: usize) {
    let pad = " ".repeat(indent);
    let _ = writeln!(
        out,
        "{}{} arity={} slots={} registers={}",
        pad,
        t.display_name(),
        t.signature.arity(),
        t.slot_count,
        t.register_count
    );
    if !t.upvalues.is_empty() {
        let sources: Vec<String> = t
            .upvalues
            .iter()
            .map(|u| match u {
                UpvalueSource::ParentSlot(s) => format!("slot {}", s),
                UpvalueSource::ParentUpvalue(i) => format!("upval {}", i),
            })
            .collect();
        let _ = writeln!(out, "{}  upvalues: {}", pad, sources.join(", "));
    }
    for (pc, instr) in t.code.iter().enumerate() {
        let line = t.location(pc).map_or(0, |l| l.line);
        let _ = writeln!(out, "{}  {:4} [{:3}] {}", pad, pc, line, render(t, instr));
    }
    for child in &t.children {
        write_template(out, child, indent + 2);
    }
}

fn render(t: &Template, instr: &Instr) -> String {
    match *instr {
        Instr::LoadConst { dst, index } => {
            let value = t
                .consts
                .get(index as usize)
                .map_or_else(|| "?".to_string(), |v| v.to_string());
            format!("const     r{} <- {}", dst.0, value)
        }
        Instr::LoadNil { dst } => format!("nil       r{}", dst.0),
        Instr::LoadVoid { dst } => format!("void      r{}", dst.0),
        Instr::LoadBool { dst, value } => {
            format!("bool      r{} <- {}", dst.0, if value { "#t" } else { "#f" })
        }
        Instr::Move { dst, src } => format!("move      r{} <- r{}", dst.0, src.0),
        Instr::GetCell { dst, slot } => format!("getcell   r{} <- [r{}]", dst.0, slot.0),
        Instr::SetCell { slot, src } => format!("setcell   [r{}] <- r{}", slot.0, src.0),
        Instr::GetUpval { dst, index } => format!("getupval  r{} <- u{}", dst.0, index),
        Instr::SetUpval { index, src } => format!("setupval  u{} <- r{}", index, src.0),
        Instr::GetGlobal { dst, name } => format!("getglobal r{} <- {}", dst.0, name),
        Instr::SetGlobal { name, src } => format!("setglobal {} <- r{}", name, src.0),
        Instr::DefGlobal { name, src } => format!("defglobal {} <- r{}", name, src.0),
        Instr::Jump { target } => format!("jump      {}", target),
        Instr::JumpIfFalse { test, target } => format!("jumpf     r{} {}", test.0, target),
        Instr::JumpIfTrue { test, target } => format!("jumpt     r{} {}", test.0, target),
        Instr::JumpIfSupplied { slot, target } => {
            format!("supplied  r{} {}", slot.0, target)
        }
        Instr::Prim1 { op, dst, a } => format!("prim      r{} <- ({} r{})", dst.0, op, a.0),
        Instr::Prim2 { op, dst, a, b } => {
            format!("prim      r{} <- ({} r{} r{})", dst.0, op, a.0, b.0)
        }
        Instr::Prim3 { op, dst, a, b, c } => {
            format!("prim      r{} <- ({} r{} r{} r{})", dst.0, op, a.0, b.0, c.0)
        }
        Instr::Closure { dst, index } => format!("closure   r{} <- child {}", dst.0, index),
        Instr::Call { a, b, c } => format!("call      A={} B={} C={}", a.0, b, c),
        Instr::TailCall { a, b } => format!("tailcall  A={} B={}", a.0, b),
        Instr::Return { src } => format!("return    r{}", src.0),
    }
}
