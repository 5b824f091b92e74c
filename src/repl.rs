//! REPL (Read-Eval-Print Loop) with readline support
//!
//! - Command history persisted to `~/.skein_history`
//! - Forms may span several lines; input is buffered until it parses
//! - `:doc NAME` prints a native's documentation, `:globals` lists globals

use crate::error::formatting::format_error_with_source;
use crate::pipeline::{is_incomplete, Interpreter};
use crate::primitives::lookup_native;
use crate::reader::parser;
use crate::value::Value;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::PathBuf;

const HISTORY_FILE: &str = ".skein_history";
const PROMPT: &str = "skein> ";
const CONTINUATION: &str = "   ... ";
const SOURCE_NAME: &str = "repl";

/// REPL editor with readline support
pub struct Repl {
    editor: DefaultEditor,
}

impl Repl {
    pub fn new() -> RustylineResult<Self> {
        let mut editor = DefaultEditor::new()?;
        let _ = editor.load_history(&Self::history_file_path());
        Ok(Self { editor })
    }

    fn history_file_path() -> PathBuf {
        match dirs_home() {
            Some(home) => home.join(HISTORY_FILE),
            None => PathBuf::from(HISTORY_FILE),
        }
    }

    /// Read, evaluate and print until end of input.
    pub fn run(&mut self, interp: &mut Interpreter) -> RustylineResult<()> {
        let mut buffer = String::new();
        loop {
            let prompt = if buffer.is_empty() { PROMPT } else { CONTINUATION };
            let line = match self.editor.readline(prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    buffer.clear();
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    self.finalize();
                    return Err(e);
                }
            };

            if buffer.is_empty() {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if let Some(command) = trimmed.strip_prefix(':') {
                    let _ = self.editor.add_history_entry(trimmed);
                    if !self.command(interp, command) {
                        break;
                    }
                    continue;
                }
            }

            buffer.push_str(&line);
            buffer.push('\n');
            if still_open(&buffer) {
                continue;
            }
            let _ = self.editor.add_history_entry(buffer.trim_end());
            eval_and_print(interp, &buffer);
            buffer.clear();
        }
        self.finalize();
        Ok(())
    }

    /// Handle a `:command`. Returns false to leave the loop.
    fn command(&mut self, interp: &mut Interpreter, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("quit") | Some("q"), _) => return false,
            (Some("doc"), Some(name)) => match lookup_native(name) {
                Some(def) => println!("{}", def.describe()),
                None => println!("no documentation for `{}`", name),
            },
            (Some("globals"), _) => {
                let names: Vec<String> = interp
                    .vm()
                    .global_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                println!("{}", names.join(" "));
            }
            (Some("disasm"), _) => {
                let source = command.trim_start_matches("disasm").trim();
                match interp.disassemble_source(SOURCE_NAME, source) {
                    Ok(text) => print!("{}", text),
                    Err(e) => eprintln!("{}", format_error_with_source(&e, source)),
                }
            }
            _ => println!("commands: :doc NAME, :globals, :disasm FORM, :quit"),
        }
        true
    }

    fn finalize(&mut self) {
        let _ = self.editor.save_history(&Self::history_file_path());
    }
}

/// True while `buffer` ends inside an unfinished form.
fn still_open(buffer: &str) -> bool {
    for form in parser(SOURCE_NAME, buffer) {
        match form {
            Ok(_) => {}
            Err(e) => return is_incomplete(&e),
        }
    }
    false
}

fn eval_and_print(interp: &mut Interpreter, source: &str) {
    match interp.eval_source(SOURCE_NAME, source) {
        Ok(Value::Void) => {}
        Ok(value) => println!("{}", value),
        Err(e) => {
            debug!("form failed: {:?}", e.kind);
            eprintln!("{}", format_error_with_source(&e, source));
        }
    }
    let _ = interp.vm().output().flush();
}

fn dirs_home() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(any(unix, windows)))]
    {
        None
    }
}
