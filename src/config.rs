//! Interpreter configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default bound on nested procedure frames.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Runtime limits and diagnostics switches.
///
/// ```
/// use skein::Config;
/// let config = Config::default().with_max_call_depth(200).with_instruction_limit(1_000_000);
/// assert_eq!(config.max_call_depth, 200);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Frames allowed at once, counting natives re-entering the VM.
    pub max_call_depth: usize,
    /// Abort a run after roughly this many instructions.
    pub instruction_limit: Option<u64>,
    /// Set from another thread to stop the running program.
    pub interrupt: Option<Arc<AtomicBool>>,
    /// Log each generated template's disassembly at `debug` level.
    pub trace_templates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            instruction_limit: None,
            interrupt: None,
            trace_templates: false,
        }
    }
}

impl Config {
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_instruction_limit(mut self, limit: u64) -> Self {
        self.instruction_limit = Some(limit);
        self
    }

    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn with_trace_templates(mut self, on: bool) -> Self {
        self.trace_templates = on;
        self
    }

    pub(crate) fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
