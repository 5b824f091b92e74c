use std::fmt;
use std::sync::Arc;

/// A position in a named source: 1-based line and column plus the
/// 0-based character offset from the start of the stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Arc<str>,
    pub line: usize,
    pub col: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(file: &str, line: usize, col: usize, offset: usize) -> Self {
        Location {
            file: Arc::from(file),
            line,
            col,
            offset,
        }
    }

    /// First character of `file`.
    pub fn start(file: &str) -> Self {
        Location::new(file, 1, 1, 0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.file, self.line, self.col)
    }
}
