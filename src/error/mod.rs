//! Unified error system
//!
//! Every stage returns [`LResult`]. Errors carry a tagged [`ErrorKind`] for
//! programmatic matching and render through one `Display` path:
//! an optional `file(line,col): ` prefix followed by the kind's message.

mod builders;
pub mod formatting;
mod types;

pub use crate::reader::Location;
pub use types::{ArityPolicy, Error, ErrorKind, LResult};
