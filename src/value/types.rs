//! Core value types shared by natives and closures
//!
//! - `Arity` - how many arguments a callable accepts
//! - `NativeFn` - unified primitive function type

use crate::error::{ArityPolicy, LResult};
use crate::value::Value;
use crate::vm::Vm;
use std::fmt;

/// Function arity specification.
///
/// # Examples
///
/// ```
/// use skein::value::Arity;
/// assert!(Arity::Exact(2).matches(2));
/// assert!(!Arity::Exact(2).matches(1));
/// assert!(Arity::Range(1, 3).matches(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exact number of arguments required
    Exact(usize),
    /// At least this many arguments
    AtLeast(usize),
    /// Between min and max arguments (inclusive)
    Range(usize, usize),
}

impl Arity {
    /// Arity of a lambda list.
    /// - `has_rest`: whether the function collects extra arguments (`&rest` or `&key`)
    /// - `num_required`: parameters before `&optional`
    /// - `num_positional`: required plus optional parameters
    pub fn for_lambda(has_rest: bool, num_required: usize, num_positional: usize) -> Self {
        if has_rest {
            Arity::AtLeast(num_required)
        } else if num_required < num_positional {
            Arity::Range(num_required, num_positional)
        } else {
            Arity::Exact(num_positional)
        }
    }

    pub fn matches(&self, n: usize) -> bool {
        match self {
            Arity::Exact(expected) => n == *expected,
            Arity::AtLeast(min) => n >= *min,
            Arity::Range(min, max) => n >= *min && n <= *max,
        }
    }

    /// The policy to report when `given` arguments do not match.
    pub fn policy_for(&self, given: usize) -> ArityPolicy {
        match *self {
            Arity::Exact(n) => ArityPolicy::Exactly(n),
            Arity::AtLeast(n) => ArityPolicy::AtLeast(n),
            Arity::Range(min, _) if given < min => ArityPolicy::AtLeast(min),
            Arity::Range(_, max) => ArityPolicy::AtMost(max),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "{}+", n),
            Arity::Range(min, max) => write!(f, "{}-{}", min, max),
        }
    }
}

/// Signature shared by every native. Natives receive the VM so that
/// higher-order ones can call back into closures and output ones can
/// reach the configured writer.
pub type NativeFn = fn(&mut Vm, &[Value]) -> LResult<Value>;
