//! Compiler invocation planning.

pub mod format;
pub mod invocation;

pub use invocation::{Invocation, InvocationBuilder};
