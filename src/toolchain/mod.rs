//! Per-language proto toolchains.
//!
//! A [`ProtoLangToolchain`] describes how to run the schema compiler for one
//! target language. [`ProvidedSourceSet`] tracks the sources that language's
//! runtime already ships, and [`ToolchainInfo`] is the versioned snapshot
//! handed to inspection tools.

mod descriptor;
pub mod info;
mod provided;

pub use descriptor::{ProtoLangToolchain, ToolchainBuilder};
pub use info::{ProtoSourceInfo, ToolInfo, ToolchainInfo};
pub use provided::ProvidedSourceSet;
