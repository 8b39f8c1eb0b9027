//! proto-toolchain - per-language schema compiler toolchains
//!
//! This crate describes how a "generate bindings from `.proto` files" rule
//! drives the compiler for one target language: an immutable, shareable
//! toolchain descriptor, the set of sources the language runtime already
//! provides, and the ordered parameters of each compiler invocation.

pub mod builder;
pub mod core;
pub mod toolchain;
pub mod util;

#[cfg(test)]
pub mod test_support;

pub use crate::builder::{Invocation, InvocationBuilder};
pub use crate::core::{Artifact, ArtifactRoot, FilesToRun, ProtoSource, RuntimeTarget, SourceIdentity};
pub use crate::toolchain::{ProtoLangToolchain, ProvidedSourceSet, ToolchainBuilder, ToolchainInfo};
pub use crate::util::config::ToolchainsFile;
pub use crate::util::diagnostic::{
    ConfigurationError, PluginField, RequiredField, ToolchainError,
    UnsupportedConfiguration,
};
