//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod hash;
pub mod interning;

pub use config::ToolchainsFile;
pub use diagnostic::{ConfigurationError, ToolchainError, UnsupportedConfiguration};
pub use interning::InternedPath;
