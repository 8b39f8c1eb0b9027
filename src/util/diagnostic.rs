//! Toolchain misconfiguration errors.
//!
//! Both error kinds describe static problems in a toolchain definition. They
//! are never retried and always name the offending toolchain by its mnemonic
//! and progress message so the failing rule can be located.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// A required descriptor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    OutReplacementFormatFlag,
    ProtoCompiler,
    ProgressMessage,
    Mnemonic,
}

impl RequiredField {
    /// Field name as written in toolchain configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::OutReplacementFormatFlag => "out_replacement_format_flag",
            RequiredField::ProtoCompiler => "proto_compiler",
            RequiredField::ProgressMessage => "progress_message",
            RequiredField::Mnemonic => "mnemonic",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One half of the plugin pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginField {
    Plugin,
    PluginFormatFlag,
}

impl fmt::Display for PluginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginField::Plugin => f.write_str("plugin"),
            PluginField::PluginFormatFlag => f.write_str("plugin_format_flag"),
        }
    }
}

/// A toolchain descriptor could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error(
    "invalid proto toolchain {}: missing required `{field}`",
    describe(.mnemonic, .progress_message)
)]
#[diagnostic(
    code(proto_toolchain::config::missing_field),
    help("set a non-empty `{field}` on the toolchain definition")
)]
pub struct ConfigurationError {
    pub field: RequiredField,
    pub mnemonic: String,
    pub progress_message: String,
}

/// A toolchain sets a plugin without its format flag, or the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error(
    "unsupported proto toolchain {}: `{present}` is set but `{missing}` is not",
    describe(.mnemonic, .progress_message)
)]
#[diagnostic(
    code(proto_toolchain::invocation::plugin_mismatch),
    help("`plugin` and `plugin_format_flag` must be set together or not at all")
)]
pub struct UnsupportedConfiguration {
    pub present: PluginField,
    pub missing: PluginField,
    pub mnemonic: String,
    pub progress_message: String,
}

/// Any error produced while assembling toolchain parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ToolchainError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unsupported(#[from] UnsupportedConfiguration),
}

fn describe(mnemonic: &str, progress_message: &str) -> String {
    match (mnemonic.trim().is_empty(), progress_message.trim().is_empty()) {
        (false, false) => format!("`{}` ({})", mnemonic, progress_message),
        (false, true) => format!("`{}`", mnemonic),
        (true, false) => format!("({})", progress_message),
        (true, true) => "<unnamed>".to_string(),
    }
}
