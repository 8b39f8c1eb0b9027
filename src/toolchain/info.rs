//! Versioned introspection snapshot for build-configuration inspection tools.

use serde::Serialize;

use crate::core::files_to_run::FilesToRun;
use crate::core::proto_source::ProtoSource;
use crate::toolchain::ProtoLangToolchain;

/// Provider name reported to inspection tools.
pub const PROVIDER_NAME: &str = "ProtoLangToolchainInfo";

/// Bumped whenever a field is renamed or removed.
pub const SCHEMA_VERSION: u32 = 1;

/// Read-only, serializable view of a [`ProtoLangToolchain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainInfo {
    pub schema_version: u32,
    pub provider: &'static str,
    pub out_replacement_format_flag: String,
    pub plugin_format_flag: Option<String>,
    pub plugin: Option<ToolInfo>,
    pub runtime: Option<String>,
    pub proto_compiler: ToolInfo,
    pub protoc_opts: Vec<String>,
    pub progress_message: String,
    pub mnemonic: String,
    pub provided_proto_sources: Vec<ProtoSourceInfo>,
    pub forbidden_protos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub executable: String,
    pub runfiles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtoSourceInfo {
    pub source_file: String,
    pub original_source_file: String,
    pub source_root: String,
    pub import_path: String,
}

impl From<&FilesToRun> for ToolInfo {
    fn from(tool: &FilesToRun) -> Self {
        ToolInfo {
            executable: tool.executable_path().to_string(),
            runfiles: tool
                .runfile_artifacts()
                .iter()
                .map(|a| a.exec_path().to_string())
                .collect(),
        }
    }
}

impl From<&ProtoSource> for ProtoSourceInfo {
    fn from(source: &ProtoSource) -> Self {
        ProtoSourceInfo {
            source_file: source.source_file().exec_path().to_string(),
            original_source_file: source.original_source_file().exec_path().to_string(),
            source_root: source.source_root().to_string(),
            import_path: source.import_path().to_string(),
        }
    }
}

impl ToolchainInfo {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl ProtoLangToolchain {
    pub fn info(&self) -> ToolchainInfo {
        ToolchainInfo {
            schema_version: SCHEMA_VERSION,
            provider: PROVIDER_NAME,
            out_replacement_format_flag: self.out_replacement_format_flag().to_string(),
            plugin_format_flag: self.plugin_format_flag().map(str::to_string),
            plugin: self.plugin().map(ToolInfo::from),
            runtime: self.runtime().map(|r| r.label().to_string()),
            proto_compiler: ToolInfo::from(self.proto_compiler()),
            protoc_opts: self.protoc_opts().to_vec(),
            progress_message: self.progress_message().to_string(),
            mnemonic: self.mnemonic().to_string(),
            provided_proto_sources: self
                .provided_proto_sources()
                .iter()
                .map(ProtoSourceInfo::from)
                .collect(),
            forbidden_protos: self
                .forbidden_protos()
                .iter()
                .map(|a| a.exec_path().to_string())
                .collect(),
        }
    }
}
