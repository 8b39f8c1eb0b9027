//! Toolchain definition files.
//!
//! Toolchains can be declared in TOML, one table per target language:
//!
//! ```toml
//! [toolchain.cpp]
//! out_replacement_format_flag = "--cpp_out=%s"
//! proto_compiler = { path = "bazel-out/host/bin/protoc" }
//! runtime = "//:protobuf"
//! progress_message = "Generating C++ proto_library"
//! mnemonic = "GenProtoCc"
//!
//! [[toolchain.cpp.provided_proto_sources]]
//! path = "src/google/protobuf/any.proto"
//! source_root = "src"
//! ```
//!
//! Two locations are read:
//! - Global: `~/.proto-toolchain/toolchains.toml`
//! - Project: `.proto-toolchain/toolchains.toml`
//!
//! A language defined in the project file replaces the global definition of
//! that language as a whole.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::artifact::{Artifact, ArtifactRoot};
use crate::core::files_to_run::{FilesToRun, RuntimeTarget};
use crate::core::proto_source::ProtoSource;
use crate::toolchain::ProtoLangToolchain;
use crate::util::diagnostic::ConfigurationError;

/// Contents of a toolchain definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainsFile {
    /// Toolchain definitions keyed by language
    pub toolchain: BTreeMap<String, ToolchainDef>,
}

/// One toolchain as written in configuration.
///
/// Required fields are optional here so a missing value surfaces as a
/// descriptor construction error naming the field, not a TOML parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainDef {
    pub out_replacement_format_flag: Option<String>,
    pub plugin_format_flag: Option<String>,
    pub plugin: Option<ExecutableDef>,
    pub runtime: Option<String>,
    pub provided_proto_sources: Vec<ProvidedSourceDef>,
    pub proto_compiler: Option<ExecutableDef>,
    pub protoc_opts: Vec<String>,
    pub progress_message: Option<String>,
    pub mnemonic: Option<String>,
}

/// An executable and its runfiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutableDef {
    pub path: String,
    #[serde(default)]
    pub runfiles: Vec<String>,
    #[serde(default = "derived_root")]
    pub root: ArtifactRoot,
}

/// A source shipped by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidedSourceDef {
    pub path: String,
    #[serde(default)]
    pub source_root: String,
    /// Original file when `path` is a virtual-import copy
    #[serde(default)]
    pub original: Option<String>,
}

fn derived_root() -> ArtifactRoot {
    ArtifactRoot::Derived
}

impl ExecutableDef {
    fn to_files_to_run(&self) -> FilesToRun {
        FilesToRun::new(Artifact::new(&self.path, self.root))
            .runfiles(self.runfiles.iter().map(|r| Artifact::new(r, self.root)))
    }
}

impl ProvidedSourceDef {
    fn to_proto_source(&self) -> ProtoSource {
        match &self.original {
            Some(original) => ProtoSource::with_original(
                Artifact::derived(&self.path),
                Artifact::source(original),
                self.source_root.clone(),
            ),
            None => ProtoSource::new(Artifact::source(&self.path), self.source_root.clone()),
        }
    }
}

impl ToolchainDef {
    /// Build the immutable descriptor for this definition.
    pub fn to_descriptor(&self) -> Result<ProtoLangToolchain, ConfigurationError> {
        let provided: Vec<ProtoSource> = self
            .provided_proto_sources
            .iter()
            .map(ProvidedSourceDef::to_proto_source)
            .collect();

        ProtoLangToolchain::create(
            self.out_replacement_format_flag.clone().unwrap_or_default(),
            self.plugin_format_flag.clone(),
            self.plugin.as_ref().map(ExecutableDef::to_files_to_run),
            self.runtime.clone().map(RuntimeTarget::new),
            &provided,
            self.proto_compiler.as_ref().map(ExecutableDef::to_files_to_run),
            &self.protoc_opts,
            self.progress_message.clone().unwrap_or_default(),
            self.mnemonic.clone().unwrap_or_default(),
        )
    }
}

impl ToolchainsFile {
    /// Parse toolchain definitions from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse toolchain definitions")
    }

    /// Load toolchain definitions from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read toolchain config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Load definitions if the file exists, or an empty set if it does not.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No toolchain config at {}", path.display());
            Ok(Self::default())
        }
    }

    /// Merge another file into this one (other takes precedence per language).
    pub fn merge(&mut self, other: ToolchainsFile) {
        for (language, def) in other.toolchain {
            if self.toolchain.insert(language.clone(), def).is_some() {
                tracing::debug!("Toolchain for {} overridden", language);
            }
        }
    }

    /// Construct one shared descriptor per language.
    pub fn descriptors(&self) -> Result<BTreeMap<String, Arc<ProtoLangToolchain>>> {
        self.toolchain
            .iter()
            .map(|(language, def)| -> Result<(String, Arc<ProtoLangToolchain>)> {
                let descriptor = def
                    .to_descriptor()
                    .with_context(|| format!("invalid toolchain for language `{}`", language))?;
                Ok((language.clone(), Arc::new(descriptor)))
            })
            .collect()
    }
}

/// Load merged toolchain definitions from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project file
/// 2. Global file
///
/// Missing files are skipped; malformed ones fail the whole load.
pub fn load_toolchains(global_path: Option<&Path>, project_path: &Path) -> Result<ToolchainsFile> {
    let mut file = ToolchainsFile::default();

    if let Some(global_path) = global_path {
        file.merge(ToolchainsFile::load_if_exists(global_path)?);
    }
    file.merge(ToolchainsFile::load_if_exists(project_path)?);

    Ok(file)
}

/// Load toolchain definitions for a project from the default locations:
/// `~/.proto-toolchain/toolchains.toml` overridden by
/// `<project_root>/.proto-toolchain/toolchains.toml`.
pub fn load_project_toolchains(project_root: &Path) -> Result<ToolchainsFile> {
    let global = global_toolchains_path();
    load_toolchains(global.as_deref(), &project_toolchains_path(project_root))
}

/// Get the global config directory (~/.proto-toolchain).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".proto-toolchain"))
}

/// Get the global toolchain file path (~/.proto-toolchain/toolchains.toml).
pub fn global_toolchains_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchains.toml"))
}

/// Get the project toolchain file path (.proto-toolchain/toolchains.toml).
pub fn project_toolchains_path(project_root: &Path) -> PathBuf {
    project_root.join(".proto-toolchain").join("toolchains.toml")
}
