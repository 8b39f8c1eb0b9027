//! The per-language proto toolchain descriptor.

use crate::core::artifact::Artifact;
use crate::core::files_to_run::{FilesToRun, RuntimeTarget};
use crate::core::proto_source::ProtoSource;
use crate::toolchain::provided::ProvidedSourceSet;
use crate::util::diagnostic::{ConfigurationError, RequiredField};
use crate::util::hash::Fingerprint;

/// Specifies how to generate language-specific code from `.proto` files.
///
/// A descriptor is built once per language per build evaluation and then
/// shared read-only (usually behind an `Arc`) by every generation action for
/// that language. The excluded-source set is computed during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoLangToolchain {
    out_replacement_format_flag: String,
    plugin_format_flag: Option<String>,
    plugin: Option<FilesToRun>,
    runtime: Option<RuntimeTarget>,
    provided: ProvidedSourceSet,
    proto_compiler: FilesToRun,
    protoc_opts: Vec<String>,
    progress_message: String,
    mnemonic: String,
}

impl ProtoLangToolchain {
    /// Start building a descriptor.
    pub fn builder() -> ToolchainBuilder {
        ToolchainBuilder::default()
    }

    /// Construct a descriptor from all of its fields at once.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        out_replacement_format_flag: impl Into<String>,
        plugin_format_flag: Option<String>,
        plugin: Option<FilesToRun>,
        runtime: Option<RuntimeTarget>,
        provided_proto_sources: &[ProtoSource],
        proto_compiler: Option<FilesToRun>,
        protoc_opts: &[String],
        progress_message: impl Into<String>,
        mnemonic: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        ToolchainBuilder {
            out_replacement_format_flag: out_replacement_format_flag.into(),
            plugin_format_flag,
            plugin,
            runtime,
            provided_proto_sources: provided_proto_sources.to_vec(),
            proto_compiler,
            protoc_opts: protoc_opts.to_vec(),
            progress_message: progress_message.into(),
            mnemonic: mnemonic.into(),
        }
        .build()
    }

    /// Format string used to pass the output location to the compiler.
    pub fn out_replacement_format_flag(&self) -> &str {
        &self.out_replacement_format_flag
    }

    /// Format string used to pass the plugin to the compiler.
    pub fn plugin_format_flag(&self) -> Option<&str> {
        self.plugin_format_flag.as_deref()
    }

    /// Compiler plugin, if this language generates through one.
    pub fn plugin(&self) -> Option<&FilesToRun> {
        self.plugin.as_ref()
    }

    /// Runtime support target generated code depends on.
    pub fn runtime(&self) -> Option<&RuntimeTarget> {
        self.runtime.as_ref()
    }

    /// The proto compiler.
    pub fn proto_compiler(&self) -> &FilesToRun {
        &self.proto_compiler
    }

    /// Options passed to the compiler, in caller order.
    pub fn protoc_opts(&self) -> &[String] {
        &self.protoc_opts
    }

    /// Progress message for the compiler action.
    pub fn progress_message(&self) -> &str {
        &self.progress_message
    }

    /// Mnemonic for the compiler action.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Sources whose bindings ship with the runtime.
    pub fn provided_proto_sources(&self) -> &[ProtoSource] {
        self.provided.proto_sources()
    }

    /// Original source files of [`provided_proto_sources`](Self::provided_proto_sources),
    /// deduplicated in first-seen order.
    pub fn forbidden_protos(&self) -> &[Artifact] {
        self.provided.forbidden_sources()
    }

    /// Old name of [`forbidden_protos`](Self::forbidden_protos).
    #[deprecated(note = "use `provided_proto_sources` or `forbidden_protos`")]
    pub fn blacklisted_protos(&self) -> &[Artifact] {
        self.forbidden_protos()
    }

    /// The runtime-provided source set, with both of its views.
    pub fn provided(&self) -> &ProvidedSourceSet {
        &self.provided
    }

    /// Stable cache key over every field that affects generation.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.update_str(&self.out_replacement_format_flag)
            .update_opt(self.plugin_format_flag.as_deref());
        update_tool(&mut fp, self.plugin.as_ref());
        fp.update_opt(self.runtime.as_ref().map(RuntimeTarget::label));
        update_tool(&mut fp, Some(&self.proto_compiler));
        fp.update_strs(self.protoc_opts.iter().map(String::as_str))
            .update_str(&self.progress_message)
            .update_str(&self.mnemonic)
            .update_artifacts(self.forbidden_protos().iter().copied());
        fp.finish()
    }
}

fn update_tool(fp: &mut Fingerprint, tool: Option<&FilesToRun>) {
    match tool {
        Some(tool) => {
            fp.update_opt(Some(tool.executable().root().as_str()))
                .update_artifacts(tool.tool_inputs().into_iter());
        }
        None => {
            fp.update_opt(None);
        }
    }
}

/// Builder for [`ProtoLangToolchain`].
#[derive(Debug, Clone, Default)]
pub struct ToolchainBuilder {
    out_replacement_format_flag: String,
    plugin_format_flag: Option<String>,
    plugin: Option<FilesToRun>,
    runtime: Option<RuntimeTarget>,
    provided_proto_sources: Vec<ProtoSource>,
    proto_compiler: Option<FilesToRun>,
    protoc_opts: Vec<String>,
    progress_message: String,
    mnemonic: String,
}

impl ToolchainBuilder {
    /// Set the output flag template (one `%s` slot).
    pub fn out_replacement_format_flag(mut self, flag: impl Into<String>) -> Self {
        self.out_replacement_format_flag = flag.into();
        self
    }

    /// Set the plugin flag template (one `%s` slot).
    pub fn plugin_format_flag(mut self, flag: impl Into<String>) -> Self {
        self.plugin_format_flag = Some(flag.into());
        self
    }

    /// Set the compiler plugin.
    pub fn plugin(mut self, plugin: FilesToRun) -> Self {
        self.plugin = Some(plugin);
        self
    }

    /// Set the runtime support target.
    pub fn runtime(mut self, runtime: RuntimeTarget) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Append a provided source. Order is kept.
    pub fn provided_proto_source(mut self, source: ProtoSource) -> Self {
        self.provided_proto_sources.push(source);
        self
    }

    /// Append multiple provided sources.
    pub fn provided_proto_sources(mut self, sources: impl IntoIterator<Item = ProtoSource>) -> Self {
        self.provided_proto_sources.extend(sources);
        self
    }

    /// Set the proto compiler.
    pub fn proto_compiler(mut self, compiler: FilesToRun) -> Self {
        self.proto_compiler = Some(compiler);
        self
    }

    /// Append a compiler option. Order is kept and duplicates are allowed.
    pub fn protoc_opt(mut self, opt: impl Into<String>) -> Self {
        self.protoc_opts.push(opt.into());
        self
    }

    /// Append multiple compiler options.
    pub fn protoc_opts(mut self, opts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.protoc_opts.extend(opts.into_iter().map(Into::into));
        self
    }

    /// Set the progress message.
    pub fn progress_message(mut self, message: impl Into<String>) -> Self {
        self.progress_message = message.into();
        self
    }

    /// Set the mnemonic.
    pub fn mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = mnemonic.into();
        self
    }

    /// Validate required fields and freeze the descriptor.
    ///
    /// Whitespace-only strings count as empty. The first missing field in
    /// declaration order is reported.
    pub fn build(self) -> Result<ProtoLangToolchain, ConfigurationError> {
        let missing = |field| ConfigurationError {
            field,
            mnemonic: self.mnemonic.clone(),
            progress_message: self.progress_message.clone(),
        };

        if is_blank(&self.out_replacement_format_flag) {
            return Err(missing(RequiredField::OutReplacementFormatFlag));
        }
        let Some(proto_compiler) = self.proto_compiler.clone() else {
            return Err(missing(RequiredField::ProtoCompiler));
        };
        if is_blank(&self.progress_message) {
            return Err(missing(RequiredField::ProgressMessage));
        }
        if is_blank(&self.mnemonic) {
            return Err(missing(RequiredField::Mnemonic));
        }

        if self.plugin.is_none() && self.plugin_format_flag.is_some() {
            tracing::warn!(
                "Toolchain {} sets plugin_format_flag without a plugin",
                self.mnemonic
            );
        }

        let provided = ProvidedSourceSet::new(self.provided_proto_sources);
        tracing::debug!(
            "Constructed proto toolchain {} ({} provided sources, {} excluded)",
            self.mnemonic,
            provided.proto_sources().len(),
            provided.len()
        );

        Ok(ProtoLangToolchain {
            out_replacement_format_flag: self.out_replacement_format_flag,
            plugin_format_flag: self.plugin_format_flag,
            plugin: self.plugin,
            runtime: self.runtime,
            provided,
            proto_compiler,
            protoc_opts: self.protoc_opts,
            progress_message: self.progress_message,
            mnemonic: self.mnemonic,
        })
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
