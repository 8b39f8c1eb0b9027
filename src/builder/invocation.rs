//! Compiler invocation planning.
//!
//! [`InvocationBuilder`] turns a shared [`ProtoLangToolchain`], the sources an
//! action wants to compile, and an output root into the ordered parameters of
//! one compiler run. It performs no I/O; running the command is left to the
//! action layer.

use serde::Serialize;

use crate::builder::format::substitute;
use crate::core::artifact::Artifact;
use crate::core::files_to_run::push_unique;
use crate::core::proto_source::ProtoSource;
use crate::toolchain::ProtoLangToolchain;
use crate::util::diagnostic::{PluginField, UnsupportedConfiguration};
use crate::util::hash::Fingerprint;

/// Parameters for one proto compiler run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Compiler executable path
    pub program: String,
    /// Flags, in order: output flag, plugin flag, toolchain options
    pub args: Vec<String>,
    /// Sources to compile, in candidate order
    pub sources: Vec<ProtoSource>,
    /// Candidates dropped because the runtime already provides them
    pub excluded: Vec<ProtoSource>,
    /// Compiler and plugin executables plus runfiles
    pub tools: Vec<Artifact>,
    pub mnemonic: String,
    pub progress_message: String,
}

impl Invocation {
    /// True when every candidate was provided by the runtime.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Full argument list: flags followed by source exec paths.
    pub fn command_line(&self) -> Vec<String> {
        self.args
            .iter()
            .cloned()
            .chain(
                self.sources
                    .iter()
                    .map(|s| s.source_file().exec_path().to_string()),
            )
            .collect()
    }

    /// Cache key for this action.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.update_str(&self.program)
            .update_strs(self.args.iter().map(String::as_str))
            .update_artifacts(self.sources.iter().map(|s| s.source_file()))
            .update_artifacts(self.sources.iter().map(|s| s.original_source_file()))
            .update_artifacts(self.tools.iter().copied())
            .update_str(&self.mnemonic);
        fp.finish()
    }
}

/// Builds [`Invocation`]s from a toolchain.
#[derive(Debug, Clone, Copy)]
pub struct InvocationBuilder<'a> {
    toolchain: &'a ProtoLangToolchain,
}

impl<'a> InvocationBuilder<'a> {
    /// Plan invocations for `toolchain`.
    pub fn new(toolchain: &'a ProtoLangToolchain) -> Self {
        InvocationBuilder { toolchain }
    }

    /// Plan one compiler run. `output_root` is substituted verbatim.
    ///
    /// Fails if the toolchain sets exactly one of `plugin` and
    /// `plugin_format_flag`.
    pub fn build(
        &self,
        candidates: &[ProtoSource],
        output_root: &str,
    ) -> Result<Invocation, UnsupportedConfiguration> {
        let tc = self.toolchain;

        let mut args = Vec::with_capacity(tc.protoc_opts().len() + 2);
        args.push(substitute(tc.out_replacement_format_flag(), output_root));

        let mut tools = tc.proto_compiler().tool_inputs();
        match (tc.plugin(), tc.plugin_format_flag()) {
            (Some(plugin), Some(flag)) => {
                args.push(substitute(flag, plugin.executable_path()));
                for input in plugin.tool_inputs() {
                    push_unique(&mut tools, input);
                }
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(self.mismatch(PluginField::Plugin, PluginField::PluginFormatFlag))
            }
            (None, Some(_)) => {
                return Err(self.mismatch(PluginField::PluginFormatFlag, PluginField::Plugin))
            }
        }

        args.extend(tc.protoc_opts().iter().cloned());

        let (sources, excluded) = tc.provided().partition(candidates);
        if !excluded.is_empty() {
            tracing::debug!(
                "{}: skipping {} source(s) provided by the runtime",
                tc.mnemonic(),
                excluded.len()
            );
        }

        Ok(Invocation {
            program: tc.proto_compiler().executable_path().to_string(),
            args,
            sources,
            excluded,
            tools,
            mnemonic: tc.mnemonic().to_string(),
            progress_message: tc.progress_message().to_string(),
        })
    }

    fn mismatch(&self, present: PluginField, missing: PluginField) -> UnsupportedConfiguration {
        UnsupportedConfiguration {
            present,
            missing,
            mnemonic: self.toolchain.mnemonic().to_string(),
            progress_message: self.toolchain.progress_message().to_string(),
        }
    }
}
