//! Shared fixtures for unit tests.

use crate::core::artifact::Artifact;
use crate::core::files_to_run::FilesToRun;
use crate::core::proto_source::ProtoSource;
use crate::toolchain::{ProtoLangToolchain, ToolchainBuilder};

/// A checked-in `.proto` compiled in place.
pub fn proto(path: &str) -> ProtoSource {
    ProtoSource::new(Artifact::source(path), "")
}

/// The compiler used by [`toolchain_builder`].
pub fn compiler() -> FilesToRun {
    FilesToRun::new(Artifact::derived("bazel-out/host/bin/protoc"))
}

/// A builder with every required field set and nothing optional.
pub fn toolchain_builder() -> ToolchainBuilder {
    ProtoLangToolchain::builder()
        .out_replacement_format_flag("--cpp_out=%s")
        .proto_compiler(compiler())
        .progress_message("Generating C++ proto_library")
        .mnemonic("GenProtoCc")
}
