//! Integration tests for toolchain descriptors and invocation planning.
//!
//! These tests drive the public API the way a build rule would: build one
//! descriptor per language, share it, and plan compiler runs from it.

use std::sync::Arc;

use proto_toolchain::{
    Artifact, ConfigurationError, FilesToRun, InvocationBuilder, PluginField, ProtoLangToolchain,
    ProtoSource, RequiredField, ToolchainError, ToolchainsFile,
};

fn proto(path: &str) -> ProtoSource {
    ProtoSource::new(Artifact::source(path), "")
}

fn gen_x_toolchain() -> ProtoLangToolchain {
    ProtoLangToolchain::builder()
        .out_replacement_format_flag("--out=%s")
        .plugin_format_flag("--plugin=protoc-gen-x=%s")
        .plugin(FilesToRun::new(Artifact::derived("/bin/gen_x")))
        .proto_compiler(FilesToRun::new(Artifact::derived("/bin/protoc")))
        .protoc_opt("--experimental_editions")
        .progress_message("Generating X protos")
        .mnemonic("GenProtoX")
        .build()
        .unwrap()
}

// ============================================================================
// Invocation parameters
// ============================================================================

#[test]
fn test_plugin_invocation_parameters() {
    let tc = gen_x_toolchain();
    let inv = InvocationBuilder::new(&tc).build(&[], "/tmp/out").unwrap();

    assert_eq!(
        inv.args,
        vec![
            "--out=/tmp/out",
            "--plugin=protoc-gen-x=/bin/gen_x",
            "--experimental_editions",
        ]
    );
    assert_eq!(inv.program, "/bin/protoc");
}

#[test]
fn test_runtime_sources_are_excluded() {
    let a = proto("google/protobuf/any.proto");
    let b = proto("google/protobuf/timestamp.proto");
    let c = proto("app/api.proto");

    let tc = ProtoLangToolchain::builder()
        .out_replacement_format_flag("--out=%s")
        .proto_compiler(FilesToRun::new(Artifact::derived("/bin/protoc")))
        .provided_proto_sources([a.clone(), b.clone(), a.clone()])
        .progress_message("Generating protos")
        .mnemonic("GenProto")
        .build()
        .unwrap();

    assert_eq!(
        tc.forbidden_protos(),
        &[a.original_source_file(), b.original_source_file()]
    );

    let inv = InvocationBuilder::new(&tc)
        .build(&[a, b, c.clone()], "/tmp/out")
        .unwrap();
    assert_eq!(inv.sources, vec![c]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_output_format_is_configuration_error() {
    let err: ConfigurationError = ProtoLangToolchain::builder()
        .out_replacement_format_flag("")
        .proto_compiler(FilesToRun::new(Artifact::derived("/bin/protoc")))
        .progress_message("Generating protos")
        .mnemonic("GenProto")
        .build()
        .unwrap_err();

    assert_eq!(err.field, RequiredField::OutReplacementFormatFlag);
    assert!(err.to_string().contains("GenProto"));
}

#[test]
fn test_mismatched_plugin_is_unsupported() {
    let tc = ProtoLangToolchain::builder()
        .out_replacement_format_flag("--out=%s")
        .plugin_format_flag("--plugin=protoc-gen-x=%s")
        .proto_compiler(FilesToRun::new(Artifact::derived("/bin/protoc")))
        .progress_message("Generating X protos")
        .mnemonic("GenProtoX")
        .build()
        .unwrap();

    let err: ToolchainError = InvocationBuilder::new(&tc)
        .build(&[], "/tmp/out")
        .unwrap_err()
        .into();

    match err {
        ToolchainError::Unsupported(e) => {
            assert_eq!(e.missing, PluginField::Plugin);
            assert_eq!(e.progress_message, "Generating X protos");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn test_shared_descriptor_across_threads() {
    let tc = Arc::new(gen_x_toolchain());
    let candidates = vec![proto("app/a.proto"), proto("app/b.proto")];
    let expected = InvocationBuilder::new(&tc)
        .build(&candidates, "/tmp/out")
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tc = Arc::clone(&tc);
                let candidates = &candidates;
                scope.spawn(move || {
                    InvocationBuilder::new(&tc)
                        .build(candidates, "/tmp/out")
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            let inv = handle.join().unwrap();
            assert_eq!(inv, expected);
            assert_eq!(inv.fingerprint(), expected.fingerprint());
        }
    });
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_to_invocation() {
    let file = ToolchainsFile::parse(
        r#"
[toolchain.x]
out_replacement_format_flag = "--out=%s"
plugin_format_flag = "--plugin=protoc-gen-x=%s"
plugin = { path = "/bin/gen_x" }
proto_compiler = { path = "/bin/protoc" }
protoc_opts = ["--experimental_editions"]
progress_message = "Generating X protos"
mnemonic = "GenProtoX"
"#,
    )
    .unwrap();

    let descriptors = file.descriptors().unwrap();
    let from_config = &descriptors["x"];

    assert_eq!(**from_config, gen_x_toolchain());
    assert_eq!(from_config.fingerprint(), gen_x_toolchain().fingerprint());
}
