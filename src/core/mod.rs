//! Opaque handles the toolchain layer consumes: artifacts, executables and
//! schema sources.

pub mod artifact;
pub mod files_to_run;
pub mod proto_source;

pub use artifact::{Artifact, ArtifactRoot};
pub use files_to_run::{FilesToRun, RuntimeTarget};
pub use proto_source::{ProtoSource, SourceIdentity};
