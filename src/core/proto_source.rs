//! Schema source identities.

use serde::Serialize;

use crate::core::artifact::Artifact;
use crate::util::interning::normalize;

/// One `.proto` file as seen by the compiler.
///
/// `source_file` is what gets handed to the compiler. It can be a copy of
/// `original_source_file` placed under a virtual import root, in which case
/// the original remains the identity used for exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProtoSource {
    source_file: Artifact,
    original_source_file: Artifact,
    source_root: String,
    import_path: String,
}

impl ProtoSource {
    /// A source compiled in place from under `source_root`.
    pub fn new(source_file: Artifact, source_root: impl Into<String>) -> Self {
        Self::with_original(source_file, source_file, source_root)
    }

    /// A source whose compiled copy differs from the original file.
    pub fn with_original(
        source_file: Artifact,
        original_source_file: Artifact,
        source_root: impl Into<String>,
    ) -> Self {
        let source_root = normalize_root(&source_root.into());
        let import_path = import_path_of(source_file.exec_path(), &source_root).to_string();
        ProtoSource {
            source_file,
            original_source_file,
            source_root,
            import_path,
        }
    }

    /// File handed to the compiler.
    pub fn source_file(&self) -> Artifact {
        self.source_file
    }

    /// File this source was copied from, or `source_file` itself.
    pub fn original_source_file(&self) -> Artifact {
        self.original_source_file
    }

    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    /// Path the file is imported by, relative to its source root.
    pub fn import_path(&self) -> &str {
        &self.import_path
    }
}

fn normalize_root(root: &str) -> String {
    let root = normalize(root);
    let root = root.trim_end_matches('/');
    if root == "." {
        String::new()
    } else {
        root.to_string()
    }
}

fn import_path_of<'a>(exec_path: &'a str, source_root: &str) -> &'a str {
    if source_root.is_empty() {
        return exec_path;
    }
    exec_path
        .strip_prefix(source_root)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(exec_path)
}

/// Anything that can be matched against the excluded-source set.
pub trait SourceIdentity {
    /// The artifact whose identity decides exclusion.
    fn identity(&self) -> Artifact;
}

impl SourceIdentity for ProtoSource {
    fn identity(&self) -> Artifact {
        self.original_source_file
    }
}

impl SourceIdentity for Artifact {
    fn identity(&self) -> Artifact {
        *self
    }
}
