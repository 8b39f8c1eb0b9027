//! Artifact handles - WHICH file an action reads or runs.
//!
//! An [`Artifact`] is an opaque, cheaply copyable handle whose identity is its
//! normalized exec path together with the root it lives under. Two handles
//! naming the same file always compare equal, on any thread.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::interning::InternedPath;

/// Where an artifact lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactRoot {
    /// Checked-in source tree
    #[default]
    Source,
    /// Produced by another build action
    Derived,
}

impl ArtifactRoot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactRoot::Source => "source",
            ArtifactRoot::Derived => "derived",
        }
    }
}

/// A file artifact with stable identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Artifact {
    #[serde(rename = "path")]
    exec_path: InternedPath,
    root: ArtifactRoot,
}

impl Artifact {
    /// Create a handle under the given root.
    pub fn new(exec_path: impl AsRef<str>, root: ArtifactRoot) -> Self {
        Artifact {
            exec_path: InternedPath::new(exec_path),
            root,
        }
    }

    /// Create a handle for a checked-in source file.
    pub fn source(exec_path: impl AsRef<str>) -> Self {
        Self::new(exec_path, ArtifactRoot::Source)
    }

    /// Create a handle for a file produced by another action.
    pub fn derived(exec_path: impl AsRef<str>) -> Self {
        Self::new(exec_path, ArtifactRoot::Derived)
    }

    /// Normalized path relative to the execution root.
    pub fn exec_path(&self) -> &'static str {
        self.exec_path.as_str()
    }

    pub fn root(&self) -> ArtifactRoot {
        self.root
    }

    pub fn is_source(&self) -> bool {
        self.root == ArtifactRoot::Source
    }

    /// Final path component.
    pub fn file_name(&self) -> &'static str {
        self.exec_path.file_name()
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Artifact({}:{})", self.root.as_str(), self.exec_path)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.exec_path, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_includes_root() {
        let src = Artifact::source("proto/a.proto");
        let gen = Artifact::derived("proto/a.proto");

        assert_eq!(src, Artifact::source("./proto/a.proto"));
        assert_ne!(src, gen);
        assert!(src.is_source());
        assert!(!gen.is_source());
    }

    #[test]
    fn test_display_is_exec_path() {
        let a = Artifact::derived("bazel-out/bin/protoc");
        assert_eq!(a.to_string(), "bazel-out/bin/protoc");
        assert_eq!(a.file_name(), "protoc");
        assert_eq!(format!("{:?}", a), "Artifact(derived:bazel-out/bin/protoc)");
    }
}
