//! Fingerprints for generation action cache keys.

use sha2::{Digest, Sha256};

use crate::core::artifact::Artifact;

/// A hasher for building fingerprints from multiple components.
///
/// Every component is framed (separator or length prefix), so moving a value
/// from one field to the next always changes the result.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// Add an ordered list of strings, prefixed by its length.
    pub fn update_strs<'a>(&mut self, items: impl ExactSizeIterator<Item = &'a str>) -> &mut Self {
        self.hasher.update((items.len() as u64).to_le_bytes());
        for s in items {
            self.update_str(s);
        }
        self
    }

    /// Add an ordered list of artifacts. Each contributes its root and exec
    /// path, so a source file and a derived file at the same path differ.
    pub fn update_artifacts(&mut self, items: impl ExactSizeIterator<Item = Artifact>) -> &mut Self {
        self.hasher.update((items.len() as u64).to_le_bytes());
        for artifact in items {
            self.update_str(artifact.root().as_str());
            self.update_str(artifact.exec_path());
        }
        self
    }

    /// Add an optional string component.
    pub fn update_opt(&mut self, opt: Option<&str>) -> &mut Self {
        match opt {
            Some(s) => {
                self.hasher.update(b"\x01");
                self.update_str(s);
            }
            None => {
                self.hasher.update(b"\x00");
            }
        }
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

}
