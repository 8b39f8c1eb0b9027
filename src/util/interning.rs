//! Path interning for artifact identities.
//!
//! Every artifact handle carries its exec path as an [`InternedPath`]. Equal
//! paths share one allocation, so identity checks and hashing are pointer
//! operations and handles are `Copy`.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{LazyLock, PoisonError, RwLock};

use serde::{Serialize, Serializer};

/// Global exec path interner
static PATHS: LazyLock<RwLock<HashSet<&'static str>>> =
    LazyLock::new(|| RwLock::new(HashSet::new()));

/// An interned, normalized exec path.
///
/// Normalization converts `\` separators to `/` and strips any leading `./`
/// segments, so `./proto/a.proto` and `proto\a.proto` are the same path.
#[derive(Clone, Copy)]
pub struct InternedPath {
    inner: &'static str,
}

impl InternedPath {
    /// Intern a path string.
    pub fn new(path: impl AsRef<str>) -> Self {
        let normalized = normalize(path.as_ref());

        {
            let paths = PATHS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(&interned) = paths.get(normalized.as_str()) {
                return InternedPath { inner: interned };
            }
        }

        let mut paths = PATHS.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(&interned) = paths.get(normalized.as_str()) {
            return InternedPath { inner: interned };
        }

        let leaked: &'static str = Box::leak(normalized.into_boxed_str());
        paths.insert(leaked);
        InternedPath { inner: leaked }
    }

    /// Get the normalized path string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.inner
    }

    /// Final path component, or the whole path if it has no separator.
    pub fn file_name(&self) -> &'static str {
        match self.inner.rfind('/') {
            Some(idx) => &self.inner[idx + 1..],
            None => self.inner,
        }
    }
}

/// Convert `\` separators to `/` and strip leading `./` segments.
pub(crate) fn normalize(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let mut rest = normalized.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.to_string()
}

impl PartialEq for InternedPath {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for InternedPath {}

impl PartialOrd for InternedPath {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedPath {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(other.inner)
    }
}

impl Hash for InternedPath {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.inner, state)
    }
}

impl fmt::Debug for InternedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner, f)
    }
}

impl fmt::Display for InternedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner, f)
    }
}

impl Serialize for InternedPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_paths_share_storage() {
        let a = InternedPath::new("google/protobuf/any.proto");
        let b = InternedPath::new("google/protobuf/any.proto");
        let c = InternedPath::new("google/protobuf/empty.proto");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(std::ptr::eq(a.inner, b.inner));
    }

    #[test]
    fn test_normalization() {
        let plain = InternedPath::new("proto/a.proto");
        assert_eq!(InternedPath::new("./proto/a.proto"), plain);
        assert_eq!(InternedPath::new("././proto/a.proto"), plain);
        assert_eq!(InternedPath::new("proto\\a.proto"), plain);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(InternedPath::new("a/b/c.proto").file_name(), "c.proto");
        assert_eq!(InternedPath::new("c.proto").file_name(), "c.proto");
    }

    #[test]
    fn test_hash_lookup() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(InternedPath::new("x/y.proto"), 1);
        assert_eq!(map.get(&InternedPath::new("./x/y.proto")), Some(&1));
    }
}
