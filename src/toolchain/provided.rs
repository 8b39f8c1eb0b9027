//! Sources already covered by a language runtime.
//!
//! [`ProvidedSourceSet`] owns one canonical, ordered list of [`ProtoSource`]s.
//! The flattened artifact view is projected from that list when the set is
//! built and has no other way in, so the two views cannot drift apart.

use std::collections::HashSet;

use crate::core::artifact::Artifact;
use crate::core::proto_source::{ProtoSource, SourceIdentity};

#[derive(Debug, Clone, Default)]
pub struct ProvidedSourceSet {
    sources: Vec<ProtoSource>,
    forbidden: Vec<Artifact>,
    lookup: HashSet<Artifact>,
}

impl ProvidedSourceSet {
    /// Build the set, deduplicating original source files in first-seen order.
    pub fn new(sources: impl IntoIterator<Item = ProtoSource>) -> Self {
        let sources: Vec<ProtoSource> = sources.into_iter().collect();
        let mut forbidden = Vec::with_capacity(sources.len());
        let mut lookup = HashSet::with_capacity(sources.len());

        for source in &sources {
            let identity = source.identity();
            if lookup.insert(identity) {
                forbidden.push(identity);
            }
        }

        ProvidedSourceSet {
            sources,
            forbidden,
            lookup,
        }
    }

    /// Structured view, exactly as supplied.
    pub fn proto_sources(&self) -> &[ProtoSource] {
        &self.sources
    }

    /// Flattened view: one original source artifact per distinct identity.
    pub fn forbidden_sources(&self) -> &[Artifact] {
        &self.forbidden
    }

    /// Old name of [`forbidden_sources`](Self::forbidden_sources).
    #[deprecated(note = "use `forbidden_sources` or `proto_sources`")]
    pub fn blacklisted_sources(&self) -> &[Artifact] {
        self.forbidden_sources()
    }

    /// Whether the runtime already provides `source`.
    pub fn contains(&self, source: &impl SourceIdentity) -> bool {
        self.lookup.contains(&source.identity())
    }

    /// Number of distinct excluded identities.
    pub fn len(&self) -> usize {
        self.forbidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
    }

    /// Candidates not covered by the runtime, in candidate order.
    pub fn filter<T: SourceIdentity + Clone>(&self, candidates: &[T]) -> Vec<T> {
        self.partition(candidates).0
    }

    /// Split candidates into `(kept, excluded)`, both in candidate order.
    pub fn partition<T: SourceIdentity + Clone>(&self, candidates: &[T]) -> (Vec<T>, Vec<T>) {
        candidates
            .iter()
            .cloned()
            .partition(|candidate| !self.contains(candidate))
    }
}

impl PartialEq for ProvidedSourceSet {
    fn eq(&self, other: &Self) -> bool {
        self.sources == other.sources
    }
}

impl Eq for ProvidedSourceSet {}

impl FromIterator<ProtoSource> for ProvidedSourceSet {
    fn from_iter<I: IntoIterator<Item = ProtoSource>>(iter: I) -> Self {
        ProvidedSourceSet::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proto(path: &str) -> ProtoSource {
        ProtoSource::new(Artifact::source(path), "")
    }

    #[test]
    fn test_duplicates_keep_first_seen_order() {
        let a = proto("google/protobuf/any.proto");
        let b = proto("google/protobuf/duration.proto");
        let set = ProvidedSourceSet::new([a.clone(), b.clone(), a.clone()]);

        assert_eq!(set.proto_sources().len(), 3);
        assert_eq!(
            set.forbidden_sources(),
            &[a.original_source_file(), b.original_source_file()]
        );
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_repeated_identity_matches_deduplicated_list() {
        let a = proto("a.proto");
        let b = proto("b.proto");
        let with_dups = ProvidedSourceSet::new([b.clone(), a.clone(), b.clone(), a.clone()]);
        let deduped = ProvidedSourceSet::new([b, a]);

        assert_eq!(with_dups.forbidden_sources(), deduped.forbidden_sources());
    }

    #[test]
    fn test_flattened_view_is_projection() {
        let original = Artifact::source("x/y.proto");
        let copy = Artifact::derived("bin/_virtual_imports/y/x/y.proto");
        let sources = vec![
            ProtoSource::with_original(copy, original, "bin/_virtual_imports/y"),
            proto("x/z.proto"),
            ProtoSource::new(original, ""),
        ];
        let set: ProvidedSourceSet = sources.iter().cloned().collect();

        let mut projected: Vec<Artifact> = Vec::new();
        for s in set.proto_sources() {
            if !projected.contains(&s.original_source_file()) {
                projected.push(s.original_source_file());
            }
        }
        assert_eq!(set.forbidden_sources(), projected.as_slice());
        assert!(set.len() <= sources.len());
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_alias() {
        let set = ProvidedSourceSet::new([proto("a.proto")]);
        assert_eq!(set.blacklisted_sources(), set.forbidden_sources());
    }

    #[test]
    fn test_filter_by_original_identity() {
        let a = proto("a.proto");
        let b = proto("b.proto");
        let c = proto("c.proto");
        let set = ProvidedSourceSet::new([a.clone(), b.clone(), a.clone()]);

        assert_eq!(set.filter(&[a.clone(), b.clone(), c.clone()]), vec![c.clone()]);

        let (kept, excluded) = set.partition(&[c.clone(), a.clone()]);
        assert_eq!(kept, vec![c]);
        assert_eq!(excluded, vec![a]);
    }

    #[test]
    fn test_filter_artifacts() {
        let a = Artifact::source("a.proto");
        let set = ProvidedSourceSet::new([ProtoSource::new(a, "")]);

        assert!(set.contains(&a));
        assert!(!set.contains(&Artifact::derived("a.proto")));
        assert!(set.filter(&[a]).is_empty());
    }

    #[test]
    fn test_empty() {
        let set = ProvidedSourceSet::default();
        assert!(set.is_empty());
        assert_eq!(set, ProvidedSourceSet::new(Vec::new()));
    }
}
