use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

use crate::record::{PaperRecord, QualificationLevel};

/// Thread-safe in-memory cache of decoded records, keyed by partition.
///
/// Populated at most once per partition for the life of the session, either
/// by the foreground on-demand load or the background prefetch. The
/// first-writer-wins `put` is the only synchronization the two producers
/// need: at most one committed value per key is ever observable, and late
/// duplicate writes are no-ops.
#[derive(Clone, Default)]
pub struct CatalogueCache {
    inner: Arc<RwLock<IndexMap<QualificationLevel, Vec<PaperRecord>>>>,
}

impl CatalogueCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the partition has already been populated.
    pub fn has(&self, level: QualificationLevel) -> bool {
        let inner = self.inner.read().expect("catalogue cache poisoned");
        inner.contains_key(&level)
    }

    /// Return a cloned snapshot of a partition's records, or `None` when the
    /// partition has not been populated.
    pub fn get(&self, level: QualificationLevel) -> Option<Vec<PaperRecord>> {
        let inner = self.inner.read().expect("catalogue cache poisoned");
        inner.get(&level).cloned()
    }

    /// Populate a partition. Idempotent: the first writer wins and a later
    /// `put` for the same key is a no-op. Returns whether this call
    /// committed the value.
    pub fn put(&self, level: QualificationLevel, records: Vec<PaperRecord>) -> bool {
        let mut inner = self.inner.write().expect("catalogue cache poisoned");
        if inner.contains_key(&level) {
            return false;
        }
        inner.insert(level, records);
        true
    }

    /// Number of records resident for a partition (0 when absent).
    pub fn record_count(&self, level: QualificationLevel) -> usize {
        let inner = self.inner.read().expect("catalogue cache poisoned");
        inner.get(&level).map_or(0, Vec::len)
    }

    /// Number of populated partitions.
    pub fn partition_count(&self) -> usize {
        let inner = self.inner.read().expect("catalogue cache poisoned");
        inner.len()
    }

    /// Returns `true` when no partition has been populated yet.
    pub fn is_empty(&self) -> bool {
        self.partition_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DocKind, Session};

    fn make_record(subject: &str) -> PaperRecord {
        PaperRecord {
            year: Some(2024),
            session: Session::MayJune,
            kind: DocKind::Qp,
            component: Some("22".to_string()),
            subject: subject.to_string(),
            unit: Some("22".to_string()),
            unit_code: None,
            title: None,
            url: format!("https://host/{subject}.pdf"),
            level: QualificationLevel::Igcse,
        }
    }

    #[test]
    fn put_populates_and_has_reports_residency() {
        let cache = CatalogueCache::new();
        assert!(cache.is_empty());
        assert!(!cache.has(QualificationLevel::Igcse));
        assert!(cache.get(QualificationLevel::Igcse).is_none());

        assert!(cache.put(QualificationLevel::Igcse, vec![make_record("Biology")]));
        assert!(cache.has(QualificationLevel::Igcse));
        assert_eq!(cache.record_count(QualificationLevel::Igcse), 1);
        assert_eq!(cache.partition_count(), 1);
        assert!(!cache.has(QualificationLevel::Ial));
    }

    #[test]
    fn later_puts_for_the_same_key_are_discarded() {
        let cache = CatalogueCache::new();
        assert!(cache.put(QualificationLevel::OLevel, vec![make_record("First")]));
        assert!(!cache.put(
            QualificationLevel::OLevel,
            vec![make_record("Second"), make_record("Third")]
        ));

        let records = cache.get(QualificationLevel::OLevel).expect("resident");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "First");
    }

    #[test]
    fn concurrent_puts_commit_exactly_once() {
        let cache = CatalogueCache::new();
        let mut handles = Vec::new();
        for idx in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                cache.put(
                    QualificationLevel::AsALevel,
                    vec![make_record(&format!("writer-{idx}"))],
                )
            }));
        }
        let commits = handles
            .into_iter()
            .map(|handle| handle.join().expect("writer thread"))
            .filter(|committed| *committed)
            .count();
        assert_eq!(commits, 1);
        assert_eq!(cache.record_count(QualificationLevel::AsALevel), 1);
    }

    #[test]
    fn empty_record_sets_still_mark_the_partition_resident() {
        let cache = CatalogueCache::new();
        assert!(cache.put(QualificationLevel::Ial, Vec::new()));
        assert!(cache.has(QualificationLevel::Ial));
        assert_eq!(cache.record_count(QualificationLevel::Ial), 0);
    }
}
