//! Derived read surface consumed by the rendering layer.
//!
//! The view holds no derived state: groups and counts are recomputed from
//! the cache on every call, so a change in query, view mode, sort order, or
//! active partition never requires invalidation.

use chrono::{DateTime, Utc};

use crate::cache::CatalogueCache;
use crate::filter::{filter_records, matching_count};
use crate::grouping::{group_records, Group, SortOrder, ViewMode};
use crate::record::QualificationLevel;

/// Read-side facade over the catalogue cache for one active partition.
#[derive(Clone)]
pub struct CatalogueView {
    cache: CatalogueCache,
    level: QualificationLevel,
}

impl CatalogueView {
    /// Create a view over a cache handle, focused on one partition.
    pub fn new(cache: CatalogueCache, level: QualificationLevel) -> Self {
        Self { cache, level }
    }

    /// The partition this view currently reads.
    pub fn level(&self) -> QualificationLevel {
        self.level
    }

    /// Point the view at a different partition.
    pub fn set_level(&mut self, level: QualificationLevel) {
        self.level = level;
    }

    /// The single derived read: filtered, grouped, sorted hierarchy.
    ///
    /// An unpopulated partition yields no groups rather than an error.
    pub fn groups(&self, mode: ViewMode, query: &str, sort: SortOrder) -> Vec<Group> {
        let Some(records) = self.cache.get(self.level) else {
            return Vec::new();
        };
        let family = self.level.family();
        let filtered = filter_records(&records, query, family);
        group_records(&filtered, mode, family, sort)
    }

    /// Total records resident for the active partition.
    pub fn total_count(&self) -> usize {
        self.cache.record_count(self.level)
    }

    /// Records matching a query, for display next to the total.
    pub fn filtered_count(&self, query: &str) -> usize {
        match self.cache.get(self.level) {
            Some(records) => matching_count(&records, query, self.level.family()),
            None => 0,
        }
    }
}

/// Whether a broadcast opens or closes every card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandAction {
    Expand,
    Collapse,
}

/// One-shot expand/collapse command observed by every rendered group.
///
/// The timestamp distinguishes repeated commands with the same action, so a
/// card toggled by hand after a broadcast reacts to the next broadcast even
/// when the action repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpandBroadcast {
    pub action: ExpandAction,
    pub issued_at: DateTime<Utc>,
}

impl ExpandBroadcast {
    /// Broadcast that opens every card.
    pub fn expand_all() -> Self {
        Self {
            action: ExpandAction::Expand,
            issued_at: Utc::now(),
        }
    }

    /// Broadcast that closes every card.
    pub fn collapse_all() -> Self {
        Self {
            action: ExpandAction::Collapse,
            issued_at: Utc::now(),
        }
    }
}

/// Ephemeral per-card toggle state, initialized per rendering pass.
#[derive(Clone, Copy, Debug)]
pub struct CardState {
    expanded: bool,
    last_seen: Option<DateTime<Utc>>,
}

impl CardState {
    /// Create card state with the shape's default expansion.
    pub fn new(expanded: bool) -> Self {
        Self {
            expanded,
            last_seen: None,
        }
    }

    /// Whether the card currently renders expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip the card by direct interaction.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Apply a broadcast at most once; later observations of the same
    /// command are no-ops so direct toggles afterwards stick.
    pub fn observe(&mut self, broadcast: &ExpandBroadcast) {
        if self.last_seen == Some(broadcast.issued_at) {
            return;
        }
        self.expanded = broadcast.action == ExpandAction::Expand;
        self.last_seen = Some(broadcast.issued_at);
    }
}
