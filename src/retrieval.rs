//! Partition retrieval: the fetch collaborator seam, the bounded chunk
//! probe, and the foreground/background loading discipline.
//!
//! Retrieval is attempted at most once per partition per session. Two
//! producers may race for the same key (a foreground on-demand load and the
//! low-priority background prefetch); both funnel through the cache's
//! first-writer-wins put, so the loser's result is simply discarded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cache::CatalogueCache;
use crate::constants::retrieval::{JSON_CONTENT_TYPE, MAX_CHUNK_PROBES};
use crate::decode::{decode_partition, EncodedPayload};
use crate::errors::CatalogueError;
use crate::record::{PaperRecord, QualificationLevel};

/// Raw response produced by a fetcher, before content-type confirmation.
#[derive(Clone, Debug)]
pub struct RawPayload {
    /// Content type reported alongside the body.
    pub content_type: String,
    /// Unparsed payload text.
    pub body: String,
}

impl RawPayload {
    /// Build a payload that already carries the JSON content type.
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: body.into(),
        }
    }

    /// Whether the payload confirms as JSON and may be decoded.
    pub fn is_json(&self) -> bool {
        self.content_type.contains(JSON_CONTENT_TYPE)
    }
}

/// Pull-based retrieval contract supplied by the surrounding system.
///
/// `chunk` of `None` requests the whole partition file; `Some(i)` requests
/// the 1-based i-th chunk. `Ok(None)` means the resource does not exist,
/// which is an expected outcome, not an error.
pub trait PartitionFetcher: Send + Sync {
    fn fetch(
        &self,
        level: QualificationLevel,
        chunk: Option<usize>,
    ) -> Result<Option<RawPayload>, CatalogueError>;
}

/// In-memory fetcher for tests and demos.
#[derive(Default)]
pub struct StaticFetcher {
    payloads: HashMap<(QualificationLevel, Option<usize>), RawPayload>,
}

impl StaticFetcher {
    /// Register a whole-file JSON payload for a partition.
    pub fn with_payload(mut self, level: QualificationLevel, body: impl Into<String>) -> Self {
        self.payloads.insert((level, None), RawPayload::json(body));
        self
    }

    /// Register a chunk payload for a partition.
    pub fn with_chunk(
        mut self,
        level: QualificationLevel,
        chunk: usize,
        body: impl Into<String>,
    ) -> Self {
        self.payloads
            .insert((level, Some(chunk)), RawPayload::json(body));
        self
    }

    /// Register a payload with an explicit content type.
    pub fn with_raw(
        mut self,
        level: QualificationLevel,
        chunk: Option<usize>,
        payload: RawPayload,
    ) -> Self {
        self.payloads.insert((level, chunk), payload);
        self
    }
}

impl PartitionFetcher for StaticFetcher {
    fn fetch(
        &self,
        level: QualificationLevel,
        chunk: Option<usize>,
    ) -> Result<Option<RawPayload>, CatalogueError> {
        Ok(self.payloads.get(&(level, chunk)).cloned())
    }
}

/// Last-load telemetry captured per partition.
#[derive(Clone, Debug, Default)]
pub struct PartitionLoadStats {
    /// Duration of the most recent load attempt in milliseconds.
    pub last_load_ms: u128,
    /// Number of records decoded by the most recent load.
    pub last_record_count: usize,
    /// Chunks consumed by the most recent load (0 = whole file).
    pub chunks_used: usize,
    /// Last load error message, if any.
    pub last_error: Option<String>,
    /// Total load failures seen for this partition.
    pub error_count: u64,
    /// When the partition's records were committed to the cache.
    pub committed_at: Option<DateTime<Utc>>,
}

/// Coordinates on-demand partition loads and shared-cache population.
pub struct CatalogueLoader {
    fetcher: Arc<dyn PartitionFetcher>,
    cache: CatalogueCache,
    stats: Arc<Mutex<HashMap<QualificationLevel, PartitionLoadStats>>>,
}

impl CatalogueLoader {
    /// Create a loader over a fetch collaborator, with an empty cache.
    pub fn new(fetcher: Arc<dyn PartitionFetcher>) -> Self {
        Self {
            fetcher,
            cache: CatalogueCache::new(),
            stats: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Access the shared record cache.
    pub fn cache(&self) -> CatalogueCache {
        self.cache.clone()
    }

    /// Ensure a partition is resident, fetching on demand.
    ///
    /// Resident partitions return immediately. A partition whose fetch and
    /// chunk fallbacks yield no usable data is left absent (a later call may
    /// retry) and reported as unavailable; callers that only need
    /// degrade-to-empty behavior can ignore the error.
    pub fn load_partition(&self, level: QualificationLevel) -> Result<(), CatalogueError> {
        if self.cache.has(level) {
            return Ok(());
        }
        let start = Instant::now();
        let outcome = fetch_partition_records(self.fetcher.as_ref(), level);
        commit_outcome(&self.cache, &self.stats, level, outcome, start)
    }

    /// Spawn a background thread that prefetches the given partitions.
    ///
    /// Already-resident partitions are skipped; a prefetch result arriving
    /// after a foreground load committed the same key is discarded by the
    /// cache. Failures stay local to each partition.
    pub fn prefetch_background(&self, levels: Vec<QualificationLevel>) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let cache = self.cache.clone();
        let stats = Arc::clone(&self.stats);
        thread::spawn(move || {
            for level in levels {
                if cache.has(level) {
                    continue;
                }
                debug!(%level, "prefetching partition");
                let start = Instant::now();
                let outcome = fetch_partition_records(fetcher.as_ref(), level);
                if let Err(err) = commit_outcome(&cache, &stats, level, outcome, start) {
                    debug!(%level, error = %err, "background prefetch failed");
                }
            }
        })
    }

    /// Return latest load telemetry for each attempted partition.
    pub fn load_stats(&self) -> Vec<(QualificationLevel, PartitionLoadStats)> {
        let stats = self.stats.lock().expect("loader stats poisoned");
        let mut out: Vec<_> = stats
            .iter()
            .map(|(level, entry)| (*level, entry.clone()))
            .collect();
        out.sort_by_key(|(level, _)| level.as_str());
        out
    }
}

struct FetchOutcome {
    records: Vec<PaperRecord>,
    chunks_used: usize,
}

/// Fetch and decode one partition: whole file first, then the bounded chunk
/// probe. The probe stops at the first missing, non-JSON, or unparseable
/// chunk and keeps whatever decoded so far.
fn fetch_partition_records(
    fetcher: &dyn PartitionFetcher,
    level: QualificationLevel,
) -> Result<FetchOutcome, CatalogueError> {
    match fetcher.fetch(level, None) {
        Ok(Some(payload)) if payload.is_json() => {
            let parsed: EncodedPayload = serde_json::from_str(&payload.body)?;
            return Ok(FetchOutcome {
                records: decode_partition(parsed, level),
                chunks_used: 0,
            });
        }
        Ok(_) => {
            debug!(%level, "whole-file payload unavailable, probing chunks");
        }
        Err(err) => return Err(err),
    }

    let mut records = Vec::new();
    let mut chunks_used = 0;
    for chunk in 1..=MAX_CHUNK_PROBES {
        let payload = match fetcher.fetch(level, Some(chunk)) {
            Ok(Some(payload)) if payload.is_json() => payload,
            Ok(_) => break,
            Err(err) => {
                debug!(%level, chunk, error = %err, "chunk fetch failed, stopping probe");
                break;
            }
        };
        let parsed: EncodedPayload = match serde_json::from_str(&payload.body) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(%level, chunk, error = %err, "chunk payload unparseable, stopping probe");
                break;
            }
        };
        records.extend(decode_partition(parsed, level));
        chunks_used = chunk;
    }
    Ok(FetchOutcome {
        records,
        chunks_used,
    })
}

fn commit_outcome(
    cache: &CatalogueCache,
    stats: &Mutex<HashMap<QualificationLevel, PartitionLoadStats>>,
    level: QualificationLevel,
    outcome: Result<FetchOutcome, CatalogueError>,
    start: Instant,
) -> Result<(), CatalogueError> {
    let elapsed = start.elapsed();
    let mut stats = stats.lock().expect("loader stats poisoned");
    let entry = stats.entry(level).or_default();
    entry.last_load_ms = elapsed.as_millis();

    match outcome {
        Ok(outcome) if !outcome.records.is_empty() => {
            entry.last_record_count = outcome.records.len();
            entry.chunks_used = outcome.chunks_used;
            entry.last_error = None;
            let record_count = outcome.records.len();
            let committed = cache.put(level, outcome.records);
            if committed {
                entry.committed_at = Some(Utc::now());
                debug!(
                    %level,
                    record_count,
                    chunks_used = entry.chunks_used,
                    load_ms = entry.last_load_ms,
                    "partition load committed"
                );
            } else {
                debug!(%level, "partition already populated, discarding duplicate load");
            }
            Ok(())
        }
        Ok(_) => {
            let err = CatalogueError::PartitionUnavailable {
                level,
                reason: "no usable data returned".to_string(),
            };
            entry.last_record_count = 0;
            entry.last_error = Some(err.to_string());
            entry.error_count = entry.error_count.saturating_add(1);
            Err(err)
        }
        Err(err) => {
            entry.last_record_count = 0;
            entry.last_error = Some(err.to_string());
            entry.error_count = entry.error_count.saturating_add(1);
            Err(err)
        }
    }
}
