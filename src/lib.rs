#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Catalogue cache keyed by qualification level.
pub mod cache;
/// Centralized constants used across decode, grouping, and retrieval.
pub mod constants;
/// Record decoding from compact encoded payloads.
pub mod decode;
/// Reusable example runners shared by downstream crates.
pub mod example_apps;
/// Free-text filtering over decoded records.
pub mod filter;
/// Grouping and sorting into view hierarchies.
pub mod grouping;
/// Canonical record and partition types.
pub mod record;
/// Partition fetch contract, chunk probe, and loaders.
pub mod retrieval;
/// Subject-name resolution for unit codes.
pub mod subjects;
/// Shared type aliases.
pub mod types;
/// Display-title and natural-ordering helpers.
pub mod utils;
/// Derived read surface for the rendering layer.
pub mod view;

mod errors;

pub use cache::CatalogueCache;
pub use decode::{decode_partition, EncodedPayload, EncodedTuple, LegacyRecord};
pub use errors::CatalogueError;
pub use filter::{filter_records, matching_count};
pub use grouping::{
    group_records, ComponentEntry, ComponentSessionGroup, GeneralBucket, Group, PaperGroup,
    SessionRow, SortOrder, UnitEntry, UnitSessionGroup, ViewMode,
};
pub use record::{
    DatasetFamily, DocKind, GroupYear, PaperRecord, QualificationLevel, Session,
};
pub use retrieval::{
    CatalogueLoader, PartitionFetcher, PartitionLoadStats, RawPayload, StaticFetcher,
};
pub use subjects::{resolve_optional_subject_name, resolve_subject_name};
pub use types::{
    ComponentId, FileName, GroupId, QueryText, SubjectKey, SubjectName, UnitCode, UrlString,
};
pub use utils::{clean_title, numeric_compare};
pub use view::{CardState, CatalogueView, ExpandAction, ExpandBroadcast};
