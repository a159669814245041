use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::types::{ComponentId, SubjectName, UnitCode, UrlString};

/// Document kind attached to every catalogue record.
///
/// The four named kinds occupy dedicated slots in grouped views; anything
/// else is carried verbatim and lands in the per-group `others` lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocKind {
    /// Question paper.
    Qp,
    /// Mark scheme.
    Ms,
    /// Examiner report.
    Er,
    /// Grade threshold table.
    Gt,
    /// Unclassified kind, raw tag preserved.
    Other(String),
}

impl DocKind {
    /// Classify a raw wire tag. Unknown tags are preserved, never rejected.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "qp" => DocKind::Qp,
            "ms" => DocKind::Ms,
            "er" => DocKind::Er,
            "gt" => DocKind::Gt,
            other => DocKind::Other(other.to_string()),
        }
    }

    /// Wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            DocKind::Qp => "qp",
            DocKind::Ms => "ms",
            DocKind::Er => "er",
            DocKind::Gt => "gt",
            DocKind::Other(raw) => raw,
        }
    }
}

impl From<String> for DocKind {
    fn from(raw: String) -> Self {
        DocKind::from_raw(&raw)
    }
}

impl From<DocKind> for String {
    fn from(kind: DocKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Examination session reconstructed from a numeric wire code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Session {
    January,
    February,
    FebMarch,
    April,
    May,
    MayJune,
    July,
    August,
    September,
    October,
    OctNov,
    December,
    /// Missing or unrecognized session code.
    Unknown,
}

impl Session {
    /// Decode a numeric session code. Codes outside 1..=12 map to Unknown.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Session::January,
            2 => Session::February,
            3 => Session::FebMarch,
            4 => Session::April,
            5 => Session::May,
            6 => Session::MayJune,
            7 => Session::July,
            8 => Session::August,
            9 => Session::September,
            10 => Session::October,
            11 => Session::OctNov,
            12 => Session::December,
            _ => Session::Unknown,
        }
    }

    /// Parse a session display name, as carried by legacy pre-expanded records.
    pub fn from_name(name: &str) -> Self {
        match name {
            "January" => Session::January,
            "February" => Session::February,
            "Feb/March" => Session::FebMarch,
            "April" => Session::April,
            "May" => Session::May,
            "May/June" => Session::MayJune,
            "July" => Session::July,
            "August" => Session::August,
            "September" => Session::September,
            "October" => Session::October,
            "Oct/Nov" => Session::OctNov,
            "December" => Session::December,
            _ => Session::Unknown,
        }
    }

    /// Display name used in group keys and filter matching.
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::January => "January",
            Session::February => "February",
            Session::FebMarch => "Feb/March",
            Session::April => "April",
            Session::May => "May",
            Session::MayJune => "May/June",
            Session::July => "July",
            Session::August => "August",
            Session::September => "September",
            Session::October => "October",
            Session::OctNov => "Oct/Nov",
            Session::December => "December",
            Session::Unknown => "Unknown",
        }
    }

    /// Rank from the fixed month table used for within-year ordering.
    ///
    /// Only single-month names appear in the table; combined names like
    /// May/June rank 0 and therefore sort last within a year tie.
    pub fn month_rank(&self) -> u8 {
        match self {
            Session::January => 1,
            Session::February => 2,
            Session::May => 5,
            Session::October => 10,
            _ => 0,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::Unknown
    }
}

impl From<String> for Session {
    fn from(name: String) -> Self {
        Session::from_name(&name)
    }
}

impl From<Session> for String {
    fn from(session: Session) -> Self {
        session.as_str().to_string()
    }
}

/// Qualification level identifying one cache partition.
///
/// The first three levels form the component-keyed family; IAL is the single
/// partition of the unit-coded family. The level tag decides which tuple
/// dialect the decoder applies and how URLs are reconstructed, resolved once
/// per partition rather than inferred per record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QualificationLevel {
    Igcse,
    OLevel,
    AsALevel,
    Ial,
}

/// Encoding/URL-reconstruction scheme shared by a set of levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetFamily {
    /// Payload keyed by unit code; field 4 is a title; URLs stored absolute.
    UnitCoded,
    /// Payload keyed by subject; field 4 is a component; URLs derived.
    ComponentKeyed,
}

impl QualificationLevel {
    /// All partition keys, in background-prefetch order.
    pub const ALL: [QualificationLevel; 4] = [
        QualificationLevel::Igcse,
        QualificationLevel::OLevel,
        QualificationLevel::AsALevel,
        QualificationLevel::Ial,
    ];

    /// The component-keyed partitions targeted by background prefetch.
    pub const COMPONENT_LEVELS: [QualificationLevel; 3] = [
        QualificationLevel::Igcse,
        QualificationLevel::OLevel,
        QualificationLevel::AsALevel,
    ];

    /// Display name, also used as the record Category value.
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationLevel::Igcse => "IGCSE",
            QualificationLevel::OLevel => "O Level",
            QualificationLevel::AsALevel => "AS and A Level",
            QualificationLevel::Ial => "IAL",
        }
    }

    /// Parse a Category display name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "IGCSE" => Some(QualificationLevel::Igcse),
            "O Level" => Some(QualificationLevel::OLevel),
            "AS and A Level" => Some(QualificationLevel::AsALevel),
            "IAL" => Some(QualificationLevel::Ial),
            _ => None,
        }
    }

    /// Which encoding family this partition belongs to.
    pub fn family(&self) -> DatasetFamily {
        match self {
            QualificationLevel::Ial => DatasetFamily::UnitCoded,
            _ => DatasetFamily::ComponentKeyed,
        }
    }

    /// Bulk data file name for this partition.
    pub fn data_file_name(&self) -> String {
        use crate::constants::retrieval::{CIE_FILE_PREFIX, DATA_FILE_EXT, IAL_DATA_FILE};
        match self {
            QualificationLevel::Ial => IAL_DATA_FILE.to_string(),
            level => format!(
                "{}{}{}",
                CIE_FILE_PREFIX,
                level.as_str().replace(' ', "_").replace('&', "and"),
                DATA_FILE_EXT
            ),
        }
    }
}

impl fmt::Display for QualificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for QualificationLevel {
    fn from(name: String) -> Self {
        QualificationLevel::from_name(&name).unwrap_or(QualificationLevel::Igcse)
    }
}

impl From<QualificationLevel> for String {
    fn from(level: QualificationLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Canonical catalogue record, uniform across both encoding families.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Four-digit examination year; `None` when the source carried none.
    pub year: Option<i32>,
    /// Examination session.
    pub session: Session,
    /// Document kind.
    pub kind: DocKind,
    /// Component/paper number, absent for the unit-coded family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentId>,
    /// Human-readable subject name, or the raw payload key.
    pub subject: SubjectName,
    /// Unit label; grouping falls back through component/unit-code/General.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Unit code, present only for the unit-coded family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<UnitCode>,
    /// Explicit document title when the source supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fully-qualified resource location.
    pub url: UrlString,
    /// Partition this record belongs to.
    pub level: QualificationLevel,
}

/// Year key of a by-session group: a real year or the Resources bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupYear {
    /// Group holds records from this examination year.
    Dated(i32),
    /// Group collects records without a usable year.
    Resources,
}

impl GroupYear {
    /// Numeric stand-in under ascending (oldest-first) ordering.
    pub fn sort_key_oldest(&self) -> i32 {
        match self {
            GroupYear::Dated(year) => *year,
            GroupYear::Resources => crate::constants::grouping::RESOURCES_YEAR_OLDEST,
        }
    }

    /// Numeric stand-in under descending (newest-first) ordering.
    pub fn sort_key_newest(&self) -> i32 {
        match self {
            GroupYear::Dated(year) => *year,
            GroupYear::Resources => crate::constants::grouping::RESOURCES_YEAR_NEWEST,
        }
    }
}

impl fmt::Display for GroupYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupYear::Dated(year) => write!(f, "{year}"),
            GroupYear::Resources => f.write_str(crate::constants::grouping::RESOURCES_LABEL),
        }
    }
}
