//! Record decoding: expands compact encoded payloads into canonical records.
//!
//! Two wire shapes exist. The current one groups 5-element tuples under a
//! subject (or unit-code) key; a legacy one is a flat array of pre-expanded
//! objects with long-form or abbreviated field names. Which tuple dialect
//! applies is decided once per partition by the caller-supplied
//! qualification level, never inferred per record.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::constants::urls::CAIE_BASE;
use crate::record::{DatasetFamily, DocKind, PaperRecord, QualificationLevel, Session};
use crate::types::SubjectKey;

/// One compact encoded record: `[yearOffset, sessionCode, kind,
/// componentOrTitle, filenameOrUrl]`.
///
/// Field 4 means "component" for the component-keyed family and "title" for
/// the unit-coded family; field 5 is a bare file name for the former and a
/// full URL for the latter.
#[derive(Clone, Debug, Deserialize)]
pub struct EncodedTuple(
    pub i64,
    pub i64,
    pub String,
    pub Option<String>,
    pub String,
);

/// A pre-expanded legacy record with long-form or abbreviated keys.
///
/// Every field is optional; decoding is best-effort and never drops a
/// record. When both spellings of a field are present the long form wins.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LegacyRecord {
    #[serde(rename = "Year", default)]
    pub year: Option<Value>,
    #[serde(rename = "y", default)]
    pub year_abbrev: Option<Value>,
    #[serde(rename = "Session", default)]
    pub session: Option<String>,
    #[serde(rename = "s", default)]
    pub session_abbrev: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "t", default)]
    pub kind_abbrev: Option<String>,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(rename = "u", default)]
    pub url_abbrev: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "c", default)]
    pub category_abbrev: Option<String>,
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
    #[serde(rename = "S", default)]
    pub subject_abbrev: Option<String>,
    #[serde(rename = "Component", default)]
    pub component: Option<String>,
    #[serde(rename = "C", default)]
    pub component_abbrev: Option<String>,
    #[serde(rename = "Unit", default)]
    pub unit: Option<String>,
    #[serde(rename = "U", default)]
    pub unit_abbrev: Option<String>,
    #[serde(rename = "Unit_Code", default)]
    pub unit_code: Option<String>,
    #[serde(rename = "uc", default)]
    pub unit_code_abbrev: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "T", default)]
    pub title_abbrev: Option<String>,
}

/// Raw encoded payload for one partition.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum EncodedPayload {
    /// Current shape: subject-key (or unit-code-key) to ordered tuples.
    Grouped(IndexMap<SubjectKey, Vec<EncodedTuple>>),
    /// Legacy shape: flat array of pre-expanded objects.
    Legacy(Vec<LegacyRecord>),
}

/// Expand one partition's payload into canonical records.
///
/// Pure transform; output order follows payload iteration order. No
/// ordering guarantee is assumed downstream.
pub fn decode_partition(payload: EncodedPayload, level: QualificationLevel) -> Vec<PaperRecord> {
    match payload {
        EncodedPayload::Grouped(groups) => {
            let mut records = Vec::new();
            for (key, tuples) in groups {
                for tuple in tuples {
                    records.push(decode_tuple(&key, tuple, level));
                }
            }
            records
        }
        EncodedPayload::Legacy(items) => items
            .into_iter()
            .map(|item| decode_legacy(item, level))
            .collect(),
    }
}

/// Reconstruct a 4-digit year from a 2-digit offset. Purely arithmetic,
/// no calendar validation: offsets below 50 land in the 2000s.
pub fn expand_year(offset: i64) -> i32 {
    if offset < 50 {
        2000 + offset as i32
    } else {
        1900 + offset as i32
    }
}

fn decode_tuple(key: &str, tuple: EncodedTuple, level: QualificationLevel) -> PaperRecord {
    let EncodedTuple(offset, session_code, kind, field4, stored) = tuple;
    let year = Some(expand_year(offset));
    let session = Session::from_code(session_code);
    let kind = DocKind::from_raw(&kind);

    match level.family() {
        DatasetFamily::ComponentKeyed => PaperRecord {
            year,
            session,
            kind,
            component: field4.clone(),
            subject: key.to_string(),
            unit: field4,
            unit_code: None,
            title: None,
            url: format!("{}{}/{}/{}", CAIE_BASE, level.as_str(), key, stored),
            level,
        },
        DatasetFamily::UnitCoded => PaperRecord {
            year,
            session,
            kind,
            component: None,
            subject: key.to_string(),
            unit: None,
            unit_code: Some(key.to_string()),
            title: field4,
            // Stored value is already absolute for this family.
            url: stored,
            level,
        },
    }
}

fn decode_legacy(item: LegacyRecord, level: QualificationLevel) -> PaperRecord {
    let year = item
        .year
        .as_ref()
        .or(item.year_abbrev.as_ref())
        .and_then(coerce_year);
    let session = item
        .session
        .as_deref()
        .or(item.session_abbrev.as_deref())
        .map(Session::from_name)
        .unwrap_or(Session::Unknown);
    let kind = DocKind::from_raw(item.kind.as_deref().or(item.kind_abbrev.as_deref()).unwrap_or(""));
    let level = item
        .category
        .as_deref()
        .or(item.category_abbrev.as_deref())
        .and_then(QualificationLevel::from_name)
        .unwrap_or(level);

    PaperRecord {
        year,
        session,
        kind,
        component: item.component.or(item.component_abbrev),
        subject: item.subject.or(item.subject_abbrev).unwrap_or_default(),
        unit: item.unit.or(item.unit_abbrev),
        unit_code: item.unit_code.or(item.unit_code_abbrev),
        title: item.title.or(item.title_abbrev),
        url: item.url.or(item.url_abbrev).unwrap_or_default(),
        level,
    }
}

fn coerce_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(num) => num.as_i64().map(|year| year as i32),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped(json: &str) -> EncodedPayload {
        serde_json::from_str(json).expect("payload parses")
    }

    #[test]
    fn year_offsets_split_at_fifty() {
        assert_eq!(expand_year(15), 2015);
        assert_eq!(expand_year(99), 1999);
        assert_eq!(expand_year(49), 2049);
        assert_eq!(expand_year(50), 1950);
        assert_eq!(expand_year(0), 2000);
    }

    #[test]
    fn component_family_reconstructs_urls_from_parts() {
        let payload = grouped(
            r#"{"Biology (0610)": [[24, 6, "qp", "22", "0610_s24_qp_22.pdf"]]}"#,
        );
        let records = decode_partition(payload, QualificationLevel::Igcse);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.year, Some(2024));
        assert_eq!(record.session, Session::MayJune);
        assert_eq!(record.kind, DocKind::Qp);
        assert_eq!(record.component.as_deref(), Some("22"));
        assert_eq!(record.subject, "Biology (0610)");
        assert_eq!(
            record.url,
            "https://papers.xtremepape.rs/CAIE/IGCSE/Biology (0610)/0610_s24_qp_22.pdf"
        );
        assert!(record.unit_code.is_none());
        assert!(record.title.is_none());
    }

    #[test]
    fn unit_coded_family_relabels_fields_and_passes_urls_through() {
        let payload = grouped(
            r#"{"WBI11": [[19, 1, "ms", "Unit 1: Molecules", "https://qualifications.example/wbi11_ms.pdf"]]}"#,
        );
        let records = decode_partition(payload, QualificationLevel::Ial);
        let record = &records[0];
        assert_eq!(record.year, Some(2019));
        assert_eq!(record.session, Session::January);
        assert_eq!(record.unit_code.as_deref(), Some("WBI11"));
        assert_eq!(record.title.as_deref(), Some("Unit 1: Molecules"));
        assert!(record.component.is_none());
        assert_eq!(record.url, "https://qualifications.example/wbi11_ms.pdf");
    }

    #[test]
    fn null_fourth_field_decodes_without_component() {
        let payload = grouped(r#"{"Biology (0610)": [[15, 3, "er", null, "0610_m15_er.pdf"]]}"#);
        let records = decode_partition(payload, QualificationLevel::Igcse);
        assert_eq!(records[0].component, None);
        assert_eq!(records[0].session, Session::FebMarch);
        assert_eq!(records[0].kind, DocKind::Er);
    }

    #[test]
    fn unknown_session_codes_decode_to_unknown() {
        let payload = grouped(r#"{"X": [[24, 0, "qp", null, "x.pdf"]]}"#);
        let records = decode_partition(payload, QualificationLevel::OLevel);
        assert_eq!(records[0].session, Session::Unknown);
    }

    #[test]
    fn decode_preserves_payload_iteration_order() {
        let payload = grouped(
            r#"{"Zoology (9999)": [[24, 6, "qp", "1", "a.pdf"]],
                "Accounting (0452)": [[23, 6, "qp", "1", "b.pdf"], [22, 6, "ms", "1", "c.pdf"]]}"#,
        );
        let records = decode_partition(payload, QualificationLevel::Igcse);
        let subjects: Vec<&str> = records.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(
            subjects,
            vec!["Zoology (9999)", "Accounting (0452)", "Accounting (0452)"]
        );
    }

    #[test]
    fn legacy_records_prefer_long_form_keys() {
        let payload: EncodedPayload = serde_json::from_str(
            r#"[{"Year": 2018, "y": 2001, "Session": "May/June", "Type": "qp",
                 "URL": "https://host/a.pdf", "Subject": "Physics (0625)", "C": "41"}]"#,
        )
        .expect("legacy payload parses");
        let records = decode_partition(payload, QualificationLevel::Igcse);
        let record = &records[0];
        assert_eq!(record.year, Some(2018));
        assert_eq!(record.session, Session::MayJune);
        assert_eq!(record.subject, "Physics (0625)");
        assert_eq!(record.component.as_deref(), Some("41"));
        assert_eq!(record.url, "https://host/a.pdf");
    }

    #[test]
    fn legacy_records_decode_abbreviated_keys_and_tolerate_gaps() {
        let payload: EncodedPayload = serde_json::from_str(
            r#"[{"y": "2010", "t": "gt", "u": "https://host/gt.pdf", "uc": "WMA11"}]"#,
        )
        .expect("legacy payload parses");
        let records = decode_partition(payload, QualificationLevel::Ial);
        let record = &records[0];
        assert_eq!(record.year, Some(2010));
        assert_eq!(record.session, Session::Unknown);
        assert_eq!(record.kind, DocKind::Gt);
        assert_eq!(record.unit_code.as_deref(), Some("WMA11"));
        assert_eq!(record.level, QualificationLevel::Ial);
    }

    #[test]
    fn legacy_category_overrides_the_partition_level() {
        let payload: EncodedPayload = serde_json::from_str(
            r#"[{"Year": 2020, "Type": "qp", "URL": "https://host/x.pdf",
                 "Subject": "Maths", "Category": "O Level"}]"#,
        )
        .expect("legacy payload parses");
        let records = decode_partition(payload, QualificationLevel::Igcse);
        assert_eq!(records[0].level, QualificationLevel::OLevel);
    }
}
