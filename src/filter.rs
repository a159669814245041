//! Free-text filtering over decoded record sets.

use crate::record::{DatasetFamily, PaperRecord};
use crate::subjects::resolve_optional_subject_name;

/// Reduce a record set to those matching a free-text query.
///
/// The query is split on whitespace; a record matches when every token is a
/// case-insensitive substring of at least one searchable field. An empty
/// query returns the input unchanged. Result order equals input order; no
/// ranking is applied.
pub fn filter_records(
    records: &[PaperRecord],
    query: &str,
    family: DatasetFamily,
) -> Vec<PaperRecord> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches_tokens(record, &tokens, family))
        .cloned()
        .collect()
}

/// Count matching records without materializing the filtered set.
pub fn matching_count(records: &[PaperRecord], query: &str, family: DatasetFamily) -> usize {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return records.len();
    }
    records
        .iter()
        .filter(|record| matches_tokens(record, &tokens, family))
        .count()
}

fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches_tokens(record: &PaperRecord, tokens: &[String], family: DatasetFamily) -> bool {
    let mut fields: Vec<String> = Vec::with_capacity(8);
    fields.push(record.subject.to_lowercase());
    if let Some(year) = record.year {
        fields.push(year.to_string());
    }
    if let Some(unit) = &record.unit {
        fields.push(unit.to_lowercase());
    }
    if let Some(unit_code) = &record.unit_code {
        fields.push(unit_code.to_lowercase());
    }
    fields.push(record.session.as_str().to_lowercase());
    if let Some(title) = &record.title {
        fields.push(title.to_lowercase());
    }
    if let Some(component) = &record.component {
        fields.push(component.to_lowercase());
    }
    if family == DatasetFamily::UnitCoded {
        fields.push(resolve_optional_subject_name(record.unit_code.as_deref()).to_lowercase());
    }

    tokens
        .iter()
        .all(|token| fields.iter().any(|field| field.contains(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DocKind, QualificationLevel, Session};

    fn cie_record(subject: &str, year: i32, component: &str) -> PaperRecord {
        PaperRecord {
            year: Some(year),
            session: Session::MayJune,
            kind: DocKind::Qp,
            component: Some(component.to_string()),
            subject: subject.to_string(),
            unit: Some(component.to_string()),
            unit_code: None,
            title: None,
            url: format!("https://host/{subject}/{component}.pdf"),
            level: QualificationLevel::Igcse,
        }
    }

    fn ial_record(unit_code: &str, year: i32, title: &str) -> PaperRecord {
        PaperRecord {
            year: Some(year),
            session: Session::January,
            kind: DocKind::Qp,
            component: None,
            subject: unit_code.to_string(),
            unit: None,
            unit_code: Some(unit_code.to_string()),
            title: Some(title.to_string()),
            url: format!("https://host/{unit_code}.pdf"),
            level: QualificationLevel::Ial,
        }
    }

    #[test]
    fn empty_query_is_identity() {
        let records = vec![
            cie_record("Biology (0610)", 2024, "22"),
            cie_record("Chemistry (0620)", 2019, "41"),
        ];
        let filtered = filter_records(&records, "", DatasetFamily::ComponentKeyed);
        assert_eq!(filtered, records);
        let filtered = filter_records(&records, "   ", DatasetFamily::ComponentKeyed);
        assert_eq!(filtered, records);
    }

    #[test]
    fn every_token_must_match_some_field() {
        let records = vec![
            cie_record("Biology (0610)", 2020, "22"),
            cie_record("Biology (0610)", 2019, "22"),
            cie_record("Chemistry (0620)", 2020, "41"),
        ];
        let filtered = filter_records(&records, "bio 2020", DatasetFamily::ComponentKeyed);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].year, Some(2020));
        assert_eq!(filtered[0].subject, "Biology (0610)");
    }

    #[test]
    fn matching_is_case_insensitive_and_order_preserving() {
        let records = vec![
            cie_record("Physics (0625)", 2022, "12"),
            cie_record("physics (0972)", 2023, "32"),
        ];
        let filtered = filter_records(&records, "PHYSICS", DatasetFamily::ComponentKeyed);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].subject, "Physics (0625)");
        assert_eq!(filtered[1].subject, "physics (0972)");
    }

    #[test]
    fn unit_coded_family_matches_on_the_resolved_subject_name() {
        let records = vec![
            ial_record("WBI11", 2024, "Unit 1"),
            ial_record("WCH11", 2024, "Unit 1"),
        ];
        // "biology" appears in no stored field; only the resolved name matches.
        let filtered = filter_records(&records, "biology", DatasetFamily::UnitCoded);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].unit_code.as_deref(), Some("WBI11"));

        // Without the family tag the derived field does not participate.
        let filtered = filter_records(&records, "biology", DatasetFamily::ComponentKeyed);
        assert!(filtered.is_empty());
    }

    #[test]
    fn component_and_session_fields_participate() {
        let records = vec![
            cie_record("Biology (0610)", 2024, "22"),
            cie_record("Biology (0610)", 2024, "41"),
        ];
        let filtered = filter_records(&records, "41 may", DatasetFamily::ComponentKeyed);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].component.as_deref(), Some("41"));
        assert_eq!(
            matching_count(&records, "may/june", DatasetFamily::ComponentKeyed),
            2
        );
    }
}
