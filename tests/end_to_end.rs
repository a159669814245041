use std::sync::Arc;

use paperdex::{
    CatalogueLoader, CatalogueView, DocKind, Group, GroupYear, QualificationLevel, Session,
    SortOrder, StaticFetcher, ViewMode,
};

const IGCSE_PAYLOAD: &str = r#"{
    "Biology (0610)": [
        [24, 6, "qp", "22", "0610_s24_qp_22.pdf"],
        [24, 6, "ms", "22", "0610_s24_ms_22.pdf"]
    ]
}"#;

const IAL_PAYLOAD: &str = r#"{
    "WBI11": [
        [24, 1, "qp", "Unit 1: Molecules", "https://qualifications.example/wbi11_jan24_qp.pdf"],
        [24, 1, "ms", "Unit 1: Molecules", "https://qualifications.example/wbi11_jan24_ms.pdf"],
        [19, 6, "qp", "Unit 1: Molecules", "https://qualifications.example/wbi11_jun19_qp.pdf"]
    ],
    "WCH11": [
        [24, 1, "qp", "Structure and Bonding", "https://qualifications.example/wch11_jan24_qp.pdf"]
    ]
}"#;

fn loaded_view(level: QualificationLevel, payload: &str) -> CatalogueView {
    let fetcher = StaticFetcher::default().with_payload(level, payload);
    let loader = CatalogueLoader::new(Arc::new(fetcher));
    loader.load_partition(level).expect("partition loads");
    CatalogueView::new(loader.cache(), level)
}

#[test]
fn igcse_payload_decodes_groups_and_flags_as_current() {
    let view = loaded_view(QualificationLevel::Igcse, IGCSE_PAYLOAD);
    assert_eq!(view.total_count(), 2);

    let groups = view.groups(ViewMode::Paper, "", SortOrder::Newest);
    assert_eq!(groups.len(), 1);
    let Group::Paper(group) = &groups[0] else {
        panic!("by-paper mode yields paper groups");
    };
    assert_eq!(group.subject, "Biology (0610)");
    assert_eq!(group.unit, "22");
    assert!(!group.legacy_syllabus);

    assert_eq!(group.sessions.len(), 1);
    let row = &group.sessions[0];
    assert_eq!(row.year, Some(2024));
    assert_eq!(row.session, Session::MayJune);
    let qp = row.qp.as_ref().expect("qp slot populated");
    let ms = row.ms.as_ref().expect("ms slot populated");
    assert_eq!(qp.kind, DocKind::Qp);
    assert_eq!(
        qp.url,
        "https://papers.xtremepape.rs/CAIE/IGCSE/Biology (0610)/0610_s24_qp_22.pdf"
    );
    assert_eq!(
        ms.url,
        "https://papers.xtremepape.rs/CAIE/IGCSE/Biology (0610)/0610_s24_ms_22.pdf"
    );
    assert!(row.er.is_none());
    assert!(row.gt.is_none());
    assert!(row.others.is_empty());
}

#[test]
fn ial_by_session_view_resolves_subjects_and_nests_units() {
    let view = loaded_view(QualificationLevel::Ial, IAL_PAYLOAD);
    assert_eq!(view.total_count(), 4);

    let groups = view.groups(ViewMode::Session, "", SortOrder::Newest);
    assert_eq!(groups.len(), 3);

    let Group::UnitSession(first) = &groups[0] else {
        panic!("unit-coded by-session mode yields unit session groups");
    };
    // Subject ordering puts Biology before Chemistry under newest.
    assert_eq!(first.subject, "Biology");
    assert_eq!(first.year, GroupYear::Dated(2024));
    assert_eq!(first.session, Session::January);
    assert_eq!(first.units.len(), 1);
    let unit = &first.units[0];
    assert_eq!(unit.unit_code, "WBI11");
    assert!(unit.qp.is_some());
    assert!(unit.ms.is_some());

    let Group::UnitSession(second) = &groups[1] else {
        panic!("unit session group expected");
    };
    assert_eq!(second.subject, "Biology");
    assert_eq!(second.year, GroupYear::Dated(2019));

    let Group::UnitSession(third) = &groups[2] else {
        panic!("unit session group expected");
    };
    assert_eq!(third.subject, "Chemistry");
}

#[test]
fn filtering_narrows_counts_and_groups_together() {
    let view = loaded_view(QualificationLevel::Ial, IAL_PAYLOAD);

    assert_eq!(view.filtered_count("biology"), 3);
    assert_eq!(view.filtered_count("biology 2024"), 2);
    assert_eq!(view.filtered_count("molecules"), 3);
    assert_eq!(view.filtered_count("zzz"), 0);

    let groups = view.groups(ViewMode::Paper, "chemistry", SortOrder::Newest);
    assert_eq!(groups.len(), 1);
    let Group::Paper(group) = &groups[0] else {
        panic!("paper group expected");
    };
    assert_eq!(group.subject, "Chemistry");
    assert_eq!(group.unit, "WCH11");
}

#[test]
fn component_by_session_view_from_the_same_partition() {
    let view = loaded_view(QualificationLevel::Igcse, IGCSE_PAYLOAD);
    let groups = view.groups(ViewMode::Session, "", SortOrder::Newest);
    assert_eq!(groups.len(), 1);
    let Group::ComponentSession(group) = &groups[0] else {
        panic!("component family by-session mode yields component groups");
    };
    assert_eq!(group.subject, "Biology (0610)");
    assert_eq!(group.year, GroupYear::Dated(2024));
    assert_eq!(group.components.len(), 1);
    assert_eq!(group.components[0].component, "22");
    assert!(group.components[0].qp.is_some());
    assert!(group.components[0].ms.is_some());
    assert!(group.general.er.is_none());
}
