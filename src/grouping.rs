//! Grouping and sorting: organizes a filtered record set into the
//! hierarchical shapes the view layer renders.
//!
//! Three shapes exist: by-paper (subject/unit with session rows, either
//! family), by-session for the unit-coded family (subject/session/year with
//! unit entries), and by-session for the component-keyed family
//! (subject/year/session with per-component buckets plus one general
//! bucket). The engine is a pure function of the record set, view mode,
//! dataset family, and sort order; callers recompute rather than mutate.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::constants::grouping::{GENERAL_UNIT, RECENT_SYLLABUS_YEARS};
use crate::record::{DatasetFamily, DocKind, GroupYear, PaperRecord, Session};
use crate::subjects::resolve_optional_subject_name;
use crate::types::{ComponentId, GroupId, SubjectName, UnitCode};
use crate::utils::numeric_compare;

/// Hierarchy shape requested by the view layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// Subject/unit groups holding one row per examination session.
    Paper,
    /// Session groups holding unit or component entries.
    Session,
}

/// Ordering applied to emitted groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
    Az,
    Za,
}

/// One emitted group; the variant depends on view mode and family.
#[derive(Clone, Debug, PartialEq)]
pub enum Group {
    Paper(PaperGroup),
    UnitSession(UnitSessionGroup),
    ComponentSession(ComponentSessionGroup),
}

/// One examination session's documents inside a by-paper group.
///
/// Each named kind holds at most one record; assignment is set-per-record
/// in input order, so a later duplicate for the same kind overwrites an
/// earlier one. Everything else accumulates in `others`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionRow {
    pub year: Option<i32>,
    pub session: Session,
    pub qp: Option<PaperRecord>,
    pub ms: Option<PaperRecord>,
    pub er: Option<PaperRecord>,
    pub gt: Option<PaperRecord>,
    pub others: Vec<PaperRecord>,
}

/// By-paper group: every session of one (subject, unit) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PaperGroup {
    pub id: GroupId,
    pub subject: SubjectName,
    pub unit: String,
    /// Session rows, newest first.
    pub sessions: Vec<SessionRow>,
    /// True when no session falls in the recent-syllabus years.
    pub legacy_syllabus: bool,
}

/// One unit's documents inside a unit-coded by-session group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnitEntry {
    pub unit_code: UnitCode,
    pub qp: Option<PaperRecord>,
    pub ms: Option<PaperRecord>,
    pub er: Option<PaperRecord>,
    pub others: Vec<PaperRecord>,
}

/// By-session group for the unit-coded family.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitSessionGroup {
    pub id: GroupId,
    pub subject: SubjectName,
    pub session: Session,
    pub year: GroupYear,
    /// Unit entries sorted lexicographically by unit code.
    pub units: Vec<UnitEntry>,
}

/// One component's documents inside a component-keyed by-session group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentEntry {
    pub component: ComponentId,
    pub qp: Option<PaperRecord>,
    pub ms: Option<PaperRecord>,
    pub others: Vec<PaperRecord>,
}

/// Group-level bucket for records without a component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneralBucket {
    pub er: Option<PaperRecord>,
    pub gt: Option<PaperRecord>,
    pub others: Vec<PaperRecord>,
}

/// By-session group for the component-keyed family.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSessionGroup {
    pub id: GroupId,
    pub subject: SubjectName,
    pub year: GroupYear,
    pub session: Session,
    pub general: GeneralBucket,
    /// Component buckets in numeric-aware order.
    pub components: Vec<ComponentEntry>,
}

/// Organize a filtered record set into sorted groups.
///
/// Pure function of its four inputs; holds no state across calls.
pub fn group_records(
    records: &[PaperRecord],
    mode: ViewMode,
    family: DatasetFamily,
    sort: SortOrder,
) -> Vec<Group> {
    match mode {
        ViewMode::Paper => group_by_paper(records, family, sort)
            .into_iter()
            .map(Group::Paper)
            .collect(),
        ViewMode::Session => match family {
            DatasetFamily::UnitCoded => group_by_session_units(records, sort)
                .into_iter()
                .map(Group::UnitSession)
                .collect(),
            DatasetFamily::ComponentKeyed => group_by_session_components(records, sort)
                .into_iter()
                .map(Group::ComponentSession)
                .collect(),
        },
    }
}

/// Build the by-paper hierarchy for either family.
pub fn group_by_paper(
    records: &[PaperRecord],
    family: DatasetFamily,
    sort: SortOrder,
) -> Vec<PaperGroup> {
    struct Accumulator {
        subject: SubjectName,
        unit: String,
        sessions: IndexMap<(Option<i32>, Session), SessionRow>,
    }

    let mut groups: IndexMap<GroupId, Accumulator> = IndexMap::new();
    for record in records {
        let (subject, unit) = match family {
            DatasetFamily::UnitCoded => (
                resolve_optional_subject_name(record.unit_code.as_deref()),
                non_empty(record.unit_code.as_deref())
                    .unwrap_or(GENERAL_UNIT)
                    .to_string(),
            ),
            DatasetFamily::ComponentKeyed => (
                record.subject.clone(),
                non_empty(record.unit.as_deref())
                    .or_else(|| non_empty(record.component.as_deref()))
                    .or_else(|| non_empty(record.unit_code.as_deref()))
                    .unwrap_or(GENERAL_UNIT)
                    .to_string(),
            ),
        };
        let id = format!("{subject}|{unit}");
        let group = groups.entry(id).or_insert_with(|| Accumulator {
            subject,
            unit,
            sessions: IndexMap::new(),
        });
        let row = group
            .sessions
            .entry((record.year, record.session))
            .or_insert_with(|| SessionRow {
                year: record.year,
                session: record.session,
                ..SessionRow::default()
            });
        match &record.kind {
            DocKind::Qp => row.qp = Some(record.clone()),
            DocKind::Ms => row.ms = Some(record.clone()),
            DocKind::Er => row.er = Some(record.clone()),
            DocKind::Gt => row.gt = Some(record.clone()),
            DocKind::Other(_) => row.others.push(record.clone()),
        }
    }

    let mut out: Vec<PaperGroup> = groups
        .into_iter()
        .map(|(id, group)| {
            let mut sessions: Vec<SessionRow> = group.sessions.into_values().collect();
            sessions.sort_by(|a, b| {
                b.year
                    .unwrap_or(i32::MIN)
                    .cmp(&a.year.unwrap_or(i32::MIN))
                    .then_with(|| b.session.month_rank().cmp(&a.session.month_rank()))
            });
            let legacy_syllabus = !sessions
                .iter()
                .any(|row| matches!(row.year, Some(year) if RECENT_SYLLABUS_YEARS.contains(&year)));
            PaperGroup {
                id,
                subject: group.subject,
                unit: group.unit,
                sessions,
                legacy_syllabus,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        // Legacy-syllabus groups always trail, whatever the chosen order.
        if a.legacy_syllabus != b.legacy_syllabus {
            return if a.legacy_syllabus {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        match sort {
            SortOrder::Az => a.subject.cmp(&b.subject),
            SortOrder::Za => b.subject.cmp(&a.subject),
            SortOrder::Newest | SortOrder::Oldest => a
                .subject
                .cmp(&b.subject)
                .then_with(|| numeric_compare(&a.unit, &b.unit)),
        }
    });
    out
}

/// Build the by-session hierarchy for the unit-coded family.
pub fn group_by_session_units(records: &[PaperRecord], sort: SortOrder) -> Vec<UnitSessionGroup> {
    struct Accumulator {
        subject: SubjectName,
        session: Session,
        year: GroupYear,
        units: IndexMap<UnitCode, UnitEntry>,
    }

    let mut groups: IndexMap<(SubjectName, Session, GroupYear), Accumulator> = IndexMap::new();
    for record in records {
        let subject = resolve_optional_subject_name(record.unit_code.as_deref());
        let year = group_year(record.year);
        let group = groups
            .entry((subject.clone(), record.session, year))
            .or_insert_with(|| Accumulator {
                subject,
                session: record.session,
                year,
                units: IndexMap::new(),
            });
        let unit_code = non_empty(record.unit_code.as_deref())
            .unwrap_or(GENERAL_UNIT)
            .to_string();
        let entry = group
            .units
            .entry(unit_code.clone())
            .or_insert_with(|| UnitEntry {
                unit_code,
                ..UnitEntry::default()
            });
        match &record.kind {
            DocKind::Qp => entry.qp = Some(record.clone()),
            DocKind::Ms => entry.ms = Some(record.clone()),
            DocKind::Er => entry.er = Some(record.clone()),
            _ => entry.others.push(record.clone()),
        }
    }

    let mut out: Vec<UnitSessionGroup> = groups
        .into_values()
        .map(|group| {
            let mut units: Vec<UnitEntry> = group.units.into_values().collect();
            units.sort_by(|a, b| a.unit_code.cmp(&b.unit_code));
            UnitSessionGroup {
                id: format!("{}|{}|{}", group.subject, group.session, group.year),
                subject: group.subject,
                session: group.session,
                year: group.year,
                units,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        session_group_order(
            sort,
            (&a.subject, a.year, a.session),
            (&b.subject, b.year, b.session),
        )
    });
    out
}

/// Build the by-session hierarchy for the component-keyed family.
pub fn group_by_session_components(
    records: &[PaperRecord],
    sort: SortOrder,
) -> Vec<ComponentSessionGroup> {
    struct Accumulator {
        subject: SubjectName,
        year: GroupYear,
        session: Session,
        general: GeneralBucket,
        components: IndexMap<ComponentId, ComponentEntry>,
    }

    let mut groups: IndexMap<(SubjectName, GroupYear, Session), Accumulator> = IndexMap::new();
    for record in records {
        let year = group_year(record.year);
        let group = groups
            .entry((record.subject.clone(), year, record.session))
            .or_insert_with(|| Accumulator {
                subject: record.subject.clone(),
                year,
                session: record.session,
                general: GeneralBucket::default(),
                components: IndexMap::new(),
            });
        match non_empty(record.component.as_deref()) {
            Some(component) => {
                let component = component.to_string();
                let entry = group
                    .components
                    .entry(component.clone())
                    .or_insert_with(|| ComponentEntry {
                        component,
                        ..ComponentEntry::default()
                    });
                match &record.kind {
                    DocKind::Qp => entry.qp = Some(record.clone()),
                    DocKind::Ms => entry.ms = Some(record.clone()),
                    _ => entry.others.push(record.clone()),
                }
            }
            None => match &record.kind {
                DocKind::Er => group.general.er = Some(record.clone()),
                DocKind::Gt => group.general.gt = Some(record.clone()),
                _ => group.general.others.push(record.clone()),
            },
        }
    }

    let mut out: Vec<ComponentSessionGroup> = groups
        .into_values()
        .map(|group| {
            let mut components: Vec<ComponentEntry> = group.components.into_values().collect();
            components.sort_by(|a, b| numeric_compare(&a.component, &b.component));
            ComponentSessionGroup {
                id: format!("{}|{}|{}", group.subject, group.year, group.session),
                subject: group.subject,
                year: group.year,
                session: group.session,
                general: group.general,
                components,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        session_group_order(
            sort,
            (&a.subject, a.year, a.session),
            (&b.subject, b.year, b.session),
        )
    });
    out
}

/// Shared group ordering for both by-session shapes.
///
/// az/za compare subjects alone; oldest puts ascending year first with the
/// Resources bucket below all real years; everything else (and every tie)
/// falls through to subject, then descending year with Resources above all
/// real years, then descending month rank.
fn session_group_order(
    sort: SortOrder,
    a: (&str, GroupYear, Session),
    b: (&str, GroupYear, Session),
) -> Ordering {
    let (a_subject, a_year, a_session) = a;
    let (b_subject, b_year, b_session) = b;
    match sort {
        SortOrder::Az => return a_subject.cmp(b_subject),
        SortOrder::Za => return b_subject.cmp(a_subject),
        SortOrder::Oldest => {
            let ordering = a_year.sort_key_oldest().cmp(&b_year.sort_key_oldest());
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        SortOrder::Newest => {}
    }
    a_subject
        .cmp(b_subject)
        .then_with(|| b_year.sort_key_newest().cmp(&a_year.sort_key_newest()))
        .then_with(|| b_session.month_rank().cmp(&a_session.month_rank()))
}

fn group_year(year: Option<i32>) -> GroupYear {
    match year {
        Some(year) => GroupYear::Dated(year),
        None => GroupYear::Resources,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
