//! Reusable demo runner: loads a partition through a fetcher, applies a
//! query, and prints the grouped hierarchy to stdout.

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use crate::grouping::{Group, SortOrder, ViewMode};
use crate::record::QualificationLevel;
use crate::retrieval::{CatalogueLoader, PartitionFetcher, StaticFetcher};
use crate::utils::clean_title;
use crate::view::CatalogueView;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Igcse,
    OLevel,
    AsALevel,
    Ial,
}

impl From<LevelArg> for QualificationLevel {
    fn from(value: LevelArg) -> Self {
        match value {
            LevelArg::Igcse => QualificationLevel::Igcse,
            LevelArg::OLevel => QualificationLevel::OLevel,
            LevelArg::AsALevel => QualificationLevel::AsALevel,
            LevelArg::Ial => QualificationLevel::Ial,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Paper,
    Session,
}

impl From<ModeArg> for ViewMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Paper => ViewMode::Paper,
            ModeArg::Session => ViewMode::Session,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Oldest,
    Az,
    Za,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => SortOrder::Newest,
            SortArg::Oldest => SortOrder::Oldest,
            SortArg::Az => SortOrder::Az,
            SortArg::Za => SortOrder::Za,
        }
    }
}

/// Arguments for the catalogue browsing demo.
#[derive(Debug, Parser)]
#[command(name = "browse", about = "Browse a catalogue partition")]
struct BrowseArgs {
    /// Partition to load and browse.
    #[arg(long, value_enum, default_value = "igcse")]
    level: LevelArg,
    /// Hierarchy shape to render.
    #[arg(long, value_enum, default_value = "paper")]
    mode: ModeArg,
    /// Group ordering.
    #[arg(long, value_enum, default_value = "newest")]
    sort: SortArg,
    /// Free-text filter query.
    #[arg(long, default_value = "")]
    query: String,
    /// Maximum number of groups printed.
    #[arg(long, default_value_t = 25)]
    limit: usize,
}

/// Run the browsing demo against a fetcher with the given CLI arguments.
pub fn run_browse_demo<I, T>(fetcher: Arc<dyn PartitionFetcher>, args: I) -> Result<(), Box<dyn Error>>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = BrowseArgs::try_parse_from(args)?;
    let level: QualificationLevel = args.level.into();

    let loader = CatalogueLoader::new(fetcher);
    if let Err(err) = loader.load_partition(level) {
        // Degrade to the empty view, the way the browsing surface does.
        eprintln!("[paperdex] {err}");
    }

    let view = CatalogueView::new(loader.cache(), level);
    let groups = view.groups(args.mode.into(), &args.query, args.sort.into());
    println!(
        "{} - {} of {} records match",
        level,
        view.filtered_count(&args.query),
        view.total_count()
    );
    for group in groups.iter().take(args.limit) {
        print_group(group);
    }
    if groups.len() > args.limit {
        println!("… {} more groups", groups.len() - args.limit);
    }
    Ok(())
}

fn print_group(group: &Group) {
    match group {
        Group::Paper(group) => {
            let tag = if group.legacy_syllabus {
                " [old syllabus]"
            } else {
                ""
            };
            println!("{} - {}{}", group.subject, group.unit, tag);
            for row in &group.sessions {
                let year = row
                    .year
                    .map(|year| year.to_string())
                    .unwrap_or_else(|| "----".to_string());
                let mut slots = Vec::new();
                for (label, slot) in [
                    ("QP", &row.qp),
                    ("MS", &row.ms),
                    ("ER", &row.er),
                    ("GT", &row.gt),
                ] {
                    if slot.is_some() {
                        slots.push(label);
                    }
                }
                println!("  {} {:<9} {}", year, row.session, slots.join(" "));
            }
        }
        Group::UnitSession(group) => {
            println!("{} - {} {}", group.subject, group.session, group.year);
            for unit in &group.units {
                println!("  {}", unit.unit_code);
                for record in &unit.others {
                    println!("    {}", clean_title(record));
                }
            }
        }
        Group::ComponentSession(group) => {
            println!("{} - {} {}", group.subject, group.year, group.session);
            for entry in &group.components {
                println!("  Paper {}", entry.component);
            }
            for record in &group.general.others {
                println!("  {}", clean_title(record));
            }
        }
    }
}

/// Small built-in dataset so the demo runs without a network collaborator.
pub fn sample_fetcher() -> StaticFetcher {
    StaticFetcher::default()
        .with_payload(
            QualificationLevel::Igcse,
            r#"{
                "Biology (0610)": [
                    [24, 6, "qp", "22", "0610_s24_qp_22.pdf"],
                    [24, 6, "ms", "22", "0610_s24_ms_22.pdf"],
                    [24, 6, "er", null, "0610_s24_er.pdf"],
                    [19, 11, "qp", "41", "0610_w19_qp_41.pdf"]
                ],
                "Accounting (0452)": [
                    [15, 3, "ms", "12", "0452_m15_ms_12.pdf"]
                ]
            }"#,
        )
        .with_payload(
            QualificationLevel::Ial,
            r#"{
                "WBI11": [
                    [24, 1, "qp", "Unit 1: Molecules", "https://qualifications.example/wbi11_qp.pdf"],
                    [24, 1, "ms", "Unit 1: Molecules", "https://qualifications.example/wbi11_ms.pdf"]
                ],
                "WMA11": [
                    [23, 10, "qp", "Pure Mathematics 1", "https://qualifications.example/wma11_qp.pdf"]
                ]
            }"#,
        )
}
