/// Constants used by subject-prefix resolution.
pub mod subjects {
    /// Number of leading characters of a unit code that identify the subject.
    pub const SUBJECT_PREFIX_LEN: usize = 3;
    /// Sentinel returned when no unit code is available at all.
    pub const UNKNOWN_SUBJECT: &str = "Unknown Subject";

    /// Static unit-code-prefix to subject-name table for the unit-coded
    /// family. Sorted by prefix for binary search.
    pub const SUBJECT_PREFIXES: [(&str, &str); 24] = [
        ("WAA", "Arabic"),
        ("WAC", "Accounting"),
        ("WBI", "Biology"),
        ("WBS", "Business Studies"),
        ("WCH", "Chemistry"),
        ("WDM", "Decision Mathematics"),
        ("WEC", "Economics"),
        ("WEN", "English Language"),
        ("WET", "English Literature"),
        ("WFM", "Further Mathematics"),
        ("WFR", "French"),
        ("WGE", "Geography"),
        ("WGK", "Greek"),
        ("WGN", "German"),
        ("WHI", "History"),
        ("WIT", "Information Technology"),
        ("WLA", "Law"),
        ("WMA", "Mathematics"),
        ("WME", "Mechanics"),
        ("WPH", "Physics"),
        ("WPM", "Pure Mathematics"),
        ("WPS", "Psychology"),
        ("WSP", "Spanish"),
        ("WST", "Statistics"),
    ];
}

/// Constants used by URL reconstruction for the component-keyed family.
pub mod urls {
    /// Base path all component-family document URLs hang off.
    pub const CAIE_BASE: &str = "https://papers.xtremepape.rs/CAIE/";
}

/// Constants used by the grouping and sorting engine.
pub mod grouping {
    /// Years that mark a group as belonging to the current syllabus.
    ///
    /// Fixed literals rather than derived from the clock: the freshness rule
    /// is part of observable ordering behavior and must not drift.
    pub const RECENT_SYLLABUS_YEARS: [i32; 3] = [2023, 2024, 2025];
    /// Fallback unit label when a record carries no unit, component, or code.
    pub const GENERAL_UNIT: &str = "General";
    /// Bucket label for by-session groups whose records carry no usable year.
    pub const RESOURCES_LABEL: &str = "Resources";
    /// Year stand-in for the Resources bucket under ascending (oldest) order.
    pub const RESOURCES_YEAR_OLDEST: i32 = -1;
    /// Year stand-in for the Resources bucket under descending (newest) order.
    pub const RESOURCES_YEAR_NEWEST: i32 = 9999;
}

/// Constants used by partition retrieval and the chunk probe.
pub mod retrieval {
    /// Highest chunk index probed when a whole-file payload is unavailable.
    pub const MAX_CHUNK_PROBES: usize = 5;
    /// Content-type marker a payload must carry to be decoded.
    pub const JSON_CONTENT_TYPE: &str = "application/json";
    /// Data file for the unit-coded family's single partition.
    pub const IAL_DATA_FILE: &str = "ial_data.json";
    /// File-name prefix for component-family partition files.
    pub const CIE_FILE_PREFIX: &str = "cie_";
    /// File-name extension for partition files.
    pub const DATA_FILE_EXT: &str = ".json";
}

/// Constants used when deriving display titles from stored file names.
pub mod titles {
    /// Title used when a record has neither an explicit title nor a URL.
    pub const FALLBACK_TITLE: &str = "Resource";
    /// Suffix pattern `(for examination from NNNN)` stripped from file names.
    pub const EXAMINATION_NOTE_PREFIX: &str = "(for examination from ";
}
