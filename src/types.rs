/// Raw subject key as it appears in an encoded payload's top-level grouping.
/// Examples: `Biology (0610)`, `Accounting (0452)`, `WBI11`
pub type SubjectKey = String;
/// Resolved or raw human-readable subject name.
/// Examples: `Biology`, `Further Mathematics`, `Biology (0610)`
pub type SubjectName = String;
/// Unit code for the unit-coded qualification family.
/// Examples: `WBI11`, `WMA14`, `WPH16`
pub type UnitCode = String;
/// Component/paper number for the component-keyed family.
/// Examples: `22`, `41`, `12`
pub type ComponentId = String;
/// Stored document file name inside a subject directory.
/// Example: `0610_s24_qp_22.pdf`
pub type FileName = String;
/// Fully-qualified resource location.
/// Example: `https://papers.xtremepape.rs/CAIE/IGCSE/Biology (0610)/0610_s24_qp_22.pdf`
pub type UrlString = String;
/// Stable identifier for an emitted group, built from its key parts.
/// Examples: `Biology (0610)|22`, `Biology|May/June|2024`
pub type GroupId = String;
/// Free-text filter query as typed by the user.
/// Example: `bio 2024 may`
pub type QueryText = String;
