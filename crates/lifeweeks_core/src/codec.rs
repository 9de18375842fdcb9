//! Versioned snapshot (de)serialization and schema validation.
//!
//! # Responsibility
//! - Define the portable JSON document shape for export/import.
//! - Validate incoming documents and coerce strings into typed entities;
//!   raw date/uuid strings never leak past this boundary.
//!
//! # Invariants
//! - Validation is all-or-nothing: a document either decodes completely or
//!   yields a list of path+message violations and no typed output.
//! - Encoding a decoded snapshot reproduces an observably identical
//!   document (same ids, dates, fields).

use crate::model::{
    Era, EraCategory, LifeEvent, Profile, LIFE_EXPECTANCY_MAX, LIFE_EXPECTANCY_MIN,
};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Current snapshot document version.
pub const SNAPSHOT_VERSION: u32 = 1;

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}){1,2}$").expect("valid color regex"));

/// Result type for codec APIs.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// One schema violation, addressed by JSON-path-like location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path into the document, e.g. `data.eras[2].color`.
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Codec-layer error for snapshot parsing and validation.
#[derive(Debug)]
pub enum SnapshotError {
    /// Document is not parseable JSON or misses the schema shape entirely.
    Malformed(serde_json::Error),
    /// Document parsed but one or more fields violate the schema rules.
    Invalid(Vec<Violation>),
    /// Export was requested before a birth date exists.
    Uninitialized,
}

impl SnapshotError {
    /// Violations carried by an `Invalid` error, empty otherwise.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed snapshot document: {err}"),
            Self::Invalid(violations) => {
                write!(f, "snapshot rejected with {} violation(s)", violations.len())?;
                for violation in violations {
                    write!(f, "; {violation}")?;
                }
                Ok(())
            }
            Self::Uninitialized => write!(f, "no birth date set; nothing to export"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::Invalid(_) | Self::Uninitialized => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Top-level export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    /// RFC 3339 timestamp of the export. Checked for parseability on
    /// import, otherwise informational.
    pub exported_at: String,
    pub data: SnapshotData,
}

/// The persisted payload: profile + eras + events, never the derived index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    pub birth_date: String,
    pub life_expectancy: i64,
    pub eras: Vec<SnapshotEra>,
    pub events: Vec<SnapshotEvent>,
}

/// Wire form of an era; all scalar fields stay strings until validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEra {
    pub id: String,
    pub title: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub color: String,
    pub category: String,
}

/// Wire form of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEvent {
    pub id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Typed contents of a successfully validated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub profile: Profile,
    pub eras: Vec<Era>,
    pub events: Vec<LifeEvent>,
}

/// Encodes the typed state into the persisted payload shape.
pub fn encode_data(profile: &Profile, eras: &[Era], events: &[LifeEvent]) -> SnapshotData {
    SnapshotData {
        birth_date: profile.birth_date.to_string(),
        life_expectancy: i64::from(profile.life_expectancy_years),
        eras: eras
            .iter()
            .map(|era| SnapshotEra {
                id: era.id.to_string(),
                title: era.title.clone(),
                start_date: era.start_date.to_string(),
                end_date: era.end_date.map(|d| d.to_string()),
                color: era.color.clone(),
                category: era.category.as_str().to_string(),
            })
            .collect(),
        events: events
            .iter()
            .map(|event| SnapshotEvent {
                id: event.id.to_string(),
                date: event.date.to_string(),
                end_date: event.end_date.map(|d| d.to_string()),
                title: event.title.clone(),
                description: event.description.clone(),
                color: event.color.clone(),
            })
            .collect(),
    }
}

/// Wraps the payload into a versioned export document.
pub fn encode_snapshot(
    profile: &Profile,
    eras: &[Era],
    events: &[LifeEvent],
    exported_at: DateTime<Utc>,
) -> Snapshot {
    Snapshot {
        version: SNAPSHOT_VERSION,
        exported_at: exported_at.to_rfc3339(),
        data: encode_data(profile, eras, events),
    }
}

/// Validates a full export document and coerces it into typed entities.
///
/// # Errors
/// - `Invalid` with a single `version` violation when the document carries
///   an unsupported version; the payload is not inspected further.
/// - `Invalid` with one violation per offending field otherwise.
pub fn decode_snapshot(snapshot: &Snapshot) -> SnapshotResult<DecodedSnapshot> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::Invalid(vec![Violation::new(
            "version",
            format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            ),
        )]));
    }

    let mut violations = Vec::new();
    if DateTime::parse_from_rfc3339(&snapshot.exported_at).is_err() {
        violations.push(Violation::new(
            "exportedAt",
            format!(
                "invalid RFC 3339 timestamp `{}`",
                snapshot.exported_at
            ),
        ));
    }

    match decode_data(&snapshot.data) {
        Ok(decoded) if violations.is_empty() => Ok(decoded),
        Ok(_) => Err(SnapshotError::Invalid(violations)),
        Err(SnapshotError::Invalid(mut payload_violations)) => {
            violations.append(&mut payload_violations);
            Err(SnapshotError::Invalid(violations))
        }
        Err(other) => Err(other),
    }
}

/// Validates the bare payload (as persisted by the key-value store) and
/// coerces it into typed entities. Collects every violation before failing.
pub fn decode_data(data: &SnapshotData) -> SnapshotResult<DecodedSnapshot> {
    let mut violations = Vec::new();

    let birth_date = parse_date(&data.birth_date, "data.birthDate", &mut violations);

    let expectancy_range = i64::from(LIFE_EXPECTANCY_MIN)..=i64::from(LIFE_EXPECTANCY_MAX);
    if !expectancy_range.contains(&data.life_expectancy) {
        violations.push(Violation::new(
            "data.lifeExpectancy",
            format!(
                "{} is outside the supported range [{LIFE_EXPECTANCY_MIN}, {LIFE_EXPECTANCY_MAX}]",
                data.life_expectancy
            ),
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut eras = Vec::with_capacity(data.eras.len());
    for (position, raw) in data.eras.iter().enumerate() {
        let path = format!("data.eras[{position}]");
        if let Some(era) = decode_era(raw, &path, &mut seen_ids, &mut violations) {
            eras.push(era);
        }
    }

    let mut events = Vec::with_capacity(data.events.len());
    for (position, raw) in data.events.iter().enumerate() {
        let path = format!("data.events[{position}]");
        if let Some(event) = decode_event(raw, &path, &mut seen_ids, &mut violations) {
            events.push(event);
        }
    }

    match birth_date {
        Some(birth_date) if violations.is_empty() => Ok(DecodedSnapshot {
            profile: Profile::new(birth_date, data.life_expectancy as u16),
            eras,
            events,
        }),
        _ => Err(SnapshotError::Invalid(violations)),
    }
}

/// Serializes a full export document to JSON text.
pub fn snapshot_to_json(snapshot: &Snapshot) -> SnapshotResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parses JSON text into the (not yet validated) export document shape.
pub fn snapshot_from_json(json: &str) -> SnapshotResult<Snapshot> {
    Ok(serde_json::from_str(json)?)
}

/// Serializes the bare payload to JSON text for the key-value store.
pub fn data_to_json(data: &SnapshotData) -> SnapshotResult<String> {
    Ok(serde_json::to_string(data)?)
}

/// Parses stored JSON text back into the payload shape.
pub fn data_from_json(json: &str) -> SnapshotResult<SnapshotData> {
    Ok(serde_json::from_str(json)?)
}

fn decode_era(
    raw: &SnapshotEra,
    path: &str,
    seen_ids: &mut HashSet<Uuid>,
    violations: &mut Vec<Violation>,
) -> Option<Era> {
    let id = parse_id(&raw.id, &format!("{path}.id"), seen_ids, violations);
    let start_date = parse_date(&raw.start_date, &format!("{path}.startDate"), violations);
    let end_date = parse_optional_date(raw.end_date.as_deref(), &format!("{path}.endDate"), violations);
    check_color(&raw.color, &format!("{path}.color"), violations);
    let category = parse_category(&raw.category, &format!("{path}.category"), violations);
    check_title(&raw.title, &format!("{path}.title"), violations);

    let mut era = Era::with_id(id?, raw.title.clone(), start_date?, raw.color.clone(), category?);
    era.end_date = end_date?;
    Some(era)
}

fn decode_event(
    raw: &SnapshotEvent,
    path: &str,
    seen_ids: &mut HashSet<Uuid>,
    violations: &mut Vec<Violation>,
) -> Option<LifeEvent> {
    let id = parse_id(&raw.id, &format!("{path}.id"), seen_ids, violations);
    let date = parse_date(&raw.date, &format!("{path}.date"), violations);
    let end_date = parse_optional_date(raw.end_date.as_deref(), &format!("{path}.endDate"), violations);
    if let Some(color) = &raw.color {
        check_color(color, &format!("{path}.color"), violations);
    }
    check_title(&raw.title, &format!("{path}.title"), violations);

    let mut event = LifeEvent::with_id(id?, raw.title.clone(), date?);
    event.end_date = end_date?;
    event.description = raw.description.clone();
    event.color = raw.color.clone();
    Some(event)
}

fn parse_date(value: &str, path: &str, violations: &mut Vec<Violation>) -> Option<NaiveDate> {
    match value.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(err) => {
            violations.push(Violation::new(path, format!("invalid date `{value}`: {err}")));
            None
        }
    }
}

// Distinguishes "absent" (valid, Some(None)) from "present but unparseable"
// (None, violation recorded).
fn parse_optional_date(
    value: Option<&str>,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<Option<NaiveDate>> {
    match value {
        None => Some(None),
        Some(raw) => parse_date(raw, path, violations).map(Some),
    }
}

fn parse_id(
    value: &str,
    path: &str,
    seen_ids: &mut HashSet<Uuid>,
    violations: &mut Vec<Violation>,
) -> Option<Uuid> {
    match value.parse::<Uuid>() {
        Ok(id) => {
            if !seen_ids.insert(id) {
                violations.push(Violation::new(path, format!("duplicate id `{id}`")));
                return None;
            }
            Some(id)
        }
        Err(err) => {
            violations.push(Violation::new(path, format!("invalid uuid `{value}`: {err}")));
            None
        }
    }
}

fn parse_category(
    value: &str,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<EraCategory> {
    match EraCategory::parse(value) {
        Some(category) => Some(category),
        None => {
            let accepted = EraCategory::ALL.map(|category| category.as_str()).join("|");
            violations.push(Violation::new(
                path,
                format!("`{value}` is not one of {accepted}"),
            ));
            None
        }
    }
}

fn check_color(value: &str, path: &str, violations: &mut Vec<Violation>) {
    if !COLOR_RE.is_match(value) {
        violations.push(Violation::new(
            path,
            format!("`{value}` is not a #RGB or #RRGGBB color"),
        ));
    }
}

fn check_title(value: &str, path: &str, violations: &mut Vec<Violation>) {
    if value.trim().is_empty() {
        violations.push(Violation::new(path, "title must not be empty"));
    }
}

#[cfg(test)]
mod tests {
    use super::{check_color, parse_category, parse_date, Violation};
    use crate::model::EraCategory;

    #[test]
    fn color_regex_accepts_short_and_long_forms() {
        for ok in ["#fff", "#FFF", "#a1B2c3", "#000000"] {
            let mut violations = Vec::new();
            check_color(ok, "c", &mut violations);
            assert!(violations.is_empty(), "rejected {ok}: {violations:?}");
        }
        for bad in ["fff", "#ffff", "#gg0011", "#12345", ""] {
            let mut violations = Vec::new();
            check_color(bad, "c", &mut violations);
            assert_eq!(violations.len(), 1, "accepted {bad}");
        }
    }

    #[test]
    fn date_parse_records_path_and_message() {
        let mut violations = Vec::new();
        assert!(parse_date("2000-01-01", "data.birthDate", &mut violations).is_some());
        assert!(violations.is_empty());

        assert!(parse_date("01/02/2000", "data.birthDate", &mut violations).is_none());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "data.birthDate");
        assert!(violations[0].message.contains("01/02/2000"));
    }

    #[test]
    fn category_parse_accepts_known_values_and_lists_the_rest() {
        let mut violations = Vec::new();
        assert_eq!(
            parse_category("education", "data.eras[0].category", &mut violations),
            Some(EraCategory::Education)
        );
        assert!(violations.is_empty());

        assert_eq!(
            parse_category("vacation", "data.eras[0].category", &mut violations),
            None
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "data.eras[0].category");
        for accepted in EraCategory::ALL {
            assert!(violations[0].message.contains(accepted.as_str()));
        }
    }

    #[test]
    fn violation_display_joins_path_and_message() {
        let violation = Violation::new("data.eras[0].color", "bad color");
        assert_eq!(violation.to_string(), "data.eras[0].color: bad color");
    }
}
