//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its category set.
//! - Expose derived title/preview/plain-text projections.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated_at` is refreshed on every save; `created_at` never changes.
//! - Unknown stored categories decode as unset instead of failing the whole
//!   collection.
//! - Records without RFC 3339 timestamps (legacy `{id, text, date}` notes)
//!   still decode; their timestamps are recovered from `date`, then from a
//!   millisecond id, then the Unix epoch.

use super::markup::{derive_preview, derive_title, strip_html};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque note identifier.
pub type NoteId = String;
/// Opaque folder identifier, as referenced from notes.
pub type FolderId = String;

/// Fixed note category set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    /// Default for new notes.
    #[default]
    Personal,
    Work,
    Ideas,
    Tasks,
}

impl NoteCategory {
    /// All categories in display order.
    pub const ALL: [NoteCategory; 4] = [Self::Personal, Self::Work, Self::Ideas, Self::Tasks];

    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Ideas => "ideas",
            Self::Tasks => "tasks",
        }
    }

    /// Parses a wire name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
    }
}

impl Display for NoteCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local-time layouts written by older clients in the `date` field.
const LEGACY_DATE_FORMATS: [&str; 4] = [
    "%m/%d/%Y, %I:%M:%S %p",
    "%d/%m/%Y, %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y, %H:%M:%S",
];

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredNote")]
pub struct Note {
    pub id: NoteId,
    /// Rich (HTML-ish) body.
    pub text: String,
    pub category: Option<NoteCategory>,
    /// `None` means unfiled.
    pub folder_id: Option<FolderId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Decode-side shape of a note, tolerant of older records.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    id: NoteId,
    #[serde(default)]
    text: String,
    #[serde(default, deserialize_with = "deserialize_category")]
    category: Option<NoteCategory>,
    #[serde(default)]
    folder_id: Option<FolderId>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    date: Option<String>,
}

impl From<StoredNote> for Note {
    fn from(stored: StoredNote) -> Self {
        let created_at = stored
            .created_at
            .or_else(|| stored.date.as_deref().and_then(parse_legacy_date))
            .or_else(|| millis_id_timestamp(&stored.id))
            .unwrap_or_default();
        Self {
            updated_at: stored.updated_at.unwrap_or(created_at),
            id: stored.id,
            text: stored.text,
            category: stored.category,
            folder_id: stored.folder_id,
            created_at,
        }
    }
}

impl Note {
    /// Creates an unfiled note with a fresh id and `created_at == updated_at`.
    pub fn new(text: impl Into<String>, category: NoteCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            category: Some(category),
            folder_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// First stripped line, or `Untitled`.
    pub fn title(&self) -> String {
        derive_title(&self.text)
    }

    /// Up to 100 stripped characters following the first line.
    pub fn preview(&self) -> String {
        derive_preview(&self.text)
    }

    /// Body with markup removed.
    pub fn plain_text(&self) -> Cow<'_, str> {
        strip_html(&self.text)
    }

    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_none()
    }

    /// Whether this note belongs to `folder_id`.
    pub fn is_in(&self, folder_id: &str) -> bool {
        self.folder_id.as_deref() == Some(folder_id)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<NoteCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(NoteCategory::parse))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_rfc3339))
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn parse_legacy_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    parse_rfc3339(value).or_else(|| {
        LEGACY_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| naive.and_utc())
    })
}

fn millis_id_timestamp(id: &str) -> Option<DateTime<Utc>> {
    let millis = id.parse::<i64>().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteCategory};
    use chrono::{TimeZone, Utc};

    #[test]
    fn new_note_is_unfiled_with_matching_timestamps() {
        let note = Note::new("Hello\nWorld", NoteCategory::Work);
        assert!(note.is_unfiled());
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.category, Some(NoteCategory::Work));
        assert_eq!(note.title(), "Hello");
        assert_eq!(note.preview(), "World");
    }

    #[test]
    fn json_shape_uses_camel_case_and_null_folder() {
        let note = Note::new("body", NoteCategory::Personal);
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("folderId").unwrap().is_null());
        assert_eq!(value.get("category").unwrap(), "personal");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn unknown_or_missing_category_decodes_as_unset() {
        let raw = r#"{
            "id": "1700000000000",
            "text": "legacy",
            "category": "shopping",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.category, None);
        assert_eq!(note.folder_id, None);
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(NoteCategory::parse(" IDEAS "), Some(NoteCategory::Ideas));
        assert_eq!(NoteCategory::parse("all"), None);
    }

    #[test]
    fn legacy_record_recovers_timestamps_from_date() {
        let raw = r#"{"id":"1700000000000","text":"legacy","date":"11/14/2023, 10:13:20 PM"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        let expected = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        assert_eq!(note.created_at, expected);
        assert_eq!(note.updated_at, expected);
        assert_eq!(note.category, None);
        assert!(note.is_unfiled());
    }

    #[test]
    fn unparseable_date_falls_back_to_millisecond_id() {
        let raw = r#"{"id":"1700000000000","text":"legacy","date":"Dienstag, 14. Nov."}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.created_at, Utc.timestamp_millis_opt(1_700_000_000_000).unwrap());
    }

    #[test]
    fn missing_update_time_mirrors_creation_time() {
        let raw = r#"{"id":"n1","text":"x","createdAt":"2024-02-02T08:00:00Z"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.updated_at, note.created_at);
    }
}
