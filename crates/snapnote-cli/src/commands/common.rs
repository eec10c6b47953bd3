use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use snapnote_core::config::StoreConfig;
use snapnote_core::util::format_timestamp;
use snapnote_core::{FileStore, KeyValueStore, Note, NoteId, NotesState};

use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;

pub type CliState = NotesState<FileStore>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_uri: String,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
}

/// Resolve the store location and load the mirror.
pub async fn open_state(data_dir: Option<PathBuf>) -> Result<CliState, CliError> {
    let config = StoreConfig::resolve(data_dir)?;
    let repo = config.open_repository().await?;
    Ok(NotesState::load(repo).await)
}

/// Find a note by full id or unique id prefix.
pub fn resolve_note<'a, S: KeyValueStore>(
    note_query: &str,
    state: &'a NotesState<S>,
) -> Result<&'a Note, CliError> {
    let note_query = normalize_note_identifier(note_query)?;

    if let Some(note) = state.get_by_id(&NoteId::from(note_query.as_str())) {
        return Ok(note);
    }

    let matches = state
        .notes()
        .iter()
        .filter(|note| note.id.as_str().starts_with(&note_query))
        .collect::<Vec<_>>();

    match matches.as_slice() {
        [note] => Ok(*note),
        [] => match state.last_load_error() {
            Some(error) => Err(CliError::StoreUnavailable(error.to_string())),
            None => Err(CliError::NoteNotFound(note_query)),
        },
        many => {
            let options = many
                .iter()
                .take(3)
                .map(|note| short_id(&note.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Turn a local file path into an absolute `file://` URI.
///
/// Anything that already carries a scheme (`file://`, `content://`, `https://`)
/// is passed through as-is.
pub fn resolve_image_uri(value: &str) -> Result<String, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains("://") {
        return Ok(trimmed.to_string());
    }

    let path = Path::new(trimmed);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(format!("file://{}", absolute.display()))
}

pub fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now = Utc::now();
    notes
        .iter()
        .map(|note| {
            let short_id = short_id(&note.id);
            let title = collapse_preview(&note.title, 24);
            let description = collapse_preview(&note.description, 40);
            let relative_time = format_relative_time(note.updated_at, now);

            format!("{short_id:<13}  {title:<24}  {description:<40}  {relative_time}")
        })
        .collect()
}

pub fn format_note_detail(note: &Note) -> String {
    [
        format!("id:          {}", note.id),
        format!("title:       {}", note.title),
        format!("image:       {}", note.image_uri),
        format!("created:     {}", format_timestamp(&note.created_at)),
        format!("updated:     {}", format_timestamp(&note.updated_at)),
        String::new(),
        note.description.clone(),
    ]
    .join("\n")
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        description: note.description.clone(),
        image_uri: note.image_uri.clone(),
        created_at: format_timestamp(&note.created_at),
        updated_at: format_timestamp(&note.updated_at),
        relative_time: format_relative_time(note.updated_at, Utc::now()),
    }
}

/// First line of `text`, whitespace collapsed, cut to `max_chars` with an ellipsis.
pub fn collapse_preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now
        .signed_duration_since(timestamp)
        .num_milliseconds()
        .max(0);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
