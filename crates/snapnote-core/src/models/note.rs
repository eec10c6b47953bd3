//! Note model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::util::{iso_millis, normalize_text_option, timestamp_now};

/// A unique identifier for a note.
///
/// Ids are opaque strings: new ones are UUID v7, but any id already present in
/// a stored collection is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A photo note as stored in the durable collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    pub title: String,
    pub description: String,
    /// Opaque reference to the picture (e.g. `file:///.../photo.jpg`)
    pub image_uri: String,
    /// Creation timestamp, never changes after creation
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a brand new note from a draft, stamping a fresh id and timestamps.
    #[must_use]
    pub fn from_draft(draft: NoteDraft) -> Self {
        let now = timestamp_now();
        Self {
            id: NoteId::new(),
            title: draft.title,
            description: draft.description,
            image_uri: draft.image_uri,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `patch` and refresh `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image_uri) = patch.image_uri {
            self.image_uri = image_uri;
        }
        self.updated_at = timestamp_now().max(self.updated_at);
    }
}

/// Field values supplied by the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub image_uri: String,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_uri: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_uri: image_uri.into(),
        }
    }

    /// Form validation: trims every field and rejects empty ones.
    ///
    /// The repository stores whatever it is given; front ends call this first.
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            title: required_field(self.title, "Title")?,
            description: required_field(self.description, "Description")?,
            image_uri: required_field(self.image_uri, "Image")?,
        })
    }
}

/// Partial update payload. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

impl NotePatch {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn image_uri(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = Some(image_uri.into());
        self
    }

    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image_uri.is_none()
    }

    /// Form validation for edits: supplied fields are trimmed and must not be empty.
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            title: self
                .title
                .map(|value| required_field(value, "Title"))
                .transpose()?,
            description: self
                .description
                .map(|value| required_field(value, "Description"))
                .transpose()?,
            image_uri: self
                .image_uri
                .map(|value| required_field(value, "Image"))
                .transpose()?,
        })
    }
}

fn required_field(value: String, label: &str) -> Result<String> {
    normalize_text_option(Some(value))
        .ok_or_else(|| Error::InvalidInput(format!("{label} is required")))
}
