//! Note repository over a durable key-value store.
//!
//! The whole collection lives under a single key as a JSON array. Every
//! mutation reads the array, changes it in memory and writes the full array
//! back with one `set`, so a failed write leaves the stored collection as it
//! was. Concurrent writers get last-write-wins; that is acceptable for a single
//! local user and caps the practical collection size.

use crate::error::{Error, Result};
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::storage::KeyValueStore;

/// Storage key holding the note collection.
pub const NOTES_STORAGE_KEY: &str = "notes_app:notes";

/// CRUD over the note collection stored in `S`.
#[derive(Debug)]
pub struct NoteRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Create a repository using the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, NOTES_STORAGE_KEY)
    }

    /// Create a repository reading and writing `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    #[cfg(test)]
    pub(crate) const fn store(&self) -> &S {
        &self.store
    }

    /// All notes in insertion order.
    ///
    /// A key that was never written (or holds an empty string) is an empty
    /// collection. A value that is not a note array is `Error::CorruptedStore`.
    pub async fn list(&self) -> Result<Vec<Note>> {
        let raw = self
            .store
            .get(&self.key)
            .await
            .map_err(|error| self.log_failure("load notes", error))?;

        match raw {
            Some(raw) => decode_notes(&self.key, &raw).map_err(|error| {
                tracing::error!("Failed to parse notes under '{}': {}", self.key, error);
                error
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Find a note by id. A missing id is `Ok(None)`.
    pub async fn get_by_id(&self, id: &NoteId) -> Result<Option<Note>> {
        Ok(self.list().await?.into_iter().find(|note| &note.id == id))
    }

    /// Append a new note built from `draft` and persist the collection.
    ///
    /// No validation happens here; see [`NoteDraft::validated`].
    pub async fn create(&self, draft: NoteDraft) -> Result<Note> {
        let mut notes = self.list().await?;

        let mut note = Note::from_draft(draft);
        while notes.iter().any(|existing| existing.id == note.id) {
            note.id = NoteId::new();
        }

        notes.push(note.clone());
        self.persist(&notes, "create note").await?;

        tracing::debug!("Created note {}", note.id);
        Ok(note)
    }

    /// Merge `patch` into the note with `id`. A missing id is `Ok(None)`.
    pub async fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Option<Note>> {
        let mut notes = self.list().await?;

        let Some(note) = notes.iter_mut().find(|note| &note.id == id) else {
            tracing::debug!("Update skipped, note {} not found", id);
            return Ok(None);
        };
        note.apply(patch);
        let updated = note.clone();

        self.persist(&notes, "update note").await?;

        tracing::debug!("Updated note {}", id);
        Ok(Some(updated))
    }

    /// Remove the note with `id`. Deleting an unknown id still succeeds.
    pub async fn delete(&self, id: &NoteId) -> Result<()> {
        let mut notes = self.list().await?;
        let before = notes.len();
        notes.retain(|note| &note.id != id);

        self.persist(&notes, "delete note").await?;

        if notes.len() == before {
            tracing::debug!("Delete of unknown note {} treated as success", id);
        } else {
            tracing::debug!("Deleted note {}", id);
        }
        Ok(())
    }

    /// Drop the storage key entirely. Meant for full resets only.
    pub async fn clear(&self) -> Result<()> {
        self.store
            .remove(&self.key)
            .await
            .map_err(|error| self.log_failure("clear notes", error))?;
        tracing::info!("Cleared all notes under '{}'", self.key);
        Ok(())
    }

    async fn persist(&self, notes: &[Note], operation: &str) -> Result<()> {
        let payload = encode_notes(notes)?;
        self.store
            .set(&self.key, &payload)
            .await
            .map_err(|error| self.log_failure(operation, error))
    }

    fn log_failure(&self, operation: &str, error: Error) -> Error {
        tracing::error!("Failed to {} under '{}': {}", operation, self.key, error);
        error
    }
}

/// Serialize a collection into the stored JSON array form.
pub fn encode_notes(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Parse the stored JSON array form. Blank input is an empty collection.
pub fn decode_notes(key: &str, raw: &str) -> Result<Vec<Note>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|source| Error::CorruptedStore {
        key: key.to_string(),
        source,
    })
}
