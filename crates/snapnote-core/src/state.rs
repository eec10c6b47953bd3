//! In-memory mirror of the note collection for presentation layers.
//!
//! `NotesState` is an owned container: front ends build one from a
//! [`NoteRepository`] and pass it around by reference. Reads never touch the
//! store; each mutation goes through the repository first and then patches the
//! local copy with the value the repository returned.

use crate::error::Result;
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::repository::NoteRepository;
use crate::storage::KeyValueStore;

/// Load lifecycle of the mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Uninitialized,
    Loading,
    Ready,
}

/// UI-facing copy of every note, kept in step with the repository.
#[derive(Debug)]
pub struct NotesState<S> {
    repo: NoteRepository<S>,
    notes: Vec<Note>,
    phase: LoadPhase,
    last_load_error: Option<String>,
}

impl<S: KeyValueStore> NotesState<S> {
    /// Wrap a repository without loading anything yet.
    pub const fn new(repo: NoteRepository<S>) -> Self {
        Self {
            repo,
            notes: Vec::new(),
            phase: LoadPhase::Uninitialized,
            last_load_error: None,
        }
    }

    /// Build the mirror and load the full collection.
    pub async fn load(repo: NoteRepository<S>) -> Self {
        let mut state = Self::new(repo);
        state.refresh().await;
        state
    }

    /// Re-read the whole collection from the store.
    ///
    /// A failed load leaves the mirror `Ready` and empty; the error is logged
    /// and kept in [`Self::last_load_error`].
    pub async fn refresh(&mut self) {
        self.phase = LoadPhase::Loading;

        match self.repo.list().await {
            Ok(notes) => {
                tracing::debug!("Loaded {} notes", notes.len());
                self.notes = notes;
                self.last_load_error = None;
            }
            Err(error) => {
                tracing::warn!("Failed to load notes, showing an empty list: {}", error);
                self.notes.clear();
                self.last_load_error = Some(error.to_string());
            }
        }

        self.phase = LoadPhase::Ready;
    }

    /// Create a note and append it to the mirror.
    pub async fn create(&mut self, draft: NoteDraft) -> Result<Note> {
        let note = self.repo.create(draft).await?;
        self.notes.push(note.clone());
        Ok(note)
    }

    /// Update a note. `Ok(None)` when the id is unknown; the mirror is untouched.
    pub async fn update(&mut self, id: &NoteId, patch: NotePatch) -> Result<Option<Note>> {
        let updated = self.repo.update(id, patch).await?;
        if let Some(note) = &updated {
            if let Some(slot) = self.notes.iter_mut().find(|entry| &entry.id == id) {
                *slot = note.clone();
            }
        }
        Ok(updated)
    }

    /// Delete a note. Unknown ids succeed; failures leave the mirror as it was.
    pub async fn delete(&mut self, id: &NoteId) -> Result<()> {
        self.repo.delete(id).await?;
        self.notes.retain(|note| &note.id != id);
        Ok(())
    }

    /// Look a note up without touching the store.
    pub fn get_by_id(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase != LoadPhase::Ready
    }

    pub fn last_load_error(&self) -> Option<&str> {
        self.last_load_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
