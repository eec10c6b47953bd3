//! snapnote-core - Core library for SnapNote
//!
//! Photo notes (title, description, picture) persisted as one JSON array in a
//! durable key-value store, plus the in-memory mirror that presentation layers
//! read from and mutate through.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod state;
pub mod storage;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NoteId, NotePatch};
pub use repository::{NoteRepository, NOTES_STORAGE_KEY};
pub use state::{LoadPhase, NotesState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
