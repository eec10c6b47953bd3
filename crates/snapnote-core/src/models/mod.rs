//! Data models for SnapNote

mod note;

pub use note::{Note, NoteDraft, NoteId, NotePatch};
