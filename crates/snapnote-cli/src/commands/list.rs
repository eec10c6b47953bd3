use snapnote_core::{KeyValueStore, NotesState};

use crate::commands::common::{format_note_lines, note_to_list_item, NoteListItem};
use crate::error::CliError;

pub fn run_list<S: KeyValueStore>(state: &NotesState<S>, as_json: bool) -> Result<(), CliError> {
    if let Some(error) = state.last_load_error() {
        eprintln!("Warning: notes could not be loaded: {error}");
    }

    if as_json {
        let json_items = state
            .notes()
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if state.is_empty() {
        println!("No notes yet. Create one with `snapnote add`.");
    } else {
        for line in format_note_lines(state.notes()) {
            println!("{line}");
        }
    }

    Ok(())
}
