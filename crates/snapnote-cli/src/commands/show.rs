use snapnote_core::{KeyValueStore, NotesState};

use crate::commands::common::{format_note_detail, note_to_list_item, resolve_note};
use crate::error::CliError;

pub fn run_show<S: KeyValueStore>(
    state: &NotesState<S>,
    id: &str,
    as_json: bool,
) -> Result<(), CliError> {
    let note = resolve_note(id, state)?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&note_to_list_item(note))?
        );
    } else {
        println!("{}", format_note_detail(note));
    }

    Ok(())
}
