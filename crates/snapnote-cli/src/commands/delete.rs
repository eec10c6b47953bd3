use snapnote_core::{KeyValueStore, NotesState};

use crate::commands::common::resolve_note;
use crate::error::CliError;

pub async fn run_delete<S: KeyValueStore>(
    state: &mut NotesState<S>,
    id: &str,
) -> Result<(), CliError> {
    let note_id = resolve_note(id, state)?.id.clone();

    state.delete(&note_id).await?;
    println!("{note_id}");
    Ok(())
}
