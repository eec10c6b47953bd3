use snapnote_core::{KeyValueStore, NotePatch, NotesState};

use crate::commands::common::{resolve_image_uri, resolve_note};
use crate::error::CliError;

pub async fn run_edit<S: KeyValueStore>(
    state: &mut NotesState<S>,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
) -> Result<(), CliError> {
    let patch = NotePatch {
        title,
        description,
        image_uri: image.as_deref().map(resolve_image_uri).transpose()?,
    };
    if patch.is_empty() {
        return Err(CliError::NothingToUpdate);
    }
    let patch = patch.validated()?;

    let note_id = resolve_note(id, state)?.id.clone();
    let Some(updated) = state.update(&note_id, patch).await? else {
        return Err(CliError::NoteNotFound(note_id.to_string()));
    };

    println!("{}", updated.id);
    Ok(())
}
