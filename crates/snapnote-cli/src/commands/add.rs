use snapnote_core::{KeyValueStore, NoteDraft, NotesState};

use crate::commands::common::resolve_image_uri;
use crate::error::CliError;

pub async fn run_add<S: KeyValueStore>(
    state: &mut NotesState<S>,
    title: &str,
    description: &str,
    image: &str,
) -> Result<(), CliError> {
    let draft = NoteDraft::new(title, description, resolve_image_uri(image)?).validated()?;
    let note = state.create(draft).await?;

    println!("{}", note.id);
    Ok(())
}
