//! SnapNote CLI - photo notes from the terminal
//!
//! Every command goes through the in-memory notes state, never the store directly.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::open_state;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let mut state = open_state(cli.data_dir).await?;

    match cli.command {
        Commands::Add {
            title,
            description,
            image,
        } => run_add(&mut state, &title, &description, &image).await?,
        Commands::List { json } => run_list(&state, json)?,
        Commands::Show { id, json } => run_show(&state, &id, json)?,
        Commands::Edit {
            id,
            title,
            description,
            image,
        } => run_edit(&mut state, &id, title, description, image).await?,
        Commands::Delete { id } => run_delete(&mut state, &id).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        "snapnote=info"
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
