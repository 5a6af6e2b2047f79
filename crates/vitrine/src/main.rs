// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vitrine - carousel configuration and selection engine.
//!
//! This is the binary entry point for the `vitrine` command.

mod app;
mod catalog;
mod commands;
mod doctor;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vitrine_core::VitrineError;

use crate::app::App;

/// Vitrine - carousel configuration and selection engine.
#[derive(Parser, Debug)]
#[command(name = "vitrine", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a carousel to its entities and display parameters.
    Resolve {
        /// Carousel id (0 or unknown ids print nothing).
        id: i64,
    },
    /// Resolve every placeholder in a piece of content.
    Embed {
        /// Content to scan (read from stdin when omitted).
        text: Option<String>,
    },
    /// Create or update a carousel from raw form fields.
    Save {
        /// Existing carousel to update; creates a new one when omitted.
        #[arg(long)]
        id: Option<i64>,
        /// Carousel title (markup is stripped).
        #[arg(long)]
        title: String,
        /// Form field as `key=value`. Repeat for multi-valued fields.
        #[arg(long = "field", short = 'f', value_parser = commands::parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Delete a carousel.
    Delete {
        id: i64,
    },
    /// List stored carousels with their placeholders.
    List,
    /// Manage the local catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Run diagnostic checks.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommands {
    /// Replace the catalog with a JSON document.
    Import { path: PathBuf },
    /// Print the category taxonomy.
    Tree,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => vitrine_config::load_and_validate_path(path),
        None => vitrine_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            vitrine_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    app::init_tracing(&config.general.log_level);

    let Some(command) = cli.command else {
        println!("vitrine: use --help for available commands");
        return;
    };

    match run(config, command).await {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(config: vitrine_config::VitrineConfig, command: Commands) -> Result<String, VitrineError> {
    match command {
        // Doctor inspects the database without creating it.
        Commands::Doctor { plain } => doctor::run_doctor(&config, plain).await,
        Commands::Resolve { id } => {
            let app = App::open(config).await?;
            let output = commands::resolve(&app, id).await;
            finish(&app, output).await
        }
        Commands::Embed { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let app = App::open(config).await?;
            let output = commands::embed(&app, &text).await;
            finish(&app, output).await
        }
        Commands::Save { id, title, fields } => {
            let app = App::open(config).await?;
            let output = commands::save(&app, id, &title, &fields).await;
            finish(&app, output).await
        }
        Commands::Delete { id } => {
            let app = App::open(config).await?;
            let output = commands::delete(&app, id).await;
            finish(&app, output).await
        }
        Commands::List => {
            let app = App::open(config).await?;
            let output = commands::list(&app).await;
            finish(&app, output).await
        }
        Commands::Catalog { action } => {
            let app = App::open(config).await?;
            let output = match action {
                CatalogCommands::Import { path } => catalog::import(&app, &path).await,
                CatalogCommands::Tree => catalog::tree(&app).await,
            };
            finish(&app, output).await
        }
    }
}

/// Checkpoint storage, then hand back the command output.
async fn finish(
    app: &App,
    output: Result<String, VitrineError>,
) -> Result<String, VitrineError> {
    app.storage.close().await?;
    output
}

fn read_stdin() -> Result<String, VitrineError> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| VitrineError::Internal(format!("cannot read stdin: {e}")))?;
    Ok(text)
}
