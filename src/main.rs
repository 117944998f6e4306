//! CLI entry point for the parameter panel.
//!
//! Renders the presentation model for a catalogue + parameter file pair, and
//! applies edits through the commit stage. Values written by `set` live for
//! the process lifetime only; the parameter file is never rewritten.
//!
//! # Usage
//!
//! Show the panel for the configured mode:
//! ```bash
//! param_panel show
//! param_panel --mode Advanced show --json
//! ```
//!
//! Apply edits (store-native units):
//! ```bash
//! param_panel set NAVL1_PERIOD=25 ARMING_CHECK=0
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use param_panel::config::Settings;
use param_panel::descriptor::ControlKind;
use param_panel::error::PanelError;
use param_panel::link::FileLink;
use param_panel::metadata::TomlCatalogue;
use param_panel::panel::ParameterPanel;
use param_panel::store::MemoryStore;
use param_panel::validation::format_value;

#[derive(Parser)]
#[command(name = "param-panel")]
#[command(about = "Metadata-driven editor model for device parameters", long_about = None)]
struct Cli {
    /// Settings file (path without extension, resolved by the config crate)
    #[arg(long, default_value = "config/default")]
    config: String,

    /// Override the operating mode from the settings file
    #[arg(long)]
    mode: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the parameter panel
    Show {
        /// Emit the presentation model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply NAME=VALUE edits through the commit stage
    Set {
        /// Edits, store-native units
        edits: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(&cli.config)?;
    init_tracing(&settings.log_level);

    let store = Arc::new(MemoryStore::new());
    let catalogue = Arc::new(TomlCatalogue::load(&settings.catalogue_path)?);
    let link = Arc::new(FileLink::new(&settings.params_path, store.clone()));
    let mode = cli.mode.unwrap_or(settings.mode);

    let mut panel = ParameterPanel::new(store, catalogue, link, mode);
    panel.activate();

    match cli.command {
        Commands::Show { json } => show(&panel, json),
        Commands::Set { edits } => set(&panel, &edits),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn show(panel: &ParameterPanel, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(panel.descriptors())?);
        return Ok(());
    }

    if let Some(err) = panel.last_refresh_error() {
        eprintln!("⚠️  Refresh incomplete: {err}");
    }

    for descriptor in panel.descriptors() {
        println!("{}", descriptor.label);
        match &descriptor.control {
            ControlKind::Ranged(control) => {
                let marker = if control.out_of_range {
                    "  [out of range]"
                } else {
                    ""
                };
                println!(
                    "  {} in [{} .. {}], step {}{marker}",
                    format_value(control.value),
                    format_value(control.lower),
                    format_value(control.upper),
                    format_value(control.increment),
                );
            }
            ControlKind::Enumerated(control) => {
                let choices: Vec<String> = control
                    .entries
                    .iter()
                    .map(|entry| {
                        let mark = if control.selected.as_deref() == Some(entry.value.as_str()) {
                            " <-"
                        } else {
                            ""
                        };
                        format!("{}:{}{mark}", entry.value, entry.label)
                    })
                    .collect();
                println!("  one of: {}", choices.join(", "));
            }
        }
        for line in descriptor.description_text.lines() {
            println!("    {line}");
        }
        println!();
    }

    println!(
        "{} parameters shown, {} skipped",
        panel.descriptors().len(),
        panel.skipped().len()
    );
    Ok(())
}

fn set(panel: &ParameterPanel, edits: &[String]) -> Result<()> {
    if edits.is_empty() {
        bail!("no edits given; expected NAME=VALUE arguments");
    }

    let mut parsed = HashMap::new();
    for edit in edits {
        let Some((name, value)) = edit.split_once('=') else {
            bail!("malformed edit '{edit}'; expected NAME=VALUE");
        };
        parsed.insert(name.trim().to_string(), value.trim().to_string());
    }

    match panel.commit(&parsed).into_result() {
        Ok(count) => {
            println!("✅ Parameters successfully saved ({count})");
            Ok(())
        }
        Err(err) => {
            if let PanelError::CommitFailed(names) = &err {
                for name in names {
                    eprintln!("❌ Set {name} failed");
                }
            }
            Err(err.into())
        }
    }
}
