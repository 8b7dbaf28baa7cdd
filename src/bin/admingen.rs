//! admingen CLI - admin-panel configuration from ORM entity metadata
//!
//! Reads reflected entity metadata documents and prints the admin field
//! configuration for every entity.

use admingen::{GeneratorConfig, OutputFormat, Overrides};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "admingen")]
#[command(version, about = "Admin-panel configuration from ORM entity metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate admin configuration for every entity
    Generate {
        /// Directory containing entity metadata documents
        #[arg(short, long)]
        entities: Option<PathBuf>,

        /// Output format (json, yaml, ndjson)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Path to admingen.yaml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and transform all entities without writing output
    Validate {
        /// Directory containing entity metadata documents
        #[arg(short, long)]
        entities: Option<PathBuf>,

        /// Path to admingen.yaml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("admingen=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { entities, format, pretty, config, output } => {
            let overrides = Overrides {
                entities,
                format,
                pretty: pretty.then_some(true),
            };
            generate(config, overrides, output)
        }
        Commands::Validate { entities, config } => {
            let overrides = Overrides {
                entities,
                ..Default::default()
            };
            validate(config, overrides)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_config(config: Option<PathBuf>, overrides: Overrides) -> Result<GeneratorConfig, String> {
    GeneratorConfig::resolve(config.as_deref(), overrides).map_err(|e| e.to_string())
}

fn generate(
    config: Option<PathBuf>,
    overrides: Overrides,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let config = load_config(config, overrides)?;

    let entities = admingen::load_entities(&config.entities).map_err(|e| e.to_string())?;
    tracing::info!("Loaded {} entities from {}", entities.len(), config.entities.display());

    let admin_config = admingen::transform_all(&entities).map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
            admingen::write_config(BufWriter::new(file), &admin_config, config.format, config.pretty)
                .map_err(|e| e.to_string())?;
            tracing::info!("Wrote {} configuration to {}", config.format, path.display());
        }
        None => {
            let stdout = io::stdout();
            admingen::write_config(stdout.lock(), &admin_config, config.format, config.pretty)
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}

fn validate(config: Option<PathBuf>, overrides: Overrides) -> Result<(), String> {
    let config = load_config(config, overrides)?;

    let entities = admingen::load_entities(&config.entities).map_err(|e| e.to_string())?;
    let admin_config = admingen::transform_all(&entities).map_err(|e| e.to_string())?;

    for (entity, fields) in &admin_config {
        let relations = fields.values().filter(|f| f.is_relation()).count();
        tracing::info!(
            "{}: {} fields ({} relations)",
            entity,
            fields.len(),
            relations
        );
    }

    tracing::info!("All {} entities are valid", admin_config.len());

    Ok(())
}
