//! Command-line interface for scan-fixtures
//!
//! # Usage Examples
//!
//! ```bash
//! # CSV: the canonical large fixture, or a column file
//! scan-fixtures csv
//! scan-fixtures csv --config columns.yaml --records 500 --filename small.csv
//!
//! # JSON: one preset, every small preset, or a large variant
//! scan-fixtures json nested-scan
//! scan-fixtures json all
//! scan-fixtures json organization-large
//!
//! # XML: prints usage and generates every small preset when no preset is given
//! scan-fixtures xml
//! scan-fixtures xml burp --records 5
//!
//! # List every preset
//! scan-fixtures list
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use scan_fixtures::csv::TabularConfig;
use scan_fixtures::presets::{self, Preset, CSV_PRESETS, JSON_PRESETS, XML_PRESETS};
use scan_fixtures::writer::WriteSummary;
use scan_fixtures::{generate_presets, OutputOpts};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scan-fixtures")]
#[command(about = "Generate synthetic CSV, JSON and XML security-scan fixtures")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    output: OutputOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a tabular (CSV) fixture
    Csv {
        /// Preset name (default: large)
        preset: Option<String>,

        /// Column configuration file (YAML or JSON), replaces the preset
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Generate structured (JSON) fixtures
    Json {
        /// Preset name, or `all` for every small preset
        preset: Option<String>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Generate markup (XML) fixtures
    Xml {
        /// Preset name, or `all` for every small preset
        preset: Option<String>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// List every preset
    List,
}

#[derive(Parser, Clone, Debug)]
struct Overrides {
    /// Number of records to generate, overriding the preset
    #[arg(long)]
    records: Option<u64>,

    /// Output file name, overriding the preset (single preset only)
    #[arg(long)]
    filename: Option<String>,
}

impl Overrides {
    fn apply(&self, presets: Vec<Preset>) -> anyhow::Result<Vec<Preset>> {
        if self.filename.is_some() && presets.len() > 1 {
            bail!("--filename requires a single preset, got {}", presets.len());
        }
        Ok(presets
            .into_iter()
            .map(|preset| {
                let preset = match self.records {
                    Some(records) => preset.with_records(records),
                    None => preset,
                };
                match &self.filename {
                    Some(filename) => preset.with_filename(filename.clone()),
                    None => preset,
                }
            })
            .collect())
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let selected = match cli.command {
        Commands::Csv {
            preset,
            config,
            overrides,
        } => {
            let presets = match (config, preset) {
                (Some(path), None) => {
                    let config = TabularConfig::from_file(&path)
                        .with_context(|| format!("Failed to load columns from {path:?}"))?;
                    tracing::info!(
                        "Loaded {} columns from {:?}",
                        config.columns.len(),
                        path
                    );
                    vec![Preset::Tabular(config)]
                }
                (Some(_), Some(name)) => {
                    bail!("--config replaces the preset; drop '{name}' or --config")
                }
                (None, name) => presets::csv_preset(name.as_deref().unwrap_or("large"))?,
            };
            overrides.apply(presets)?
        }
        Commands::Json { preset, overrides } => match preset {
            Some(name) => overrides.apply(presets::json_preset(&name)?)?,
            None => {
                print!("{}", presets::usage("json", JSON_PRESETS));
                return Ok(());
            }
        },
        Commands::Xml { preset, overrides } => match preset {
            Some(name) => overrides.apply(presets::xml_preset(&name)?)?,
            None => {
                print!("{}", presets::usage("xml", XML_PRESETS));
                println!("\nGenerating all small presets...\n");
                overrides.apply(presets::xml_preset("all")?)?
            }
        },
        Commands::List => {
            print!("{}", presets::usage("csv", CSV_PRESETS));
            println!();
            print!("{}", presets::usage("json", JSON_PRESETS));
            println!();
            print!("{}", presets::usage("xml", XML_PRESETS));
            return Ok(());
        }
    };

    tracing::info!(
        "Generating {} fixture(s) into {:?} (seed={:?})",
        selected.len(),
        cli.output.output_dir,
        cli.output.seed
    );

    let summaries = generate_presets(&selected, &cli.output)?;
    for summary in &summaries {
        print_summary(summary);
    }

    Ok(())
}

fn print_summary(summary: &WriteSummary) {
    println!("Generated {}", summary.path.display());
    println!("  Format: {}", summary.format);
    println!("  Records: {}", summary.records);
    println!("  Fields: {}", summary.fields);
    println!("  File size: {:.2} KB", summary.size_kb());
}
