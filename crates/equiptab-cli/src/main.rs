//! equiptab CLI: project a record page through display settings and export
//! the resulting table.

use clap::{Parser, Subcommand, ValueEnum};
use equiptab_core::config::{DisplaySettings, ProjectionConfig};
use equiptab_core::schema::Table;
use equiptab_exec::{config_channel, AppContext, Selection, TableSession};
use equiptab_io::{read_records, read_settings};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "equiptab")]
#[command(about = "Equipment-list table projection and export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the display columns the settings produce for a record page
    Columns {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Project a record page and write the table
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to the configured export file name)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Raw field names to hide (applied first)
        #[arg(long, value_delimiter = ',')]
        hide: Vec<String>,

        /// Raw field names to bring back from the original records
        #[arg(long, value_delimiter = ',')]
        show: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Leave hidden columns out of the file
        #[arg(long)]
        visible_only: bool,

        /// CSV field separator (overrides config)
        #[arg(long)]
        separator: Option<char>,

        /// Decimal digits kept when truncating numbers (overrides config)
        #[arg(long)]
        decimal_digits: Option<u32>,
    },

    /// Parse a display-settings file and print the resolved allow-list
    Validate {
        /// Path to the display-settings file (JSON or YAML)
        #[arg(short, long)]
        settings: PathBuf,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Record page: JSON array, or NDJSON with a .jsonl/.ndjson extension
    #[arg(short, long)]
    records: PathBuf,

    /// Display-settings file (JSON or YAML)
    #[arg(short, long)]
    settings: PathBuf,

    /// Project name shown in the title
    #[arg(long)]
    project: Option<String>,

    /// Model name shown in the title
    #[arg(long)]
    model: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Jsonl,
}

/// Flag-level overrides, applied after env and settings file.
#[derive(Debug, Default)]
struct CliOverrides {
    separator: Option<char>,
    decimal_digits: Option<u32>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Columns { input } => {
            if let Err(e) = list_columns(&input) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Export {
            input,
            out,
            hide,
            show,
            format,
            visible_only,
            separator,
            decimal_digits,
        } => {
            let overrides = CliOverrides {
                separator,
                decimal_digits,
            };
            if let Err(e) = export(
                &input,
                out,
                &hide,
                &show,
                format,
                visible_only,
                &overrides,
            ) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { settings } => match validate_settings(&settings) {
            Ok(allow_list) => {
                println!("✓ Settings are valid ({} display columns)", allow_list.len());
                for name in allow_list {
                    println!("  {}", name);
                }
            }
            Err(e) => {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn list_columns(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(input, &CliOverrides::default())?;
    let table = session.table();

    println!("{}", session.title());
    println!("{} rows, {} columns", table.num_rows(), table.num_columns());
    for line in column_lines(&table) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per column: label, visibility, renderer with the number of
/// cells it actually wraps, raw key.
fn column_lines(table: &Table) -> Vec<String> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            let renderer = match col.renderer {
                Some(r) => {
                    let styled = (0..table.num_rows())
                        .filter(|&row| table.cell_renderer(row, idx).is_some())
                        .count();
                    format!("{} ({}/{})", r, styled, table.num_rows())
                }
                None => "-".into(),
            };
            format!(
                "  {:<32} {:<7} {:<24} {}",
                col.label,
                if col.visible { "shown" } else { "hidden" },
                renderer,
                col.key
            )
        })
        .collect()
}

fn export(
    input: &InputArgs,
    out: Option<PathBuf>,
    hide: &[String],
    show: &[String],
    format: ExportFormat,
    visible_only: bool,
    overrides: &CliOverrides,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(input, overrides)?;

    session.select_columns(hide.iter().cloned());
    session.hide_selected()?;
    session.select_columns(show.iter().cloned());
    session.show_selected()?;

    let mut options = session.export_options();
    if visible_only {
        options = options.visible_only();
    }

    let path = out.unwrap_or_else(|| default_output(&session.config().export_filename, format));
    match format {
        ExportFormat::Csv => session.write_csv(&path, options)?,
        ExportFormat::Jsonl => session.write_jsonl(&path, options)?,
    }

    println!("✓ Exported {} rows", session.rows().num_rows());
    println!("  Output: {}", path.display());
    Ok(())
}

fn validate_settings(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let display = read_settings(path)?;
    let mut cfg = ProjectionConfig::default();
    display.apply_overrides(&mut cfg);
    cfg.validate()?;
    Ok(display.allow_list())
}

/// env → settings file → flags, then mount and deliver the allow-list.
fn open_session(
    input: &InputArgs,
    overrides: &CliOverrides,
) -> Result<TableSession, Box<dyn std::error::Error>> {
    let display = read_settings(&input.settings)?;
    let cfg = resolve_config(&display, overrides)?;

    let ctx = Arc::new(AppContext::new());
    if let Some(project) = &input.project {
        ctx.select_project(Selection::new(project.as_str(), ""));
    }
    if let Some(model) = &input.model {
        ctx.select_model(Selection::new(model.as_str(), ""));
    }

    let (tx, mut rx) = config_channel();
    let mut session = TableSession::new(cfg, ctx);
    session.mount(read_records(&input.records)?)?;
    tx.send_settings(&display)?;
    session.poll_config(&mut rx)?;
    Ok(session)
}

fn resolve_config(
    display: &DisplaySettings,
    overrides: &CliOverrides,
) -> Result<ProjectionConfig, Box<dyn std::error::Error>> {
    let mut cfg = ProjectionConfig::from_env();
    display.apply_overrides(&mut cfg);
    apply_cli_overrides(&mut cfg, overrides);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_cli_overrides(cfg: &mut ProjectionConfig, overrides: &CliOverrides) {
    if let Some(sep) = overrides.separator {
        cfg.separator = sep;
    }
    if let Some(digits) = overrides.decimal_digits {
        cfg.decimal_digits = digits;
    }
}

fn default_output(export_filename: &str, format: ExportFormat) -> PathBuf {
    let path = PathBuf::from(export_filename);
    match format {
        ExportFormat::Csv => path,
        ExportFormat::Jsonl => path.with_extension("jsonl"),
    }
}
