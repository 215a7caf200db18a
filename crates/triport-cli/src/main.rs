//! triport CLI - inspect, check, and update triple-store import-state files

mod json;

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};
use triport_core::{
    check_str, CheckConfig, DiagnosticLevel, ImportKey, ImportRecord, ImportStatus,
    ParserSettings, SourceType, StateError, StateFile,
};

#[derive(Parser)]
#[command(name = "triport")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Inspect and check triple-store import-state files",
    long_about = "Reads, checks, and updates the settings.js state file a graph database's\nadministration console writes after bulk RDF imports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Strict mode (treat warnings as errors)
    #[arg(short, long, global = true)]
    strict: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a state file for structural problems
    Check {
        /// State file to check
        path: PathBuf,
    },

    /// List import history, oldest first
    List {
        /// State file to read
        path: PathBuf,
    },

    /// Print one import record as pretty JSON
    Show {
        /// State file to read
        path: PathBuf,
        /// Composite key, e.g. 'LIBRARY;;books.ttl'
        key: String,
    },

    /// Record an import attempt (insert or replace one history entry)
    Touch {
        /// State file to update (created if missing)
        path: PathBuf,
        /// Composite key, e.g. 'LIBRARY;;books.ttl'
        key: String,
        /// Target graph context URI
        #[arg(long)]
        context: String,
        /// Base URI for resolving relative references (defaults to context)
        #[arg(long)]
        base_uri: Option<String>,
        /// Import status
        #[arg(long, default_value = "DONE")]
        status: String,
        /// Free-text status message
        #[arg(long, default_value = "")]
        message: String,
        /// Opaque handle referencing the uploaded bytes
        #[arg(long)]
        data: Option<String>,
        /// Explicit format override
        #[arg(long)]
        format_override: Option<String>,
        /// Source type tag
        #[arg(long, default_value = "file")]
        source_type: String,
        /// Millisecond timestamp (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
        /// Force single-threaded import
        #[arg(long)]
        force_serial: bool,
        /// Keep blank node identifiers from the source
        #[arg(long)]
        preserve_bnode_ids: bool,
        /// Fail on unknown datatypes instead of tolerating them
        #[arg(long)]
        fail_on_unknown_data_types: bool,
        /// Verify datatype values
        #[arg(long)]
        verify_data_type_values: bool,
        /// Normalize datatype values
        #[arg(long)]
        normalize_data_type_values: bool,
        /// Fail on unknown language tags
        #[arg(long)]
        fail_on_unknown_language_tags: bool,
        /// Skip language tag verification
        #[arg(long)]
        no_verify_language_tags: bool,
        /// Normalize language tags
        #[arg(long)]
        normalize_language_tags: bool,
        /// Skip URI syntax verification
        #[arg(long)]
        no_verify_uri_syntax: bool,
        /// Keep going past parse errors
        #[arg(long)]
        no_stop_on_error: bool,
    },

    /// Remove one record from the history
    Forget {
        /// State file to update
        path: PathBuf,
        /// Composite key to remove
        key: String,
    },

    /// Write an empty well-formed state file
    Init {
        /// Output path
        #[arg(default_value = "settings.js")]
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Check { path } => check_command(path, &cli),
        Commands::List { path } => list_command(path, &cli),
        Commands::Show { path, key } => show_command(path, key),
        Commands::Touch { .. } => touch_command(&cli),
        Commands::Forget { path, key } => forget_command(path, key),
        Commands::Init { path } => init_command(path),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn check_command(path: &Path, cli: &Cli) -> anyhow::Result<()> {
    let config = CheckConfig::load_or_default(cli.config.as_ref());

    tracing::debug!(path = %path.display(), "checking state file");
    let content = triport_core::file_utils::safe_read_file_with_limit(path, config.max_file_size)?;
    let diagnostics = check_str(path, &content, &config);
    let records_checked = count_records(&content);

    if cli.format == OutputFormat::Json {
        let output = json::diagnostics_to_json(&diagnostics, path, records_checked);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_report(path, &diagnostics, records_checked, cli.verbose);
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .count();

    if errors > 0 || (cli.strict && warnings > 0) {
        process::exit(1);
    }

    Ok(())
}

fn print_text_report(
    path: &Path,
    diagnostics: &[triport_core::Diagnostic],
    records_checked: usize,
    verbose: bool,
) {
    println!("{} {}", "Checking:".cyan().bold(), path.display());
    println!();

    if diagnostics.is_empty() {
        println!(
            "{} ({} records)",
            "✓ No issues found".green().bold(),
            records_checked
        );
        return;
    }

    let mut errors = 0;
    let mut warnings = 0;
    let mut infos = 0;

    for diag in diagnostics {
        let level_str = match diag.level {
            DiagnosticLevel::Error => {
                errors += 1;
                "error".red().bold()
            }
            DiagnosticLevel::Warning => {
                warnings += 1;
                "warning".yellow().bold()
            }
            DiagnosticLevel::Info => {
                infos += 1;
                "info".blue().bold()
            }
        };

        match &diag.key {
            Some(key) => println!("{} {}: {}", key.dimmed(), level_str, diag.message),
            None => println!("{} {}: {}", path.display().to_string().dimmed(), level_str, diag.message),
        }

        if verbose {
            println!("  {} {}", "rule:".dimmed(), diag.rule.dimmed());
            if let Some(suggestion) = &diag.suggestion {
                println!("  {} {}", "help:".cyan(), suggestion);
            }
        }
        println!();
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "Found {} {}, {} {}",
        errors,
        if errors == 1 { "error" } else { "errors" },
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }
    );

    if infos > 0 {
        println!("  {infos} info messages");
    }
}

fn list_command(path: &Path, cli: &Cli) -> anyhow::Result<()> {
    let state = StateFile::load(path)?;

    if cli.format == OutputFormat::Json {
        let entries: Vec<serde_json::Value> = state
            .records_by_time()
            .into_iter()
            .map(|(key, record)| {
                serde_json::json!({
                    "key": key,
                    "status": record.status.as_str(),
                    "timestamp": record.timestamp,
                    "message": record.message,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if state.is_empty() {
        println!("{}", "No imports recorded".dimmed());
        return Ok(());
    }

    for (key, record) in state.records_by_time() {
        let status = match record.status {
            ImportStatus::Done => record.status.as_str().green().bold(),
            ImportStatus::Error => record.status.as_str().red().bold(),
            _ => record.status.as_str().yellow().bold(),
        };
        println!(
            "{}  {}  {}  {}",
            record.timestamp.to_string().dimmed(),
            status,
            key,
            record.message.dimmed()
        );
    }

    Ok(())
}

fn show_command(path: &Path, key: &str) -> anyhow::Result<()> {
    let state = StateFile::load(path)?;
    let key: ImportKey = key.parse()?;

    let record = state
        .get(&key)
        .ok_or_else(|| StateError::UnknownKey { key: key.to_string() })?;

    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

fn touch_command(cli: &Cli) -> anyhow::Result<()> {
    let Commands::Touch {
        path,
        key,
        context,
        base_uri,
        status,
        message,
        data,
        format_override,
        source_type,
        timestamp,
        force_serial,
        preserve_bnode_ids,
        fail_on_unknown_data_types,
        verify_data_type_values,
        normalize_data_type_values,
        fail_on_unknown_language_tags,
        no_verify_language_tags,
        normalize_language_tags,
        no_verify_uri_syntax,
        no_stop_on_error,
    } = &cli.command
    else {
        unreachable!("touch_command dispatched for a different subcommand");
    };

    let key: ImportKey = key.parse()?;

    let mut state = if path.exists() {
        StateFile::load(path)?
    } else {
        tracing::debug!(path = %path.display(), "state file missing, starting fresh");
        StateFile::new()
    };

    let record = ImportRecord {
        name: key.source.clone(),
        status: ImportStatus::from(status.clone()),
        message: message.clone(),
        context: context.clone(),
        replace_graphs: Vec::new(),
        base_uri: base_uri.clone().unwrap_or_else(|| context.clone()),
        force_serial: *force_serial,
        source_type: SourceType::from(source_type.clone()),
        format: format_override.clone(),
        data: data.clone(),
        timestamp: timestamp.unwrap_or_else(now_millis),
        parser_settings: ParserSettings {
            preserve_bnode_ids: *preserve_bnode_ids,
            fail_on_unknown_data_types: *fail_on_unknown_data_types,
            verify_data_type_values: *verify_data_type_values,
            normalize_data_type_values: *normalize_data_type_values,
            fail_on_unknown_language_tags: *fail_on_unknown_language_tags,
            verify_language_tags: !no_verify_language_tags,
            normalize_language_tags: *normalize_language_tags,
            verify_uri_syntax: !no_verify_uri_syntax,
            stop_on_error: !no_stop_on_error,
            extra: Default::default(),
        },
        extra: Default::default(),
    };

    state.record(&key, record)?;
    state.save(path)?;

    println!("{} Recorded import '{}'", "✓".green().bold(), key);
    Ok(())
}

fn forget_command(path: &Path, key: &str) -> anyhow::Result<()> {
    let mut state = StateFile::load(path)?;
    let key: ImportKey = key.parse()?;

    if state.forget(&key).is_none() {
        return Err(StateError::UnknownKey { key: key.to_string() }.into());
    }
    state.save(path)?;

    println!("{} Removed '{}' from the history", "✓".green().bold(), key);
    Ok(())
}

fn init_command(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("refusing to overwrite existing file: {}", path.display());
    }

    StateFile::new().save(path)?;

    println!(
        "{} Created state file: {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

fn count_records(content: &str) -> usize {
    serde_json::from_str::<serde_json::Value>(content)
        .ok()
        .and_then(|doc| {
            doc.get("import.local")
                .and_then(|h| h.as_object().map(|o| o.len()))
        })
        .unwrap_or(0)
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
