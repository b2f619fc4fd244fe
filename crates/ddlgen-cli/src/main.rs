mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use ddlgen_core::{
    Dbms, DdlGenerator, Error as CoreError, FileExtension, ForeignKeyConstraint, GenerateOutcome,
    ModelElement, ModelIndex, resolve_foreign_keys, validate_model,
};
use schemars::schema_for;
use thiserror::Error;

use config::{DEFAULT_CONFIG_FILE, DdlSettings, SettingsOverrides, load_settings, save_settings};
use logging::init_logging;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "ddlgen", version, about = "Generate SQL DDL from ER data models")]
struct Cli {
    /// Append JSON log lines to this file instead of logging to stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the DDL script for a model document.
    Generate(GenerateArgs),
    /// Print the resolved foreign keys of a model as JSON.
    Resolve(ResolveArgs),
    /// Print the JSON Schema of model documents.
    Schema,
    /// Write a settings file with default values.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Model document (JSON).
    #[arg(value_name = "MODEL")]
    model: PathBuf,
    /// Output path; defaults to `<model name><file extension>`.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Settings file; `ddlgen.toml` is used when present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Target DBMS (mysql or oracle).
    #[arg(long)]
    dbms: Option<Dbms>,
    /// Quote identifiers (overrides the settings file).
    #[arg(long, overrides_with = "no_quote")]
    quote: bool,
    /// Emit identifiers without quotes.
    #[arg(long, overrides_with = "quote")]
    no_quote: bool,
    /// Emit the drop statements (overrides the settings file).
    #[arg(long = "drop", overrides_with = "no_drop")]
    drop_tables: bool,
    /// Skip the drop statements.
    #[arg(long, overrides_with = "drop_tables")]
    no_drop: bool,
    /// Indent with tabs.
    #[arg(long, overrides_with = "no_tab")]
    use_tab: bool,
    /// Indent with spaces (overrides the settings file).
    #[arg(long, overrides_with = "use_tab")]
    no_tab: bool,
    /// Number of spaces per indent level.
    #[arg(long)]
    indent_spaces: Option<usize>,
    /// Suffix for the default output name (.sql or .ddl).
    #[arg(long)]
    file_extension: Option<FileExtension>,
    /// Validate model references before generating.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Model document (JSON).
    #[arg(value_name = "MODEL")]
    model: PathBuf,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    /// Destination of the settings file.
    #[arg(value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    path: PathBuf,
    /// Replace an existing file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Resolve(args) => run_resolve(args),
        Command::Schema => run_schema(),
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        model,
        out,
        config,
        dbms,
        quote,
        no_quote,
        drop_tables,
        no_drop,
        use_tab,
        no_tab,
        indent_spaces,
        file_extension,
        strict,
    } = args;

    let overrides = SettingsOverrides {
        dbms,
        quote_identifiers: flag_pair(quote, no_quote),
        drop_table: flag_pair(drop_tables, no_drop),
        use_tab: flag_pair(use_tab, no_tab),
        indent_spaces,
        file_extension,
    };
    let settings = load_settings(config.as_deref())?.with_overrides(&overrides);

    let element = load_model(&model)?;
    if strict {
        if let ModelElement::DataModel(data_model) = &element {
            validate_model(data_model)?;
            tracing::info!(event = "model_validated", entities = data_model.entities.len());
        }
    }

    let generator = DdlGenerator::new(settings.ddl);
    let out = match out {
        Some(path) => path,
        None => match generator.suggested_file_name(&element) {
            Some(name) => PathBuf::from(name),
            None => PathBuf::from(format!(
                "ddl{}",
                generator.options().file_extension.as_str()
            )),
        },
    };

    let timer = Instant::now();
    tracing::info!(
        event = "generation_started",
        model = %model.display(),
        kind = element.kind(),
        dbms = %generator.options().dbms
    );

    match generator.generate(&element, &out)? {
        GenerateOutcome::Written { path, bytes } => {
            tracing::info!(
                event = "generation_finished",
                path = %path.display(),
                bytes,
                duration_ms = timer.elapsed().as_millis()
            );
        }
        GenerateOutcome::Skipped { kind } => {
            tracing::warn!(event = "generation_skipped", kind, "model document is not a data model");
        }
    }

    Ok(())
}

fn run_resolve(args: ResolveArgs) -> Result<(), CliError> {
    let element = load_model(&args.model)?;
    let ModelElement::DataModel(model) = &element else {
        tracing::warn!(kind = element.kind(), "model document is not a data model");
        return Ok(());
    };

    let index = ModelIndex::new(model);
    let resolved: Vec<ForeignKeyConstraint> = model
        .entities
        .iter()
        .flat_map(|entity| resolve_foreign_keys(entity, &index))
        .collect();

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    let schema = schema_for!(ModelElement);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), CliError> {
    if args.path.exists() && !args.force {
        return Err(CliError::InvalidConfig(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    save_settings(&args.path, &DdlSettings::default())?;
    tracing::info!(event = "config_written", path = %args.path.display());
    Ok(())
}

/// `Some(true)` for the positive flag, `Some(false)` for its negation,
/// `None` when neither was given.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn load_model(path: &Path) -> Result<ModelElement, CliError> {
    let content = std::fs::read_to_string(path)?;
    let element: ModelElement = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), kind = element.kind(), "model loaded");
    Ok(element)
}
