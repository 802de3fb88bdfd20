// crates/brd-uat-cli/src/main.rs
// ============================================================================
// Module: BRD & UAT CLI Entry Point
// Description: Command dispatcher for the BRD & UAT server and offline rendering.
// Purpose: Run the HTTP server, validate configuration, and render documents.
// Dependencies: clap, brd-uat-config, brd-uat-core, brd-uat-server, tokio, tracing
// ============================================================================

//! ## Overview
//! The `brd-uat` binary starts the HTTP API, validates configuration files,
//! and renders BRD and UAT documents from a submission JSON file without a
//! running server. Input files are untrusted: reads are size-limited and
//! submissions pass the same validation as the HTTP form.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use brd_uat_config::BrdUatConfig;
use brd_uat_core::BrdOptions;
use brd_uat_core::BrdVariant;
use brd_uat_core::RequirementStatus;
use brd_uat_core::RequirementSubmission;
use brd_uat_core::generate_test_cases;
use brd_uat_core::model::time::parse_iso_date;
use brd_uat_core::model::time::today_utc;
use brd_uat_core::render_brd;
use brd_uat_core::render_csv;
use brd_uat_core::render_uat_report;
use brd_uat_server::BrdUatServer;
use clap::ArgAction;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use time::Date;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of a submission JSON file accepted by `render`.
const MAX_INPUT_BYTES: usize = 1024 * 1024;
/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "brd_uat=info,tower_http=info";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "brd-uat",
    about = "BRD & UAT document generator",
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print the version and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected configuration subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Render a document from a submission JSON file.
    Render(RenderCommand),
}

/// Arguments for `serve`.
#[derive(clap::Args, Debug)]
struct ServeCommand {
    /// Configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Permit binding to a non-loopback address.
    #[arg(long, action = ArgAction::SetTrue)]
    allow_non_loopback: bool,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(clap::Args, Debug)]
struct ConfigValidateCommand {
    /// Configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `render`.
#[derive(clap::Args, Debug)]
struct RenderCommand {
    /// Document to render.
    #[arg(long, value_enum)]
    kind: RenderKind,
    /// Submission JSON file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file; stdout when omitted.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Generation date (`YYYY-MM-DD`); today in UTC when omitted.
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    date: Option<String>,
}

/// Documents the `render` command can produce.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum RenderKind {
    /// BRD HTML document.
    Brd,
    /// Print-ready BRD HTML document.
    BrdPrint,
    /// UAT test case CSV.
    UatCsv,
    /// UAT HTML report.
    UatReport,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Error message.
    message: String,
}

impl CliError {
    /// Creates a new CLI error.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias.
type CliResult<T> = Result<T, CliError>;

/// Errors raised while reading size-limited input files.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and dispatches the selected command.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("brd-uat {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    init_tracing();
    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Render(command) => command_render(&command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Installs the diagnostic log subscriber writing to stderr.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Runs the HTTP server until it fails.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = BrdUatConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    if command.allow_non_loopback {
        config.server.allow_non_loopback = true;
    }

    let server = tokio::task::spawn_blocking(move || BrdUatServer::from_config(config))
        .await
        .map_err(|err| CliError::new(format!("server init failed: init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    info!("starting brd-uat server");
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;

    Ok(ExitCode::SUCCESS)
}

/// Dispatches configuration subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Loads and validates a configuration file.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    BrdUatConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config invalid: {err}")))?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Renders a document from a submission file.
fn command_render(command: &RenderCommand) -> CliResult<ExitCode> {
    let bytes = read_bytes_with_limit(&command.input, MAX_INPUT_BYTES)
        .map_err(|err| CliError::new(read_limit_message(&command.input, &err)))?;
    let submission = parse_submission(&bytes)?;
    let generated_on = resolve_render_date(command.date.as_deref())?;
    let rendered = render_document(command.kind, submission, generated_on)?;
    match &command.output {
        Some(path) => {
            fs::write(path, rendered.as_bytes()).map_err(|err| {
                CliError::new(format!("failed to write {}: {err}", path.display()))
            })?;
            info!(path = %path.display(), kind = ?command.kind, "document rendered");
        }
        None => write_stdout_bytes(rendered.as_bytes())
            .map_err(|err| CliError::new(output_error("stdout", &err)))?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Rendering Helpers
// ============================================================================

/// Parses a submission JSON document.
fn parse_submission(bytes: &[u8]) -> CliResult<RequirementSubmission> {
    serde_json::from_slice(bytes)
        .map_err(|err| CliError::new(format!("invalid submission json: {err}")))
}

/// Resolves the generation date, defaulting to today in UTC.
fn resolve_render_date(value: Option<&str>) -> CliResult<Date> {
    match value {
        Some(raw) => parse_iso_date(raw)
            .ok_or_else(|| CliError::new(format!("invalid --date value: {raw}"))),
        None => Ok(today_utc()),
    }
}

/// Validates a submission and renders the requested document.
fn render_document(
    kind: RenderKind,
    submission: RequirementSubmission,
    generated_on: Date,
) -> CliResult<String> {
    let requirement = submission
        .validate()
        .map_err(|err| CliError::new(format!("invalid submission: {err}")))?;
    let rendered = match kind {
        RenderKind::Brd | RenderKind::BrdPrint => {
            let variant = if kind == RenderKind::BrdPrint {
                BrdVariant::Print
            } else {
                BrdVariant::Document
            };
            let options = BrdOptions {
                generated_on,
                variant,
            };
            render_brd(&requirement, RequirementStatus::Draft, &options)
        }
        RenderKind::UatCsv => {
            let cases =
                generate_test_cases(requirement.priority, requirement.has_change_request());
            render_csv(&cases)
        }
        RenderKind::UatReport => {
            let cases =
                generate_test_cases(requirement.priority, requirement.has_change_request());
            render_uat_report(&requirement.project_title, requirement.priority, &cases, generated_on)
        }
    };
    Ok(rendered)
}

// ============================================================================
// SECTION: File Input
// ============================================================================

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Formats a size-limited read failure for display.
fn read_limit_message(path: &Path, error: &ReadLimitError) -> String {
    match error {
        ReadLimitError::Io(err) => format!("failed to read {}: {err}", path.display()),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => format!("{} is too large ({size} bytes, limit {limit})", path.display()),
    }
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
