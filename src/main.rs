//! capkit - convert and create Common Alerting Protocol 1.2 messages
//!
//! Documents are written to stdout unless `--output` is given; logs always
//! go to stderr.

use anyhow::{Context, Result};
use capkit_cap::{format_cap_timestamp, from_json, parse_alert, Alert, MsgType, Status};
use capkit_core::config::{AppConfig, LogFormat, LoggingConfig, OutputFormat};
use capkit_core::error::FormatError;
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Read, convert and create CAP 1.2 alerts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, global = true, env = "CAPKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an alert between CAP XML and JSON
    Convert(ConvertArgs),
    /// Create a new alert from command-line fields
    New(NewArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input file (stdin if not specified)
    input: Option<PathBuf>,

    /// Input format
    #[arg(long, value_enum, default_value = "auto")]
    from: InputFormat,

    /// Output format (configured default if not specified)
    #[arg(long, value_enum)]
    to: Option<FormatArg>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct NewArgs {
    /// Originator of the alert, e.g. an email address
    #[arg(long)]
    sender: String,

    /// Type of the subject event
    #[arg(long)]
    event: String,

    #[arg(long, default_value = "Actual")]
    status: String,

    #[arg(long, default_value = "Alert")]
    msg_type: String,

    /// Earlier messages as `sender,identifier,sent` triples
    #[arg(long)]
    references: Option<String>,

    #[arg(long)]
    language: Option<String>,

    /// Event category (repeatable)
    #[arg(long)]
    category: Vec<String>,

    #[arg(long, default_value = "Unknown")]
    urgency: String,

    #[arg(long, default_value = "Unknown")]
    severity: String,

    #[arg(long, default_value = "Unknown")]
    certainty: String,

    #[arg(long)]
    headline: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Area description
    #[arg(long)]
    area: Option<String>,

    /// Area polygon as space-separated `lat,lon` pairs (repeatable)
    #[arg(long)]
    polygon: Vec<String>,

    /// Area circle as `lat,lon radius` (repeatable)
    #[arg(long)]
    circle: Vec<String>,

    /// Output format (configured default if not specified)
    #[arg(long, value_enum)]
    to: Option<FormatArg>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// JSON when the document starts with `{`, XML otherwise
    Auto,
    Xml,
    Json,
}

impl InputFormat {
    fn resolve(self, text: &str) -> OutputFormat {
        match self {
            InputFormat::Xml => OutputFormat::Xml,
            InputFormat::Json => OutputFormat::Json,
            InputFormat::Auto if text.trim_start().starts_with('{') => OutputFormat::Json,
            InputFormat::Auto => OutputFormat::Xml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Xml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xml => OutputFormat::Xml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose)?;
    debug!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Command::Convert(args) => run_convert(&config, args),
        Command::New(args) => run_new(&config, args),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_config_builder(path)
            .with_context(|| format!("Failed to load config file: {:?}", path))?,
        None => AppConfig::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn init_logging(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        logging.parse_level()?
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(logging.file_line)
        .with_line_number(logging.file_line);

    match (logging.format, logging.timestamps) {
        (LogFormat::Json, true) => builder.json().try_init(),
        (LogFormat::Json, false) => builder.json().without_time().try_init(),
        (LogFormat::Text, true) => builder.try_init(),
        (LogFormat::Text, false) => builder.without_time().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn run_convert(config: &AppConfig, args: ConvertArgs) -> Result<()> {
    let text = read_input(args.input.as_deref())
        .with_context(|| format!("Failed to read input: {:?}", args.input))?;
    let from = args.from.resolve(&text);
    let to = args.to.map(OutputFormat::from).unwrap_or(config.output.format);

    let mut alert = decode(&text, from).context("Failed to read alert")?;
    if alert.infos.is_empty() {
        warn!(identifier = %alert.identifier, "alert has no info block");
    }
    info!(identifier = %alert.identifier, ?from, ?to, "converting alert");

    let document = encode(&mut alert, to, config.output.trailing_newline)?;
    write_output(args.output.as_deref(), &document)
        .with_context(|| format!("Failed to write output: {:?}", args.output))
}

fn run_new(config: &AppConfig, args: NewArgs) -> Result<()> {
    let mut alert = build_alert(&args);
    info!(identifier = %alert.identifier, event = %args.event, "created alert");

    let to = args.to.map(OutputFormat::from).unwrap_or(config.output.format);
    let document = encode(&mut alert, to, config.output.trailing_newline)?;
    write_output(args.output.as_deref(), &document)
        .with_context(|| format!("Failed to write output: {:?}", args.output))
}

fn build_alert(args: &NewArgs) -> Alert {
    let mut alert = Alert::new();
    alert.identifier = Uuid::new_v4().to_string();
    alert.sender = args.sender.clone();
    alert.sent = format_cap_timestamp(&Utc::now());
    alert.status = Status::from(args.status.as_str());
    alert.msg_type = MsgType::from(args.msg_type.as_str());
    alert.references = args.references.clone().unwrap_or_default();

    let info = alert.add_info();
    info.language = args.language.clone().unwrap_or_default();
    for category in &args.category {
        info.add_category(category.as_str());
    }
    info.event = args.event.clone();
    info.urgency = args.urgency.as_str().into();
    info.severity = args.severity.as_str().into();
    info.certainty = args.certainty.as_str().into();
    info.headline = args.headline.clone().unwrap_or_default();
    info.description = args.description.clone().unwrap_or_default();

    if args.area.is_some() || !args.polygon.is_empty() || !args.circle.is_empty() {
        let area = info.add_area(args.area.clone().unwrap_or_default());
        for polygon in &args.polygon {
            area.add_polygon(polygon.as_str());
        }
        for circle in &args.circle {
            area.add_circle(circle.as_str());
        }
    }

    warn_unrecognized(&alert);
    alert
}

fn warn_unrecognized(alert: &Alert) {
    let mut values = vec![
        ("status", alert.status.is_recognized(), alert.status.as_str()),
        ("msgType", alert.msg_type.is_recognized(), alert.msg_type.as_str()),
    ];
    for info in &alert.infos {
        values.extend(
            info.categories
                .iter()
                .map(|c| ("category", c.is_recognized(), c.as_str())),
        );
        values.push(("urgency", info.urgency.is_recognized(), info.urgency.as_str()));
        values.push(("severity", info.severity.is_recognized(), info.severity.as_str()));
        values.push(("certainty", info.certainty.is_recognized(), info.certainty.as_str()));
    }
    for (field, recognized, value) in values {
        if !recognized {
            warn!(field, value, "value is not in the CAP 1.2 vocabulary");
        }
    }
}

fn decode(text: &str, format: OutputFormat) -> capkit_core::Result<Alert> {
    match format {
        OutputFormat::Xml => {
            parse_alert(text).map_err(|e| FormatError::xml(e.to_string()).into())
        }
        OutputFormat::Json => Ok(from_json(text).map_err(FormatError::from)?),
    }
}

fn encode(alert: &mut Alert, format: OutputFormat, trailing_newline: bool) -> Result<String> {
    let mut document = match format {
        OutputFormat::Xml => alert.to_xml(),
        OutputFormat::Json => alert
            .to_json()
            .map_err(FormatError::from)
            .context("Failed to encode alert as JSON")?,
    };
    if trailing_newline {
        document.push('\n');
    }
    Ok(document)
}

/// Read the document from `path`, or stdin when there is none
fn read_input(path: Option<&Path>) -> capkit_core::Result<String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(text)
}

/// Write the document to `path`, or stdout when there is none
fn write_output(path: Option<&Path>, document: &str) -> capkit_core::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, document)?;
            debug!(bytes = document.len(), path = ?path, "wrote document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
