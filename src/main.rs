use clap::{Args, Parser, Subcommand, ValueEnum};
use lld_rs::{
    CsvLldConfig, GeometryFormat, LldColumns, LldError, LldInput, Parcel, csv_to_lld_csv,
    parse_lld, validate_all,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Convert Alberta Legal Land Descriptions to latitude/longitude.
#[derive(Parser)]
#[command(name = "lld", version)]
struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert LLDs given as notation or as separate fields
    Convert(ConvertArgs),
    /// Convert a CSV file of LLDs
    Batch(BatchArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// LLDs such as NE-36-87-18-W4
    lld: Vec<String>,

    /// Quarter section (NE, NW, SE, SW)
    #[arg(long = "qs", conflicts_with = "lld")]
    quarter_section: Option<String>,

    /// Section (1-36)
    #[arg(long, conflicts_with = "lld")]
    section: Option<String>,

    /// Township (1-126)
    #[arg(long, conflicts_with = "lld")]
    township: Option<String>,

    /// Range (1-34)
    #[arg(long, conflicts_with = "lld")]
    range: Option<String>,

    /// Meridian (4, 5, 6 or W4, W5, W6)
    #[arg(long, conflicts_with = "lld")]
    meridian: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args)]
struct BatchArgs {
    /// Input CSV
    input: PathBuf,

    /// Output CSV
    output: PathBuf,

    /// Column holding LLD notation
    #[arg(long, default_value = "lld")]
    column: String,

    /// Read quarter_section, section, township, range and meridian columns instead
    #[arg(long, conflicts_with = "column")]
    fields: bool,

    /// Add the quarter-section polygon in this format
    #[arg(long, value_enum)]
    geometry: Option<GeometryArg>,

    /// Write invalid rows with an error message instead of stopping
    #[arg(long)]
    skip_invalid: bool,

    /// Input columns to leave out of the output
    #[arg(long)]
    exclude: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Wkt,
    Geojson,
}

#[derive(Clone, Copy, ValueEnum)]
enum GeometryArg {
    Wkt,
    Geojson,
}

impl From<GeometryArg> for GeometryFormat {
    fn from(arg: GeometryArg) -> Self {
        match arg {
            GeometryArg::Wkt => GeometryFormat::Wkt,
            GeometryArg::Geojson => GeometryFormat::GeoJson,
        }
    }
}

#[derive(Serialize)]
struct Report {
    lld: String,
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("LLD_LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn render(parcel: &Parcel, format: OutputFormat) -> Result<String, LldError> {
    match format {
        OutputFormat::Text => Ok(format!("{}: {}", parcel.lld, parcel.center)),
        OutputFormat::Json => {
            let report = Report {
                lld: parcel.lld.to_string(),
                latitude: parcel.latitude(),
                longitude: parcel.longitude(),
                warning: parcel.warning.map(|w| w.to_string()),
            };
            serde_json::to_string(&report).map_err(|e| LldError::IoError(e.to_string()))
        }
        OutputFormat::Wkt => Ok(parcel.to_wkt()),
        OutputFormat::Geojson => parcel.to_geojson(),
    }
}

/// Returns whether every LLD converted.
fn run_convert(args: &ConvertArgs) -> Result<bool, LldError> {
    if args.lld.is_empty() {
        let input = LldInput::from_strs(
            args.quarter_section.as_deref().unwrap_or_default(),
            args.section.as_deref().unwrap_or_default(),
            args.township.as_deref().unwrap_or_default(),
            args.range.as_deref().unwrap_or_default(),
            args.meridian.as_deref().unwrap_or_default(),
        )?;

        let errors = validate_all(&input);
        if !errors.is_empty() {
            for e in &errors {
                eprintln!("error: {}", e);
            }
            return Ok(false);
        }

        println!("{}", render(&Parcel::from_input(&input)?, args.format)?);
        return Ok(true);
    }

    let mut failed = 0;
    for text in &args.lld {
        match parse_lld(text).and_then(|input| Parcel::from_input(&input)) {
            Ok(parcel) => println!("{}", render(&parcel, args.format)?),
            Err(e) => {
                eprintln!("error: {}: {}", text, e);
                failed += 1;
            }
        }
    }
    debug!(total = args.lld.len(), failed, "convert finished");

    Ok(failed == 0)
}

fn run_batch(args: &BatchArgs) -> Result<bool, LldError> {
    let mut config = if args.fields {
        CsvLldConfig::from_fields(LldColumns::default())
    } else {
        CsvLldConfig::new(&args.column)
    };
    config = config
        .exclude(args.exclude.clone())
        .skip_invalid(args.skip_invalid);
    if let Some(geometry) = args.geometry {
        config = config.with_geometry(geometry.into());
    }

    info!(input = %args.input.display(), output = %args.output.display(), "converting csv");
    let summary = csv_to_lld_csv(&args.input, &args.output, &config)?;

    println!(
        "converted {} rows ({} failed, {} outside Alberta bounds)",
        summary.converted, summary.failed, summary.out_of_bounds
    );
    Ok(summary.failed == 0)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Batch(args) => run_batch(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
