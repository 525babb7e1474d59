/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Parser, ValueEnum};

use crate::filing::KNOWN_SCHEDULES;

/// irsx — retrieve and render IRS e-file (Form 990) filings.
#[derive(Debug, Parser)]
#[command(
    name = "irsx",
    about = "Retrieve and render IRS e-file (Form 990) filings",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Object ids (18 digits) or paths to `<object_id>_public.xml` files.
    #[arg(value_name = "OBJECT_ID_OR_PATH", required = true, num_args = 1..)]
    pub object_ids: Vec<String>,

    /// Verbose output.
    #[arg(long)]
    pub verbose: bool,

    /// Get only that schedule.
    #[arg(
        long,
        value_name = "SCHEDULE_NAME",
        value_parser = PossibleValuesParser::new(KNOWN_SCHEDULES.iter().copied())
    )]
    pub schedule: Option<String>,

    /// Show xpaths in csv and txt output.
    #[arg(long = "xpath")]
    pub documentation: bool,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    pub format: OutputFormat,

    /// Write result to file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Only list the schedules of the first filing.
    #[arg(long = "list_schedules")]
    pub list_schedules: bool,

    /// Print phase timings to stderr.
    #[arg(long)]
    pub debug: bool,

    /// Directory holding `<object_id>_public.xml` files for bare object ids.
    #[arg(long, value_name = "DIR", env = "IRSX_FILING_DIR", default_value = "XML")]
    pub filing_dir: PathBuf,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the parsed schedules.
    #[default]
    Json,
    /// One CSV row per field.
    Csv,
    /// One table per schedule.
    Txt,
}
