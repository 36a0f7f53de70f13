use std::fs::{self, File};
use std::path::PathBuf;

use admission_ai::config::AppConfig;
use admission_ai::error::AppError;
use admission_ai::profile::{
    build_report, parse_preferences, parse_qualifications, qualifications_from_csv,
};
use admission_ai::telemetry;
use admission_ai::EligibilityEngine;
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::demo::run_demo;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Admission Matcher",
    about = "Score matric results against university course requirements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyse a transcript and questionnaire, printing the report as JSON
    Analyze(AnalyzeArgs),
    /// Check eligibility for a single course field
    Check(CheckArgs),
    /// Walk through the sample learner profile
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("transcript").required(true).args(["qualifications", "marks_csv"])))]
struct AnalyzeArgs {
    /// JSON file holding a list of {"subject", "mark"} records
    #[arg(long)]
    qualifications: Option<PathBuf>,
    /// CSV file with `subject,mark` columns
    #[arg(long)]
    marks_csv: Option<PathBuf>,
    /// JSON file holding the questionnaire preferences
    #[arg(long)]
    preferences: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Course field to check, e.g. Engineering
    #[arg(long)]
    field: String,
    /// JSON file holding a list of {"subject", "mark"} records
    #[arg(long)]
    qualifications: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Check(args) => run_check(args),
        Command::Demo => run_demo(),
    }
}

fn command_engine() -> Result<EligibilityEngine, AppError> {
    let config = AppConfig::load()?;
    // A subscriber may already be installed when embedded; logging is optional here.
    telemetry::init(&config.telemetry).ok();
    Ok(EligibilityEngine::new(config.scoring.policy()?))
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let engine = command_engine()?;

    let qualifications = match (args.qualifications, args.marks_csv) {
        (Some(path), _) => parse_qualifications(&fs::read_to_string(path)?)?,
        (None, Some(path)) => qualifications_from_csv(File::open(path)?)?,
        (None, None) => Vec::new(),
    };
    let preferences = match args.preferences {
        Some(path) => parse_preferences(&fs::read_to_string(path)?)?,
        None => Default::default(),
    };

    let report = build_report(&engine, &qualifications, &preferences)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let engine = command_engine()?;
    let qualifications = parse_qualifications(&fs::read_to_string(args.qualifications)?)?;

    let result = engine
        .screen_course(&qualifications, &args.field)
        .map_err(admission_ai::profile::ProfileError::from)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
