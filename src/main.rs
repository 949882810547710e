/// Incident Report - frequency report and charts for the RAND terrorism incident dataset
///
/// The main entry point. It parses the ambient command-line options, sets up
/// logging and runs the report once, turning the expected failures into
/// console guidance and a non-zero exit status.

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::{error, LevelFilter};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use incident_report::app;
use incident_report::utils::output_formatter;
use incident_report::{ReportConfig, ReportError};

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "incident_report",
    version,
    about = "Frequency report and charts for the RAND terrorism incident dataset",
    long_about = "Looks for the RAND Database of Worldwide Terrorism Incidents export in the
working directory, counts the incidents attributed to a fixed list of
Islamist-extremist organizations by perpetrator, year, country and region,
and saves a two-panel chart as terrorism_rand_en.png."
)]
struct Args {
    /// Directory searched for the input file and receiving the chart
    #[arg(long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Do not open the chart in an image viewer
    #[arg(long = "no-show", action = ArgAction::SetTrue)]
    no_show: bool,

    /// Set logging level (default: WARN)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Main entry point function
fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    let mut config = ReportConfig::default();
    config.chart.show = !args.no_show;

    let result = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        app::run_report(&args.dir, &config, &mut out)
    };

    match result {
        Ok(_) => Ok(()),
        Err(err) => match err.downcast_ref::<ReportError>() {
            Some(report_error) if report_error.is_recognised() => {
                error!("{}", report_error);
                print!("{}", explain(report_error, &config));
                let _ = io::stdout().flush();
                process::exit(1);
            }
            _ => Err(err),
        },
    }
}

/// Console text for the failures the report explains itself
fn explain(report_error: &ReportError, config: &ReportConfig) -> String {
    match report_error {
        ReportError::InputNotFound { .. } => output_formatter::format_not_found(),
        ReportError::Load { path, message } => output_formatter::format_load_failure(path, message),
        ReportError::EmptyResult { top_perpetrators } => {
            output_formatter::format_empty_result(top_perpetrators, config)
        }
        other => format!("{}\n", other),
    }
}

/// Set up logging with file or console output
fn setup_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();

    // Set log level from arguments
    builder.filter_level(args.log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(log_file) = &args.log_file {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file.display(), e),
        }
    }

    builder.init();
}
