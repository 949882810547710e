/// Incident Report - frequency report and charts for the RAND terrorism incident dataset
///
/// This library locates the RAND export in a directory, selects the incidents
/// attributed to a fixed list of organizations, counts them by perpetrator,
/// year, country and region, and renders the counts as a PNG chart.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::{ChartConfig, ReportConfig};
pub use crate::core::aggregate::{Aggregates, ValueCounts};
pub use crate::core::analyzer::{Incident, IncidentAnalyzer};
pub use crate::core::table::IncidentTable;
pub use crate::error::ReportError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line application functionality
pub mod app {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use anyhow::Result;
    use log::info;

    use crate::config::ReportConfig;
    use crate::core::aggregate::Aggregates;
    use crate::core::analyzer::IncidentAnalyzer;
    use crate::core::table::IncidentTable;
    use crate::utils::{chart, file_utils, output_formatter};

    /// What a completed run produced
    #[derive(Debug)]
    pub struct ReportOutcome {
        pub source: PathBuf,
        pub aggregates: Aggregates,
        pub chart_path: PathBuf,
    }

    /// Run the whole report once
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory scanned for the input and receiving the chart
    /// * `config` - Fixed analysis parameters
    /// * `out` - Where the console report is written
    ///
    /// # Returns
    ///
    /// The aggregates and chart location. Failures the caller is expected to
    /// explain to the user arrive as a `ReportError` inside the `anyhow::Error`.
    pub fn run_report<W: Write>(dir: &Path, config: &ReportConfig, out: &mut W) -> Result<ReportOutcome> {
        let source = file_utils::locate_input(dir, config.input_patterns.as_slice())?;
        info!("Using input file {}", source.display());

        let table = IncidentTable::load(&source)?;
        write!(out, "{}", output_formatter::format_load_summary(&table))?;

        let analyzer = IncidentAnalyzer::new(config)?;
        let aggregates = analyzer.aggregate(&table)?;
        write!(out, "{}", output_formatter::format_report(&aggregates, config))?;

        let chart_path = dir.join(&config.chart.file_name);
        chart::render_chart(&aggregates, config, &chart_path)?;
        if config.chart.show {
            chart::show_chart(&chart_path);
        }

        write!(out, "{}", output_formatter::format_closing(&chart_path))?;
        out.flush()?;

        Ok(ReportOutcome {
            source,
            aggregates,
            chart_path,
        })
    }
}
