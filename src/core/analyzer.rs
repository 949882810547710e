/// Incident selection
///
/// This file contains the IncidentAnalyzer which applies the keyword filter to
/// the loaded table and derives the year of every selected row.

use log::{debug, info};
use regex::Regex;

use crate::config::ReportConfig;
use crate::core::aggregate::{Aggregates, ValueCounts};
use crate::core::patterns;
use crate::core::table::{IncidentTable, COUNTRY_COLUMN, DATE_COLUMN, PERPETRATOR_COLUMN};
use crate::error::ReportError;

/// A selected row with its derived year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    /// Position of the row in the source table
    pub row: usize,
    pub perpetrator: String,
    pub year: i32,
    pub country: Option<String>,
}

/// Column positions the analyzer reads
#[derive(Debug, Clone, Copy)]
struct Columns {
    perpetrator: usize,
    date: usize,
    country: usize,
}

impl Columns {
    fn resolve(table: &IncidentTable) -> Result<Self, ReportError> {
        Ok(Self {
            perpetrator: table.column_index(PERPETRATOR_COLUMN)?,
            date: table.column_index(DATE_COLUMN)?,
            country: table.column_index(COUNTRY_COLUMN)?,
        })
    }
}

/// Keyword filter and year derivation over one table
pub struct IncidentAnalyzer<'a> {
    /// Configuration options
    config: &'a ReportConfig,

    /// Alternation of every organization name
    keyword_regex: Regex,
}

impl<'a> IncidentAnalyzer<'a> {
    /// Create a new IncidentAnalyzer instance
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the keyword list and year threshold
    ///
    /// # Returns
    ///
    /// The analyzer, or `ReportError::Pattern` if the keywords do not compile
    pub fn new(config: &'a ReportConfig) -> Result<Self, ReportError> {
        let keyword_regex = patterns::build_keyword_regex(config.keywords.as_slice())?;
        debug!("Keyword pattern: {}", keyword_regex.as_str());

        Ok(Self {
            config,
            keyword_regex,
        })
    }

    /// Whether a perpetrator value names one of the organizations.
    ///
    /// A missing value is matched as empty text and so never selected.
    pub fn matches(&self, perpetrator: Option<&str>) -> bool {
        self.keyword_regex.is_match(perpetrator.unwrap_or(""))
    }

    /// Rows whose perpetrator matches, in table order
    pub fn select(&self, table: &IncidentTable) -> Result<Vec<usize>, ReportError> {
        let columns = Columns::resolve(table)?;

        let selected: Vec<usize> = (0..table.len())
            .filter(|&row| self.matches(table.value(row, columns.perpetrator)))
            .collect();

        info!("Keyword filter selected {} of {} rows", selected.len(), table.len());
        Ok(selected)
    }

    /// Derive years for the selected rows and drop those without a usable one
    pub fn derive(&self, table: &IncidentTable, selected: &[usize]) -> Result<Vec<Incident>, ReportError> {
        let columns = Columns::resolve(table)?;

        let incidents: Vec<Incident> = selected
            .iter()
            .filter_map(|&row| {
                let year = patterns::extract_year(table.value(row, columns.date))?;
                if year < self.config.min_year {
                    return None;
                }

                Some(Incident {
                    row,
                    perpetrator: table.value(row, columns.perpetrator).unwrap_or("").to_string(),
                    year,
                    country: table.value(row, columns.country).map(|c| c.to_string()),
                })
            })
            .collect();

        info!(
            "{} of {} selected rows carry a year from {} on",
            incidents.len(),
            selected.len(),
            self.config.min_year
        );
        Ok(incidents)
    }

    /// Run filter and year derivation.
    ///
    /// Returns `ReportError::EmptyResult` with the most frequent perpetrators of
    /// the whole table when nothing survives.
    pub fn analyze(&self, table: &IncidentTable) -> Result<Vec<Incident>, ReportError> {
        let selected = self.select(table)?;
        let incidents = self.derive(table, &selected)?;

        if incidents.is_empty() {
            let perpetrator = table.column_index(PERPETRATOR_COLUMN)?;
            let top_perpetrators = ValueCounts::from_values(table.column_values(perpetrator))
                .head(self.config.debug_perpetrators);

            return Err(ReportError::EmptyResult { top_perpetrators });
        }

        Ok(incidents)
    }

    /// Filter, derive and count in one go
    pub fn aggregate(&self, table: &IncidentTable) -> Result<Aggregates, ReportError> {
        let incidents = self.analyze(table)?;
        Ok(Aggregates::compute(&incidents, table.len(), self.config))
    }
}
