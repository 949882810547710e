/// Output formatter for the incident report
///
/// This module renders the console sections of the report. Every function
/// returns the text so the report can be checked without capturing stdout.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

use crate::config::ReportConfig;
use crate::core::aggregate::{Aggregates, ValueCounts};
use crate::core::table::IncidentTable;
use crate::utils::file_utils::display_name;

pub const SOURCE_URL: &str = "https://www.rand.org/nsrd/projects/terrorism-incidents/download.html";
pub const EXPECTED_FILE_NAME: &str = "RAND_Database_of_Worldwide_Terrorism_Incidents.csv";

/// Group the digits of a count in thousands: `40129` becomes `40,129`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

/// Two aligned columns under a header naming the key column
fn format_table<K: Display, I>(key_header: &str, rows: I) -> String
where
    I: IntoIterator<Item = (K, usize)>,
{
    let rows: Vec<(String, String)> = rows
        .into_iter()
        .map(|(key, count)| (key.to_string(), count.to_string()))
        .collect();

    let key_width = rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0)
        .max(key_header.chars().count());
    let count_width = rows.iter().map(|(_, count)| count.len()).max().unwrap_or(0);

    let mut output = format!("{}\n", key_header);
    for (key, count) in rows {
        output.push_str(&format!("{:<key_width$}    {:>count_width$}\n", key, count));
    }

    output
}

fn heading(title: &str) -> String {
    format!("\n{}\n", title.yellow().bold())
}

/// Acknowledge the loaded file
pub fn format_load_summary(table: &IncidentTable) -> String {
    format!(
        "Data loaded from: {}\nTotal incidents: {}\nColumns: {:?}\n",
        display_name(table.source()),
        group_thousands(table.len()),
        table.column_names()
    )
}

/// Guidance printed when no input file was found
pub fn format_not_found() -> String {
    format!(
        "{}\nDownload it from {}\nand place the file (e.g. {}) here.\n",
        "ERROR: RAND CSV file not found in the current folder.".red(),
        SOURCE_URL,
        EXPECTED_FILE_NAME
    )
}

/// Message printed when the input could not be parsed
pub fn format_load_failure(path: &Path, message: &str) -> String {
    format!("Failed to read {}: {}\n", display_name(path), message)
}

/// Diagnostic printed when the keyword filter left nothing
pub fn format_empty_result(top_perpetrators: &ValueCounts, config: &ReportConfig) -> String {
    let mut output = format!("\n{}\n", "WARNING: No incidents matched the group list.".red());
    output.push_str(&format!(
        "Top {} Perpetrators in the whole dataset (for debugging):\n",
        config.debug_perpetrators
    ));
    output.push_str(&format_table(
        "Perpetrator",
        top_perpetrators.iter().map(|(name, count)| (name, *count)),
    ));
    output
}

/// Every section of the report up to, not including, the chart notice
pub fn format_report(aggregates: &Aggregates, config: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str(&heading(&format!(
        "Groups / Individual names that matched the filter (top {}):",
        config.top_perpetrators
    )));
    for (name, count) in aggregates.perpetrators.top(config.top_perpetrators) {
        output.push_str(&format!("  \u{2022} {}  \u{2192}  {} incident(s)\n", name, group_thousands(*count)));
    }

    output.push_str(&format!(
        "\n{} {}\n",
        "Total attacks attributed to the listed groups (1970-2009):".green(),
        group_thousands(aggregates.total_matched)
    ));
    output.push_str(&format!(
        "{} {:.2}%\n",
        "Percentage of all incidents in the database:".green(),
        aggregates.matched_percentage()
    ));

    output.push_str(&heading(&format!("Top {} years by number of attacks:", config.top_years)));
    output.push_str(&format_table("year", aggregates.top_years(config.top_years)));

    output.push_str(&heading(&format!(
        "Top {} countries by number of attacks:",
        config.top_countries
    )));
    output.push_str(&format_table(
        "Country",
        aggregates
            .countries
            .top(config.top_countries)
            .iter()
            .map(|(name, count)| (name, *count)),
    ));

    output.push_str(&heading(&format!("Top {} regions (simple mapping):", config.top_regions)));
    output.push_str(&format_table(
        "region",
        aggregates
            .regions
            .top(config.top_regions)
            .iter()
            .map(|(name, count)| (name, *count)),
    ));

    output
}

/// Chart notice and closing attribution
pub fn format_closing(chart_path: &Path) -> String {
    format!(
        "\nChart saved as '{}'\n\nSource: RAND Database of Worldwide Terrorism Incidents (1968-2009)\n\
         Note: These numbers refer to extremist groups, not to Muslims in general.\n",
        display_name(chart_path)
    )
}
