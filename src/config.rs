/// Report configuration
///
/// Every parameter of the analysis is fixed. They are collected here so that
/// each stage receives them explicitly instead of reaching for globals.

use std::path::PathBuf;

use crate::core::patterns;

/// Output chart settings
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Output file name, resolved against the working directory
    pub file_name: PathBuf,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Hand the saved image to the system viewer
    pub show: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 15 x 6 inches at 300 dpi
        Self {
            file_name: PathBuf::from("terrorism_rand_en.png"),
            width: 4500,
            height: 1800,
            show: true,
        }
    }
}

/// Parameters of one report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Filename globs tried in order during input discovery
    pub input_patterns: Vec<String>,
    /// Organization names matched against the perpetrator field
    pub keywords: Vec<String>,
    /// Country to region lookup; unmapped countries fall into `fallback_region`
    pub region_map: Vec<(String, String)>,
    pub fallback_region: String,
    /// Rows dated before this year are dropped
    pub min_year: i32,
    pub top_perpetrators: usize,
    pub top_years: usize,
    pub top_countries: usize,
    pub top_regions: usize,
    /// Unfiltered perpetrators listed when nothing matches
    pub debug_perpetrators: usize,
    pub chart: ChartConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_patterns: to_strings(patterns::INPUT_PATTERNS),
            keywords: to_strings(patterns::ORGANIZATION_KEYWORDS),
            region_map: patterns::REGION_MAP
                .iter()
                .map(|(country, region)| (country.to_string(), region.to_string()))
                .collect(),
            fallback_region: patterns::FALLBACK_REGION.to_string(),
            min_year: 1970,
            top_perpetrators: 30,
            top_years: 10,
            top_countries: 10,
            top_regions: 5,
            debug_perpetrators: 20,
            chart: ChartConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Look up the region label for a country
    pub fn region_for(&self, country: Option<&str>) -> &str {
        country
            .and_then(|name| {
                self.region_map
                    .iter()
                    .find(|(mapped, _)| mapped == name)
                    .map(|(_, region)| region.as_str())
            })
            .unwrap_or(&self.fallback_region)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
