/// Utility modules for the incident report
///
/// This module contains input discovery and decoding, console formatting,
/// and chart rendering.

pub mod chart;
pub mod file_utils;
pub mod output_formatter;
