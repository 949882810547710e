/// Core module for the incident report
///
/// This module contains the table model, the fixed match patterns, the
/// keyword filter with year derivation, and the frequency aggregates.

pub mod aggregate;
pub mod analyzer;
pub mod patterns;
pub mod table;
