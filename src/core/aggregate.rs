/// Frequency aggregates over the selected incidents

use std::collections::{BTreeMap, HashMap};

use crate::config::ReportConfig;
use crate::core::analyzer::Incident;

/// Values with their occurrence counts, most frequent first.
///
/// Equal counts keep the order in which the values were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts {
    entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for value in values {
            let value = value.as_ref();
            match positions.get(value) {
                Some(&index) => entries[index].1 += 1,
                None => {
                    positions.insert(value.to_string(), entries.len());
                    entries.push((value.to_string(), 1));
                }
            }
        }

        // sort_by is stable, so ties stay in first-seen order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    /// The `n` most frequent values
    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// A copy holding only the `n` most frequent values
    pub fn head(&self, n: usize) -> ValueCounts {
        Self {
            entries: self.top(n).to_vec(),
        }
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, usize)> {
        self.entries.iter()
    }
}

/// Everything the report and the chart are drawn from
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub perpetrators: ValueCounts,
    /// Incidents per year, ascending by year
    pub yearly: BTreeMap<i32, usize>,
    pub countries: ValueCounts,
    pub regions: ValueCounts,
    pub total_matched: usize,
    pub total_rows: usize,
}

impl Aggregates {
    /// Count the selected incidents
    ///
    /// # Arguments
    ///
    /// * `incidents` - Rows that passed the keyword filter and the year cut
    /// * `total_rows` - Row count of the unfiltered table
    /// * `config` - Supplies the region lookup
    pub fn compute(incidents: &[Incident], total_rows: usize, config: &ReportConfig) -> Self {
        let mut yearly = BTreeMap::new();
        for incident in incidents {
            *yearly.entry(incident.year).or_insert(0) += 1;
        }

        Self {
            perpetrators: ValueCounts::from_values(
                incidents.iter().map(|incident| incident.perpetrator.trim()),
            ),
            yearly,
            countries: ValueCounts::from_values(
                incidents.iter().filter_map(|incident| incident.country.as_deref()),
            ),
            regions: ValueCounts::from_values(
                incidents
                    .iter()
                    .map(|incident| config.region_for(incident.country.as_deref())),
            ),
            total_matched: incidents.len(),
            total_rows,
        }
    }

    /// Share of all incidents that were matched, in percent
    pub fn matched_percentage(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        self.total_matched as f64 / self.total_rows as f64 * 100.0
    }

    /// The `n` busiest years; equal counts are ordered by year
    pub fn top_years(&self, n: usize) -> Vec<(i32, usize)> {
        let mut years: Vec<(i32, usize)> = self.yearly.iter().map(|(y, c)| (*y, *c)).collect();
        years.sort_by(|a, b| b.1.cmp(&a.1));
        years.truncate(n);
        years
    }
}
