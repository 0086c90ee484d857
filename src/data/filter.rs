use std::collections::BTreeSet;

use super::model::ReviewTable;

// ---------------------------------------------------------------------------
// Filter specification: year range + country selection + metric selection
// ---------------------------------------------------------------------------

/// Declarative filter over a [`ReviewTable`].  Constructed fresh per user
/// interaction and treated as immutable once handed to the pipeline; every
/// derived view is recomputed from scratch when it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Inclusive year bounds, always within the table's observed range.
    pub year_min: i32,
    pub year_max: i32,
    /// Selected countries.  Empty set ⇒ empty view, not an error.
    pub countries: BTreeSet<String>,
    /// Selected numeric metrics (names from the schema's metric columns).
    pub metrics: BTreeSet<String>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            year_min: 0,
            year_max: 0,
            countries: BTreeSet::new(),
            metrics: BTreeSet::new(),
        }
    }
}

impl FilterSpec {
    /// The default spec: full year range, all countries, all metrics.
    pub fn select_all(table: &ReviewTable) -> Self {
        FilterSpec {
            year_min: table.year_min,
            year_max: table.year_max,
            countries: table.countries.clone(),
            metrics: table.schema.metric_columns.iter().cloned().collect(),
        }
    }

    /// Clamp the year bounds to the table's observed range and restore
    /// `year_min ≤ year_max`.
    pub fn clamp_years(&mut self, table: &ReviewTable) {
        self.year_min = self.year_min.clamp(table.year_min, table.year_max);
        self.year_max = self.year_max.clamp(table.year_min, table.year_max);
        if self.year_min > self.year_max {
            std::mem::swap(&mut self.year_min, &mut self.year_max);
        }
    }

    /// Selected metrics in the schema's column order, so every derived
    /// table shows them in a stable order.
    pub fn ordered_metrics(&self, table: &ReviewTable) -> Vec<String> {
        table
            .schema
            .metric_columns
            .iter()
            .filter(|m| self.metrics.contains(*m))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices of records passing a filter.  Derived, never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the view of records that pass the filter:
/// `year_min ≤ year ≤ year_max AND country ∈ spec.countries`.
///
/// Pure function of `(table, spec)`.  An empty country selection yields an
/// empty view; downstream components degrade to empty outputs.
pub fn apply(table: &ReviewTable, spec: &FilterSpec) -> FilteredView {
    let indices = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.year >= spec.year_min
                && r.year <= spec.year_max
                && spec.countries.contains(&r.country)
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView { indices }
}
