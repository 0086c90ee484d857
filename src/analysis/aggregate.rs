use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::filter::{FilterSpec, FilteredView};
use crate::data::model::{ReviewRecord, ReviewTable};

// ---------------------------------------------------------------------------
// Grouped means (yearly and year×country)
// ---------------------------------------------------------------------------

/// Round to 2 decimal places.  Idempotent: re-rounding a rounded value is a
/// no-op.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// A grouped mean table: one row per group key, one column per selected
/// metric.  `None` cells mark (group, metric) combinations with zero
/// contributing records; they are never reported as zero.  Serializable so
/// external renderers can consume it directly.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedMeans<K> {
    /// Metric columns, in the schema's stable order.
    pub metrics: Vec<String>,
    /// `(group key, per-metric means)`, sorted ascending by key.
    pub rows: Vec<(K, Vec<Option<f64>>)>,
}

impl<K> GroupedMeans<K> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mean of each selected metric grouped by year, missing values excluded
/// per metric per group, rounded to 2 decimals, years ascending.
pub type YearlyMeans = GroupedMeans<i32>;

/// Same policy grouped by (year, country); drives per-country trend lines.
pub type YearCountryMeans = GroupedMeans<(i32, String)>;

pub fn yearly_means(table: &ReviewTable, view: &FilteredView, spec: &FilterSpec) -> YearlyMeans {
    grouped_means(table, view, spec, |r| r.year)
}

pub fn yearly_country_means(
    table: &ReviewTable,
    view: &FilteredView,
    spec: &FilterSpec,
) -> YearCountryMeans {
    grouped_means(table, view, spec, |r| (r.year, r.country.clone()))
}

fn grouped_means<K: Ord + Clone>(
    table: &ReviewTable,
    view: &FilteredView,
    spec: &FilterSpec,
    key_of: impl Fn(&ReviewRecord) -> K,
) -> GroupedMeans<K> {
    let metrics = spec.ordered_metrics(table);

    // (sum, count) per metric per group; BTreeMap keeps keys ascending.
    let mut groups: BTreeMap<K, Vec<(f64, u32)>> = BTreeMap::new();

    for &idx in &view.indices {
        let record = &table.records[idx];
        let slots = groups
            .entry(key_of(record))
            .or_insert_with(|| vec![(0.0, 0); metrics.len()]);
        for (metric, slot) in metrics.iter().zip(slots.iter_mut()) {
            if let Some(v) = record.metric(metric) {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    let rows = groups
        .into_iter()
        .map(|(key, slots)| {
            let means = slots
                .into_iter()
                .map(|(sum, count)| (count > 0).then(|| round2(sum / count as f64)))
                .collect();
            (key, means)
        })
        .collect();

    GroupedMeans { metrics, rows }
}

// ---------------------------------------------------------------------------
// Correlation matrix (pairwise-complete Pearson)
// ---------------------------------------------------------------------------

/// Pearson correlation matrix over the selected metrics.  Undefined
/// coefficients (fewer than 2 complete pairs, or zero variance) are stored
/// as `NaN` so the rendering layer can show them distinctly from zero.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<String>,
    /// Row-major `metrics.len() × metrics.len()` coefficients.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.metrics.len() + col]
    }
}

/// Compute the pairwise-complete correlation matrix over the filtered view.
/// Each pair uses only records where both metrics are non-missing.  The
/// diagonal is 1.0 whenever the metric has at least one non-missing value,
/// `NaN` otherwise.  Selecting zero metrics yields an empty matrix.
pub fn correlation_matrix(
    table: &ReviewTable,
    view: &FilteredView,
    spec: &FilterSpec,
) -> CorrelationMatrix {
    let metrics = spec.ordered_metrics(table);
    let n = metrics.len();

    // Per-record metric values for the view, one column per metric.
    let columns: Vec<Vec<Option<f64>>> = metrics
        .iter()
        .map(|m| {
            view.indices
                .iter()
                .map(|&idx| table.records[idx].metric(m))
                .collect()
        })
        .collect();

    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        let present = columns[i].iter().flatten().count();
        values[i * n + i] = if present > 0 { 1.0 } else { f64::NAN };

        for j in (i + 1)..n {
            let pairs: Vec<(f64, f64)> = columns[i]
                .iter()
                .zip(columns[j].iter())
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect();
            let r = pearson(&pairs);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    CorrelationMatrix { metrics, values }
}

/// Pearson coefficient over complete pairs.  `NaN` when fewer than 2 pairs
/// exist or either member has zero variance.
fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }
    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        cov / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{self, FilterSpec};
    use crate::data::model::{CellValue, ReviewRecord, SchemaMap};
    use std::collections::BTreeMap;

    fn record(year: i32, country: &str, metrics: &[(&str, Option<f64>)]) -> ReviewRecord {
        let fields: BTreeMap<String, CellValue> = metrics
            .iter()
            .map(|(name, v)| {
                let cell = match v {
                    Some(v) => CellValue::Float(*v),
                    None => CellValue::Null,
                };
                (name.to_string(), cell)
            })
            .collect();
        ReviewRecord {
            year,
            country: country.to_string(),
            fields,
        }
    }

    fn table_with(records: Vec<ReviewRecord>, metrics: &[&str]) -> ReviewTable {
        let schema = SchemaMap {
            metric_columns: metrics.iter().map(|m| m.to_string()).collect(),
            ..SchemaMap::default()
        };
        ReviewTable::from_records(records, schema)
    }

    fn full_view(table: &ReviewTable) -> (FilterSpec, FilteredView) {
        let spec = FilterSpec::select_all(table);
        let view = filter::apply(table, &spec);
        (spec, view)
    }

    #[test]
    fn yearly_means_end_to_end() {
        let table = table_with(
            vec![
                record(2010, "USA", &[("Overall Rating", Some(4.0))]),
                record(2010, "USA", &[("Overall Rating", Some(2.0))]),
                record(2011, "India", &[("Overall Rating", Some(5.0))]),
            ],
            &["Overall Rating"],
        );
        let (spec, view) = full_view(&table);
        let means = yearly_means(&table, &view, &spec);

        assert_eq!(means.metrics, vec!["Overall Rating"]);
        assert_eq!(
            means.rows,
            vec![(2010, vec![Some(3.00)]), (2011, vec![Some(5.00)])]
        );
    }

    #[test]
    fn missing_values_are_excluded_not_zero() {
        let table = table_with(
            vec![
                record(2010, "USA", &[("Overall Rating", Some(4.0))]),
                record(2010, "USA", &[("Overall Rating", None)]),
            ],
            &["Overall Rating"],
        );
        let (spec, view) = full_view(&table);
        let means = yearly_means(&table, &view, &spec);
        assert_eq!(means.rows, vec![(2010, vec![Some(4.0)])]);
    }

    #[test]
    fn all_missing_group_has_no_value() {
        let table = table_with(
            vec![record(2010, "USA", &[("Overall Rating", None)])],
            &["Overall Rating"],
        );
        let (spec, view) = full_view(&table);
        let means = yearly_means(&table, &view, &spec);
        assert_eq!(means.rows, vec![(2010, vec![None])]);
    }

    #[test]
    fn rounding_is_idempotent() {
        let v = round2(1.0 / 3.0);
        assert_eq!(v, round2(v));
        assert_eq!(v, 0.33);
    }

    #[test]
    fn year_country_means_split_groups() {
        let table = table_with(
            vec![
                record(2010, "USA", &[("Overall Rating", Some(4.0))]),
                record(2010, "India", &[("Overall Rating", Some(2.0))]),
            ],
            &["Overall Rating"],
        );
        let (spec, view) = full_view(&table);
        let means = yearly_country_means(&table, &view, &spec);
        assert_eq!(
            means.rows,
            vec![
                ((2010, "India".to_string()), vec![Some(2.0)]),
                ((2010, "USA".to_string()), vec![Some(4.0)]),
            ]
        );
    }

    #[test]
    fn zero_selected_metrics_is_not_an_error() {
        let table = table_with(
            vec![record(2010, "USA", &[("Overall Rating", Some(4.0))])],
            &["Overall Rating"],
        );
        let mut spec = FilterSpec::select_all(&table);
        spec.metrics.clear();
        let view = filter::apply(&table, &spec);

        let means = yearly_means(&table, &view, &spec);
        assert!(means.metrics.is_empty());
        assert_eq!(means.rows, vec![(2010, vec![])]);

        let corr = correlation_matrix(&table, &view, &spec);
        assert!(corr.is_empty());
    }

    #[test]
    fn empty_view_yields_empty_aggregates() {
        let table = table_with(
            vec![record(2010, "USA", &[("Overall Rating", Some(4.0))])],
            &["Overall Rating"],
        );
        let mut spec = FilterSpec::select_all(&table);
        spec.countries.clear();
        let view = filter::apply(&table, &spec);

        assert!(yearly_means(&table, &view, &spec).is_empty());
        assert!(yearly_country_means(&table, &view, &spec).is_empty());
        let corr = correlation_matrix(&table, &view, &spec);
        assert!(corr.get(0, 0).is_nan());
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let table = table_with(
            vec![
                record(2010, "USA", &[("A", Some(1.0)), ("B", Some(5.0))]),
                record(2011, "USA", &[("A", Some(2.0)), ("B", Some(4.0))]),
                record(2012, "USA", &[("A", Some(3.0)), ("B", Some(2.0))]),
            ],
            &["A", "B"],
        );
        let (spec, view) = full_view(&table);
        let corr = correlation_matrix(&table, &view, &spec);

        assert_eq!(corr.get(0, 1), corr.get(1, 0));
        assert_eq!(corr.get(0, 0), 1.0);
        assert_eq!(corr.get(1, 1), 1.0);
        assert!(corr.get(0, 1) < 0.0); // A rises while B falls
    }

    #[test]
    fn perfectly_correlated_metrics() {
        let table = table_with(
            vec![
                record(2010, "USA", &[("A", Some(1.0)), ("B", Some(2.0))]),
                record(2011, "USA", &[("A", Some(2.0)), ("B", Some(4.0))]),
                record(2012, "USA", &[("A", Some(3.0)), ("B", Some(6.0))]),
            ],
            &["A", "B"],
        );
        let (spec, view) = full_view(&table);
        let corr = correlation_matrix(&table, &view, &spec);
        assert!((corr.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pairwise_complete_policy_ignores_partial_rows() {
        // Third row has B missing: the (A, B) coefficient must use only the
        // first two rows.
        let table = table_with(
            vec![
                record(2010, "USA", &[("A", Some(1.0)), ("B", Some(2.0))]),
                record(2011, "USA", &[("A", Some(2.0)), ("B", Some(4.0))]),
                record(2012, "USA", &[("A", Some(9.0)), ("B", None)]),
            ],
            &["A", "B"],
        );
        let (spec, view) = full_view(&table);
        let corr = correlation_matrix(&table, &view, &spec);
        assert!((corr.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn undefined_coefficient_is_nan_not_zero() {
        // Only one complete (A, B) pair → undefined.
        let table = table_with(
            vec![
                record(2010, "USA", &[("A", Some(1.0)), ("B", Some(2.0))]),
                record(2011, "USA", &[("A", Some(2.0)), ("B", None)]),
            ],
            &["A", "B"],
        );
        let (spec, view) = full_view(&table);
        let corr = correlation_matrix(&table, &view, &spec);
        assert!(corr.get(0, 1).is_nan());
        // Diagonal stays 1.0: both metrics have non-missing values.
        assert_eq!(corr.get(0, 0), 1.0);
        assert_eq!(corr.get(1, 1), 1.0);
    }

    #[test]
    fn zero_variance_pair_is_undefined() {
        let table = table_with(
            vec![
                record(2010, "USA", &[("A", Some(3.0)), ("B", Some(1.0))]),
                record(2011, "USA", &[("A", Some(3.0)), ("B", Some(2.0))]),
            ],
            &["A", "B"],
        );
        let (spec, view) = full_view(&table);
        let corr = correlation_matrix(&table, &view, &spec);
        assert!(corr.get(0, 1).is_nan());
    }
}
