use serde::Serialize;

use crate::data::filter::FilteredView;
use crate::data::model::ReviewTable;

use super::aggregate::round2;

// ---------------------------------------------------------------------------
// Categorical distributions (count + percentage per nominal value)
// ---------------------------------------------------------------------------

/// One row of a categorical distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: u32,
    /// `100 × count / total non-missing count`, rounded to 2 decimals.
    pub percentage: f64,
}

/// Count/percentage distribution of a nominal field over the filtered view.
///
/// Missing values are ignored for both counts and the percentage base.
/// Rows are ordered by descending count; ties keep first-encountered order
/// (the sort is stable), so the result is deterministic.  An empty view
/// yields an empty list, not an error.
pub fn summarize(table: &ReviewTable, view: &FilteredView, field: &str) -> Vec<CategoryCount> {
    let values = view
        .indices
        .iter()
        .filter_map(|&idx| table.records[idx].text(field));
    distribution(values)
}

/// Review counts per country over the filtered view; same counting policy
/// as [`summarize`].  Drives the share-of-reviews view.
pub fn country_counts(table: &ReviewTable, view: &FilteredView) -> Vec<CategoryCount> {
    let values = view
        .indices
        .iter()
        .map(|&idx| table.records[idx].country.clone());
    distribution(values)
}

fn distribution(values: impl Iterator<Item = String>) -> Vec<CategoryCount> {
    // First-encountered order, preserved through the stable sort below.
    let mut counts: Vec<(String, u32)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    let total: u32 = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value,
            count,
            percentage: round2(100.0 * count as f64 / total as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{self, FilterSpec};
    use crate::data::model::{CellValue, ReviewRecord, SchemaMap};
    use std::collections::BTreeMap;

    fn record(country: &str, approval: Option<&str>) -> ReviewRecord {
        let mut fields = BTreeMap::new();
        fields.insert(
            "CEO Approval".to_string(),
            match approval {
                Some(v) => CellValue::String(v.to_string()),
                None => CellValue::Null,
            },
        );
        ReviewRecord {
            year: 2010,
            country: country.to_string(),
            fields,
        }
    }

    fn view_of(table: &ReviewTable) -> FilteredView {
        filter::apply(table, &FilterSpec::select_all(table))
    }

    #[test]
    fn counts_and_percentages() {
        let table = ReviewTable::from_records(
            vec![
                record("USA", Some("yes")),
                record("USA", Some("yes")),
                record("USA", Some("no")),
                record("USA", Some("may be")),
            ],
            SchemaMap::default(),
        );
        let view = view_of(&table);
        let dist = summarize(&table, &view, "CEO Approval");

        assert_eq!(dist.len(), 3);
        assert_eq!(dist[0].value, "yes");
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[0].percentage, 50.0);
        // Tied counts keep first-encountered order.
        assert_eq!(dist[1].value, "no");
        assert_eq!(dist[2].value, "may be");
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let table = ReviewTable::from_records(
            vec![
                record("USA", Some("yes")),
                record("USA", Some("yes")),
                record("USA", Some("no")),
            ],
            SchemaMap::default(),
        );
        let view = view_of(&table);
        let dist = summarize(&table, &view, "CEO Approval");
        let sum: f64 = dist.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() < 0.1);
    }

    #[test]
    fn missing_values_are_ignored() {
        let table = ReviewTable::from_records(
            vec![record("USA", Some("yes")), record("USA", None)],
            SchemaMap::default(),
        );
        let view = view_of(&table);
        let dist = summarize(&table, &view, "CEO Approval");
        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].percentage, 100.0);
    }

    #[test]
    fn empty_view_yields_empty_list() {
        let table = ReviewTable::from_records(
            vec![record("USA", Some("yes"))],
            SchemaMap::default(),
        );
        let mut spec = FilterSpec::select_all(&table);
        spec.countries.clear();
        let view = filter::apply(&table, &spec);
        assert!(summarize(&table, &view, "CEO Approval").is_empty());
    }

    #[test]
    fn unknown_field_yields_empty_list() {
        let table = ReviewTable::from_records(
            vec![record("USA", Some("yes"))],
            SchemaMap::default(),
        );
        let view = view_of(&table);
        assert!(summarize(&table, &view, "Business Outlook").is_empty());
    }

    #[test]
    fn country_share() {
        let table = ReviewTable::from_records(
            vec![
                record("USA", None),
                record("USA", None),
                record("India", None),
            ],
            SchemaMap::default(),
        );
        let view = view_of(&table);
        let shares = country_counts(&table, &view);
        assert_eq!(shares[0].value, "USA");
        assert_eq!(shares[0].percentage, 66.67);
        assert_eq!(shares[1].value, "India");
        assert_eq!(shares[1].percentage, 33.33);
    }
}
