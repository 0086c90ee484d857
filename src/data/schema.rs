use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use super::model::{CellValue, RawTable, ReviewRecord, ReviewTable, SchemaMap};

// ---------------------------------------------------------------------------
// Schema normalization: raw table → validated ReviewTable
// ---------------------------------------------------------------------------

pub const COUNTRY_COLUMN: &str = "Country";
pub const LOCATION_COLUMN: &str = "Location";
pub const YEAR_COLUMN: &str = "Year";

/// Identifier columns are excluded from the metric set.
const ID_COLUMNS: &[&str] = &["id", "id number"];

/// A string column with at most this many distinct non-null values is
/// treated as categorical (yes/no/maybe, positive/negative/neutral, …).
const CATEGORICAL_MAX_CARDINALITY: usize = 10;

/// Free-text columns are recognized by name, matching the review exports
/// this tool targets (pros / cons / advice to management / comment).
const TEXT_COLUMN_HINTS: &[&str] = &["pros", "cons", "advice", "comment"];

/// Fatal schema problems.  The pipeline cannot proceed without its
/// dimensional columns, so these abort session setup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("neither 'Country' nor 'Location' column found in dataset")]
    MissingCountryColumn,
    #[error("required 'Year' column not found in dataset")]
    MissingYearColumn,
}

/// Normalize a raw table into a [`ReviewTable`]:
///
/// * strip stray whitespace from column names,
/// * rename `Location` to `Country` when no `Country` column exists,
/// * fail when the country or year dimension is missing entirely,
/// * drop rows whose year or country is null (they cannot participate in
///   any aggregation),
/// * resolve column roles (metric / categorical / text) once, so later
///   stages never repeat name heuristics per view.
pub fn normalize(raw: RawTable) -> Result<ReviewTable, SchemaError> {
    // ---- Column names: trim hidden whitespace ----
    let columns: Vec<String> = raw.columns.iter().map(|c| c.trim().to_string()).collect();
    let rows: Vec<BTreeMap<String, CellValue>> = raw
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(k, v)| (k.trim().to_string(), v))
                .collect()
        })
        .collect();

    // ---- Country dimension: accept "Location" as an alias ----
    let has_country = columns.iter().any(|c| c == COUNTRY_COLUMN);
    let has_location = columns.iter().any(|c| c == LOCATION_COLUMN);
    let country_source = if has_country {
        COUNTRY_COLUMN
    } else if has_location {
        log::info!("No 'Country' column; using 'Location' instead");
        LOCATION_COLUMN
    } else {
        return Err(SchemaError::MissingCountryColumn);
    };

    if !columns.iter().any(|c| c == YEAR_COLUMN) {
        return Err(SchemaError::MissingYearColumn);
    }

    // ---- Build records, excluding rows without year or country ----
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for mut row in rows {
        let year = row
            .get(YEAR_COLUMN)
            .and_then(CellValue::as_f64)
            .map(|y| y as i32);
        let country = row
            .get(country_source)
            .and_then(CellValue::as_text)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let (Some(year), Some(country)) = (year, country) else {
            skipped += 1;
            continue;
        };

        row.remove(YEAR_COLUMN);
        row.remove(country_source);
        records.push(ReviewRecord {
            year,
            country,
            fields: row,
        });
    }

    if skipped > 0 {
        log::warn!("Excluded {skipped} rows with missing year or country");
    }

    let schema = classify_columns(&columns, &records, country_source);
    log::info!(
        "Schema resolved: {} metrics, {} categorical, {} text columns",
        schema.metric_columns.len(),
        schema.categorical_columns.len(),
        schema.text_columns.len()
    );

    Ok(ReviewTable::from_records(records, schema))
}

/// Resolve column roles from the observed cell types, preserving the file's
/// column order.
fn classify_columns(
    columns: &[String],
    records: &[ReviewRecord],
    country_source: &str,
) -> SchemaMap {
    let mut schema = SchemaMap::default();

    for col in columns {
        if col == YEAR_COLUMN || col == country_source || is_identifier(col) {
            continue;
        }

        let non_null: Vec<&CellValue> = records
            .iter()
            .filter_map(|r| r.fields.get(col))
            .filter(|v| !v.is_null())
            .collect();
        if non_null.is_empty() {
            continue;
        }

        if non_null.iter().all(|v| v.is_numeric()) {
            schema.metric_columns.push(col.clone());
        } else if non_null.iter().all(|v| matches!(v, CellValue::Bool(_))) {
            schema.categorical_columns.push(col.clone());
        } else if is_text_column(col) {
            schema.text_columns.push(col.clone());
        } else {
            let distinct: HashSet<String> =
                non_null.iter().map(|v| v.to_string()).collect();
            if distinct.len() <= CATEGORICAL_MAX_CARDINALITY
                && distinct.len() < non_null.len()
            {
                schema.categorical_columns.push(col.clone());
            }
            // Strings without repeats or a text hint (dates, URLs, job
            // titles) get no role and stay out of every selector.
        }
    }

    schema
}

fn is_identifier(column: &str) -> bool {
    let lower = column.to_lowercase();
    ID_COLUMNS.iter().any(|id| lower == *id)
}

fn is_text_column(column: &str) -> bool {
    let lower = column.to_lowercase();
    TEXT_COLUMN_HINTS.iter().any(|hint| lower.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    fn row(pairs: &[(&str, CellValue)]) -> BTreeMap<String, CellValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn raw(columns: &[&str], rows: Vec<BTreeMap<String, CellValue>>) -> RawTable {
        RawTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn renames_location_to_country() {
        let table = normalize(raw(
            &["Year", "Location"],
            vec![row(&[
                ("Year", CellValue::Integer(2010)),
                ("Location", cell("USA")),
            ])],
        ))
        .unwrap();
        assert_eq!(table.records[0].country, "USA");
    }

    #[test]
    fn trims_column_whitespace() {
        let table = normalize(raw(
            &["Year ", " Country"],
            vec![row(&[
                ("Year ", CellValue::Integer(2012)),
                (" Country", cell("India")),
            ])],
        ))
        .unwrap();
        assert_eq!(table.records[0].year, 2012);
        assert_eq!(table.records[0].country, "India");
    }

    #[test]
    fn missing_country_and_location_is_fatal() {
        let err = normalize(raw(&["Year"], vec![])).unwrap_err();
        assert_eq!(err, SchemaError::MissingCountryColumn);
    }

    #[test]
    fn missing_year_is_fatal() {
        let err = normalize(raw(&["Country"], vec![])).unwrap_err();
        assert_eq!(err, SchemaError::MissingYearColumn);
    }

    #[test]
    fn excludes_rows_without_dimensions() {
        let table = normalize(raw(
            &["Year", "Country"],
            vec![
                row(&[("Year", CellValue::Integer(2010)), ("Country", cell("USA"))]),
                row(&[("Year", CellValue::Null), ("Country", cell("USA"))]),
                row(&[("Year", CellValue::Integer(2011)), ("Country", CellValue::Null)]),
            ],
        ))
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn classifies_column_roles() {
        let rows = vec![
            row(&[
                ("Year", CellValue::Integer(2010)),
                ("Country", cell("USA")),
                ("ID number", CellValue::Integer(1)),
                ("Overall Rating", CellValue::Integer(4)),
                ("Recommended", cell("yes")),
                ("Current employee", CellValue::Bool(true)),
                ("pros", cell("great pay and benefits")),
                ("review_url", cell("https://example.com/r/1")),
            ]),
            row(&[
                ("Year", CellValue::Integer(2011)),
                ("Country", cell("India")),
                ("ID number", CellValue::Integer(2)),
                ("Overall Rating", CellValue::Float(3.0)),
                ("Recommended", cell("no")),
                ("Current employee", CellValue::Bool(false)),
                ("pros", cell("good team, flexible hours")),
                ("review_url", cell("https://example.com/r/2")),
            ]),
            row(&[
                ("Year", CellValue::Integer(2012)),
                ("Country", cell("USA")),
                ("ID number", CellValue::Integer(3)),
                ("Overall Rating", CellValue::Integer(5)),
                ("Recommended", cell("yes")),
                ("Current employee", CellValue::Bool(true)),
                ("pros", cell("strong compensation")),
                ("review_url", cell("https://example.com/r/3")),
            ]),
        ];
        let table = normalize(raw(
            &[
                "Year",
                "Country",
                "ID number",
                "Overall Rating",
                "Recommended",
                "Current employee",
                "pros",
                "review_url",
            ],
            rows,
        ))
        .unwrap();

        assert_eq!(table.schema.metric_columns, vec!["Overall Rating"]);
        assert_eq!(
            table.schema.categorical_columns,
            vec!["Recommended", "Current employee"]
        );
        assert_eq!(table.schema.text_columns, vec!["pros"]);
    }

    #[test]
    fn identifier_is_not_a_metric() {
        let table = normalize(raw(
            &["Year", "Country", "ID number"],
            vec![row(&[
                ("Year", CellValue::Integer(2010)),
                ("Country", cell("USA")),
                ("ID number", CellValue::Integer(42)),
            ])],
        ))
        .unwrap();
        assert!(table.schema.metric_columns.is_empty());
    }
}
