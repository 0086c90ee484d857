use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a review column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for metric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Coerce any non-null value to its string form (text corpora accept
    /// whatever the source file stored in a text column).
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

// ---------------------------------------------------------------------------
// RawTable – loader output, before schema normalization
// ---------------------------------------------------------------------------

/// A freshly-loaded table: header names in file order plus untyped rows.
/// Column names may still carry stray whitespace and the country column may
/// still be called "Location".  [`crate::data::schema::normalize`] turns
/// this into a [`ReviewTable`].
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names in the order they appear in the source file.
    pub columns: Vec<String>,
    /// One map per row: column_name → value.
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

// ---------------------------------------------------------------------------
// SchemaMap – validated column roles, resolved once at load time
// ---------------------------------------------------------------------------

/// Column-role mapping produced by schema normalization.  All later stages
/// consult this instead of re-matching column names per view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaMap {
    /// Numeric rating columns, excluding the identifier and year columns.
    pub metric_columns: Vec<String>,
    /// Nominal columns summarized by count/percentage (includes booleans).
    pub categorical_columns: Vec<String>,
    /// Free-text columns eligible for corpus building.
    pub text_columns: Vec<String>,
}

// ---------------------------------------------------------------------------
// ReviewRecord – one row of the normalized table
// ---------------------------------------------------------------------------

/// A single employee review.  `year` and `country` are guaranteed present;
/// rows without them are excluded during normalization because they cannot
/// participate in any aggregation.
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub year: i32,
    pub country: String,
    /// All remaining columns: metrics, categoricals, text, identifiers.
    pub fields: BTreeMap<String, CellValue>,
}

impl ReviewRecord {
    /// Numeric value of a metric column, `None` when missing or non-numeric.
    /// A missing metric is excluded from that metric's mean, never zero.
    pub fn metric(&self, column: &str) -> Option<f64> {
        self.fields.get(column).and_then(CellValue::as_f64)
    }

    /// Text value of a column, coercing non-string cells to their string
    /// form.  `None` when the cell is missing.
    pub fn text(&self, column: &str) -> Option<String> {
        self.fields.get(column).and_then(CellValue::as_text)
    }
}

// ---------------------------------------------------------------------------
// ReviewTable – the complete normalized dataset
// ---------------------------------------------------------------------------

/// The full normalized table with pre-computed dimension indices.  Loaded
/// once per session and treated as read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReviewTable {
    /// All review records (rows).
    pub records: Vec<ReviewRecord>,
    /// Validated column roles.
    pub schema: SchemaMap,
    /// Sorted set of countries present in the table.
    pub countries: BTreeSet<String>,
    /// Observed year range (inclusive).  Zeroed for an empty table.
    pub year_min: i32,
    pub year_max: i32,
}

impl ReviewTable {
    /// Build dimension indices from normalized records.
    pub fn from_records(records: Vec<ReviewRecord>, schema: SchemaMap) -> Self {
        let countries: BTreeSet<String> =
            records.iter().map(|r| r.country.clone()).collect();
        let year_min = records.iter().map(|r| r.year).min().unwrap_or(0);
        let year_max = records.iter().map(|r| r.year).max().unwrap_or(0);

        ReviewTable {
            records,
            schema,
            countries,
            year_min,
            year_max,
        }
    }

    /// Number of reviews.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
