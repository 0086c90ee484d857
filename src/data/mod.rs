/// Data layer: core types, loading, schema normalization, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (untyped rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  trim headers, resolve Country/Year, map column roles
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ReviewTable  │  Vec<ReviewRecord>, SchemaMap, dimension indices
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSpec → FilteredView (indices)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
