/// Analysis layer: pure derived views over a filtered record set.
///
/// Every function here is a deterministic, side-effect-free transformation
/// of `(table, view)`; results are recomputed whenever the filter changes,
/// never patched incrementally.
///
/// * [`aggregate`] – grouped means (year, year×country) and the
///   pairwise-complete correlation matrix,
/// * [`categorical`] – count/percentage distributions for nominal fields,
/// * [`text`] – corpus concatenation and word-frequency extraction.

pub mod aggregate;
pub mod categorical;
pub mod text;
