use std::collections::BTreeSet;

use crate::color::SeriesColors;
use crate::data::filter::{self, FilterSpec, FilteredView};
use crate::data::model::ReviewTable;

// ---------------------------------------------------------------------------
// View tabs
// ---------------------------------------------------------------------------

/// The analysis views, one per dashboard tab with computational content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTab {
    YearlyAverages,
    Correlation,
    CountryTrends,
    MultiTrends,
    WordFrequencies,
    Categorical,
}

impl ViewTab {
    pub const ALL: [ViewTab; 6] = [
        ViewTab::YearlyAverages,
        ViewTab::Correlation,
        ViewTab::CountryTrends,
        ViewTab::MultiTrends,
        ViewTab::WordFrequencies,
        ViewTab::Categorical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ViewTab::YearlyAverages => "Yearly Averages",
            ViewTab::Correlation => "Correlation",
            ViewTab::CountryTrends => "Country Trends",
            ViewTab::MultiTrends => "Multivariable Trends",
            ViewTab::WordFrequencies => "Word Frequencies",
            ViewTab::Categorical => "Categorical Insights",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  The loaded table is
/// read-only for the rest of the session; every filter change rebuilds the
/// cached view, and the analysis views recompute from it.
pub struct AppState {
    /// Loaded table (None until the user opens a file).
    pub table: Option<ReviewTable>,

    /// Current filter selections (year range, countries, metrics).
    pub spec: FilterSpec,

    /// Indices of records passing the current filter (cached).
    pub view: FilteredView,

    /// Which analysis view is shown in the central panel.
    pub active_tab: ViewTab,

    /// Metric shown in the country-trend view.
    pub trend_metric: Option<String>,

    /// (country, text column) driving the word-frequency view.
    pub corpus_country: Option<String>,
    pub corpus_column: Option<String>,

    /// Nominal column shown in the categorical view.
    pub categorical_column: Option<String>,

    /// Stable per-country / per-metric series colours.
    pub country_colors: SeriesColors,
    pub metric_colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            spec: FilterSpec::default(),
            view: FilteredView::default(),
            active_tab: ViewTab::YearlyAverages,
            trend_metric: None,
            corpus_country: None,
            corpus_column: None,
            categorical_column: None,
            country_colors: SeriesColors::default(),
            metric_colors: SeriesColors::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table, select everything, and pick default
    /// view selectors from the schema.
    pub fn set_table(&mut self, table: ReviewTable) {
        self.spec = FilterSpec::select_all(&table);
        self.view = filter::apply(&table, &self.spec);

        self.trend_metric = table.schema.metric_columns.first().cloned();
        self.corpus_country = table.countries.iter().next().cloned();
        self.corpus_column = table.schema.text_columns.first().cloned();
        self.categorical_column = table.schema.categorical_columns.first().cloned();

        self.country_colors = SeriesColors::new(&table.countries);
        let metric_set: BTreeSet<String> =
            table.schema.metric_columns.iter().cloned().collect();
        self.metric_colors = SeriesColors::new(&metric_set);

        self.table = Some(table);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute the cached view after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.spec.clamp_years(table);
            self.view = filter::apply(table, &self.spec);
        }
    }

    /// Toggle one country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.spec.countries.remove(country) {
            self.spec.countries.insert(country.to_string());
        }
        self.refilter();
    }

    /// Toggle one metric in the selection.
    pub fn toggle_metric(&mut self, metric: &str) {
        if !self.spec.metrics.remove(metric) {
            self.spec.metrics.insert(metric.to_string());
        }
        self.refilter();
    }

    /// Select all or no countries.
    pub fn select_countries(&mut self, all: bool) {
        if let Some(table) = &self.table {
            self.spec.countries = if all {
                table.countries.clone()
            } else {
                BTreeSet::new()
            };
        }
        self.refilter();
    }

    /// Select all or no metrics.
    pub fn select_metrics(&mut self, all: bool) {
        if let Some(table) = &self.table {
            self.spec.metrics = if all {
                table.schema.metric_columns.iter().cloned().collect()
            } else {
                BTreeSet::new()
            };
        }
        self.refilter();
    }
}
