use eframe::egui::{self, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use egui_extras::{Column, TableBuilder};

use crate::analysis::{aggregate, categorical, text};
use crate::color::diverging_color;
use crate::insights;
use crate::state::{AppState, ViewTab};

// ---------------------------------------------------------------------------
// Central panel – one renderer per analysis view
// ---------------------------------------------------------------------------

/// Render the central panel: view selector plus the active analysis view.
/// All aggregates are recomputed from the cached filtered view; nothing is
/// patched incrementally.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a review file to start exploring  (File → Open…)");
        });
        return;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for tab in ViewTab::ALL {
            if ui
                .selectable_label(state.active_tab == tab, tab.label())
                .clicked()
            {
                state.active_tab = tab;
            }
        }
    });
    ui.separator();

    match state.active_tab {
        ViewTab::YearlyAverages => yearly_averages(ui, state),
        ViewTab::Correlation => correlation_heatmap(ui, state),
        ViewTab::CountryTrends => country_trends(ui, state),
        ViewTab::MultiTrends => multi_trends(ui, state),
        ViewTab::WordFrequencies => word_frequencies(ui, state),
        ViewTab::Categorical => categorical_view(ui, state),
    }
}

fn no_data_label(ui: &mut Ui) {
    ui.label(RichText::new("No reviews match the current filters.").weak());
}

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(v) => format!("{v:.2}"),
        None => "–".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Yearly averages table
// ---------------------------------------------------------------------------

fn yearly_averages(ui: &mut Ui, state: &AppState) {
    let table = state.table.as_ref().unwrap();
    ui.strong("Year-by-year average metrics");

    if state.view.is_empty() {
        no_data_label(ui);
        return;
    }

    let means = aggregate::yearly_means(table, &state.view, &state.spec);
    if means.metrics.is_empty() {
        ui.label(RichText::new("Select at least one rating metric.").weak());
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(60.0))
        .columns(Column::remainder(), means.metrics.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Year");
            });
            for metric in &means.metrics {
                header.col(|ui| {
                    ui.strong(metric);
                });
            }
        })
        .body(|mut body| {
            for (year, row) in &means.rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(year.to_string());
                    });
                    for mean in row {
                        table_row.col(|ui| {
                            ui.label(format_mean(*mean));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn correlation_heatmap(ui: &mut Ui, state: &AppState) {
    let table = state.table.as_ref().unwrap();
    ui.strong("Correlation between rating metrics");

    if state.view.is_empty() {
        no_data_label(ui);
        return;
    }

    let corr = aggregate::correlation_matrix(table, &state.view, &state.spec);
    if corr.is_empty() {
        ui.label(RichText::new("Select at least one rating metric.").weak());
        return;
    }

    egui::Grid::new("correlation_grid")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for metric in &corr.metrics {
                ui.strong(metric.as_str());
            }
            ui.end_row();

            for (i, metric) in corr.metrics.iter().enumerate() {
                ui.strong(metric.as_str());
                for j in 0..corr.len() {
                    let r = corr.get(i, j);
                    // Undefined coefficients are rendered distinctly, never
                    // as zero.
                    let label = if r.is_nan() {
                        "n/a".to_string()
                    } else {
                        format!("{r:.2}")
                    };
                    ui.label(
                        RichText::new(label)
                            .background_color(diverging_color(r))
                            .monospace(),
                    );
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.label(
        RichText::new(
            "Coefficients use pairwise-complete records; n/a marks pairs with \
             insufficient data.",
        )
        .weak(),
    );
}

// ---------------------------------------------------------------------------
// Country-wise trends
// ---------------------------------------------------------------------------

fn country_trends(ui: &mut Ui, state: &mut AppState) {
    let table = state.table.as_ref().unwrap().clone();
    ui.strong("Trends over time by country");

    let metrics = state.spec.ordered_metrics(&table);
    if metrics.is_empty() {
        ui.label(RichText::new("Select at least one rating metric.").weak());
        return;
    }
    // Keep the selector valid under metric deselection.
    if !state
        .trend_metric
        .as_ref()
        .is_some_and(|m| metrics.contains(m))
    {
        state.trend_metric = metrics.first().cloned();
    }
    let current = state.trend_metric.clone().unwrap_or_default();

    egui::ComboBox::from_id_salt("trend_metric")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for metric in &metrics {
                if ui
                    .selectable_label(current == *metric, metric)
                    .clicked()
                {
                    state.trend_metric = Some(metric.clone());
                }
            }
        });

    if state.view.is_empty() {
        no_data_label(ui);
        return;
    }

    let means = aggregate::yearly_country_means(&table, &state.view, &state.spec);
    let Some(metric_idx) = means.metrics.iter().position(|m| *m == current) else {
        return;
    };

    Plot::new("country_trends")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(current.clone())
        .show(ui, |plot_ui| {
            for country in &state.spec.countries {
                let points: PlotPoints = means
                    .rows
                    .iter()
                    .filter(|((_, c), _)| c == country)
                    .filter_map(|((year, _), row)| {
                        row[metric_idx].map(|m| [*year as f64, m])
                    })
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(country)
                        .color(state.country_colors.color_for(country))
                        .width(2.0),
                );
            }
        });

    ui.add_space(4.0);
    ui.label(RichText::new(insights::metric_conclusion(&current)).weak());
}

// ---------------------------------------------------------------------------
// Multivariable trends
// ---------------------------------------------------------------------------

fn multi_trends(ui: &mut Ui, state: &AppState) {
    let table = state.table.as_ref().unwrap();
    ui.strong("Multivariable trends over time");

    if state.view.is_empty() {
        no_data_label(ui);
        return;
    }

    let means = aggregate::yearly_means(table, &state.view, &state.spec);
    if means.metrics.is_empty() {
        ui.label(RichText::new("Select at least one rating metric.").weak());
        return;
    }

    Plot::new("multi_trends")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Average rating")
        .show(ui, |plot_ui| {
            for (idx, metric) in means.metrics.iter().enumerate() {
                let points: PlotPoints = means
                    .rows
                    .iter()
                    .filter_map(|(year, row)| row[idx].map(|m| [*year as f64, m]))
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(metric)
                        .color(state.metric_colors.color_for(metric))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Word frequencies
// ---------------------------------------------------------------------------

const TOP_TOKENS: usize = 20;

fn word_frequencies(ui: &mut Ui, state: &mut AppState) {
    let table = state.table.as_ref().unwrap().clone();
    ui.strong("Most frequent words in written reviews");

    if table.schema.text_columns.is_empty() {
        ui.label(RichText::new("This dataset has no text columns.").weak());
        return;
    }

    let countries: Vec<String> = table.countries.iter().cloned().collect();
    let current_country = state.corpus_country.clone().unwrap_or_default();
    let current_column = state.corpus_column.clone().unwrap_or_default();

    ui.horizontal(|ui: &mut Ui| {
        egui::ComboBox::from_id_salt("corpus_country")
            .selected_text(&current_country)
            .show_ui(ui, |ui: &mut Ui| {
                for country in &countries {
                    if ui
                        .selectable_label(current_country == *country, country)
                        .clicked()
                    {
                        state.corpus_country = Some(country.clone());
                    }
                }
            });
        egui::ComboBox::from_id_salt("corpus_column")
            .selected_text(&current_column)
            .show_ui(ui, |ui: &mut Ui| {
                for column in &table.schema.text_columns {
                    if ui
                        .selectable_label(current_column == *column, column)
                        .clicked()
                    {
                        state.corpus_column = Some(column.clone());
                    }
                }
            });
    });

    // The corpus builder reports a blank corpus explicitly; branch on it
    // before attempting any rendering.
    let corpus = text::build_corpus(&table, &state.view, &current_country, &current_column);
    let Some(corpus) = corpus else {
        ui.add_space(8.0);
        ui.label(RichText::new("No text available for the selected filters.").weak());
        return;
    };

    let frequencies =
        text::extract_frequencies(&corpus, &text::default_stopwords(), text::MIN_TOKEN_LEN);
    let ranked = text::rank_frequencies(&frequencies, TOP_TOKENS);

    let bars: Vec<Bar> = ranked
        .iter()
        .enumerate()
        .map(|(i, (token, count))| {
            Bar::new(i as f64, *count as f64)
                .width(0.7)
                .name(format!("{token}: {count}"))
        })
        .collect();

    Plot::new("word_frequencies")
        .y_axis_label("Occurrences")
        .show_axes([false, true])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    ui.add_space(4.0);
    ui.label(
        RichText::new(insights::corpus_insight(&current_country, &current_column)).weak(),
    );
}

// ---------------------------------------------------------------------------
// Categorical insights
// ---------------------------------------------------------------------------

fn categorical_view(ui: &mut Ui, state: &mut AppState) {
    let table = state.table.as_ref().unwrap().clone();
    ui.strong("Categorical insights: employee sentiment");

    if table.schema.categorical_columns.is_empty() {
        ui.label(RichText::new("This dataset has no categorical columns.").weak());
        return;
    }

    let current = state.categorical_column.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("categorical_column")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for column in &table.schema.categorical_columns {
                if ui.selectable_label(current == *column, column).clicked() {
                    state.categorical_column = Some(column.clone());
                }
            }
        });

    let distribution = categorical::summarize(&table, &state.view, &current);
    if distribution.is_empty() {
        no_data_label(ui);
        return;
    }

    let bars: Vec<Bar> = distribution
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .width(0.6)
                .name(format!("{}: {} ({}%)", c.value, c.count, c.percentage))
        })
        .collect();
    Plot::new("categorical_bars")
        .y_axis_label("Number of reviews")
        .show_axes([false, true])
        .height(220.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    egui::Grid::new("categorical_table")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong(current.as_str());
            ui.strong("Count");
            ui.strong("Percentage");
            ui.end_row();
            for row in &distribution {
                ui.label(row.value.as_str());
                ui.label(row.count.to_string());
                ui.label(format!("{:.2}%", row.percentage));
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.strong("Share of reviews by country");
    egui::Grid::new("country_share")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Country");
            ui.strong("Reviews");
            ui.strong("Share");
            ui.end_row();
            for row in categorical::country_counts(&table, &state.view) {
                ui.label(row.value.as_str());
                ui.label(row.count.to_string());
                ui.label(format!("{:.2}%", row.percentage));
                ui.end_row();
            }
        });
}
