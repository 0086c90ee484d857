use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: year range, country and metric selections.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let (year_lo, year_hi) = (table.year_min, table.year_max);
    let countries: Vec<String> = table.countries.iter().cloned().collect();
    let metrics: Vec<String> = table.schema.metric_columns.clone();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Year range");
            changed |= ui
                .add(egui::Slider::new(&mut state.spec.year_min, year_lo..=year_hi).text("From"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut state.spec.year_max, year_lo..=year_hi).text("To"))
                .changed();
            ui.separator();

            // ---- Countries ----
            let header = format!(
                "Countries  ({}/{})",
                state.spec.countries.len(),
                countries.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("countries")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_countries(true);
                        }
                        if ui.small_button("None").clicked() {
                            state.select_countries(false);
                        }
                    });
                    for country in &countries {
                        let mut checked = state.spec.countries.contains(country);
                        let text = RichText::new(country)
                            .color(state.country_colors.color_for(country));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_country(country);
                        }
                    }
                });

            // ---- Metrics ----
            let header = format!(
                "Rating metrics  ({}/{})",
                state.spec.metrics.len(),
                metrics.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("metrics")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_metrics(true);
                        }
                        if ui.small_button("None").clicked() {
                            state.select_metrics(false);
                        }
                    });
                    for metric in &metrics {
                        let mut checked = state.spec.metrics.contains(metric);
                        let text = RichText::new(metric)
                            .color(state.metric_colors.color_for(metric));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_metric(metric);
                        }
                    }
                });
        });

    // Recompute the cached view after any slider change.
    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} reviews loaded, {} in view",
                table.len(),
                state.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open review data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match load_table(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} reviews across {} countries, years {}–{}",
                    table.len(),
                    table.countries.len(),
                    table.year_min,
                    table.year_max
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

/// Load + normalize: fatal schema problems abort here and surface to the
/// status line, before any view is touched.
fn load_table(path: &std::path::Path) -> anyhow::Result<crate::data::model::ReviewTable> {
    let raw = crate::data::loader::load_file(path)?;
    let table = crate::data::schema::normalize(raw)?;
    Ok(table)
}
