// src/gui/components/filter_bar.rs
//
// Exclusive category selection: "all" plus every category the sheet
// carries. Selecting only changes which cards are visible; nothing is
// re-fetched.

use eframe::egui;
use crate::filter::CategoryFilter;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let mut options = Vec::with_capacity(app.state.categories.len() + 1);
        options.push(CategoryFilter::All);
        options.extend(app.state.categories.iter().cloned().map(CategoryFilter::Only));

        let enabled = !app.is_loading();
        let mut picked: Option<CategoryFilter> = None;
        for opt in &options {
            let selected = *opt == app.state.filter;
            let resp = ui.add_enabled_ui(enabled, |ui| ui.selectable_label(selected, opt.label())).inner;
            if resp.clicked() && !selected {
                picked = Some(opt.clone());
            }
        }

        if let Some(f) = picked {
            logf!("UI: Filter {} → {}", app.state.filter, f);
            app.state.set_filter(f);
        }
    });
}
