// src/gui/components/message.rs
use eframe::egui::{self, widgets::Spinner};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let text = if app.is_loading() { app.status_text() } else { app.state.message.clone() };
    if text.is_empty() && !app.is_loading() {
        return;
    }

    ui.horizontal(|ui| {
        if app.is_loading() {
            ui.add(Spinner::new().size(16.0));
        }
        ui.label(text);
    });
    ui.separator();
}
