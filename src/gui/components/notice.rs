// src/gui/components/notice.rs
//
// Alert box: one notice at a time, dismissed with OK.

use eframe::egui;
use crate::gui::app::App;

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let Some(msg) = app.notices.first().cloned() else { return };

    let mut dismissed = false;
    egui::Window::new("notice")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(msg);
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        app.notices.remove(0);
    }
}
