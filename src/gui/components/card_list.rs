// src/gui/components/card_list.rs
//
// Draws the visible cards. Text goes through egui labels, so sheet content
// is never interpreted as markup. Button clicks are collected first and
// dispatched after the loop ends the borrow on `app.state`.

use eframe::egui::{self, Color32, RichText};
use crate::card::Card;
use crate::config::consts::{LABEL_CALL, LABEL_COPY};
use crate::gui::{actions, app::App};

const RIBBON: Color32 = Color32::from_rgb(6, 199, 85);

enum Click {
    Dial(String),
    Copy(String),
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut clicks: Vec<Click> = Vec::new();

    egui::ScrollArea::vertical()
        .id_salt("cards_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for ix in app.state.visible_indices() {
                let card = &app.state.cards[ix];
                ui.push_id(ix, |ui| {
                    if let Some(c) = draw_card(ui, card) {
                        clicks.push(c);
                    }
                });
                ui.add_space(8.0);
            }
        });

    let ctx = ui.ctx().clone();
    for click in clicks {
        match click {
            Click::Dial(code) => { actions::dial(app, &ctx, &code); }
            Click::Copy(code) => { actions::copy(app, &code); }
        }
    }
}

fn draw_card(ui: &mut egui::Ui, card: &Card) -> Option<Click> {
    let mut click = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.label(RichText::new(&card.title).strong().size(18.0).color(RIBBON));

        ui.horizontal(|ui| {
            if !card.speed.is_empty() {
                ui.label(RichText::new(&card.speed).size(22.0).strong());
                ui.separator();
            }
            ui.vertical(|ui| {
                for line in [&card.promo_type, &card.price_duration, &card.bonus] {
                    if !line.is_empty() {
                        ui.label(line.as_str());
                    }
                }
            });
        });

        ui.horizontal(|ui| {
            if ui.button(LABEL_CALL).clicked() {
                click = Some(Click::Dial(card.code.clone()));
            }
            if ui.button(LABEL_COPY).clicked() {
                click = Some(Click::Copy(card.code.clone()));
            }
        });
    });

    click
}
