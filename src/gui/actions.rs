// src/gui/actions.rs
//
// Card button glue: run the shared dispatcher with GUI-side navigator and
// collect its notifications into the app's alert queue.

use eframe::egui;

use crate::actions::{self, ActionOutcome, NoticeLog, Navigator};
use crate::error::NavigateError;
use crate::gui::app::App;

/// Direct navigation through egui's platform output.
struct GuiNavigator<'a> {
    ctx: &'a egui::Context,
}

impl Navigator for GuiNavigator<'_> {
    fn navigate(&mut self, uri: &str) -> Result<(), NavigateError> {
        self.ctx.open_url(egui::OpenUrl::same_tab(uri));
        Ok(())
    }
}

pub fn dial(app: &mut App, ctx: &egui::Context, code: &str) -> ActionOutcome {
    let mut nav = GuiNavigator { ctx };
    let mut notes = NoticeLog::default();
    let outcome = actions::dial(code, app.bridge.as_ref(), &mut nav, &mut notes);
    app.push_notices(notes.messages);
    outcome
}

pub fn copy(app: &mut App, code: &str) -> ActionOutcome {
    let mut notes = NoticeLog::default();
    let outcome = actions::copy(code, &mut app.clipboard, &mut notes);
    app.push_notices(notes.messages);
    outcome
}
