// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex, mpsc},
    thread,
    time::Duration,
};

use eframe::egui;

use crate::{
    actions::SystemClipboard,
    bridge::{Bridge, NullBridge, SystemBridge},
    config::{consts::WINDOW_TITLE, options::AppOptions, state::AppState},
    runner::{self, BootOutcome},
    sheet::XlsxDecoder,
};

use super::progress::GuiProgress;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let app_options = AppOptions::from_env();
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::new(app_options))))),
    )?;
    Ok(())
}

type BootMsg = (Box<dyn Bridge>, BootOutcome);

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // status text while the boot worker runs (worker writes here)
    pub status: Arc<Mutex<String>>,
    pub boot_rx: Option<mpsc::Receiver<BootMsg>>,

    // host bridge; handed back by the boot worker once init has settled
    pub bridge: Box<dyn Bridge>,
    pub clipboard: SystemClipboard,

    // alert queue, front is shown
    pub notices: Vec<String>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let status = Arc::new(Mutex::new(state.message.clone()));
        let boot_rx = Some(spawn_boot(&state.options, status.clone()));

        Self {
            state,
            status,
            boot_rx,
            bridge: Box::new(NullBridge),
            clipboard: SystemClipboard::new(),
            notices: Vec::new(),
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    #[inline]
    pub fn is_loading(&self) -> bool { self.boot_rx.is_some() }

    pub fn push_notices(&mut self, msgs: Vec<String>) {
        self.notices.extend(msgs);
    }

    /// Pick up the boot result once the worker is done.
    fn poll_boot(&mut self) {
        let Some(rx) = &self.boot_rx else { return };
        match rx.try_recv() {
            Ok((bridge, outcome)) => {
                self.bridge = bridge;
                runner::apply(&mut self.state, outcome.rows);
                self.status(self.state.message.clone());
                self.boot_rx = None;
                logf!("Init: bridge_ready={}, cards={}", outcome.bridge_ready, self.state.cards.len());
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                loge!("Init: boot worker vanished");
                self.boot_rx = None;
            }
        }
    }
}

/// Bridge init then load, off the UI thread.
fn spawn_boot(options: &AppOptions, status: Arc<Mutex<String>>) -> mpsc::Receiver<BootMsg> {
    let (tx, rx) = mpsc::channel();
    let options = options.clone();

    thread::spawn(move || {
        let mut bridge: Box<dyn Bridge> = Box::new(SystemBridge::new());
        let mut prog = GuiProgress::new(status);
        let outcome = runner::boot(&options, bridge.as_mut(), &XlsxDecoder, Some(&mut prog));
        let _ = tx.send((bridge, outcome));
    });

    rx
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_boot();
        if self.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("filters").show(ctx, |ui| {
            super::components::filter_bar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            super::components::message::draw(ui, self);
            super::components::card_list::draw(ui, self);
        });

        super::components::notice::draw(ctx, self);
    }
}
