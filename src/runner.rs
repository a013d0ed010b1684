// src/runner.rs
use crate::{
    bridge::{self, Bridge},
    config::{consts::MSG_LOADING, options::AppOptions, state::AppState},
    error::LoadError,
    loader,
    progress::Progress,
    sheet::{RowRecord, SheetDecoder},
};

/// What the boot pipeline produced. The bridge outcome is informational;
/// only the load result decides what the page shows.
#[derive(Debug)]
pub struct BootOutcome {
    pub bridge_ready: bool,
    pub rows: Result<Vec<RowRecord>, LoadError>,
}

/// Initialize the bridge (best effort), then load. Strictly in that order:
/// the load never starts before the init has settled.
pub fn boot(
    opts: &AppOptions,
    bridge: &mut dyn Bridge,
    decoder: &dyn SheetDecoder,
    mut progress: Option<&mut dyn Progress>,
) -> BootOutcome {
    if let Some(p) = progress.as_deref_mut() {
        p.log(MSG_LOADING);
    }

    let bridge_ready = if opts.bridge.enabled {
        bridge::init_best_effort(bridge, &opts.bridge.app_id)
    } else {
        logd!("Bridge: disabled by options");
        false
    };

    let rows = loader::load_rows(&opts.load, decoder);
    if let Err(e) = &rows {
        loge!("Load: {}", e);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish(rows.is_ok());
    }

    BootOutcome { bridge_ready, rows }
}

/// Install a load result into the state: cards on success, an inert page
/// with the error in the message area on failure.
pub fn apply(state: &mut AppState, rows: Result<Vec<RowRecord>, LoadError>) {
    match rows {
        Ok(rows) => {
            state.install_rows(rows);
            logf!(
                "Render: {} card(s), {} categor(ies)",
                state.cards.len(),
                state.categories.len()
            );
        }
        Err(e) => state.install_error(&e),
    }
}

/// `boot` + `apply`, for callers that run everything on one thread.
pub fn run(
    state: &mut AppState,
    bridge: &mut dyn Bridge,
    decoder: &dyn SheetDecoder,
    progress: Option<&mut dyn Progress>,
) -> bool {
    let outcome = boot(&state.options, bridge, decoder, progress);
    apply(state, outcome.rows);
    outcome.bridge_ready
}
