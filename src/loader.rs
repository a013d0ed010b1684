// src/loader.rs
use std::thread;
use std::time::{Duration, Instant};

use crate::config::options::LoadOptions;
use crate::error::LoadError;
use crate::fetch;
use crate::sheet::{RowRecord, SheetDecoder};

/// Poll `decoder.is_ready()` every `interval` until `timeout` elapses.
pub fn wait_until_ready(
    decoder: &dyn SheetDecoder,
    timeout: Duration,
    interval: Duration,
) -> Result<(), LoadError> {
    let start = Instant::now();
    loop {
        if decoder.is_ready() {
            return Ok(());
        }
        let waited = start.elapsed();
        if waited >= timeout {
            return Err(LoadError::DependencyUnavailable { waited });
        }
        thread::sleep(interval.min(timeout - waited));
    }
}

/// Fetch the configured source and decode its first sheet.
/// Columns are not validated; normalization tolerates anything.
pub fn load_rows(opts: &LoadOptions, decoder: &dyn SheetDecoder) -> Result<Vec<RowRecord>, LoadError> {
    wait_until_ready(decoder, opts.decoder_wait, opts.decoder_poll)?;

    let bytes = fetch::fetch_bytes(&opts.source, opts.http_timeout)?;
    let rows = decoder.decode_first_sheet(&bytes)?;
    logf!("Load: {} → {} row(s)", opts.source, rows.len());
    Ok(rows)
}
