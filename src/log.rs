// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::config::consts::{ENV_LOG, LOG_FILE};

static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();
static TARGET: OnceLock<Option<PathBuf>> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

/// Resolved once per process. `None` means logging is off.
fn target() -> Option<&'static PathBuf> {
    TARGET
        .get_or_init(|| match std::env::var(ENV_LOG) {
            Ok(v) if v.trim().is_empty() => None,
            Ok(v) => Some(PathBuf::from(v.trim())),
            Err(_) => Some(PathBuf::from(LOG_FILE)),
        })
        .as_ref()
}

pub(crate) fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    format!("{h:02}:{m:02}:{s:02}.{:03}", total_ms % 1_000)
}

/// Append one `[elapsed][LEVEL] msg` line. Never fails the caller: a log
/// that can't be written is simply skipped.
pub fn write_log(level: &str, msg: &str) {
    let Some(path) = target() else { return };
    let line = format!("[{}][{level}] {msg}\n", fmt_elapsed(start().elapsed().as_millis()));

    let Ok(_guard) = LOG_LOCK.lock() else { return };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(line.as_bytes());
    }
}

#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => { $crate::log::write_log("INFO", &format!($($arg)*)) };
}

#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => { $crate::log::write_log("DEBUG", &format!($($arg)*)) };
}

/// Swallowed failures (bridge init, clipboard, ...).
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => { $crate::log::write_log("WARN", &format!($($arg)*)) };
}

#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => { $crate::log::write_log("ERROR", &format!($($arg)*)) };
}
