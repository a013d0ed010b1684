// src/config/options.rs
use std::time::Duration;

use super::consts::*;
use crate::fetch::Source;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub bridge: BridgeOptions,
    pub load: LoadOptions,
    pub columns: ColumnMap,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            bridge: BridgeOptions::default(),
            load: LoadOptions::default(),
            columns: ColumnMap::default(),
        }
    }
}

impl AppOptions {
    /// Defaults, then `PROMO_SOURCE` / `PROMO_APP_ID` if set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(v) = std::env::var(ENV_SOURCE) {
            if !v.trim().is_empty() {
                opts.load.source = Source::parse(&v);
            }
        }
        if let Ok(v) = std::env::var(ENV_APP_ID) {
            opts.bridge.app_id = s!(v.trim());
        }
        opts
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeOptions {
    pub enabled: bool,
    pub app_id: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self { enabled: true, app_id: s!(APP_ID) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub source: Source,
    pub http_timeout: Duration,
    pub decoder_wait: Duration,
    pub decoder_poll: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            source: Source::parse(DEFAULT_SOURCE),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            decoder_wait: Duration::from_millis(DECODER_WAIT_MS),
            decoder_poll: Duration::from_millis(DECODER_POLL_MS),
        }
    }
}

/// Header aliases per card field. First non-empty match wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub category: Vec<String>,
    pub heading: Vec<String>,
    pub promo_type: Vec<String>,
    pub speed: Vec<String>,
    pub price_duration: Vec<String>,
    pub price: Vec<String>,
    pub duration: Vec<String>,
    pub bonus: Vec<String>,
    pub code: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| s!(*n)).collect()
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            category: owned(COL_CATEGORY),
            heading: owned(COL_HEADING),
            promo_type: owned(COL_PROMO_TYPE),
            speed: owned(COL_SPEED),
            price_duration: owned(COL_PRICE_DURATION),
            price: owned(COL_PRICE),
            duration: owned(COL_DURATION),
            bonus: owned(COL_BONUS),
            code: owned(COL_CODE),
        }
    }
}
