// src/actions.rs
//
// Per-card "call" and "copy code" handlers. Every path ends in either an
// effect or a notification; nothing here returns an error to the caller.

use crate::bridge::Bridge;
use crate::config::consts::{MSG_COPIED, MSG_COPY_MANUAL, MSG_ERROR_PREFIX, MSG_NO_CODE};
use crate::error::{ClipboardError, NavigateError};

/// Direct navigation, used when the bridge can't open the URI.
pub trait Navigator {
    fn navigate(&mut self, uri: &str) -> Result<(), NavigateError>;
}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// User-visible alert / toast.
pub trait Notifier {
    fn notify(&mut self, msg: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Missing code; the user was told, nothing else happened.
    Aborted,
    OpenedExternal(String),
    Navigated(String),
    NavigateFailed(String),
    Copied(String),
    CopyFailed(String),
}

/// USSD codes end in `#`, which a URI would read as a fragment.
pub fn encode_ussd(code: &str) -> String {
    code.replace('#', "%23")
}

pub fn dial_uri(code: &str) -> String {
    join!("tel:", &encode_ussd(code))
}

pub fn dial(
    code: &str,
    bridge: &dyn Bridge,
    nav: &mut dyn Navigator,
    notifier: &mut dyn Notifier,
) -> ActionOutcome {
    let code = code.trim();
    if code.is_empty() {
        logd!("Dial: no code on card");
        notifier.notify(MSG_NO_CODE);
        return ActionOutcome::Aborted;
    }

    let uri = dial_uri(code);
    if bridge.is_ready() {
        match bridge.open_window(&uri, true) {
            Ok(()) => {
                logf!("Dial: opened {} via bridge", uri);
                return ActionOutcome::OpenedExternal(uri);
            }
            Err(e) => logw!("Dial: bridge open failed, navigating directly: {}", e),
        }
    }

    match nav.navigate(&uri) {
        Ok(()) => {
            logf!("Dial: navigated to {}", uri);
            ActionOutcome::Navigated(uri)
        }
        Err(e) => {
            loge!("Dial: {}", e);
            notifier.notify(&join!(MSG_ERROR_PREFIX, &e.to_string()));
            ActionOutcome::NavigateFailed(uri)
        }
    }
}

/// The clipboard gets the code exactly as the sheet holds it: not trimmed,
/// not URI-encoded. Blank only counts as missing.
pub fn copy(code: &str, clipboard: &mut dyn ClipboardSink, notifier: &mut dyn Notifier) -> ActionOutcome {
    if code.trim().is_empty() {
        logd!("Copy: no code on card");
        notifier.notify(MSG_NO_CODE);
        return ActionOutcome::Aborted;
    }

    match clipboard.set_text(code) {
        Ok(()) => {
            logf!("Copy: {}", code);
            notifier.notify(&join!(MSG_COPIED, code));
            ActionOutcome::Copied(s!(code))
        }
        Err(e) => {
            logw!("Copy: {}", e);
            notifier.notify(&join!(MSG_COPY_MANUAL, code));
            ActionOutcome::CopyFailed(s!(code))
        }
    }
}

/// System clipboard via arboard. The handle is kept alive so X11 owners
/// don't drop the selection right after writing it.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self { Self::default() }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?);
        }
        match self.inner.as_mut() {
            Some(cb) => cb.set_text(text).map_err(|e| ClipboardError(e.to_string())),
            None => Err(ClipboardError(s!("no clipboard"))),
        }
    }
}

/// Fallback navigation through the OS URI handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn navigate(&mut self, uri: &str) -> Result<(), NavigateError> {
        webbrowser::open(uri).map_err(|e| NavigateError(e.to_string()))
    }
}

/// Collects notifications (CLI prints them afterwards; tests inspect them).
#[derive(Debug, Default, Clone)]
pub struct NoticeLog {
    pub messages: Vec<String>,
}

impl Notifier for NoticeLog {
    fn notify(&mut self, msg: &str) {
        self.messages.push(s!(msg));
    }
}
