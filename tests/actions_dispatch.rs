// tests/actions_dispatch.rs
//
// Call / copy handlers against recording fakes.
use std::cell::RefCell;

use promo_cards::actions::{self, ActionOutcome, ClipboardSink, Navigator, NoticeLog};
use promo_cards::bridge::{Bridge, NullBridge};
use promo_cards::config::consts::{MSG_COPIED, MSG_COPY_MANUAL, MSG_NO_CODE};
use promo_cards::error::{BridgeError, ClipboardError, NavigateError};

#[derive(Default)]
struct FakeBridge {
    ready: bool,
    fail_open: bool,
    opened: RefCell<Vec<(String, bool)>>,
}

// RefCell is !Sync but Bridge only asks for Send.
impl Bridge for FakeBridge {
    fn init(&mut self, _app_id: &str) -> Result<(), BridgeError> {
        self.ready = true;
        Ok(())
    }
    fn is_ready(&self) -> bool { self.ready }
    fn open_window(&self, url: &str, external: bool) -> Result<(), BridgeError> {
        if self.fail_open {
            return Err(BridgeError::Launch("blocked".into()));
        }
        self.opened.borrow_mut().push((url.to_string(), external));
        Ok(())
    }
}

#[derive(Default)]
struct FakeNav {
    fail: bool,
    visited: Vec<String>,
}

impl Navigator for FakeNav {
    fn navigate(&mut self, uri: &str) -> Result<(), NavigateError> {
        if self.fail {
            return Err(NavigateError("no handler".into()));
        }
        self.visited.push(uri.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct FakeClipboard {
    fail: bool,
    text: Option<String>,
}

impl ClipboardSink for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError("denied".into()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

#[test]
fn dial_through_ready_bridge_encodes_hash() {
    let bridge = FakeBridge { ready: true, ..Default::default() };
    let mut nav = FakeNav::default();
    let mut notes = NoticeLog::default();

    let out = actions::dial("*123#", &bridge, &mut nav, &mut notes);

    assert_eq!(out, ActionOutcome::OpenedExternal("tel:*123%23".into()));
    assert_eq!(bridge.opened.borrow().as_slice(), &[("tel:*123%23".to_string(), true)]);
    assert!(nav.visited.is_empty());
    assert!(notes.messages.is_empty());
}

#[test]
fn dial_falls_back_when_bridge_fails() {
    let bridge = FakeBridge { ready: true, fail_open: true, ..Default::default() };
    let mut nav = FakeNav::default();
    let mut notes = NoticeLog::default();

    let out = actions::dial(" *456# ", &bridge, &mut nav, &mut notes);

    assert_eq!(out, ActionOutcome::Navigated("tel:*456%23".into()));
    assert_eq!(nav.visited, vec!["tel:*456%23".to_string()]);
}

#[test]
fn dial_without_bridge_navigates_directly() {
    let mut nav = FakeNav::default();
    let mut notes = NoticeLog::default();

    let out = actions::dial("0812345678", &NullBridge, &mut nav, &mut notes);
    assert_eq!(out, ActionOutcome::Navigated("tel:0812345678".into()));
}

#[test]
fn dial_navigation_failure_is_reported() {
    let mut nav = FakeNav { fail: true, ..Default::default() };
    let mut notes = NoticeLog::default();

    let out = actions::dial("*1#", &NullBridge, &mut nav, &mut notes);
    assert_eq!(out, ActionOutcome::NavigateFailed("tel:*1%23".into()));
    assert_eq!(notes.messages.len(), 1);
}

#[test]
fn empty_code_aborts_with_alert() {
    let bridge = FakeBridge { ready: true, ..Default::default() };
    let mut nav = FakeNav::default();
    let mut clip = FakeClipboard::default();
    let mut notes = NoticeLog::default();

    assert_eq!(actions::dial("  ", &bridge, &mut nav, &mut notes), ActionOutcome::Aborted);
    assert_eq!(actions::copy("", &mut clip, &mut notes), ActionOutcome::Aborted);

    assert_eq!(notes.messages, vec![MSG_NO_CODE.to_string(), MSG_NO_CODE.to_string()]);
    assert!(bridge.opened.borrow().is_empty());
    assert!(nav.visited.is_empty());
    assert!(clip.text.is_none());
}

#[test]
fn copy_puts_raw_code_on_clipboard() {
    let mut clip = FakeClipboard::default();
    let mut notes = NoticeLog::default();

    let out = actions::copy("*123#", &mut clip, &mut notes);

    assert_eq!(out, ActionOutcome::Copied("*123#".into()));
    assert_eq!(clip.text.as_deref(), Some("*123#"));
    assert_eq!(notes.messages, vec![format!("{MSG_COPIED}*123#")]);
}

#[test]
fn copy_failure_shows_code_for_manual_copy() {
    let mut clip = FakeClipboard { fail: true, ..Default::default() };
    let mut notes = NoticeLog::default();

    let out = actions::copy("*9#", &mut clip, &mut notes);

    assert_eq!(out, ActionOutcome::CopyFailed("*9#".into()));
    assert_eq!(notes.messages, vec![format!("{MSG_COPY_MANUAL}*9#")]);
}

#[test]
fn init_makes_fake_bridge_ready() {
    let mut bridge = FakeBridge::default();
    assert!(promo_cards::bridge::init_best_effort(&mut bridge, "1-a"));
    assert!(bridge.is_ready());
}

#[test]
fn copy_keeps_surrounding_whitespace() {
    let mut clip = FakeClipboard::default();
    let mut notes = NoticeLog::default();

    let out = actions::copy(" *123# ", &mut clip, &mut notes);

    assert_eq!(out, ActionOutcome::Copied(" *123# ".into()));
    assert_eq!(clip.text.as_deref(), Some(" *123# "));
}
