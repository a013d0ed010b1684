// src/bridge.rs
//
// Host bridge: the one-time handshake and the "open external window"
// capability. The desktop build hands URIs to the OS handler.

use crate::error::BridgeError;

pub trait Bridge: Send {
    fn init(&mut self, app_id: &str) -> Result<(), BridgeError>;
    fn is_ready(&self) -> bool;
    /// `external = true` asks the host to leave its own webview and defer
    /// to the system browser / dialer.
    fn open_window(&self, url: &str, external: bool) -> Result<(), BridgeError>;
}

/// LIFF-style ids: `<channel digits>-<alnum suffix>`.
pub fn valid_app_id(id: &str) -> bool {
    let Some((channel, suffix)) = id.split_once('-') else { return false };
    !channel.is_empty()
        && channel.bytes().all(|b| b.is_ascii_digit())
        && !suffix.is_empty()
        && suffix.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Desktop bridge backed by the `webbrowser` crate.
#[derive(Debug, Default)]
pub struct SystemBridge {
    app_id: Option<String>,
}

impl SystemBridge {
    pub fn new() -> Self { Self::default() }
    pub fn app_id(&self) -> Option<&str> { self.app_id.as_deref() }
}

impl Bridge for SystemBridge {
    fn init(&mut self, app_id: &str) -> Result<(), BridgeError> {
        if app_id.is_empty() {
            return Err(BridgeError::MissingAppId);
        }
        if !valid_app_id(app_id) {
            return Err(BridgeError::InvalidAppId(s!(app_id)));
        }
        self.app_id = Some(s!(app_id));
        Ok(())
    }

    fn is_ready(&self) -> bool { self.app_id.is_some() }

    fn open_window(&self, url: &str, _external: bool) -> Result<(), BridgeError> {
        if !self.is_ready() {
            return Err(BridgeError::NotInitialized);
        }
        // Desktop has no in-app webview, so every window is external.
        webbrowser::open(url).map_err(|e| BridgeError::Launch(e.to_string()))
    }
}

/// No host present.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBridge;

impl Bridge for NullBridge {
    fn init(&mut self, _app_id: &str) -> Result<(), BridgeError> { Err(BridgeError::Unavailable) }
    fn is_ready(&self) -> bool { false }
    fn open_window(&self, _url: &str, _external: bool) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }
}

/// Run `init` once. Failures are logged and swallowed; the caller carries
/// on without host integration.
pub fn init_best_effort(bridge: &mut dyn Bridge, app_id: &str) -> bool {
    match bridge.init(app_id) {
        Ok(()) => {
            logf!("Bridge: initialized ({})", app_id);
            true
        }
        Err(e) => {
            logw!("Bridge: init skipped: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_shape() {
        assert!(valid_app_id("2006477066-AvryED4B"));
        assert!(!valid_app_id("2006477066"));
        assert!(!valid_app_id("abc-123"));
        assert!(!valid_app_id("123-"));
        assert!(!valid_app_id("123-a b"));
    }

    #[test]
    fn best_effort_never_fails() {
        let mut null = NullBridge;
        assert!(!init_best_effort(&mut null, "2006477066-AvryED4B"));

        let mut sys = SystemBridge::new();
        assert!(!init_best_effort(&mut sys, ""));
        assert!(!sys.is_ready());
        assert!(init_best_effort(&mut sys, "1-a"));
        assert_eq!(sys.app_id(), Some("1-a"));
    }

    #[test]
    fn open_before_init_is_refused() {
        let sys = SystemBridge::new();
        assert!(matches!(sys.open_window("tel:1", true), Err(BridgeError::NotInitialized)));
    }
}
