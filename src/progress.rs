// src/progress.rs
/// Status reporting for the boot pipeline (bridge init → load).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called once the pipeline settles, successful or not.
    fn finish(&mut self, _ok: bool) {}
}
