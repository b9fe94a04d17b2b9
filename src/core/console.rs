//! Console output
//!
//! Browser console on wasm32. Native builds drop info lines (the model keeps
//! its own message log) and send warnings to stderr.

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_message: &str) {}

/// Developer-facing diagnostics (defects, not user errors)
#[cfg(target_arch = "wasm32")]
pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(message: &str) {
    eprintln!("{}", message);
}
