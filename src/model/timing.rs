//! Frame timing for the presentation layer
//!
//! `js_sys::Date::now()` on wasm32, `Instant` elsewhere.

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Last and smoothed duration of whole-frame advances
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameTiming {
    last_ms: f64,
    smoothed_ms: f64,
    samples: u32,
}

impl FrameTiming {
    const SMOOTHING: f64 = 0.1;

    /// Run `f`, recording how long it took
    pub fn measure<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = now_ms();
        let out = f();
        self.record(now_ms() - start);
        out
    }

    fn record(&mut self, ms: f64) {
        let ms = ms.max(0.0);
        self.last_ms = ms;
        self.smoothed_ms = if self.samples == 0 {
            ms
        } else {
            self.smoothed_ms + (ms - self.smoothed_ms) * Self::SMOOTHING
        };
        self.samples = self.samples.saturating_add(1);
    }

    pub fn last_ms(&self) -> f64 { self.last_ms }

    pub fn smoothed_ms(&self) -> f64 { self.smoothed_ms }

    pub fn samples(&self) -> u32 { self.samples }
}
