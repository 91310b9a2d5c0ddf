//! WebAssembly bindings for motion-core.
//!
//! JavaScript owns the DOM: it pushes region rectangles, viewport widths
//! and intersection ratios in, and pulls frames out as JSON. Times are
//! passed as `f64` milliseconds (`performance.now()`).

use wasm_bindgen::prelude::*;

use crate::clock::Millis;
use crate::geometry::Rect;
use crate::host::{MemoryHost, RegionId};
use crate::{MotionConfig, PortfolioPage, Typewriter, TypewriterConfig};

/// Initialize the motion WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_millis(ms: f64) -> Millis {
    if ms.is_nan() || ms <= 0.0 {
        0
    } else {
        ms as Millis
    }
}

#[allow(clippy::cast_precision_loss)]
fn from_millis(ms: Millis) -> f64 {
    ms as f64
}

/// Current time from `performance.now()`, falling back to `Date.now()`.
#[wasm_bindgen(js_name = nowMs)]
#[must_use]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Browser viewport width, if a window exists.
#[wasm_bindgen(js_name = browserWidth)]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn browser_width() -> Option<f32> {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w as f32)
}

/// Portfolio page choreography for WASM.
#[wasm_bindgen]
pub struct WasmPage {
    host: MemoryHost,
    page: PortfolioPage,
}

#[wasm_bindgen]
impl WasmPage {
    /// Create a page from an optional JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error string if the configuration is malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, width: f32) -> Result<WasmPage, String> {
        let config = match config_json {
            Some(json) => MotionConfig::from_json_str(&json).map_err(|e| e.to_string())?,
            None => MotionConfig::default(),
        };
        Ok(Self {
            host: MemoryHost::new(width),
            page: PortfolioPage::new(&config),
        })
    }

    /// Set or replace a region's bounding box.
    #[wasm_bindgen(js_name = setRegion)]
    pub fn set_region(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        self.host.set_rect(name, Rect::new(x, y, width, height));
    }

    /// Forget a region.
    #[wasm_bindgen(js_name = removeRegion)]
    pub fn remove_region(&mut self, name: &str) {
        self.host.remove_rect(&RegionId::new(name));
    }

    /// Regions JS should attach intersection observers to.
    #[wasm_bindgen(js_name = observedRegions)]
    #[must_use]
    pub fn observed_regions(&self) -> Vec<String> {
        self.page
            .observed_regions()
            .map(|r| r.as_str().to_string())
            .collect()
    }

    /// Mount the page at `now`.
    pub fn mount(&mut self, now: f64) {
        self.page.mount(&self.host, to_millis(now));
    }

    /// Forward a viewport resize. Returns `true` if the layout mode flipped.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self, width: f32, now: f64) -> bool {
        self.host.set_width(width);
        self.page.on_resize(width, to_millis(now)).is_some()
    }

    /// Forward an intersection ratio. Returns `true` if it triggered anything.
    #[wasm_bindgen(js_name = onIntersection)]
    pub fn on_intersection(&mut self, region: &str, ratio: f32, now: f64) -> bool {
        self.page
            .on_intersection(&RegionId::new(region), ratio, to_millis(now))
    }

    /// Recompute connector geometry from the pushed regions.
    pub fn remeasure(&mut self) {
        self.page.remeasure(&self.host);
    }

    /// Fire due timers. Returns characters typed.
    pub fn tick(&mut self, now: f64) -> u32 {
        u32::try_from(self.page.tick(to_millis(now))).unwrap_or(u32::MAX)
    }

    /// Next timer deadline, if any.
    #[wasm_bindgen(js_name = nextDeadline)]
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.page.next_deadline().map(from_millis)
    }

    /// Frame at `now` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&mut self, now: f64) -> Result<String, String> {
        let frame = self.page.frame(&self.host, to_millis(now));
        serde_json::to_string(&frame).map_err(|e| e.to_string())
    }

    /// Release every subscription and timer.
    pub fn unmount(&mut self) {
        self.page.unmount();
    }
}

/// Standalone typewriter for WASM.
#[wasm_bindgen]
pub struct WasmTypewriter {
    inner: Typewriter,
}

#[wasm_bindgen]
impl WasmTypewriter {
    /// Create a typewriter with default timing.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            inner: Typewriter::new(text, TypewriterConfig::default()),
        }
    }

    /// Apply the start trigger.
    #[wasm_bindgen(js_name = setStart)]
    pub fn set_start(&mut self, start: bool, now: f64) {
        self.inner.set_start(start, to_millis(now));
    }

    /// Fire due timers. Returns characters typed.
    pub fn advance(&mut self, now: f64) -> u32 {
        u32::try_from(self.inner.advance(to_millis(now))).unwrap_or(u32::MAX)
    }

    /// Text emitted so far.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.inner.prefix().to_string()
    }

    /// Next timer deadline, if any.
    #[wasm_bindgen(js_name = nextDeadline)]
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner.next_deadline().map(from_millis)
    }

    /// Frame at `now` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self, now: f64) -> Result<String, String> {
        serde_json::to_string(&self.inner.frame(to_millis(now))).map_err(|e| e.to_string())
    }
}
