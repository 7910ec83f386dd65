//! WebAssembly bindings via wasm-bindgen for browser integration.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { iknob_init, KnobControl, KnobGesture } from './iknob.js';
//!
//! await init();
//! iknob_init();
//!
//! const knob = new KnobControl();
//! knob.update_bounds(0, 0, canvas.width, canvas.height);
//!
//! canvas.onpointermove = (e) => {
//!     if (knob.handle_gesture(e.offsetX, e.offsetY, KnobGesture.Changed)) {
//!         output.value = knob.value;
//!     }
//! };
//! ```

use wasm_bindgen::prelude::*;

use crate::angle_tracker::{GestureState, host_touches};
use crate::config::{Color, KnobConfig};
use crate::controller::KnobController;
use crate::geometry::{Point, Rect};
use crate::renderer::KnobRenderer;

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other functions.
/// Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn iknob_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Gesture States
// ═══════════════════════════════════════════════════════════════════════════

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnobGesture {
    Began = 0,
    Changed = 1,
    Ended = 2,
    Cancelled = 3,
}

impl From<KnobGesture> for GestureState {
    fn from(g: KnobGesture) -> Self {
        match g {
            KnobGesture::Began => GestureState::Began,
            KnobGesture::Changed => GestureState::Changed,
            KnobGesture::Ended => GestureState::Ended,
            KnobGesture::Cancelled => GestureState::Cancelled,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Track Geometry
// ═══════════════════════════════════════════════════════════════════════════

/// Track geometry for drawing on a canvas.
#[wasm_bindgen]
#[derive(Clone, Copy, Default)]
pub struct KnobTrackArc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

// ═══════════════════════════════════════════════════════════════════════════
// Knob Control
// ═══════════════════════════════════════════════════════════════════════════

/// A rotary knob. Gesture methods return `true` when a value-changed
/// notification fired; read `value` afterwards.
#[wasm_bindgen]
pub struct KnobControl {
    inner: KnobController<KnobRenderer>,
}

#[wasm_bindgen]
impl KnobControl {
    /// Create a knob with the default configuration (0..1, 7 to 5 o'clock).
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<KnobControl, JsError> {
        Self::with_config(KnobConfig::default())
    }

    /// Create a knob with custom ranges.
    pub fn with_ranges(
        minimum_value: f32,
        maximum_value: f32,
        start_angle: f64,
        end_angle: f64,
        is_continuous: bool,
    ) -> Result<KnobControl, JsError> {
        Self::with_config(
            KnobConfig::new()
                .range(minimum_value, maximum_value)
                .angles(start_angle, end_angle)
                .continuous(is_continuous),
        )
    }

    fn with_config(config: KnobConfig) -> Result<KnobControl, JsError> {
        let inner = KnobController::new(config).map_err(|e| {
            log::warn!("KnobControl: {}", e);
            JsError::new(&e.to_string())
        })?;
        Ok(Self { inner })
    }

    // ───────────────────────────────────────────
    // Value
    // ───────────────────────────────────────────

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f32 {
        self.inner.value()
    }

    /// Set the value programmatically. Never fires a notification.
    pub fn set_value(&mut self, value: f32, animated: bool) {
        self.inner.set_value(value, animated);
    }

    #[wasm_bindgen(getter)]
    pub fn current_angle(&self) -> f64 {
        self.inner.current_angle()
    }

    // ───────────────────────────────────────────
    // Gestures
    // ───────────────────────────────────────────

    pub fn handle_gesture(&mut self, x: f64, y: f64, gesture: KnobGesture) -> bool {
        self.inner
            .handle_gesture(Point::new(x, y), gesture.into())
            .is_some()
    }

    pub fn touches_began(&mut self, x: f64, y: f64, touch_count: u32) -> bool {
        let first = [Point::new(x, y)];
        self.inner
            .touches_began(host_touches(&first, touch_count))
            .is_some()
    }

    pub fn touches_moved(&mut self, x: f64, y: f64, touch_count: u32) -> bool {
        let first = [Point::new(x, y)];
        self.inner
            .touches_moved(host_touches(&first, touch_count))
            .is_some()
    }

    pub fn touches_ended(&mut self) -> bool {
        self.inner.touches_ended().is_some()
    }

    pub fn touches_cancelled(&mut self) -> bool {
        self.inner.touches_cancelled().is_some()
    }

    // ───────────────────────────────────────────
    // Configuration
    // ───────────────────────────────────────────

    #[wasm_bindgen(getter)]
    pub fn minimum_value(&self) -> f32 {
        self.inner.minimum_value()
    }

    #[wasm_bindgen(getter)]
    pub fn maximum_value(&self) -> f32 {
        self.inner.maximum_value()
    }

    #[wasm_bindgen(getter)]
    pub fn start_angle(&self) -> f64 {
        self.inner.start_angle()
    }

    #[wasm_bindgen(getter)]
    pub fn end_angle(&self) -> f64 {
        self.inner.end_angle()
    }

    /// Returns `false` (and changes nothing) for an empty range.
    pub fn set_range(&mut self, min: f32, max: f32) -> bool {
        self.inner.set_range(min, max).is_ok()
    }

    /// Returns `false` (and changes nothing) unless `start < end` and the
    /// track fits in one turn.
    pub fn set_angle_range(&mut self, start: f64, end: f64) -> bool {
        self.inner.set_angle_range(start, end).is_ok()
    }

    #[wasm_bindgen(getter)]
    pub fn is_continuous(&self) -> bool {
        self.inner.is_continuous()
    }

    pub fn set_continuous(&mut self, is_continuous: bool) {
        self.inner.set_continuous(is_continuous);
    }

    pub fn set_line_width(&mut self, line_width: f64) -> bool {
        self.inner.set_line_width(line_width).is_ok()
    }

    pub fn set_pointer_length(&mut self, pointer_length: f64) -> bool {
        self.inner.set_pointer_length(pointer_length).is_ok()
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.inner.set_color(Color::rgba(r, g, b, a));
    }

    pub fn update_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.update_bounds(Rect::new(x, y, width, height));
    }

    pub fn refresh(&mut self) {
        self.inner.refresh();
    }

    #[wasm_bindgen(getter)]
    pub fn needs_refresh(&self) -> bool {
        self.inner.needs_refresh()
    }

    // ───────────────────────────────────────────
    // Render Readback
    // ───────────────────────────────────────────

    #[wasm_bindgen(getter)]
    pub fn pointer_angle(&self) -> f64 {
        self.inner.renderer().pointer_angle()
    }

    pub fn track_arc(&self) -> KnobTrackArc {
        let arc = self.inner.renderer().track_arc();
        KnobTrackArc {
            center_x: arc.center.x,
            center_y: arc.center.y,
            radius: arc.radius,
            start_angle: arc.start_angle,
            end_angle: arc.end_angle,
        }
    }

    /// Keyframe angles `[from, mid, to]` of the pending animation, or an
    /// empty array when the last move was not animated.
    pub fn take_animation(&mut self) -> Vec<f64> {
        self.inner
            .renderer_mut()
            .take_animation()
            .map(|a| a.values.to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bogus_touch_count_is_ignored() {
        let mut knob = KnobControl::new().unwrap();
        knob.update_bounds(0.0, 0.0, 100.0, 100.0);

        assert!(!knob.touches_began(10.0, 10.0, u32::MAX));
        assert!(!knob.touches_began(10.0, 10.0, 0));
        assert_eq!(knob.value(), 0.0);

        assert!(knob.touches_began(50.0, 10.0, 1));
        assert!(!knob.touches_moved(100.0, 50.0, u32::MAX));
        assert!(knob.touches_moved(100.0, 50.0, 1));
        assert!(knob.touches_ended());
    }
}
