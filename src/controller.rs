// src/controller.rs
//
// The knob control.
//
// Owns the committed value and the configuration, and runs each gesture
// sample through touch angle -> bounded angle -> value. The host reads the
// value back on value-changed events.
//
// Single-threaded: every call is expected on the host UI thread.

use log::{debug, warn};

use crate::angle_tracker::{GestureState, GestureUpdate, RotationGestureRecognizer, touch_angle};
use crate::config::{Color, ConfigResult, KnobConfig, check_dimension};
use crate::event::{ControlEvent, Observers};
use crate::geometry::{Point, Rect};
use crate::gesture_mapper::GestureMapper;
use crate::renderer::{KnobRenderer, Renderer};
use crate::value_mapper::ValueMapper;

/// Rotary knob controller.
///
/// `value` always lies in `[minimum_value, maximum_value]`. It is only
/// changed through [`KnobController::set_value`], either directly by the
/// host or by a gesture.
pub struct KnobController<R: Renderer = KnobRenderer> {
    config: KnobConfig,
    gesture_mapper: GestureMapper,
    value_mapper: ValueMapper,

    value: f32,

    /// Track angle of `value`.
    current_angle: f64,

    bounds: Rect,
    recognizer: RotationGestureRecognizer,
    renderer: R,
    observers: Observers,

    /// Style or track changed since the last `refresh()`.
    needs_refresh: bool,
}

impl KnobController<KnobRenderer> {
    /// Create a knob with the headless render model.
    pub fn new(config: KnobConfig) -> ConfigResult<Self> {
        Self::with_renderer(config, KnobRenderer::new())
    }
}

impl<R: Renderer> KnobController<R> {
    /// Create a knob that presents through `renderer`.
    ///
    /// The value starts at the minimum with the pointer parked on the start
    /// angle.
    pub fn with_renderer(config: KnobConfig, mut renderer: R) -> ConfigResult<Self> {
        config.validate()?;
        let gesture_mapper = GestureMapper::try_from_config(&config)?;
        let value_mapper = ValueMapper::try_from_config(&config)?;

        let value = config.minimum_value;
        let current_angle = value_mapper.value_to_angle(value);

        let bounds = Rect::default();
        renderer.update_bounds(bounds);
        renderer.set_style(&config.style);
        renderer.set_track(config.start_angle, config.end_angle);
        renderer.set_pointer_angle(current_angle, false);

        Ok(Self {
            config,
            gesture_mapper,
            value_mapper,
            value,
            current_angle,
            bounds,
            recognizer: RotationGestureRecognizer::new(),
            renderer,
            observers: Observers::new(),
            needs_refresh: false,
        })
    }

    // ═══════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    pub fn minimum_value(&self) -> f32 {
        self.config.minimum_value
    }

    pub fn maximum_value(&self) -> f32 {
        self.config.maximum_value
    }

    pub fn start_angle(&self) -> f64 {
        self.config.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.config.end_angle
    }

    pub fn is_continuous(&self) -> bool {
        self.config.is_continuous
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// A touch sequence is in progress.
    pub fn is_tracking(&self) -> bool {
        self.recognizer.state().is_active()
    }

    /// Style or track settings are waiting for [`KnobController::refresh`].
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    // ═══════════════════════════════════════════
    // Value
    // ═══════════════════════════════════════════

    /// Set the value programmatically.
    ///
    /// The value is clamped to the configured range and the pointer is
    /// moved to match. No value-changed event is sent. NaN is ignored.
    pub fn set_value(&mut self, new_value: f32, animated: bool) {
        if new_value.is_nan() {
            warn!("set_value: ignoring NaN");
            return;
        }
        self.value = self.value_mapper.clamp_value(new_value);
        self.current_angle = self.value_mapper.value_to_angle(self.value);
        self.renderer.set_pointer_angle(self.current_angle, animated);
    }

    // ═══════════════════════════════════════════
    // Gestures
    // ═══════════════════════════════════════════

    /// Register a host callback for value-changed events.
    pub fn add_value_changed_observer(&mut self, observer: impl FnMut(f32) + 'static) {
        self.observers.add_value_changed(Box::new(observer));
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Apply one gesture sample taken at `touch_point`.
    ///
    /// Returns the event that was sent to observers, if any.
    pub fn handle_gesture(
        &mut self,
        touch_point: Point,
        state: GestureState,
    ) -> Option<ControlEvent> {
        let angle = touch_angle(touch_point, self.bounds.center());
        self.apply_touch_angle(angle, state)
    }

    /// Apply a sample that already carries the raw touch angle.
    pub fn handle_update(&mut self, update: GestureUpdate) -> Option<ControlEvent> {
        self.apply_touch_angle(update.angle, update.state)
    }

    pub fn touches_began(&mut self, touches: &[Point]) -> Option<ControlEvent> {
        let update = self.recognizer.touches_began(touches, self.bounds)?;
        self.handle_update(update)
    }

    pub fn touches_moved(&mut self, touches: &[Point]) -> Option<ControlEvent> {
        let update = self.recognizer.touches_moved(touches, self.bounds)?;
        self.handle_update(update)
    }

    pub fn touches_ended(&mut self) -> Option<ControlEvent> {
        let update = self.recognizer.touches_ended()?;
        self.handle_update(update)
    }

    pub fn touches_cancelled(&mut self) -> Option<ControlEvent> {
        let update = self.recognizer.touches_cancelled()?;
        self.handle_update(update)
    }

    fn apply_touch_angle(&mut self, raw_angle: f64, state: GestureState) -> Option<ControlEvent> {
        let bounded_angle = self.gesture_mapper.bounded_angle(raw_angle);
        debug!(
            "gesture {:?}: touch {:.1}°, bounded {:.1}°",
            state,
            raw_angle.to_degrees(),
            bounded_angle.to_degrees()
        );

        let candidate = self.value_mapper.angle_to_value(bounded_angle);
        self.set_value(candidate, false);

        // Continuous knobs report every sample; discrete knobs report once,
        // when the finger lifts or the gesture is cancelled.
        if !self.config.is_continuous && !state.is_terminal() {
            return None;
        }

        let event = ControlEvent::ValueChanged { value: self.value };
        self.observers.send(event);
        Some(event)
    }

    // ═══════════════════════════════════════════
    // Configuration
    // ═══════════════════════════════════════════

    /// Change the value range. The current value is kept, clamped into the
    /// new range.
    pub fn set_range(&mut self, minimum_value: f32, maximum_value: f32) -> ConfigResult<()> {
        let value_mapper = ValueMapper::new(
            minimum_value,
            maximum_value,
            self.config.start_angle,
            self.config.end_angle,
        )
        .inspect_err(|e| warn!("set_range rejected: {}", e))?;

        self.config.minimum_value = minimum_value;
        self.config.maximum_value = maximum_value;
        self.value_mapper = value_mapper;
        self.reclamp();
        Ok(())
    }

    pub fn set_minimum_value(&mut self, minimum_value: f32) -> ConfigResult<()> {
        self.set_range(minimum_value, self.config.maximum_value)
    }

    pub fn set_maximum_value(&mut self, maximum_value: f32) -> ConfigResult<()> {
        self.set_range(self.config.minimum_value, maximum_value)
    }

    /// Change the track. The current value is kept and its angle recomputed.
    pub fn set_angle_range(&mut self, start_angle: f64, end_angle: f64) -> ConfigResult<()> {
        let gesture_mapper = GestureMapper::new(start_angle, end_angle)
            .inspect_err(|e| warn!("set_angle_range rejected: {}", e))?;
        let value_mapper = ValueMapper::new(
            self.config.minimum_value,
            self.config.maximum_value,
            start_angle,
            end_angle,
        )?;

        self.config.start_angle = start_angle;
        self.config.end_angle = end_angle;
        self.gesture_mapper = gesture_mapper;
        self.value_mapper = value_mapper;
        self.reclamp();
        Ok(())
    }

    pub fn set_start_angle(&mut self, start_angle: f64) -> ConfigResult<()> {
        self.set_angle_range(start_angle, self.config.end_angle)
    }

    pub fn set_end_angle(&mut self, end_angle: f64) -> ConfigResult<()> {
        self.set_angle_range(self.config.start_angle, end_angle)
    }

    pub fn set_continuous(&mut self, is_continuous: bool) {
        self.config.is_continuous = is_continuous;
    }

    pub fn set_line_width(&mut self, line_width: f64) -> ConfigResult<()> {
        check_dimension("line width", line_width)
            .inspect_err(|e| warn!("set_line_width rejected: {}", e))?;
        self.config.style.line_width = line_width;
        self.needs_refresh = true;
        Ok(())
    }

    pub fn set_pointer_length(&mut self, pointer_length: f64) -> ConfigResult<()> {
        check_dimension("pointer length", pointer_length)
            .inspect_err(|e| warn!("set_pointer_length rejected: {}", e))?;
        self.config.style.pointer_length = pointer_length;
        self.needs_refresh = true;
        Ok(())
    }

    /// Stroke color, typically the host's tint color.
    pub fn set_color(&mut self, color: Color) {
        self.config.style.color = color;
        self.needs_refresh = true;
    }

    /// The host view was laid out (or previewed) with new bounds.
    pub fn update_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.renderer.update_bounds(bounds);
    }

    /// Push style, track and pointer to the renderer.
    pub fn refresh(&mut self) {
        self.renderer.set_style(&self.config.style);
        self.renderer.set_track(self.config.start_angle, self.config.end_angle);
        self.renderer.set_pointer_angle(self.current_angle, false);
        self.needs_refresh = false;
    }

    fn reclamp(&mut self) {
        self.value = self.value_mapper.clamp_value(self.value);
        self.current_angle = self.value_mapper.value_to_angle(self.value);
        self.needs_refresh = true;
    }
}

impl<R: Renderer + std::fmt::Debug> std::fmt::Debug for KnobController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnobController")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("current_angle", &self.current_angle)
            .field("bounds", &self.bounds)
            .field("renderer", &self.renderer)
            .field("observers", &self.observers)
            .finish()
    }
}
