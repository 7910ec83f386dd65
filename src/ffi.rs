// C-compatible FFI bindings for Swift/iOS integration.
//
// Safety requirements:
// - All pointers must be non-null unless documented otherwise
// - All handles must be created by this module and not fabricated
// - Handles must only be used from the main (UI) thread
// - Caller must call `iknob_destroy` for each `iknob_create`

use std::ffi::c_void;

use crate::angle_tracker::{GestureState, host_touches};
use crate::config::{Color, KnobConfig, KnobStyle};
use crate::controller::KnobController;
use crate::event::ControlEvent;
use crate::geometry::{Point, Rect};
use crate::renderer::{KnobRenderer, PointerAnimation, TrackArc};

use log::{LevelFilter, debug, info, warn};
use oslog::OsLogger;

// Logger subsystem identifier
const LOG_SUBSYSTEM: &str = "com.iknob.core";

// Gesture states accepted by `iknob_handle_gesture`
pub const IKNOB_GESTURE_BEGAN: u32 = 0;
pub const IKNOB_GESTURE_CHANGED: u32 = 1;
pub const IKNOB_GESTURE_ENDED: u32 = 2;
pub const IKNOB_GESTURE_CANCELLED: u32 = 3;

// ═══════════════════════════════════════════════════════════════════════════
// Logger Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the oslog logger.
///
/// This should be called once at application startup before using any other
/// FFI functions. It sets up unified logging that will appear in Console.app
/// and Xcode's debug console.
#[unsafe(no_mangle)]
pub extern "C" fn iknob_init_logger() {
    OsLogger::new(LOG_SUBSYSTEM)
        .level_filter(LevelFilter::Debug)
        .init()
        .ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Opaque Handle Types
// ═══════════════════════════════════════════════════════════════════════════

/// Opaque handle to a knob controller.
///
/// The value-changed callback lives here rather than on the controller, so
/// it only runs once the controller is no longer borrowed and the host may
/// call back into the handle (e.g. `iknob_value`) from inside it.
pub struct IKnob {
    inner: KnobController<KnobRenderer>,
    callback: Option<IKnobValueChangedCallback>,
    context: *mut c_void,
}

/// Value-changed callback. `context` is passed back untouched.
pub type IKnobValueChangedCallback = extern "C" fn(context: *mut c_void, value: f32);

/// Deliver `event` to the host callback and report whether it fired.
///
/// # Safety
/// `knob` must be a valid, non-null handle with no live borrows of it.
unsafe fn notify(knob: *mut IKnob, event: Option<ControlEvent>) -> bool {
    let Some(ControlEvent::ValueChanged { value }) = event else {
        return false;
    };
    let (callback, context) = unsafe { ((*knob).callback, (*knob).context) };
    if let Some(callback) = callback {
        callback(context, value);
    }
    true
}

// ═══════════════════════════════════════════════════════════════════════════
// FFI Types
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration for creating a knob.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct IKnobConfig {
    pub minimum_value: f32,
    pub maximum_value: f32,
    /// Radians, clockwise from 3 o'clock.
    pub start_angle: f64,
    /// Radians, clockwise from 3 o'clock. Must be greater than `start_angle`.
    pub end_angle: f64,
    pub is_continuous: bool,
    pub line_width: f64,
    pub pointer_length: f64,
    pub color: IKnobColor,
}

/// RGBA color, components in 0..1.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct IKnobColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Track geometry for drawing.
#[repr(C)]
pub struct IKnobTrackArc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
}

/// Keyframed pointer rotation for the host to play.
#[repr(C)]
pub struct IKnobAnimation {
    pub values: [f64; 3],
    pub key_times: [f64; 3],
}

impl From<Color> for IKnobColor {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl From<IKnobColor> for Color {
    fn from(c: IKnobColor) -> Self {
        Color::rgba(c.r, c.g, c.b, c.a)
    }
}

impl From<KnobConfig> for IKnobConfig {
    fn from(c: KnobConfig) -> Self {
        Self {
            minimum_value: c.minimum_value,
            maximum_value: c.maximum_value,
            start_angle: c.start_angle,
            end_angle: c.end_angle,
            is_continuous: c.is_continuous,
            line_width: c.style.line_width,
            pointer_length: c.style.pointer_length,
            color: c.style.color.into(),
        }
    }
}

impl From<IKnobConfig> for KnobConfig {
    fn from(c: IKnobConfig) -> Self {
        KnobConfig::new()
            .range(c.minimum_value, c.maximum_value)
            .angles(c.start_angle, c.end_angle)
            .continuous(c.is_continuous)
            .style(KnobStyle {
                color: c.color.into(),
                line_width: c.line_width,
                pointer_length: c.pointer_length,
            })
    }
}

impl From<TrackArc> for IKnobTrackArc {
    fn from(a: TrackArc) -> Self {
        Self {
            center_x: a.center.x,
            center_y: a.center.y,
            radius: a.radius,
            start_angle: a.start_angle,
            end_angle: a.end_angle,
            clockwise: a.clockwise,
        }
    }
}

impl From<PointerAnimation> for IKnobAnimation {
    fn from(a: PointerAnimation) -> Self {
        Self {
            values: a.values,
            key_times: a.key_times,
        }
    }
}

fn gesture_state(state: u32) -> Option<GestureState> {
    match state {
        IKNOB_GESTURE_BEGAN => Some(GestureState::Began),
        IKNOB_GESTURE_CHANGED => Some(GestureState::Changed),
        IKNOB_GESTURE_ENDED => Some(GestureState::Ended),
        IKNOB_GESTURE_CANCELLED => Some(GestureState::Cancelled),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Creation
// ═══════════════════════════════════════════════════════════════════════════

/// Get the default configuration values.
#[unsafe(no_mangle)]
pub extern "C" fn iknob_default_config() -> IKnobConfig {
    KnobConfig::default().into()
}

/// Create a knob.
///
/// `config` may be NULL to use defaults. Returns NULL if the configuration
/// is invalid (empty or inverted ranges, non-finite values).
///
/// # Safety
/// `config` must be NULL or a valid pointer to an IKnobConfig.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_create(config: *const IKnobConfig) -> *mut IKnob {
    let cfg: KnobConfig = if config.is_null() {
        KnobConfig::default()
    } else {
        unsafe { std::ptr::read(config) }.into()
    };

    match KnobController::new(cfg) {
        Ok(inner) => Box::into_raw(Box::new(IKnob {
            inner,
            callback: None,
            context: std::ptr::null_mut(),
        })),
        Err(e) => {
            warn!("iknob_create: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Destroy a knob.
///
/// # Safety
/// `knob` must be a valid pointer returned by `iknob_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_destroy(knob: *mut IKnob) {
    if !knob.is_null() {
        unsafe { drop(Box::from_raw(knob)) };
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Value
// ═══════════════════════════════════════════════════════════════════════════

/// Current value.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_value(knob: *const IKnob) -> f32 {
    if knob.is_null() {
        return 0.0;
    }
    unsafe { (*knob).inner.value() }
}

/// Set the value programmatically. Does not invoke the value-changed
/// callback.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_value(knob: *mut IKnob, value: f32, animated: bool) {
    info!("iknob_set_value: value={}, animated={}", value, animated);
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_value(value, animated) };
}

/// Register the value-changed callback, replacing any previous one.
/// Pass NULL to remove it. The callback runs after the knob has committed
/// the new value and may call back into `knob`.
///
/// # Safety
/// `context` must stay valid until the callback is replaced or the knob is
/// destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_value_changed_callback(
    knob: *mut IKnob,
    callback: Option<IKnobValueChangedCallback>,
    context: *mut c_void,
) {
    if knob.is_null() {
        return;
    }
    unsafe {
        (*knob).callback = callback;
        (*knob).context = context;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Gestures
// ═══════════════════════════════════════════════════════════════════════════

/// Apply one gesture sample at (x, y) in the knob's bounds coordinates.
///
/// Returns `true` if the value-changed callback fired.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_handle_gesture(
    knob: *mut IKnob,
    x: f64,
    y: f64,
    state: u32,
) -> bool {
    if knob.is_null() {
        return false;
    }
    let Some(state) = gesture_state(state) else {
        warn!("iknob_handle_gesture: unknown gesture state {}", state);
        return false;
    };
    let event = unsafe { (*knob).inner.handle_gesture(Point::new(x, y), state) };
    unsafe { notify(knob, event) }
}

/// A touch sequence started. `touch_count` other than 1 is ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_touches_began(
    knob: *mut IKnob,
    x: f64,
    y: f64,
    touch_count: u32,
) -> bool {
    if knob.is_null() {
        return false;
    }
    let first = [Point::new(x, y)];
    let event = unsafe { (*knob).inner.touches_began(host_touches(&first, touch_count)) };
    unsafe { notify(knob, event) }
}

/// The touch moved. `touch_count` other than 1 is ignored.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_touches_moved(
    knob: *mut IKnob,
    x: f64,
    y: f64,
    touch_count: u32,
) -> bool {
    if knob.is_null() {
        return false;
    }
    let first = [Point::new(x, y)];
    let event = unsafe { (*knob).inner.touches_moved(host_touches(&first, touch_count)) };
    unsafe { notify(knob, event) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_touches_ended(knob: *mut IKnob) -> bool {
    if knob.is_null() {
        return false;
    }
    let event = unsafe { (*knob).inner.touches_ended() };
    unsafe { notify(knob, event) }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_touches_cancelled(knob: *mut IKnob) -> bool {
    if knob.is_null() {
        return false;
    }
    let event = unsafe { (*knob).inner.touches_cancelled() };
    unsafe { notify(knob, event) }
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Change the value range. Returns `false` (and changes nothing) if the
/// range is empty or not finite.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_range(knob: *mut IKnob, min: f32, max: f32) -> bool {
    debug!("iknob_set_range: min={}, max={}", min, max);
    if knob.is_null() {
        return false;
    }
    unsafe { (*knob).inner.set_range(min, max) }.is_ok()
}

/// Change the track angles. Returns `false` (and changes nothing) if
/// `start >= end` or the track exceeds a full turn.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_angle_range(knob: *mut IKnob, start: f64, end: f64) -> bool {
    debug!("iknob_set_angle_range: start={}, end={}", start, end);
    if knob.is_null() {
        return false;
    }
    unsafe { (*knob).inner.set_angle_range(start, end) }.is_ok()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_continuous(knob: *mut IKnob, is_continuous: bool) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_continuous(is_continuous) };
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_line_width(knob: *mut IKnob, line_width: f64) -> bool {
    if knob.is_null() {
        return false;
    }
    unsafe { (*knob).inner.set_line_width(line_width) }.is_ok()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_pointer_length(knob: *mut IKnob, pointer_length: f64) -> bool {
    if knob.is_null() {
        return false;
    }
    unsafe { (*knob).inner.set_pointer_length(pointer_length) }.is_ok()
}

/// Set the stroke color (call when the view's tint color changes).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_set_color(knob: *mut IKnob, color: IKnobColor) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_color(color.into()) };
}

/// The view was laid out with new bounds.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_update_bounds(
    knob: *mut IKnob,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.update_bounds(Rect::new(x, y, width, height)) };
}

/// Push pending style and track changes to the render model.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_refresh(knob: *mut IKnob) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.refresh() };
}

/// Whether style or track changes are waiting for `iknob_refresh`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_needs_refresh(knob: *const IKnob) -> bool {
    if knob.is_null() {
        return false;
    }
    unsafe { (*knob).inner.needs_refresh() }
}

// ═══════════════════════════════════════════════════════════════════════════
// Render Readback
// ═══════════════════════════════════════════════════════════════════════════

/// Current pointer rotation in radians.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_pointer_angle(knob: *const IKnob) -> f64 {
    if knob.is_null() {
        return 0.0;
    }
    unsafe { (*knob).inner.renderer().pointer_angle() }
}

/// Track geometry for drawing.
///
/// # Safety
/// `out_arc` must be a valid pointer to an IKnobTrackArc.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_track_arc(knob: *const IKnob, out_arc: *mut IKnobTrackArc) -> bool {
    if knob.is_null() || out_arc.is_null() {
        return false;
    }
    unsafe { *out_arc = (*knob).inner.renderer().track_arc().into() };
    true
}

/// Take the pending pointer animation, if the last move was animated.
///
/// Returns `false` if there is nothing to play.
///
/// # Safety
/// `out_animation` must be a valid pointer to an IKnobAnimation.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn iknob_take_animation(
    knob: *mut IKnob,
    out_animation: *mut IKnobAnimation,
) -> bool {
    if knob.is_null() || out_animation.is_null() {
        return false;
    }
    match unsafe { (*knob).inner.renderer_mut().take_animation() } {
        Some(animation) => {
            unsafe { *out_animation = animation.into() };
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Host {
        knob: *mut IKnob,
        seen: Vec<(f32, f32)>,
    }

    extern "C" fn read_back(context: *mut c_void, value: f32) {
        let host = unsafe { &mut *(context as *mut Host) };
        // Read the handle from inside the callback, as a Swift target would.
        let read = unsafe { iknob_value(host.knob) };
        host.seen.push((value, read));
    }

    #[test]
    fn test_callback_can_read_value_back() {
        let knob = unsafe { iknob_create(std::ptr::null()) };
        assert!(!knob.is_null());
        let mut host = Host {
            knob,
            seen: Vec::new(),
        };

        unsafe {
            iknob_update_bounds(knob, 0.0, 0.0, 100.0, 100.0);
            iknob_set_value_changed_callback(
                knob,
                Some(read_back),
                &mut host as *mut Host as *mut c_void,
            );
            assert!(iknob_touches_began(knob, 50.0, 10.0, 1));
            assert!(iknob_handle_gesture(knob, 100.0, 50.0, IKNOB_GESTURE_CHANGED));
            assert!(iknob_touches_ended(knob));
        }

        assert_eq!(host.seen.len(), 3);
        for (sent, read) in &host.seen {
            assert_eq!(sent, read);
        }
        assert!((host.seen[0].0 - 0.5).abs() < 1e-5);

        unsafe { iknob_destroy(knob) };
    }

    #[test]
    fn test_no_callback_fires_for_bogus_touch_count() {
        let knob = unsafe { iknob_create(std::ptr::null()) };
        unsafe {
            iknob_update_bounds(knob, 0.0, 0.0, 100.0, 100.0);
            assert!(!iknob_touches_began(knob, 10.0, 10.0, u32::MAX));
            assert!(!iknob_touches_began(knob, 10.0, 10.0, 0));
            assert!(iknob_touches_began(knob, 50.0, 10.0, 1));
            assert!(!iknob_touches_moved(knob, 100.0, 50.0, u32::MAX));
            assert!((iknob_value(knob) - 0.5).abs() < 1e-5);
            iknob_destroy(knob);
        }
    }

    #[test]
    fn test_unknown_gesture_state_is_ignored() {
        let knob = unsafe { iknob_create(std::ptr::null()) };
        unsafe {
            assert!(!iknob_handle_gesture(knob, 0.0, 0.0, 42));
            assert!(!iknob_handle_gesture(std::ptr::null_mut(), 0.0, 0.0, 0));
            iknob_destroy(knob);
        }
    }
}
