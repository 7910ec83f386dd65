// src/lib.rs
//
// Library entry point for FFI consumers (iOS/Swift) and Rust hosts.

mod angle_tracker;
mod config;
mod controller;
mod event;
mod geometry;
mod gesture_mapper;
mod renderer;
mod value_mapper;

#[cfg(test)]
mod test;

#[cfg(feature = "ios")]
pub mod ffi;

#[cfg(feature = "web")]
pub mod wasm;

// Re-export key types for Rust consumers
pub use angle_tracker::{
    GestureState, GestureUpdate, RotationGestureRecognizer, host_touches, touch_angle,
};
pub use config::{
    Color, ConfigError, ConfigResult, DEFAULT_END_ANGLE, DEFAULT_LINE_WIDTH,
    DEFAULT_POINTER_LENGTH, DEFAULT_START_ANGLE, KnobConfig, KnobStyle,
};
pub use controller::KnobController;
pub use event::{ControlEvent, Observers, ValueChangedObserver};
pub use geometry::{Point, Rect, Size};
pub use gesture_mapper::GestureMapper;
pub use renderer::{
    KnobRenderer, PointerAnimation, PointerSegment, Renderer, TimingCurve, TrackArc,
};
pub use value_mapper::ValueMapper;
