// src/renderer.rs
//
// Presentation side of the knob.
//
// The controller never draws. It pushes bounds, style, track angles and
// pointer moves through the `Renderer` trait, and the host turns them into
// layers/paths/animations. `KnobRenderer` is the headless render model the
// FFI and wasm surfaces read back from.

use crate::config::{DEFAULT_END_ANGLE, DEFAULT_START_ANGLE, KnobStyle};
use crate::geometry::{Point, Rect};

/// Receiver of presentation updates.
///
/// Implementors:
/// - do NOT compute values or angles
/// - only record or display what they are given
pub trait Renderer {
    /// Reposition/resize the track and pointer.
    fn update_bounds(&mut self, bounds: Rect);

    /// Rotate the pointer to `angle`, optionally animated.
    fn set_pointer_angle(&mut self, angle: f64, animated: bool);

    /// Apply color, line width and pointer length.
    fn set_style(&mut self, style: &KnobStyle);

    /// Redraw the track between `start_angle` and `end_angle`.
    fn set_track(&mut self, start_angle: f64, end_angle: f64);
}

/// Timing curve the host should use for pointer animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingCurve {
    #[default]
    EaseInEaseOut,
}

/// Keyframed pointer rotation.
///
/// The midpoint keyframe pins the direction of travel, so the pointer
/// never takes the short way round through the gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerAnimation {
    /// Rotation at each keyframe: start, midpoint, end.
    pub values: [f64; 3],

    /// Normalized time of each keyframe.
    pub key_times: [f64; 3],

    pub timing: TimingCurve,
}

impl PointerAnimation {
    pub fn between(from: f64, to: f64) -> Self {
        let low = from.min(to);
        let high = from.max(to);
        let mid = (high - low) / 2.0 + low;
        Self {
            values: [from, mid, to],
            key_times: [0.0, 0.5, 1.0],
            timing: TimingCurve::EaseInEaseOut,
        }
    }

    pub fn from_angle(&self) -> f64 {
        self.values[0]
    }

    pub fn to_angle(&self) -> f64 {
        self.values[2]
    }
}

/// Circular track geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
}

/// Unrotated pointer tick, in bounds coordinates. The host rotates it by
/// the pointer angle around the bounds center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSegment {
    pub from: Point,
    pub to: Point,
}

/// Headless render model.
#[derive(Debug, Clone)]
pub struct KnobRenderer {
    bounds: Rect,
    style: KnobStyle,
    start_angle: f64,
    end_angle: f64,
    pointer_angle: f64,
    animation: Option<PointerAnimation>,
}

impl Default for KnobRenderer {
    fn default() -> Self {
        Self {
            bounds: Rect::default(),
            style: KnobStyle::default(),
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            pointer_angle: DEFAULT_START_ANGLE,
            animation: None,
        }
    }
}

impl KnobRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn style(&self) -> &KnobStyle {
        &self.style
    }

    pub fn pointer_angle(&self) -> f64 {
        self.pointer_angle
    }

    /// Most recent animation, if the last pointer move was animated.
    pub fn animation(&self) -> Option<&PointerAnimation> {
        self.animation.as_ref()
    }

    /// Hand the pending animation to the host.
    pub fn take_animation(&mut self) -> Option<PointerAnimation> {
        self.animation.take()
    }

    pub fn track_arc(&self) -> TrackArc {
        let offset = self.style.pointer_length.max(self.style.line_width / 2.0);
        let radius = self.bounds.width().min(self.bounds.height()) / 2.0 - offset;
        TrackArc {
            center: self.bounds.center(),
            radius: radius.max(0.0),
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            clockwise: true,
        }
    }

    pub fn pointer_segment(&self) -> PointerSegment {
        let width = self.bounds.width();
        let mid_y = self.bounds.height() / 2.0;
        PointerSegment {
            from: Point::new(
                width - self.style.pointer_length - self.style.line_width / 2.0,
                mid_y,
            ),
            to: Point::new(width, mid_y),
        }
    }
}

impl Renderer for KnobRenderer {
    fn update_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn set_pointer_angle(&mut self, angle: f64, animated: bool) {
        self.animation = if animated {
            Some(PointerAnimation::between(self.pointer_angle, angle))
        } else {
            None
        };
        self.pointer_angle = angle;
    }

    fn set_style(&mut self, style: &KnobStyle) {
        self.style = *style;
    }

    fn set_track(&mut self, start_angle: f64, end_angle: f64) {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_arc_radius() {
        let mut renderer = KnobRenderer::new();
        renderer.update_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));

        let arc = renderer.track_arc();
        assert_eq!(arc.center, Point::new(100.0, 50.0));
        // min(200, 100) / 2 - max(6, 1)
        assert_eq!(arc.radius, 44.0);
        assert_eq!(arc.start_angle, DEFAULT_START_ANGLE);
        assert!(arc.clockwise);

        renderer.set_style(&KnobStyle {
            line_width: 20.0,
            ..KnobStyle::default()
        });
        assert_eq!(renderer.track_arc().radius, 40.0);
    }

    #[test]
    fn test_pointer_segment() {
        let mut renderer = KnobRenderer::new();
        renderer.update_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        let segment = renderer.pointer_segment();
        assert_eq!(segment.from, Point::new(93.0, 50.0));
        assert_eq!(segment.to, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_animated_move_records_keyframes() {
        let mut renderer = KnobRenderer::new();
        renderer.set_pointer_angle(-1.0, false);
        assert!(renderer.animation().is_none());

        renderer.set_pointer_angle(1.0, true);
        let animation = renderer.take_animation().unwrap();
        assert_eq!(animation.values, [-1.0, 0.0, 1.0]);
        assert_eq!(animation.key_times, [0.0, 0.5, 1.0]);
        assert_eq!(animation.timing, TimingCurve::EaseInEaseOut);
        assert_eq!(renderer.pointer_angle(), 1.0);
        assert!(renderer.take_animation().is_none());
    }

    #[test]
    fn test_animation_midpoint_is_order_independent() {
        let down = PointerAnimation::between(2.0, -2.0);
        assert_eq!(down.values, [2.0, 0.0, -2.0]);
        assert_eq!(down.from_angle(), 2.0);
        assert_eq!(down.to_angle(), -2.0);
    }
}
