// src/angle_tracker.rs
//
// Touch position -> raw touch angle.
//
// The recognizer tracks exactly one finger dragged anywhere over the
// control and keeps the angle of the line joining the control's center to
// that finger.

use std::f64::consts::PI;

use crate::geometry::{Point, Rect};

/// Angle of `point` around `center`, in (-π, π].
///
/// Returns 0 when the point sits exactly on the center.
pub fn touch_angle(point: Point, center: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let angle = dy.atan2(dx);
    // atan2(-0.0, x < 0) is -π
    if angle == -PI { PI } else { angle }
}

/// Touch list for hosts that report a touch count and the first location.
///
/// Any count other than one yields no touches, which the recognizer ignores.
pub fn host_touches(first: &[Point; 1], touch_count: u32) -> &[Point] {
    if touch_count as usize == RotationGestureRecognizer::MAX_TOUCHES {
        first
    } else {
        &[]
    }
}

/// Lifecycle of one touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No touch sequence in progress.
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GestureState {
    /// `Ended` or `Cancelled`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GestureState::Ended | GestureState::Cancelled)
    }

    /// A touch sequence is currently in progress.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, GestureState::Began | GestureState::Changed)
    }
}

/// One sample produced by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    /// Raw touch angle in (-π, π].
    pub angle: f64,
    pub state: GestureState,
}

/// Single-touch rotation recognizer.
///
/// Multi-touch samples are ignored, so a second finger never hijacks the
/// dial. Ending or cancelling keeps the last tracked angle.
#[derive(Debug, Clone, Default)]
pub struct RotationGestureRecognizer {
    touch_angle: f64,
    state: GestureState,
}

impl RotationGestureRecognizer {
    pub const MAX_TOUCHES: usize = 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Angle of the most recent accepted touch.
    pub fn touch_angle(&self) -> f64 {
        self.touch_angle
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn touches_began(&mut self, touches: &[Point], bounds: Rect) -> Option<GestureUpdate> {
        let point = Self::single_touch(touches)?;
        self.touch_angle = touch_angle(point, bounds.center());
        self.state = GestureState::Began;
        Some(self.update())
    }

    pub fn touches_moved(&mut self, touches: &[Point], bounds: Rect) -> Option<GestureUpdate> {
        if !self.state.is_active() {
            return None;
        }
        let point = Self::single_touch(touches)?;
        self.touch_angle = touch_angle(point, bounds.center());
        self.state = GestureState::Changed;
        Some(self.update())
    }

    pub fn touches_ended(&mut self) -> Option<GestureUpdate> {
        self.finish(GestureState::Ended)
    }

    pub fn touches_cancelled(&mut self) -> Option<GestureUpdate> {
        self.finish(GestureState::Cancelled)
    }

    /// Return to `Possible`, ready for the next touch sequence.
    pub fn reset(&mut self) {
        self.state = GestureState::Possible;
    }

    fn finish(&mut self, terminal: GestureState) -> Option<GestureUpdate> {
        if !self.state.is_active() {
            return None;
        }
        self.state = terminal;
        let update = self.update();
        self.reset();
        Some(update)
    }

    fn update(&self) -> GestureUpdate {
        GestureUpdate {
            angle: self.touch_angle,
            state: self.state,
        }
    }

    fn single_touch(touches: &[Point]) -> Option<Point> {
        if touches.len() != Self::MAX_TOUCHES {
            return None;
        }
        touches.first().copied()
    }
}
