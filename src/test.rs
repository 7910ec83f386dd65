// src/test.rs
//
// End-to-end gesture scenarios: touches in, value-changed events out.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use crate::angle_tracker::GestureState;
use crate::config::{DEFAULT_START_ANGLE, KnobConfig};
use crate::controller::KnobController;
use crate::geometry::{Point, Rect};

const BOUNDS: Rect = Rect::new(0.0, 0.0, 200.0, 200.0);

fn knob(continuous: bool) -> (KnobController, Rc<RefCell<Vec<f32>>>) {
    let mut knob = KnobController::new(KnobConfig::new().continuous(continuous)).unwrap();
    knob.update_bounds(BOUNDS);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    knob.add_value_changed_observer(move |value| sink.borrow_mut().push(value));
    (knob, events)
}

fn touch(degrees: f64) -> Point {
    let r = degrees.to_radians();
    Point::new(100.0 + 80.0 * r.cos(), 100.0 + 80.0 * r.sin())
}

fn drag(knob: &mut KnobController, terminal: GestureState) {
    knob.handle_gesture(touch(-200.0), GestureState::Began);
    knob.handle_gesture(touch(-90.0), GestureState::Changed);
    knob.handle_gesture(touch(0.0), GestureState::Changed);
    knob.handle_gesture(touch(0.0), terminal);
}

#[test]
fn test_continuous_drag_notifies_every_sample() {
    let (mut knob, events) = knob(true);
    drag(&mut knob, GestureState::Ended);

    let events = events.borrow();
    assert_eq!(events.len(), 4);
    // Value rises monotonically as the finger turns clockwise.
    assert!(events.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*events.last().unwrap(), knob.value());
}

#[test]
fn test_discrete_drag_notifies_once_on_end() {
    let (mut knob, events) = knob(false);
    drag(&mut knob, GestureState::Ended);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    let expected = (247.5 / 315.0) as f32;
    assert!((events[0] - expected).abs() < 1e-5);
    assert_eq!(events[0], knob.value());
}

#[test]
fn test_discrete_drag_notifies_once_on_cancel() {
    let (mut knob, events) = knob(false);
    drag(&mut knob, GestureState::Cancelled);

    assert_eq!(events.borrow().len(), 1);
    assert_eq!(events.borrow()[0], knob.value());
}

#[test]
fn test_drag_through_branch_cut_is_continuous() {
    let (mut knob, events) = knob(true);

    // Sweep from 7 o'clock-ish up through 9 o'clock (the atan2 branch cut).
    knob.touches_began(&[touch(130.0)]);
    for degrees in [150.0, 170.0, 179.0, 180.0, -179.0, -170.0, -150.0] {
        knob.touches_moved(&[touch(degrees)]);
    }
    knob.touches_ended();

    let events = events.borrow();
    assert_eq!(events.len(), 9);
    assert!(
        events.windows(2).all(|w| w[0] <= w[1]),
        "value jumped across the branch cut: {:?}",
        events
    );
    assert!(events[0] > 0.0);
    assert!(*events.last().unwrap() < 1.0);
}

#[test]
fn test_dragging_past_the_end_pins_value() {
    let (mut knob, events) = knob(true);
    knob.touches_began(&[touch(0.0)]);
    knob.touches_moved(&[touch(60.0)]);
    knob.touches_moved(&[touch(85.0)]);
    assert_eq!(knob.value(), 1.0);

    // Crossing the middle of the gap flips to the minimum.
    knob.touches_moved(&[touch(95.0)]);
    assert_eq!(knob.value(), 0.0);
    assert_eq!(knob.current_angle(), DEFAULT_START_ANGLE);
    knob.touches_ended();

    assert_eq!(events.borrow().len(), 5);
}

#[test]
fn test_second_finger_is_ignored() {
    let (mut knob, events) = knob(true);
    knob.touches_began(&[touch(-90.0)]);
    let value = knob.value();

    assert!(knob.touches_moved(&[touch(0.0), touch(45.0)]).is_none());
    assert_eq!(knob.value(), value);
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn test_programmatic_value_survives_reconfiguration() {
    let (mut knob, events) = knob(true);
    knob.set_value(0.25, true);
    knob.set_angle_range(-PI, PI).unwrap();
    knob.refresh();

    assert_eq!(knob.value(), 0.25);
    assert!((knob.renderer().pointer_angle() + PI / 2.0).abs() < 1e-9);
    assert!(events.borrow().is_empty());
}
