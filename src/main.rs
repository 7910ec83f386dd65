// src/main.rs

use iknob::{GestureState, KnobConfig, KnobController, Point, Rect};

/// ===============================
/// Main
/// ===============================

fn main() {
    let size = 200.0;
    let radius = 80.0;

    // --------------------------------
    // Knob
    // --------------------------------

    let config = KnobConfig::new().range(0.0, 100.0).continuous(false);
    let mut knob = match KnobController::new(config) {
        Ok(knob) => knob,
        Err(e) => {
            println!("Invalid knob configuration: {}", e);
            return;
        }
    };
    knob.update_bounds(Rect::new(0.0, 0.0, size, size));
    knob.add_value_changed_observer(|value| println!("  -> value changed: {:.2}", value));

    // --------------------------------
    // Drag once around the track
    // --------------------------------

    println!("Starting knob sanity run…");

    let steps = 12;
    for step in 0..=steps {
        // Start in the gap below the track and sweep clockwise past the end.
        let degrees = 100.0 + 360.0 * step as f64 / steps as f64;
        let rad = degrees.to_radians();
        let touch = Point::new(size / 2.0 + radius * rad.cos(), size / 2.0 + radius * rad.sin());

        let state = match step {
            0 => GestureState::Began,
            s if s == steps => GestureState::Ended,
            _ => GestureState::Changed,
        };
        knob.handle_gesture(touch, state);

        println!(
            "{:?} @ {:>6.1}° -> value {:>6.2}, pointer {:>7.1}°",
            state,
            degrees,
            knob.value(),
            knob.current_angle().to_degrees()
        );
    }

    // --------------------------------
    // Programmatic set
    // --------------------------------

    knob.set_value(42.0, true);
    if let Some(animation) = knob.renderer_mut().take_animation() {
        println!(
            "Animated pointer: {:.1}° -> {:.1}° -> {:.1}°",
            animation.values[0].to_degrees(),
            animation.values[1].to_degrees(),
            animation.values[2].to_degrees()
        );
    }

    println!("Sanity run completed.");
}
