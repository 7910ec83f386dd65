// src/gesture_mapper.rs
//
// Raw touch angle -> angle on the track.
//
// atan2 reports angles in (-π, π], with a branch cut at ±π. The track's
// angle axis is unwrapped (the default track runs from -247.5° to 67.5°),
// so raw angles that land past the branch cut have to be shifted by a full
// turn before clamping. Otherwise the pointer would jump to the wrong end
// as the finger crosses 9 o'clock.

use crate::config::{ConfigResult, KnobConfig, TAU, validate_angle_range};

/// Resolves the wrap-around between the raw touch angle and the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureMapper {
    start_angle: f64,
    end_angle: f64,
}

impl GestureMapper {
    /// Build a mapper for `start < end`, `end - start <= 2π`.
    pub fn new(start_angle: f64, end_angle: f64) -> ConfigResult<Self> {
        validate_angle_range(start_angle, end_angle)?;
        Ok(Self {
            start_angle,
            end_angle,
        })
    }

    pub fn try_from_config(config: &KnobConfig) -> ConfigResult<Self> {
        Self::new(config.start_angle, config.end_angle)
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Middle of the gap between the end and the start of the track.
    ///
    /// This is where the pointer flips between maximum and minimum.
    #[inline]
    pub fn mid_point_angle(&self) -> f64 {
        self.end_angle + (TAU + self.start_angle - self.end_angle) / 2.0
    }

    /// Map a raw touch angle onto `[start_angle, end_angle]`.
    pub fn bounded_angle(&self, raw_angle: f64) -> f64 {
        let mid_point_angle = self.mid_point_angle();
        let mut bounded = raw_angle;

        if bounded > mid_point_angle {
            // e.g. 90°..180° becomes -270°..-180° for the default track
            bounded -= TAU;
        } else if bounded < mid_point_angle - TAU {
            bounded -= TAU;
        }

        bounded.clamp(self.start_angle, self.end_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_END_ANGLE, DEFAULT_START_ANGLE};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn default_mapper() -> GestureMapper {
        GestureMapper::try_from_config(&KnobConfig::default()).unwrap()
    }

    #[test]
    fn test_mid_point_of_default_gap() {
        // Gap runs from 67.5° to 112.5°; its middle is straight down.
        assert!((default_mapper().mid_point_angle() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_angle_inside_track_passes_through() {
        let mapper = default_mapper();
        assert_eq!(mapper.bounded_angle(0.0), 0.0);
        assert_eq!(mapper.bounded_angle(-FRAC_PI_2), -FRAC_PI_2);
        assert_eq!(mapper.bounded_angle(DEFAULT_END_ANGLE), DEFAULT_END_ANGLE);
    }

    #[test]
    fn test_angle_past_branch_cut_is_unwrapped() {
        let mapper = default_mapper();
        // 170° is on the track, but numbered as -190° on the unwrapped axis.
        let raw = 170.0_f64.to_radians();
        let bounded = mapper.bounded_angle(raw);
        assert!((bounded - (-190.0_f64).to_radians()).abs() < 1e-12);

        assert!((mapper.bounded_angle(PI) + PI).abs() < 1e-12);
    }

    #[test]
    fn test_angle_just_above_mid_point_snaps_to_start() {
        let mapper = default_mapper();
        let raw = mapper.mid_point_angle() + 1e-6;
        let bounded = mapper.bounded_angle(raw);
        assert_eq!(bounded, DEFAULT_START_ANGLE);
    }

    #[test]
    fn test_angle_just_below_mid_point_snaps_to_end() {
        let mapper = default_mapper();
        let raw = mapper.mid_point_angle() - 1e-6;
        assert_eq!(mapper.bounded_angle(raw), DEFAULT_END_ANGLE);
    }

    #[test]
    fn test_output_always_on_track() {
        let configs = [
            (DEFAULT_START_ANGLE, DEFAULT_END_ANGLE),
            (-PI, 0.0),
            (0.0, PI),
            (-PI, PI),
            (-0.1, 0.1),
            (-3.0 * PI, -1.5 * PI),
        ];
        for (start, end) in configs {
            let mapper = GestureMapper::new(start, end).unwrap();
            for i in 0..=720 {
                let raw = -PI + (i as f64) * (TAU / 720.0);
                let bounded = mapper.bounded_angle(raw);
                assert!(
                    bounded >= start && bounded <= end,
                    "raw {} mapped to {} outside [{}, {}]",
                    raw,
                    bounded,
                    start,
                    end
                );
            }
        }
    }

    #[test]
    fn test_rejects_degenerate_range() {
        assert!(GestureMapper::new(1.0, 1.0).is_err());
        assert!(GestureMapper::new(1.0, 0.0).is_err());
    }
}
