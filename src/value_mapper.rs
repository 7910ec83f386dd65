// src/value_mapper.rs
//
// Linear mapping between track angles and knob values.
//
// Values are f32 and angles are f64, matching the host platform's Float and
// CGFloat. The angle -> value direction computes in f32.

use crate::config::{ConfigResult, KnobConfig, validate_angle_range, validate_value_range};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueMapper {
    minimum_value: f32,
    maximum_value: f32,
    start_angle: f64,
    end_angle: f64,
}

impl ValueMapper {
    /// Build a mapper. Zero-width ranges are rejected so the mapping can
    /// never divide by zero.
    pub fn new(
        minimum_value: f32,
        maximum_value: f32,
        start_angle: f64,
        end_angle: f64,
    ) -> ConfigResult<Self> {
        validate_value_range(minimum_value, maximum_value)?;
        validate_angle_range(start_angle, end_angle)?;
        Ok(Self {
            minimum_value,
            maximum_value,
            start_angle,
            end_angle,
        })
    }

    pub fn try_from_config(config: &KnobConfig) -> ConfigResult<Self> {
        Self::new(
            config.minimum_value,
            config.maximum_value,
            config.start_angle,
            config.end_angle,
        )
    }

    #[inline]
    pub fn value_range(&self) -> f32 {
        self.maximum_value - self.minimum_value
    }

    #[inline]
    pub fn angle_range(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[inline]
    pub fn clamp_value(&self, value: f32) -> f32 {
        value.clamp(self.minimum_value, self.maximum_value)
    }

    /// Value for a track angle, clamped to the value range.
    pub fn angle_to_value(&self, angle: f64) -> f32 {
        let fraction = (angle - self.start_angle) as f32 / self.angle_range() as f32;
        self.clamp_value(fraction * self.value_range() + self.minimum_value)
    }

    /// Track angle for a value. Does not clamp; callers pass clamped values.
    pub fn value_to_angle(&self, value: f32) -> f64 {
        let fraction = (value - self.minimum_value) as f64 / self.value_range() as f64;
        fraction * self.angle_range() + self.start_angle
    }
}
