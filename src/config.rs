// src/config.rs
//
// Knob configuration and validation.
//
// The host may change any of these at runtime through the controller.
// Everything that feeds the angle/value mapping is validated before it is
// accepted, so the mapping arithmetic never divides by a zero-width range.

use std::f64::consts::PI;
use std::fmt;

/// Full turn in radians.
pub const TAU: f64 = 2.0 * PI;

/// Default start of the track: 7 o'clock.
pub const DEFAULT_START_ANGLE: f64 = -PI * 11.0 / 8.0;

/// Default end of the track: 5 o'clock.
pub const DEFAULT_END_ANGLE: f64 = PI * 3.0 / 8.0;

pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
pub const DEFAULT_POINTER_LENGTH: f64 = 6.0;

// ═══════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════

/// A configuration the mapping cannot work with.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value or angle bound is NaN or infinite.
    NonFiniteValue { what: &'static str },

    /// `minimum_value >= maximum_value`.
    EmptyValueRange { min: f32, max: f32 },

    /// `start_angle == end_angle`.
    EmptyAngleRange { start: f64, end: f64 },

    /// `start_angle > end_angle`; the track runs clockwise from start to end.
    InvertedAngleRange { start: f64, end: f64 },

    /// The track covers more than one full turn.
    ArcTooWide { span: f64 },

    /// A style dimension is negative or not finite.
    InvalidStyle { what: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFiniteValue { what } => {
                write!(f, "{} must be a finite number", what)
            }
            ConfigError::EmptyValueRange { min, max } => {
                write!(
                    f,
                    "minimum value {} must be less than maximum value {}",
                    min, max
                )
            }
            ConfigError::EmptyAngleRange { start, end } => {
                write!(f, "start angle {} and end angle {} must differ", start, end)
            }
            ConfigError::InvertedAngleRange { start, end } => {
                write!(
                    f,
                    "start angle {} must be less than end angle {}",
                    start, end
                )
            }
            ConfigError::ArcTooWide { span } => {
                write!(f, "angle span {} exceeds a full turn", span)
            }
            ConfigError::InvalidStyle { what, value } => {
                write!(f, "{} must be a non-negative finite number, got {}", what, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result of a configuration change.
pub type ConfigResult<T> = Result<T, ConfigError>;

// ═══════════════════════════════════════════════════════════════════════════
// Style
// ═══════════════════════════════════════════════════════════════════════════

/// RGBA color, components in 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLUE
    }
}

/// Presentation-only settings. None of these affect the value mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobStyle {
    /// Stroke color of the track and pointer (the host's tint color).
    pub color: Color,

    /// Stroke width of the track and pointer.
    pub line_width: f64,

    /// Length of the pointer tick, measured inward from the outer edge.
    pub pointer_length: f64,
}

impl Default for KnobStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            line_width: DEFAULT_LINE_WIDTH,
            pointer_length: DEFAULT_POINTER_LENGTH,
        }
    }
}

impl KnobStyle {
    pub fn validate(&self) -> ConfigResult<()> {
        check_dimension("line width", self.line_width)?;
        check_dimension("pointer length", self.pointer_length)
    }
}

pub(crate) fn check_dimension(what: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidStyle { what, value });
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Everything the host can configure on a knob.
///
/// Angles are in radians, measured clockwise from 3 o'clock (screen
/// coordinates). The track runs clockwise from `start_angle` to
/// `end_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobConfig {
    pub minimum_value: f32,
    pub maximum_value: f32,
    pub start_angle: f64,
    pub end_angle: f64,

    /// Notify on every gesture update (`true`) or once when the gesture
    /// finishes (`false`).
    pub is_continuous: bool,

    pub style: KnobStyle,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            minimum_value: 0.0,
            maximum_value: 1.0,
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            is_continuous: true,
            style: KnobStyle::default(),
        }
    }
}

impl KnobConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.minimum_value = min;
        self.maximum_value = max;
        self
    }

    pub fn angles(mut self, start: f64, end: f64) -> Self {
        self.start_angle = start;
        self.end_angle = end;
        self
    }

    pub fn continuous(mut self, is_continuous: bool) -> Self {
        self.is_continuous = is_continuous;
        self
    }

    pub fn style(mut self, style: KnobStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    pub fn line_width(mut self, line_width: f64) -> Self {
        self.style.line_width = line_width;
        self
    }

    pub fn pointer_length(mut self, pointer_length: f64) -> Self {
        self.style.pointer_length = pointer_length;
        self
    }

    /// Angular width of the track.
    #[inline]
    pub fn angle_span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Check every invariant the mapping relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_value_range(self.minimum_value, self.maximum_value)?;
        validate_angle_range(self.start_angle, self.end_angle)?;
        self.style.validate()
    }
}

pub(crate) fn validate_value_range(min: f32, max: f32) -> ConfigResult<()> {
    if !min.is_finite() {
        return Err(ConfigError::NonFiniteValue {
            what: "minimum value",
        });
    }
    if !max.is_finite() {
        return Err(ConfigError::NonFiniteValue {
            what: "maximum value",
        });
    }
    if min >= max {
        return Err(ConfigError::EmptyValueRange { min, max });
    }
    Ok(())
}

pub(crate) fn validate_angle_range(start: f64, end: f64) -> ConfigResult<()> {
    if !start.is_finite() {
        return Err(ConfigError::NonFiniteValue {
            what: "start angle",
        });
    }
    if !end.is_finite() {
        return Err(ConfigError::NonFiniteValue { what: "end angle" });
    }
    if start == end {
        return Err(ConfigError::EmptyAngleRange { start, end });
    }
    if start > end {
        return Err(ConfigError::InvertedAngleRange { start, end });
    }
    let span = end - start;
    if span > TAU {
        return Err(ConfigError::ArcTooWide { span });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = KnobConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.minimum_value, 0.0);
        assert_eq!(config.maximum_value, 1.0);
        assert!(config.is_continuous);
        assert!((config.angle_span() - PI * 14.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_builder_chain() {
        let config = KnobConfig::new()
            .range(-10.0, 10.0)
            .angles(-PI, 0.0)
            .continuous(false)
            .line_width(4.0)
            .pointer_length(12.0);

        assert_eq!(config.minimum_value, -10.0);
        assert_eq!(config.maximum_value, 10.0);
        assert_eq!(config.start_angle, -PI);
        assert!(!config.is_continuous);
        assert_eq!(config.style.line_width, 4.0);
        assert_eq!(config.style.pointer_length, 12.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_value_range() {
        let config = KnobConfig::new().range(1.0, 1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyValueRange { min: 1.0, max: 1.0 })
        );

        let config = KnobConfig::new().range(2.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyValueRange { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_angle_ranges() {
        assert!(matches!(
            KnobConfig::new().angles(1.0, 1.0).validate(),
            Err(ConfigError::EmptyAngleRange { .. })
        ));
        assert!(matches!(
            KnobConfig::new().angles(1.0, 0.0).validate(),
            Err(ConfigError::InvertedAngleRange { .. })
        ));
        assert!(matches!(
            KnobConfig::new().angles(-PI, 1.5 * PI).validate(),
            Err(ConfigError::ArcTooWide { .. })
        ));
        // Exactly one full turn is allowed.
        assert!(KnobConfig::new().angles(-PI, PI).validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            KnobConfig::new().range(f32::NAN, 1.0).validate(),
            Err(ConfigError::NonFiniteValue { .. })
        ));
        assert!(matches!(
            KnobConfig::new().angles(0.0, f64::INFINITY).validate(),
            Err(ConfigError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_style() {
        assert!(matches!(
            KnobConfig::new().line_width(-1.0).validate(),
            Err(ConfigError::InvalidStyle { what: "line width", .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::EmptyValueRange { min: 1.0, max: 1.0 };
        assert_eq!(
            err.to_string(),
            "minimum value 1 must be less than maximum value 1"
        );
    }
}
