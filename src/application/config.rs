//! Configuration for a chart instance and its controllers.

use crate::domain::chart::{FormatSpec, Orientation, ValueFormatter};
use crate::domain::errors::ChartResult;
use serde::{Deserialize, Serialize};

/// Caller-facing chart options. Deserializes from camelCase JSON with every
/// field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// Fixed plot height in pixels; width always comes from the host
    pub height: f64,
    pub orientation: Orientation,
    pub show_values: bool,
    pub animate: bool,
    pub title: Option<String>,
    pub format: FormatSpec,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            orientation: Orientation::Vertical,
            show_values: false,
            animate: true,
            title: None,
            format: FormatSpec::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::from_spec(&self.format)
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_values(mut self, show_values: bool) -> Self {
        self.show_values = show_values;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Space reserved around the plot for axes and labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Responsive breakpoints and label rules
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Widths below this use the compact (mobile) rules
    pub mobile_breakpoint: f64,
    pub font_size: f64,
    pub compact_font_size: f64,
    pub max_label_chars: usize,
    pub compact_max_label_chars: usize,
    /// Upper bound on visible line-chart tick labels in the default layout
    pub max_tick_labels: usize,
    /// Number of value-axis ticks
    pub value_ticks: usize,
    pub cartesian_margins: Margins,
    /// Horizontal bars need room for category labels on the left
    pub horizontal_margins: Margins,
    pub donut_margins: Margins,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 640.0,
            font_size: 12.0,
            compact_font_size: 10.0,
            max_label_chars: 12,
            compact_max_label_chars: 8,
            max_tick_labels: 7,
            value_ticks: 5,
            cartesian_margins: Margins { top: 16.0, right: 16.0, bottom: 32.0, left: 48.0 },
            horizontal_margins: Margins { top: 16.0, right: 24.0, bottom: 28.0, left: 88.0 },
            donut_margins: Margins { top: 8.0, right: 8.0, bottom: 8.0, left: 8.0 },
        }
    }
}

/// Gesture tuning
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Exponent applied per wheel delta unit
    pub wheel_sensitivity: f64,
    /// Bounds on the per-event wheel factor
    pub wheel_factor_range: (f64, f64),
    pub double_tap_ms: f64,
    pub double_tap_slop_px: f64,
    /// Movement below this still counts as a tap
    pub tap_slop_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 0.002,
            wheel_factor_range: (0.5, 2.0),
            double_tap_ms: 300.0,
            double_tap_slop_px: 30.0,
            tap_slop_px: 10.0,
        }
    }
}

/// Timing of mount/update animations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub duration_ms: f64,
    /// Delay added per item index before its own animation starts
    pub stagger_ms: f64,
}

impl AnimationConfig {
    /// Bar and line shape growth
    pub fn shapes() -> Self {
        Self { enabled: true, duration_ms: 600.0, stagger_ms: 100.0 }
    }

    /// Donut sweep
    pub fn sweep() -> Self {
        Self { enabled: true, duration_ms: 1000.0, stagger_ms: 0.0 }
    }

    /// Eased return to the identity transform after a reset
    pub fn zoom_reset() -> Self {
        Self { enabled: true, duration_ms: 300.0, stagger_ms: 0.0 }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::shapes() }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::shapes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(ChartConfig::from_json("{}").unwrap(), ChartConfig::default());
    }

    #[test]
    fn camel_case_fields_parse() {
        let cfg = ChartConfig::from_json(
            r#"{"height":240,"orientation":"horizontal","showValues":true,"animate":false,"title":"Cost per kg","format":{"prefix":"$"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.height, 240.0);
        assert_eq!(cfg.orientation, Orientation::Horizontal);
        assert!(cfg.show_values);
        assert!(!cfg.animate);
        assert_eq!(cfg.formatter().format(1500.0), "$1500");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(ChartConfig::from_json("{\"height\":").is_err());
    }
}
