use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr)]
pub enum ChartKind {
    #[display(fmt = "Bar")]
    #[strum(serialize = "bar")]
    Bar,
    #[display(fmt = "Line")]
    #[strum(serialize = "line")]
    Line,
    #[display(fmt = "Donut")]
    #[strum(serialize = "donut")]
    Donut,
}

/// Value Object - Bar orientation
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    #[display(fmt = "vertical")]
    #[strum(serialize = "vertical")]
    Vertical,
    #[display(fmt = "horizontal")]
    #[strum(serialize = "horizontal")]
    Horizontal,
}

/// Value Object - Semantic color slot resolved through a `Theme`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ColorKey {
    #[display(fmt = "primary")]
    Primary,
    #[display(fmt = "secondary")]
    Secondary,
    #[display(fmt = "accent")]
    Accent,
    #[display(fmt = "success")]
    Success,
    #[display(fmt = "warning")]
    Warning,
    #[display(fmt = "danger")]
    Danger,
    #[display(fmt = "neutral")]
    Neutral,
}

/// One labelled value of a bar or donut chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_key: Option<ColorKey>,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value, color_key: None }
    }

    pub fn with_color(mut self, key: ColorKey) -> Self {
        self.color_key = Some(key);
        self
    }
}

/// Named sequence of values sharing the chart's index space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_key: Option<ColorKey>,
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self { name: name.into(), data, color_key: None }
    }

    pub fn with_color(mut self, key: ColorKey) -> Self {
        self.color_key = Some(key);
        self
    }
}

/// Value Object - Measured size of the host container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Negative or non-finite measurements collapse to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: non_negative(width), height: non_negative(height) }
    }

    /// Zero in either direction means there is nothing to lay out yet.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const ORIGIN: ScreenPoint = ScreenPoint { x: 0.0, y: 0.0 };

    pub fn distance_to(&self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(&self, other: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> ScreenPoint {
        ScreenPoint::new(self.x + dx, self.y + dy)
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_hex(&self) -> u32 {
        let r = (self.r * 255.0).round() as u32;
        let g = (self.g * 255.0).round() as u32;
        let b = (self.b * 255.0).round() as u32;
        (r << 16) | (g << 8) | b
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// CSS color string, `#rrggbb` when opaque
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            format!(
                "rgba({}, {}, {}, {:.2})",
                (self.r * 255.0).round() as u8,
                (self.g * 255.0).round() as u8,
                (self.b * 255.0).round() as u8,
                self.a
            )
        }
    }

    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn dimensions_never_negative() {
        let dims = Dimensions::new(-20.0, f64::NAN);
        assert_eq!(dims, Dimensions::new(0.0, 0.0));
        assert!(!dims.is_drawable());
        assert!(Dimensions::new(400.0, 300.0).is_drawable());
    }

    #[test]
    fn color_css_roundtrip() {
        let c = Color::from_hex(0x3b82f6);
        assert_eq!(c.to_css(), "#3b82f6");
        assert_eq!(c.with_alpha(0.5).to_css(), "rgba(59, 130, 246, 0.50)");
    }

    #[test]
    fn color_key_parses_kebab_case() {
        assert_eq!(ColorKey::from_str("accent").unwrap(), ColorKey::Accent);
        let parsed: ColorKey = serde_json::from_str("\"danger\"").unwrap();
        assert_eq!(parsed, ColorKey::Danger);
    }

    #[test]
    fn data_point_deserializes_camel_case() {
        let point: DataPoint =
            serde_json::from_str(r#"{"label":"LEO","value":2700,"colorKey":"success"}"#).unwrap();
        assert_eq!(point, DataPoint::new("LEO", 2700.0).with_color(ColorKey::Success));
    }
}
