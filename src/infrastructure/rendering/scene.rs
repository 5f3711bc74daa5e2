//! Renderer-neutral description of one chart frame.
//!
//! Coordinates in `plot` are plot-local and drawn under `transform`;
//! `axes` and `overlay` are plot-local but never transformed; the tooltip
//! is positioned in host coordinates.

use crate::domain::chart::{Color, Dimensions, ScreenPoint, Transform};
use crate::domain::chart::geometry::Rect;
use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub position: ScreenPoint,
    pub content: String,
    /// Untruncated text, shown as a native tooltip when present
    pub full: Option<String>,
    pub size: f64,
    pub color: Color,
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextShape {
    pub fn new(position: ScreenPoint, content: impl Into<String>, size: f64, color: Color) -> Self {
        Self {
            position,
            content: content.into(),
            full: None,
            size,
            color,
            anchor: TextAnchor::Start,
            bold: false,
        }
    }

    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_full(mut self, full: Option<String>) -> Self {
        self.full = full;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { rect: Rect, fill: Color, opacity: f32 },
    /// Closed outline, used for donut segments
    Path { d: String, fill: Color, opacity: f32 },
    Polyline { points: Vec<ScreenPoint>, stroke: Color, width: f64, opacity: f32 },
    Circle { center: ScreenPoint, radius: f64, fill: Color, opacity: f32 },
    Line { from: ScreenPoint, to: ScreenPoint, stroke: Color, width: f64 },
    Text(TextShape),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub label: Option<String>,
    pub value: String,
    pub color: Color,
}

/// Tooltip box in host coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView {
    pub position: ScreenPoint,
    pub title: String,
    pub lines: Vec<TooltipLine>,
    pub background: Color,
    pub text_color: Color,
}

impl TooltipView {
    /// Single-line text form, used for `aria-live` announcements.
    pub fn summary(&self) -> String {
        let values: Vec<String> = self
            .lines
            .iter()
            .map(|l| match &l.label {
                Some(label) => format!("{}: {}", label, l.value),
                None => l.value.clone(),
            })
            .collect();
        format!("{}: {}", self.title, values.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub plot_origin: ScreenPoint,
    pub plot_size: Dimensions,
    pub transform: Transform,
    pub axes: Vec<Shape>,
    pub plot: Vec<Shape>,
    pub overlay: Vec<Shape>,
    pub tooltip: Option<TooltipView>,
    pub placeholder: Option<String>,
    pub show_reset_zoom: bool,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            title: None,
            plot_origin: ScreenPoint::ORIGIN,
            plot_size: Dimensions::default(),
            transform: Transform::IDENTITY,
            axes: Vec::new(),
            plot: Vec::new(),
            overlay: Vec::new(),
            tooltip: None,
            placeholder: None,
            show_reset_zoom: false,
        }
    }

    /// Empty-state frame keeping the configured height.
    pub fn placeholder(width: f64, height: f64, message: impl Into<String>) -> Self {
        Self { placeholder: Some(message.into()), ..Self::new(width, height) }
    }

    pub fn shape_count(&self) -> usize {
        self.axes.len() + self.plot.len() + self.overlay.len()
    }

    pub fn is_blank(&self) -> bool {
        self.shape_count() == 0 && self.placeholder.is_none()
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, f32)> {
        self.plot.iter().filter_map(|s| match s {
            Shape::Rect { rect, opacity, .. } => Some((rect, *opacity)),
            _ => None,
        })
    }

    /// All text content, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.axes.iter().chain(&self.plot).chain(&self.overlay).filter_map(|s| match s {
            Shape::Text(t) => Some(t),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_scene_is_not_blank() {
        let scene = Scene::placeholder(320.0, 300.0, "No data available");
        assert_eq!(scene.shape_count(), 0);
        assert!(!scene.is_blank());
        assert_eq!(scene.height, 300.0);
    }

    #[test]
    fn tooltip_summary_joins_lines() {
        let view = TooltipView {
            position: ScreenPoint::ORIGIN,
            title: "2022".into(),
            lines: vec![TooltipLine { label: Some("SpaceX".into()), value: "61".into(), color: Color::WHITE }],
            background: Color::from_hex(0x0f172a),
            text_color: Color::WHITE,
        };
        assert_eq!(view.summary(), "2022: SpaceX: 61");
    }
}
