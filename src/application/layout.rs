//! Responsive layout: host measurement to plot extent and label rules.

use super::config::{LayoutConfig, Margins};
use super::tooltip::InteractionStrategy;
use crate::domain::chart::{ChartKind, Dimensions, Orientation, ScreenPoint};

/// Breakpoint-dependent rules for one layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRules {
    pub compact: bool,
    pub font_size: f64,
    pub max_label_chars: usize,
    pub strategy: InteractionStrategy,
}

/// A label cut to the layout's character budget. `full` keeps the original
/// text when it had to be shortened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedLabel {
    pub text: String,
    pub full: Option<String>,
}

pub fn truncate_label(label: &str, max_chars: usize) -> FittedLabel {
    if label.chars().count() <= max_chars {
        return FittedLabel { text: label.to_string(), full: None };
    }
    let keep = max_chars.saturating_sub(1);
    let mut text: String = label.chars().take(keep).collect();
    text.push('…');
    FittedLabel { text, full: Some(label.to_string()) }
}

/// Result of measuring the host
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub plot: Dimensions,
    pub rules: LayoutRules,
}

impl ChartLayout {
    /// Nothing is drawn until the host reports a usable width.
    pub fn is_suspended(&self) -> bool {
        !self.plot.is_drawable()
    }

    pub fn plot_origin(&self) -> ScreenPoint {
        ScreenPoint::new(self.margins.left, self.margins.top)
    }

    /// Host-relative point to plot-local screen space.
    pub fn to_plot_local(&self, host_point: ScreenPoint) -> ScreenPoint {
        host_point.offset(-self.margins.left, -self.margins.top)
    }

    pub fn fit_label(&self, label: &str) -> FittedLabel {
        truncate_label(label, self.rules.max_label_chars)
    }
}

pub struct LayoutManager {
    config: LayoutConfig,
    height: f64,
    kind: ChartKind,
    orientation: Orientation,
}

impl LayoutManager {
    pub fn new(config: LayoutConfig, height: f64, kind: ChartKind, orientation: Orientation) -> Self {
        Self { config, height, kind, orientation }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
    }

    /// Tap-toggle on compact layouts and on devices without a fine hover
    /// pointer.
    pub fn rules(&self, width: f64, hover_capable: bool) -> LayoutRules {
        let compact = width < self.config.mobile_breakpoint;
        LayoutRules {
            compact,
            font_size: if compact { self.config.compact_font_size } else { self.config.font_size },
            max_label_chars: if compact {
                self.config.compact_max_label_chars
            } else {
                self.config.max_label_chars
            },
            strategy: if compact || !hover_capable {
                InteractionStrategy::TapToggle
            } else {
                InteractionStrategy::Hover
            },
        }
    }

    fn margins(&self) -> Margins {
        match (self.kind, self.orientation) {
            (ChartKind::Donut, _) => self.config.donut_margins,
            (ChartKind::Bar, Orientation::Horizontal) => self.config.horizontal_margins,
            _ => self.config.cartesian_margins,
        }
    }

    pub fn measure(&self, width: f64, hover_capable: bool) -> ChartLayout {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let margins = self.margins();
        let plot = if width > 0.0 {
            Dimensions::new(
                width - margins.left - margins.right,
                self.height - margins.top - margins.bottom,
            )
        } else {
            Dimensions::new(0.0, 0.0)
        };
        ChartLayout {
            width,
            height: self.height,
            margins,
            plot,
            rules: self.rules(width, hover_capable),
        }
    }

    /// Category indices that get a visible axis label. Only line charts
    /// thin their x labels; every bar keeps its category label.
    pub fn visible_tick_indices(&self, count: usize, compact: bool) -> Vec<usize> {
        if count == 0 {
            return Vec::new();
        }
        if self.kind != ChartKind::Line {
            return (0..count).collect();
        }
        let target = if compact { (count / 2).max(1) } else { count.min(self.config.max_tick_labels) };
        let step = count.div_ceil(target).max(1);
        (0..count).step_by(step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(kind: ChartKind) -> LayoutManager {
        LayoutManager::new(LayoutConfig::default(), 300.0, kind, Orientation::Vertical)
    }

    #[test]
    fn desktop_and_mobile_rules() {
        let m = manager(ChartKind::Bar);
        let desktop = m.rules(1024.0, true);
        assert!(!desktop.compact);
        assert_eq!(desktop.font_size, 12.0);
        assert_eq!(desktop.max_label_chars, 12);
        assert_eq!(desktop.strategy, InteractionStrategy::Hover);

        let mobile = m.rules(375.0, true);
        assert!(mobile.compact);
        assert_eq!(mobile.font_size, 10.0);
        assert_eq!(mobile.max_label_chars, 8);
        assert_eq!(mobile.strategy, InteractionStrategy::TapToggle);
    }

    #[test]
    fn wide_touch_device_uses_tap_toggle() {
        assert_eq!(manager(ChartKind::Line).rules(1280.0, false).strategy, InteractionStrategy::TapToggle);
    }

    #[test]
    fn zero_width_suspends_plot() {
        let layout = manager(ChartKind::Bar).measure(0.0, true);
        assert!(layout.is_suspended());
        assert!(!manager(ChartKind::Bar).measure(400.0, true).is_suspended());
    }

    #[test]
    fn plot_extent_excludes_margins() {
        let layout = manager(ChartKind::Bar).measure(400.0, true);
        assert_eq!(layout.plot, Dimensions::new(336.0, 252.0));
        assert_eq!(layout.to_plot_local(ScreenPoint::new(48.0, 16.0)), ScreenPoint::ORIGIN);
    }

    #[test]
    fn truncation_keeps_full_text() {
        let fitted = truncate_label("Starship Super Heavy", 8);
        assert_eq!(fitted.text, "Starshi…");
        assert_eq!(fitted.full.as_deref(), Some("Starship Super Heavy"));
        assert_eq!(truncate_label("Soyuz", 8).full, None);
    }

    #[test]
    fn compact_halves_tick_labels() {
        let m = manager(ChartKind::Line);
        assert_eq!(m.visible_tick_indices(10, true), vec![0, 2, 4, 6, 8]);
        assert_eq!(m.visible_tick_indices(1, true), vec![0]);
        assert_eq!(m.visible_tick_indices(5, false), vec![0, 1, 2, 3, 4]);
        assert!(m.visible_tick_indices(24, false).len() <= 7);
        assert!(m.visible_tick_indices(0, true).is_empty());
    }

    #[test]
    fn bar_categories_are_never_thinned() {
        let m = manager(ChartKind::Bar);
        assert_eq!(m.visible_tick_indices(3, true), vec![0, 1, 2]);
        assert_eq!(m.visible_tick_indices(12, false).len(), 12);
    }
}
