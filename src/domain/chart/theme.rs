//! Immutable palette handed to each chart instance.

use super::value_objects::{Color, ColorKey};

/// Visual theme for one chart. Cloned into every controller so two charts
/// on the same page never share mutable color state.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub neutral: Color,
    /// Keys used, in order, for items that carry no explicit color key
    pub cycle: Vec<ColorKey>,
    pub axis: Color,
    pub grid: Color,
    pub text: Color,
    pub muted_text: Color,
    pub tooltip_background: Color,
    /// Opacity applied to every non-active element while a tooltip is shown
    pub dimmed_opacity: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::from_hex(0x3b82f6),
            secondary: Color::from_hex(0x8b5cf6),
            accent: Color::from_hex(0xf59e0b),
            success: Color::from_hex(0x10b981),
            warning: Color::from_hex(0xf97316),
            danger: Color::from_hex(0xef4444),
            neutral: Color::from_hex(0x64748b),
            cycle: vec![
                ColorKey::Primary,
                ColorKey::Secondary,
                ColorKey::Accent,
                ColorKey::Success,
                ColorKey::Warning,
                ColorKey::Danger,
            ],
            axis: Color::from_hex(0x475569),
            grid: Color::from_hex(0x1e293b),
            text: Color::from_hex(0xe2e8f0),
            muted_text: Color::from_hex(0x94a3b8),
            tooltip_background: Color::from_hex(0x0f172a).with_alpha(0.92),
            dimmed_opacity: 0.35,
        }
    }
}

impl Theme {
    pub fn color_for(&self, key: ColorKey) -> Color {
        match key {
            ColorKey::Primary => self.primary,
            ColorKey::Secondary => self.secondary,
            ColorKey::Accent => self.accent,
            ColorKey::Success => self.success,
            ColorKey::Warning => self.warning,
            ColorKey::Danger => self.danger,
            ColorKey::Neutral => self.neutral,
        }
    }

    /// Explicit key wins; otherwise cycle through the palette by index.
    pub fn color_at(&self, index: usize, key: Option<ColorKey>) -> Color {
        match key {
            Some(key) => self.color_for(key),
            None if self.cycle.is_empty() => self.primary,
            None => self.color_for(self.cycle[index % self.cycle.len()]),
        }
    }

    /// Opacity for an element given the currently focused index, if any.
    pub fn focus_opacity(&self, index: usize, focused: Option<usize>) -> f32 {
        match focused {
            Some(active) if active != index => self.dimmed_opacity,
            _ => 1.0,
        }
    }
}
