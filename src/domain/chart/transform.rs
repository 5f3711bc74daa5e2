//! Zoom/pan transform applied to a chart's plot group.

use super::value_objects::{Dimensions, ScreenPoint};

/// Charts never shrink below their native size.
pub const MIN_SCALE: f64 = 1.0;
/// Upper zoom bound shared by wheel and pinch input.
pub const MAX_SCALE: f64 = 5.0;

/// Plot-space to screen-space mapping: `screen = plot * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform { scale: 1.0, translate_x: 0.0, translate_y: 0.0 };

    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self { scale: clamp_scale(scale), translate_x, translate_y }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale != MIN_SCALE
    }

    /// Plot-space point to screen space.
    pub fn apply(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            point.x * self.scale + self.translate_x,
            point.y * self.scale + self.translate_y,
        )
    }

    /// Screen-space point back to plot space.
    pub fn invert(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            (point.x - self.translate_x) / self.scale,
            (point.y - self.translate_y) / self.scale,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { translate_x: self.translate_x + dx, translate_y: self.translate_y + dy, ..*self }
    }

    /// Keep the scaled plot covering the viewport: each translate component
    /// stays within `[extent * (1 - scale), 0]`.
    pub fn bounded(&self, extent: Dimensions) -> Self {
        let bound = |t: f64, size: f64| {
            let lower = size * (1.0 - self.scale);
            if t.is_finite() { t.clamp(lower.min(0.0), 0.0) } else { 0.0 }
        };
        Self {
            scale: self.scale,
            translate_x: bound(self.translate_x, extent.width),
            translate_y: bound(self.translate_y, extent.height),
        }
    }

    /// Linear blend used by the eased reset transition.
    pub fn lerp(&self, target: &Transform, t: f64) -> Transform {
        let t = t.clamp(0.0, 1.0);
        Transform {
            scale: self.scale + (target.scale - self.scale) * t,
            translate_x: self.translate_x + (target.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (target.translate_y - self.translate_y) * t,
        }
    }

    /// SVG/CSS `matrix()` form.
    pub fn to_css_matrix(&self) -> String {
        format!(
            "matrix({:.4} 0 0 {:.4} {:.2} {:.2})",
            self.scale, self.scale, self.translate_x, self.translate_y
        )
    }
}

pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() { scale.clamp(MIN_SCALE, MAX_SCALE) } else { MIN_SCALE }
}

/// Zoom by `scale_delta` keeping the plot point under `pointer` fixed.
pub fn anchor_zoom(old: Transform, pointer: ScreenPoint, scale_delta: f64) -> Transform {
    let new_scale = clamp_scale(old.scale * scale_delta);
    let anchor = old.invert(pointer);
    Transform {
        scale: new_scale,
        translate_x: pointer.x - anchor.x * new_scale,
        translate_y: pointer.y - anchor.y * new_scale,
    }
}
