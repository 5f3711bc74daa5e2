use super::scene::{Scene, Shape, TextAnchor, TextShape, TooltipLine, TooltipView};
use super::{ChartRenderer, FrameContext};
use crate::domain::chart::format::format_percent;
use crate::domain::chart::scale::{DONUT_START_DEG, polar_point};
use crate::domain::chart::{ChartData, DonutGeometry, ScreenPoint};

/// A full 360° arc has coincident endpoints and would vanish.
const MAX_ARC_SWEEP_DEG: f64 = 359.99;

/// SVG path of a ring segment from `start_deg` sweeping clockwise.
pub fn annular_sector_path(center: ScreenPoint, inner: f64, outer: f64, start_deg: f64, sweep_deg: f64) -> String {
    let sweep = sweep_deg.min(MAX_ARC_SWEEP_DEG);
    let end_deg = start_deg + sweep;
    let large_arc = u8::from(sweep > 180.0);
    let (ox0, oy0) = polar_point(center.x, center.y, outer, start_deg);
    let (ox1, oy1) = polar_point(center.x, center.y, outer, end_deg);
    let (ix1, iy1) = polar_point(center.x, center.y, inner, end_deg);
    let (ix0, iy0) = polar_point(center.x, center.y, inner, start_deg);
    format!(
        "M{:.2},{:.2} A{:.2},{:.2} 0 {} 1 {:.2},{:.2} L{:.2},{:.2} A{:.2},{:.2} 0 {} 0 {:.2},{:.2} Z",
        ox0, oy0, outer, outer, large_arc, ox1, oy1, ix1, iy1, inner, inner, large_arc, ix0, iy0
    )
}

pub struct DonutRenderer<'g> {
    geometry: &'g DonutGeometry,
}

impl<'g> DonutRenderer<'g> {
    pub fn new(geometry: &'g DonutGeometry) -> Self {
        Self { geometry }
    }

    /// Center text: the total at rest, the active segment while focused.
    pub fn center_label(&self, frame: &FrameContext<'_>) -> (String, String) {
        let ChartData::Donut(points) = frame.data else {
            return (String::new(), String::new());
        };
        match frame.tooltip.focused().and_then(|i| Some((points.get(i)?, self.geometry.slots.get(i)?))) {
            Some((point, slot)) => (
                format!("{} ({})", frame.formatter.format(point.value), format_percent(slot.share)),
                point.label.clone(),
            ),
            None => (frame.formatter.format(self.geometry.total), "Total".to_string()),
        }
    }
}

impl ChartRenderer for DonutRenderer<'_> {
    fn render(&self, frame: &FrameContext<'_>, scene: &mut Scene) {
        let ChartData::Donut(points) = frame.data else {
            return;
        };
        let geo = self.geometry;
        let progress = frame.animation.progress();
        let active = frame.tooltip.focused();

        for slot in geo.slots.iter().filter(|slot| slot.is_drawn()) {
            let (inner, outer) = geo.radii(slot.index, active);
            let start = DONUT_START_DEG + (slot.start_deg - DONUT_START_DEG) * progress;
            let sweep = slot.sweep_deg * progress;
            if sweep <= 0.0 {
                continue;
            }
            let color_key = points.get(slot.index).and_then(|p| p.color_key);
            scene.plot.push(Shape::Path {
                d: annular_sector_path(geo.center, inner, outer, start, sweep),
                fill: frame.theme.color_at(slot.index, color_key),
                opacity: frame.opacity(slot.index),
            });
        }

        let (headline, caption) = self.center_label(frame);
        let size = frame.font_size();
        scene.overlay.push(Shape::Text(
            TextShape::new(geo.center, headline, size * 1.5, frame.theme.text)
                .anchored(TextAnchor::Middle)
                .bold(),
        ));
        let fitted = frame.layout.fit_label(&caption);
        scene.overlay.push(Shape::Text(
            TextShape::new(geo.center.offset(0.0, size * 1.5), fitted.text, size, frame.theme.muted_text)
                .anchored(TextAnchor::Middle)
                .with_full(fitted.full),
        ));
    }

    fn tooltip(&self, frame: &FrameContext<'_>, index: usize, _series: Option<usize>) -> Option<TooltipView> {
        let ChartData::Donut(points) = frame.data else {
            return None;
        };
        let point = points.get(index)?;
        let slot = self.geometry.slots.get(index)?;
        Some(frame.tooltip_view(
            point.label.clone(),
            vec![TooltipLine {
                label: None,
                value: format!("{} ({})", frame.formatter.format(point.value), format_percent(slot.share)),
                color: frame.theme.color_at(index, point.color_key),
            }],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_path_uses_large_arc_flag_past_half_turn() {
        let c = ScreenPoint::new(100.0, 100.0);
        assert!(annular_sector_path(c, 30.0, 50.0, -90.0, 90.0).contains(" 0 0 1 "));
        assert!(annular_sector_path(c, 30.0, 50.0, -90.0, 200.0).contains(" 0 1 1 "));
    }

    #[test]
    fn sector_path_starts_at_twelve_oclock() {
        let path = annular_sector_path(ScreenPoint::new(100.0, 100.0), 30.0, 50.0, -90.0, 45.0);
        assert!(path.starts_with("M100.00,50.00"));
    }
}
