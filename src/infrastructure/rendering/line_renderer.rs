use super::scene::{Scene, Shape, TextAnchor, TextShape, TooltipLine, TooltipView};
use super::{ChartRenderer, FrameContext, axis_frame, value_axis};
use crate::domain::chart::scale::point_position;
use crate::domain::chart::{ChartData, LineGeometry, Orientation, ScreenPoint};

const POINT_RADIUS: f64 = 3.5;
const ACTIVE_POINT_RADIUS: f64 = 5.5;
const STROKE_WIDTH: f64 = 2.0;

pub struct LineRenderer<'g> {
    geometry: &'g LineGeometry,
}

impl<'g> LineRenderer<'g> {
    pub fn new(geometry: &'g LineGeometry) -> Self {
        Self { geometry }
    }
}

impl ChartRenderer for LineRenderer<'_> {
    fn render(&self, frame: &FrameContext<'_>, scene: &mut Scene) {
        let ChartData::Line { series, .. } = frame.data else {
            return;
        };
        let geo = self.geometry;
        let plot = frame.layout.plot;
        let size = frame.font_size();

        scene.axes.extend(value_axis(frame, &geo.domain, Orientation::Vertical));
        scene.axes.extend(axis_frame(frame));
        for &index in frame.tick_indices {
            let fitted = frame.layout.fit_label(&frame.data.label_at(index));
            let x = point_position(index, geo.count, plot.width);
            scene.axes.push(Shape::Text(
                TextShape::new(ScreenPoint::new(x, plot.height + size + 6.0), fitted.text, size, frame.theme.text)
                    .anchored(TextAnchor::Middle)
                    .with_full(fitted.full),
            ));
        }

        let focused_series = frame.tooltip.focused().and(frame.tooltip.resolved_series);
        for (s, line) in series.iter().enumerate() {
            let color = frame.theme.color_at(s, line.color_key);
            let opacity = frame.theme.focus_opacity(s, focused_series);
            let progress = frame.animation.item_progress(s);
            let points: Vec<ScreenPoint> =
                (0..line.data.len()).filter_map(|i| geo.animated_point(s, i, progress)).collect();
            if points.len() > 1 {
                scene.plot.push(Shape::Polyline { points: points.clone(), stroke: color, width: STROKE_WIDTH, opacity });
            }
            for (i, center) in points.into_iter().enumerate() {
                let active = focused_series == Some(s) && frame.tooltip.focused() == Some(i);
                scene.plot.push(Shape::Circle {
                    center,
                    radius: if active { ACTIVE_POINT_RADIUS } else { POINT_RADIUS },
                    fill: color,
                    opacity,
                });
            }
        }
    }

    fn tooltip(&self, frame: &FrameContext<'_>, index: usize, series: Option<usize>) -> Option<TooltipView> {
        let ChartData::Line { series: all, .. } = frame.data else {
            return None;
        };
        let s = series.unwrap_or(0);
        let line = all.get(s)?;
        let value = *line.data.get(index)?;
        Some(frame.tooltip_view(
            frame.data.label_at(index),
            vec![TooltipLine {
                label: Some(line.name.clone()),
                value: frame.formatter.format(value),
                color: frame.theme.color_at(s, line.color_key),
            }],
        ))
    }
}
