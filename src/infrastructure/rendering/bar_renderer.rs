use super::scene::{Scene, Shape, TextAnchor, TextShape, TooltipLine, TooltipView};
use super::{ChartRenderer, FrameContext, axis_frame, value_axis};
use crate::domain::chart::{BarGeometry, ChartData, Orientation, ScreenPoint};

/// Vertical and horizontal bars share one mapping with swapped axes.
pub struct BarRenderer<'g> {
    geometry: &'g BarGeometry,
}

impl<'g> BarRenderer<'g> {
    pub fn new(geometry: &'g BarGeometry) -> Self {
        Self { geometry }
    }

    fn category_label(&self, frame: &FrameContext<'_>, index: usize) -> Option<Shape> {
        let bar = self.geometry.bars.get(index)?;
        let fitted = frame.layout.fit_label(&frame.data.label_at(index));
        let size = frame.font_size();
        let plot = frame.layout.plot;
        let text = match self.geometry.orientation {
            Orientation::Vertical => {
                TextShape::new(ScreenPoint::new(bar.band.center, plot.height + size + 6.0), fitted.text, size, frame.theme.text)
                    .anchored(TextAnchor::Middle)
            }
            Orientation::Horizontal => {
                TextShape::new(ScreenPoint::new(-8.0, bar.band.center + size / 3.0), fitted.text, size, frame.theme.text)
                    .anchored(TextAnchor::End)
            }
        };
        Some(Shape::Text(text.with_full(fitted.full)))
    }

    fn value_label(&self, frame: &FrameContext<'_>, index: usize, value: f64, progress: f64) -> Option<Shape> {
        let rect = self.geometry.rect(index, progress)?;
        let size = frame.font_size();
        let content = frame.formatter.format(value);
        let text = match self.geometry.orientation {
            Orientation::Vertical => {
                TextShape::new(ScreenPoint::new(rect.x + rect.width / 2.0, rect.y - 4.0), content, size, frame.theme.text)
                    .anchored(TextAnchor::Middle)
            }
            Orientation::Horizontal => TextShape::new(
                ScreenPoint::new(rect.x + rect.width + 4.0, rect.y + rect.height / 2.0 + size / 3.0),
                content,
                size,
                frame.theme.text,
            ),
        };
        Some(Shape::Text(text))
    }
}

impl ChartRenderer for BarRenderer<'_> {
    fn render(&self, frame: &FrameContext<'_>, scene: &mut Scene) {
        let ChartData::Bar(points) = frame.data else {
            return;
        };
        scene.axes.extend(value_axis(frame, &self.geometry.domain, self.geometry.orientation));
        scene.axes.extend(axis_frame(frame));
        scene.axes.extend(frame.tick_indices.iter().filter_map(|&i| self.category_label(frame, i)));

        for (index, point) in points.iter().enumerate() {
            let progress = frame.animation.item_progress(index);
            let Some(rect) = self.geometry.rect(index, progress) else {
                continue;
            };
            scene.plot.push(Shape::Rect {
                rect,
                fill: frame.theme.color_at(index, point.color_key),
                opacity: frame.opacity(index),
            });
            if frame.config.show_values {
                scene.plot.extend(self.value_label(frame, index, point.value, progress));
            }
        }
    }

    fn tooltip(&self, frame: &FrameContext<'_>, index: usize, _series: Option<usize>) -> Option<TooltipView> {
        let ChartData::Bar(points) = frame.data else {
            return None;
        };
        let point = points.get(index)?;
        Some(frame.tooltip_view(
            point.label.clone(),
            vec![TooltipLine {
                label: None,
                value: frame.formatter.format(point.value),
                color: frame.theme.color_at(index, point.color_key),
            }],
        ))
    }
}
