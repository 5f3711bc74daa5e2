//! Scene builders for each chart kind plus the SVG writer.

pub mod bar_renderer;
pub mod donut_renderer;
pub mod line_renderer;
pub mod scene;
pub mod svg;

pub use bar_renderer::BarRenderer;
pub use donut_renderer::DonutRenderer;
pub use line_renderer::LineRenderer;
pub use scene::{Scene, Shape, TextAnchor, TextShape, TooltipLine, TooltipView};
pub use svg::SvgWriter;

use crate::application::animation::AnimationScheduler;
use crate::application::config::ChartConfig;
use crate::application::layout::ChartLayout;
use crate::application::tooltip::TooltipState;
use crate::domain::chart::scale::ValueDomain;
use crate::domain::chart::{
    ChartData, ChartGeometry, Color, Orientation, ScreenPoint, Theme, Transform, ValueFormatter,
};

pub const NO_DATA_MESSAGE: &str = "No data available";

/// Read-only view of controller state for one frame.
pub struct FrameContext<'a> {
    pub data: &'a ChartData,
    pub config: &'a ChartConfig,
    pub theme: &'a Theme,
    pub formatter: &'a ValueFormatter,
    pub layout: &'a ChartLayout,
    pub value_ticks: usize,
    /// Category indices whose axis label is shown
    pub tick_indices: &'a [usize],
    pub geometry: Option<&'a ChartGeometry>,
    pub transform: Transform,
    pub tooltip: &'a TooltipState,
    pub animation: &'a AnimationScheduler,
}

impl FrameContext<'_> {
    pub fn font_size(&self) -> f64 {
        self.layout.rules.font_size
    }

    /// Opacity for item `index` under focus mode.
    pub fn opacity(&self, index: usize) -> f32 {
        self.theme.focus_opacity(index, self.tooltip.focused())
    }

    /// Tooltip in the theme's colors; `render_scene` positions it.
    pub fn tooltip_view(&self, title: String, lines: Vec<TooltipLine>) -> TooltipView {
        TooltipView {
            position: ScreenPoint::ORIGIN,
            title,
            lines,
            background: self.theme.tooltip_background,
            text_color: self.theme.text,
        }
    }
}

pub trait ChartRenderer {
    /// Append this chart's shapes and its tooltip to `scene`.
    fn render(&self, frame: &FrameContext<'_>, scene: &mut Scene);

    fn tooltip(&self, frame: &FrameContext<'_>, index: usize, series: Option<usize>) -> Option<TooltipView>;
}

/// Build the full frame. Empty data yields the placeholder; a suspended
/// layout yields a blank scene.
pub fn render_scene(frame: &FrameContext<'_>) -> Scene {
    let layout = frame.layout;
    if frame.data.is_empty() {
        let mut scene = Scene::placeholder(layout.width, layout.height, NO_DATA_MESSAGE);
        scene.title = frame.config.title.clone();
        return scene;
    }

    let mut scene = Scene::new(layout.width, layout.height);
    scene.title = frame.config.title.clone();
    let Some(geometry) = frame.geometry else {
        return scene;
    };
    scene.plot_origin = layout.plot_origin();
    scene.plot_size = layout.plot;
    scene.transform = frame.transform;
    scene.show_reset_zoom = frame.transform.is_zoomed();

    let renderer: Box<dyn ChartRenderer + '_> = match geometry {
        ChartGeometry::Bar(g) => Box::new(BarRenderer::new(g)),
        ChartGeometry::Line(g) => Box::new(LineRenderer::new(g)),
        ChartGeometry::Donut(g) => Box::new(DonutRenderer::new(g)),
    };
    renderer.render(frame, &mut scene);

    if let Some(index) = frame.tooltip.focused() {
        scene.tooltip = renderer.tooltip(frame, index, frame.tooltip.resolved_series).map(|mut view| {
            let screen = frame.transform.apply(frame.tooltip.anchor());
            view.position = screen.offset(scene.plot_origin.x, scene.plot_origin.y);
            view
        });
    }
    scene
}

/// Grid lines and labels for the value axis of a cartesian chart.
pub(crate) fn value_axis(frame: &FrameContext<'_>, domain: &ValueDomain, orientation: Orientation) -> Vec<Shape> {
    let plot = frame.layout.plot;
    let size = frame.font_size();
    let theme = frame.theme;
    let mut shapes = Vec::new();
    for value in domain.ticks(frame.value_ticks) {
        match orientation {
            Orientation::Vertical => {
                let y = plot.height - domain.to_pixel(value, plot.height);
                shapes.push(grid_line(ScreenPoint::new(0.0, y), ScreenPoint::new(plot.width, y), theme.grid));
                shapes.push(Shape::Text(
                    TextShape::new(ScreenPoint::new(-6.0, y + size / 3.0), frame.formatter.format(value), size, theme.muted_text)
                        .anchored(TextAnchor::End),
                ));
            }
            Orientation::Horizontal => {
                let x = domain.to_pixel(value, plot.width);
                shapes.push(grid_line(ScreenPoint::new(x, 0.0), ScreenPoint::new(x, plot.height), theme.grid));
                shapes.push(Shape::Text(
                    TextShape::new(ScreenPoint::new(x, plot.height + size + 6.0), frame.formatter.format(value), size, theme.muted_text)
                        .anchored(TextAnchor::Middle),
                ));
            }
        }
    }
    shapes
}

/// The two axis lines meeting at the plot origin corner.
pub(crate) fn axis_frame(frame: &FrameContext<'_>) -> [Shape; 2] {
    let plot = frame.layout.plot;
    let bottom_left = ScreenPoint::new(0.0, plot.height);
    [
        Shape::Line { from: ScreenPoint::ORIGIN, to: bottom_left, stroke: frame.theme.axis, width: 1.0 },
        Shape::Line { from: bottom_left, to: ScreenPoint::new(plot.width, plot.height), stroke: frame.theme.axis, width: 1.0 },
    ]
}

fn grid_line(from: ScreenPoint, to: ScreenPoint, color: Color) -> Shape {
    Shape::Line { from, to, stroke: color, width: 0.5 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::{AnimationConfig, LayoutConfig};
    use crate::application::layout::LayoutManager;
    use crate::domain::chart::{ChartKind, DataPoint, Dimensions};

    #[test]
    fn empty_data_renders_placeholder_at_configured_height() {
        let data = ChartData::Bar(vec![]);
        let config = ChartConfig::default().with_height(240.0);
        let layout = LayoutManager::new(LayoutConfig::default(), 240.0, ChartKind::Bar, Orientation::Vertical)
            .measure(500.0, true);
        let frame = FrameContext {
            data: &data,
            config: &config,
            theme: &Theme::default(),
            formatter: &ValueFormatter::default(),
            layout: &layout,
            value_ticks: 5,
            tick_indices: &[],
            geometry: None,
            transform: Transform::IDENTITY,
            tooltip: &TooltipState::hidden(),
            animation: &AnimationScheduler::new(AnimationConfig::disabled()),
        };
        let scene = render_scene(&frame);
        assert_eq!(scene.placeholder.as_deref(), Some(NO_DATA_MESSAGE));
        assert_eq!(scene.height, 240.0);
        assert_eq!(scene.shape_count(), 0);
    }

    #[test]
    fn suspended_layout_renders_nothing() {
        let data = ChartData::Bar(vec![DataPoint::new("A", 1.0)]);
        let config = ChartConfig::default();
        let layout = LayoutManager::new(LayoutConfig::default(), 300.0, ChartKind::Bar, Orientation::Vertical)
            .measure(0.0, true);
        assert_eq!(layout.plot, Dimensions::default());
        let frame = FrameContext {
            data: &data,
            config: &config,
            theme: &Theme::default(),
            formatter: &ValueFormatter::default(),
            layout: &layout,
            value_ticks: 5,
            tick_indices: &[],
            geometry: None,
            transform: Transform::IDENTITY,
            tooltip: &TooltipState::hidden(),
            animation: &AnimationScheduler::new(AnimationConfig::disabled()),
        };
        assert!(render_scene(&frame).is_blank());
    }
}
