use super::animation::{AnimationScheduler, FrameStatus, TransformTransition};
use super::config::{AnimationConfig, ChartConfig, GestureConfig, LayoutConfig};
use super::gesture::{GestureController, GestureEvent, GestureOutcome};
use super::layout::{ChartLayout, LayoutManager};
use super::tooltip::{InteractionStrategy, PointerInput, TooltipController, TooltipState};
use crate::domain::chart::{
    ChartData, ChartGeometry, ChartKind, ExportTable, Hit, ScreenPoint, Theme, Transform, ValueFormatter,
};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};
use crate::infrastructure::rendering::{FrameContext, Scene, render_scene};

/// One chart instance: owns the data and every piece of interaction state,
/// and turns host events into re-renderable frames.
///
/// All positions passed in are host-relative (client position minus the
/// host's bounding rect).
pub struct ChartController {
    data: ChartData,
    config: ChartConfig,
    theme: Theme,
    formatter: ValueFormatter,
    layout_manager: LayoutManager,
    layout: ChartLayout,
    tick_indices: Vec<usize>,
    geometry: Option<ChartGeometry>,
    gesture: GestureController,
    animation: AnimationScheduler,
    reset_transition: Option<TransformTransition>,
    tooltips: TooltipController,
    /// Mount animation waits until the first drawable measurement
    pending_start: bool,
    torn_down: bool,
}

impl ChartController {
    pub fn new(data: ChartData, config: ChartConfig, theme: Theme) -> Self {
        let kind = data.kind();
        let layout_manager = LayoutManager::new(LayoutConfig::default(), config.height, kind, config.orientation);
        let layout = layout_manager.measure(0.0, true);
        let animation = AnimationScheduler::new(Self::animation_config(kind, config.animate));
        let formatter = config.formatter();

        log_debug!(
            LogComponent::Application("ChartController"),
            "Creating {} chart with {} items",
            kind.as_ref(),
            data.len()
        );

        Self {
            data: Self::checked(data),
            config,
            theme,
            formatter,
            tick_indices: Vec::new(),
            geometry: None,
            gesture: GestureController::new(GestureConfig::default(), layout.plot),
            animation,
            reset_transition: None,
            tooltips: TooltipController::new(layout.rules.strategy),
            layout_manager,
            layout,
            pending_start: true,
            torn_down: false,
        }
    }

    fn animation_config(kind: ChartKind, animate: bool) -> AnimationConfig {
        match (animate, kind) {
            (false, _) => AnimationConfig::disabled(),
            (true, ChartKind::Donut) => AnimationConfig::sweep(),
            (true, _) => AnimationConfig::shapes(),
        }
    }

    /// Invalid values are logged and zeroed so the chart still renders.
    fn checked(data: ChartData) -> ChartData {
        match data.validate() {
            Ok(()) => data,
            Err(e) => {
                log_warn!(LogComponent::Application("ChartController"), "Sanitizing chart data: {}", e);
                data.sanitized()
            }
        }
    }

    fn animated_items(&self) -> usize {
        match &self.data {
            ChartData::Bar(points) => points.len(),
            ChartData::Line { series, .. } => series.len(),
            ChartData::Donut(_) => 1,
        }
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn geometry(&self) -> Option<&ChartGeometry> {
        self.geometry.as_ref()
    }

    pub fn tooltip(&self) -> &TooltipState {
        self.tooltips.active()
    }

    pub fn strategy(&self) -> InteractionStrategy {
        self.tooltips.strategy()
    }

    pub fn set_formatter(&mut self, formatter: ValueFormatter) {
        self.formatter = formatter;
    }

    /// Replace the data, restarting the mount animation. Returns whether
    /// frames should be scheduled.
    pub fn set_data(&mut self, data: ChartData, now: f64) -> bool {
        if self.torn_down {
            return false;
        }
        let kind = data.kind();
        if kind != self.data.kind() {
            self.layout_manager.set_kind(kind);
            self.animation = AnimationScheduler::new(Self::animation_config(kind, self.config.animate));
        }
        self.data = Self::checked(data);
        self.tooltips.hide_all();
        self.relayout();
        self.restart_animation(now)
    }

    fn restart_animation(&mut self, now: f64) -> bool {
        if self.geometry.is_none() {
            self.pending_start = true;
            return false;
        }
        self.pending_start = false;
        self.animation.start(now, self.animated_items())
    }

    fn relayout(&mut self) {
        self.geometry = ChartGeometry::compute(&self.data, self.config.orientation, self.layout.plot);
        match &self.geometry {
            Some(geometry) => self
                .tooltips
                .reanchor(|state| geometry.anchor(state.resolved_index?, state.resolved_series)),
            None => self.tooltips.hide_all(),
        }
        self.tick_indices =
            self.layout_manager.visible_tick_indices(self.data.len(), self.layout.rules.compact);
        self.gesture.set_extent(self.layout.plot);
    }

    /// Remeasure against a new host width. Geometry stays suspended while
    /// the width is zero.
    pub fn resize(&mut self, width: f64, hover_capable: bool, now: f64) -> bool {
        if self.torn_down {
            return false;
        }
        let layout = self.layout_manager.measure(width, hover_capable);
        if layout == self.layout && self.geometry.is_some() {
            return false;
        }
        log_debug!(
            LogComponent::Application("ChartController"),
            "Layout {}x{} (compact: {})",
            layout.width,
            layout.height,
            layout.rules.compact
        );
        self.tooltips.set_strategy(layout.rules.strategy);
        self.layout = layout;
        self.relayout();
        if self.pending_start {
            self.restart_animation(now);
        }
        true
    }

    fn hit_at(&self, host_point: ScreenPoint) -> Option<Hit> {
        let geometry = self.geometry.as_ref()?;
        let local = self.layout.to_plot_local(host_point);
        let plot_point = self.current_transform().invert(local);
        geometry.hit_test(plot_point, self.tooltips.active().focused(), self.animation.progress())
    }

    /// Feed a gesture. Returns whether a re-render is needed.
    pub fn handle_gesture(&mut self, event: GestureEvent, now: f64) -> bool {
        if self.torn_down || self.geometry.is_none() {
            return false;
        }
        let hover_point = match &event {
            GestureEvent::Move { points } if points.len() == 1 => points.first().copied(),
            _ => None,
        };
        let event = self.to_plot_local(event);
        let outcome = self.gesture.handle(event);
        let mut changed = match outcome {
            GestureOutcome::Unchanged => false,
            GestureOutcome::Updated => {
                self.reset_transition = None;
                true
            }
            GestureOutcome::Reset { from } => {
                self.reset_transition = Some(TransformTransition::new(
                    from,
                    Transform::IDENTITY,
                    AnimationConfig::zoom_reset(),
                    now,
                ));
                true
            }
            GestureOutcome::Tap(position) => {
                let host = position.offset(self.layout.margins.left, self.layout.margins.top);
                let hit = self.hit_at(host);
                self.tooltips.handle(PointerInput::Tap(hit))
            }
        };
        if let Some(point) = hover_point {
            changed |= self.pointer_move(point);
        }
        changed
    }

    fn to_plot_local(&self, event: GestureEvent) -> GestureEvent {
        let local = |p: ScreenPoint| self.layout.to_plot_local(p);
        match event {
            GestureEvent::Wheel { delta_y, position } => GestureEvent::Wheel { delta_y, position: local(position) },
            GestureEvent::Down { points, time_ms } => {
                GestureEvent::Down { points: points.into_iter().map(local).collect(), time_ms }
            }
            GestureEvent::Move { points } => GestureEvent::Move { points: points.into_iter().map(local).collect() },
            GestureEvent::Up { remaining, position, time_ms } => GestureEvent::Up {
                remaining: remaining.into_iter().map(local).collect(),
                position: local(position),
                time_ms,
            },
            other => other,
        }
    }

    /// Hover resolution; ignored under tap-toggle.
    pub fn pointer_move(&mut self, host_point: ScreenPoint) -> bool {
        if self.torn_down {
            return false;
        }
        let hit = self.hit_at(host_point);
        self.tooltips.handle(PointerInput::Move(hit))
    }

    pub fn pointer_leave(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.gesture.cancel();
        self.tooltips.handle(PointerInput::Leave)
    }

    /// Direct tap at a host point, bypassing double-tap detection.
    pub fn tap(&mut self, host_point: ScreenPoint) -> bool {
        if self.torn_down {
            return false;
        }
        let hit = self.hit_at(host_point);
        self.tooltips.handle(PointerInput::Tap(hit))
    }

    /// Programmatic reset (the reset-zoom button).
    pub fn reset_zoom(&mut self, now: f64) -> bool {
        self.handle_gesture(GestureEvent::DoubleTap, now)
    }

    pub fn is_zoomed(&self) -> bool {
        self.gesture.is_zoomed()
    }

    /// Transform to draw with, including an in-flight reset transition.
    pub fn current_transform(&self) -> Transform {
        match &self.reset_transition {
            Some(transition) => transition.current(),
            None => self.gesture.transform(),
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.torn_down
            && (self.animation.is_running() || self.reset_transition.as_ref().is_some_and(|t| t.is_running()))
    }

    /// Advance animations to `now`.
    pub fn tick(&mut self, now: f64) -> FrameStatus {
        if self.torn_down {
            return FrameStatus::Finished;
        }
        let shapes = self.animation.tick(now);
        let reset = match self.reset_transition.as_mut() {
            Some(transition) => transition.tick(now),
            None => FrameStatus::Finished,
        };
        if reset == FrameStatus::Finished {
            self.reset_transition = None;
        }
        if shapes == FrameStatus::Finished && reset == FrameStatus::Finished {
            FrameStatus::Finished
        } else {
            FrameStatus::Continue
        }
    }

    pub fn scene(&self) -> Scene {
        let frame = FrameContext {
            data: &self.data,
            config: &self.config,
            theme: &self.theme,
            formatter: &self.formatter,
            layout: &self.layout,
            value_ticks: self.layout_manager.config().value_ticks,
            tick_indices: &self.tick_indices,
            geometry: self.geometry.as_ref(),
            transform: self.current_transform(),
            tooltip: self.tooltips.active(),
            animation: &self.animation,
        };
        render_scene(&frame)
    }

    pub fn export_table(&self) -> ExportTable {
        self.data.export_table()
    }

    pub fn accessibility_lines(&self) -> Vec<String> {
        self.data.accessibility_lines(&self.formatter)
    }

    /// Invalidate everything; later events and ticks are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.animation.cancel();
        self.reset_transition = None;
        self.gesture.cancel();
        self.tooltips.hide_all();
        log_debug!(LogComponent::Application("ChartController"), "Chart torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{DataPoint, Series};

    fn bars() -> ChartData {
        ChartData::Bar(vec![DataPoint::new("A", 10.0), DataPoint::new("B", 20.0), DataPoint::new("C", 5.0)])
    }

    fn still() -> ChartConfig {
        ChartConfig::default().with_animation(false)
    }

    #[test]
    fn geometry_waits_for_width() {
        let mut c = ChartController::new(bars(), still(), Theme::default());
        assert!(c.geometry().is_none());
        assert!(c.resize(400.0, true, 0.0));
        assert!(c.geometry().is_some());
        assert!(!c.resize(400.0, true, 10.0));
    }

    #[test]
    fn invalid_values_are_sanitized() {
        let data = ChartData::Bar(vec![DataPoint::new("A", f64::NAN), DataPoint::new("B", 2.0)]);
        let c = ChartController::new(data, still(), Theme::default());
        assert!(c.data().validate().is_ok());
    }

    #[test]
    fn mount_animation_starts_on_first_drawable_layout() {
        let mut c = ChartController::new(bars(), ChartConfig::default(), Theme::default());
        assert!(!c.is_animating());
        c.resize(400.0, true, 100.0);
        assert!(c.is_animating());
        assert_eq!(c.tick(100.0 + 800.0), FrameStatus::Finished);
        assert!(!c.is_animating());
    }

    #[test]
    fn double_tap_plays_reset_transition() {
        let mut c = ChartController::new(bars(), still(), Theme::default());
        c.resize(800.0, true, 0.0);
        c.handle_gesture(GestureEvent::Wheel { delta_y: -400.0, position: ScreenPoint::new(200.0, 100.0) }, 0.0);
        assert!(c.is_zoomed());
        assert!(c.reset_zoom(1_000.0));
        assert!(!c.is_zoomed());
        assert!(c.current_transform().scale > 1.0);
        assert_eq!(c.tick(1_300.0), FrameStatus::Finished);
        assert_eq!(c.current_transform(), Transform::IDENTITY);
    }

    #[test]
    fn teardown_ignores_later_events() {
        let mut c = ChartController::new(bars(), ChartConfig::default(), Theme::default());
        c.resize(400.0, true, 0.0);
        c.teardown();
        assert!(!c.is_animating());
        assert_eq!(c.tick(50.0), FrameStatus::Finished);
        assert!(!c.pointer_move(ScreenPoint::new(100.0, 100.0)));
        assert!(!c.resize(500.0, true, 60.0));
    }

    #[test]
    fn line_hover_shows_series_tooltip() {
        let data = ChartData::Line {
            series: vec![Series::new("SpaceX", vec![31.0, 61.0, 96.0])],
            labels: vec!["2021".into(), "2022".into(), "2023".into()],
        };
        let mut c = ChartController::new(data, still(), Theme::default());
        c.resize(1024.0, true, 0.0);
        let plot = c.layout().plot;
        let origin = c.layout().plot_origin();
        assert!(c.pointer_move(origin.offset(plot.width / 2.0, plot.height / 2.0)));
        assert_eq!(c.tooltip().resolved_index, Some(1));
        assert_eq!(c.tooltip().resolved_series, Some(0));
        assert!(c.pointer_leave());
        assert!(!c.tooltip().visible);
    }
}
