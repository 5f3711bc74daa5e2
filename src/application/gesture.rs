//! Zoom/pan gesture controller.
//!
//! Positions are plot-local screen coordinates: already offset by the host
//! bounding rect and the plot margins, but not yet inverted through the
//! transform.

use super::config::GestureConfig;
use crate::domain::chart::{Dimensions, ScreenPoint, Transform, anchor_zoom};
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// Normalized input from mouse, touch and wheel listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    Wheel { delta_y: f64, position: ScreenPoint },
    /// `points` are all active contacts after the press.
    Down { points: Vec<ScreenPoint>, time_ms: f64 },
    Move { points: Vec<ScreenPoint> },
    /// `remaining` are the contacts still down; `position` is the lifted one.
    Up { remaining: Vec<ScreenPoint>, position: ScreenPoint, time_ms: f64 },
    DoubleTap,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    Unchanged,
    Updated,
    /// Transform snapped back to identity from `from`.
    Reset { from: Transform },
    /// Press and release without movement, not part of a double tap.
    Tap(ScreenPoint),
}

impl GestureOutcome {
    pub fn changed_transform(&self) -> bool {
        matches!(self, GestureOutcome::Updated | GestureOutcome::Reset { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Pressed { start: ScreenPoint, last: ScreenPoint, moved: bool },
    Pinching { initial_distance: f64, initial_scale: f64, last_midpoint: ScreenPoint },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TapRecord {
    position: ScreenPoint,
    time_ms: f64,
}

pub struct GestureController {
    config: GestureConfig,
    transform: Transform,
    extent: Dimensions,
    state: GestureState,
    last_tap: Option<TapRecord>,
}

impl GestureController {
    pub fn new(config: GestureConfig, extent: Dimensions) -> Self {
        Self {
            config,
            transform: Transform::IDENTITY,
            extent,
            state: GestureState::Idle,
            last_tap: None,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn is_zoomed(&self) -> bool {
        self.transform.is_zoomed()
    }

    /// New plot extent; the current transform is re-bounded against it.
    pub fn set_extent(&mut self, extent: Dimensions) {
        self.extent = extent;
        self.transform = self.transform.bounded(extent);
    }

    pub fn handle(&mut self, event: GestureEvent) -> GestureOutcome {
        match event {
            GestureEvent::Wheel { delta_y, position } => self.wheel(delta_y, position),
            GestureEvent::Down { points, time_ms: _ } => self.down(&points),
            GestureEvent::Move { points } => self.pointer_move(&points),
            GestureEvent::Up { remaining, position, time_ms } => self.up(&remaining, position, time_ms),
            GestureEvent::DoubleTap => self.reset(),
            GestureEvent::Cancel => {
                self.cancel();
                GestureOutcome::Unchanged
            }
        }
    }

    /// Snap to identity. Reports `Reset` only if the transform changed.
    pub fn reset(&mut self) -> GestureOutcome {
        self.state = GestureState::Idle;
        self.last_tap = None;
        if self.transform.is_identity() {
            return GestureOutcome::Unchanged;
        }
        let from = self.transform;
        self.transform = Transform::IDENTITY;
        log_debug!(LogComponent::Application("Gesture"), "reset from scale {:.2}", from.scale);
        GestureOutcome::Reset { from }
    }

    /// Drop any gesture in progress without touching the transform.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
        self.last_tap = None;
    }

    fn commit(&mut self, next: Transform) -> GestureOutcome {
        let next = next.bounded(self.extent);
        if next == self.transform {
            GestureOutcome::Unchanged
        } else {
            self.transform = next;
            GestureOutcome::Updated
        }
    }

    fn wheel(&mut self, delta_y: f64, position: ScreenPoint) -> GestureOutcome {
        if !delta_y.is_finite() {
            return GestureOutcome::Unchanged;
        }
        let (min_factor, max_factor) = self.config.wheel_factor_range;
        let factor = (-delta_y * self.config.wheel_sensitivity).exp().clamp(min_factor, max_factor);
        self.commit(anchor_zoom(self.transform, position, factor))
    }

    fn down(&mut self, points: &[ScreenPoint]) -> GestureOutcome {
        self.state = match points {
            [] => GestureState::Idle,
            [p] => GestureState::Pressed { start: *p, last: *p, moved: false },
            [a, b, ..] => GestureState::Pinching {
                initial_distance: a.distance_to(*b),
                initial_scale: self.transform.scale,
                last_midpoint: a.midpoint(*b),
            },
        };
        GestureOutcome::Unchanged
    }

    fn pointer_move(&mut self, points: &[ScreenPoint]) -> GestureOutcome {
        match (self.state, points) {
            (GestureState::Pressed { start, last, moved }, [p, ..]) => {
                let moved = moved || start.distance_to(*p) >= self.config.tap_slop_px;
                self.state = GestureState::Pressed { start, last: *p, moved };
                if !self.transform.is_zoomed() {
                    return GestureOutcome::Unchanged;
                }
                self.commit(self.transform.translated(p.x - last.x, p.y - last.y))
            }
            (GestureState::Pinching { initial_distance, initial_scale, last_midpoint }, [a, b, ..]) => {
                let midpoint = a.midpoint(*b);
                self.state = GestureState::Pinching { initial_distance, initial_scale, last_midpoint: midpoint };
                if initial_distance <= f64::EPSILON {
                    return GestureOutcome::Unchanged;
                }
                let target_scale = initial_scale * a.distance_to(*b) / initial_distance;
                let delta = target_scale / self.transform.scale;
                let zoomed = anchor_zoom(self.transform, midpoint, delta);
                self.commit(zoomed.translated(midpoint.x - last_midpoint.x, midpoint.y - last_midpoint.y))
            }
            _ => GestureOutcome::Unchanged,
        }
    }

    fn up(&mut self, remaining: &[ScreenPoint], position: ScreenPoint, time_ms: f64) -> GestureOutcome {
        let previous = self.state;
        self.state = match remaining {
            // Lifting one finger of a pinch continues as a drag, never a tap
            [p] if matches!(previous, GestureState::Pinching { .. }) => {
                GestureState::Pressed { start: *p, last: *p, moved: true }
            }
            [a, b, ..] => GestureState::Pinching {
                initial_distance: a.distance_to(*b),
                initial_scale: self.transform.scale,
                last_midpoint: a.midpoint(*b),
            },
            _ => GestureState::Idle,
        };

        match previous {
            GestureState::Pressed { moved: false, .. } if remaining.is_empty() => self.register_tap(position, time_ms),
            _ => GestureOutcome::Unchanged,
        }
    }

    fn register_tap(&mut self, position: ScreenPoint, time_ms: f64) -> GestureOutcome {
        let is_double = self.last_tap.is_some_and(|prev| {
            time_ms - prev.time_ms <= self.config.double_tap_ms
                && prev.position.distance_to(position) <= self.config.double_tap_slop_px
        });
        if is_double {
            self.last_tap = None;
            return match self.reset() {
                GestureOutcome::Unchanged => GestureOutcome::Tap(position),
                reset => reset,
            };
        }
        self.last_tap = Some(TapRecord { position, time_ms });
        GestureOutcome::Tap(position)
    }
}
