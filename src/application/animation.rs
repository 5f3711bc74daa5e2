//! Frame-driven animation progress. The scheduler owns no timer; the frame
//! loop feeds it timestamps through `tick`.

use super::config::AnimationConfig;
use crate::domain::chart::Transform;

/// `1 - (1 - t)^3`, clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Finished,
}

/// Eased 0→1 progress for `count` staggered items.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationScheduler {
    config: AnimationConfig,
    started_at: Option<f64>,
    elapsed: f64,
    count: usize,
    running: bool,
}

impl AnimationScheduler {
    /// Idle scheduler; everything reads as fully shown until `start`.
    pub fn new(config: AnimationConfig) -> Self {
        Self { config, started_at: None, elapsed: 0.0, count: 0, running: false }
    }

    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    fn instant(&self) -> bool {
        !self.config.enabled || self.config.duration_ms <= 0.0
    }

    /// Time until the last item reaches 1.
    pub fn total_duration(&self) -> f64 {
        if self.instant() {
            return 0.0;
        }
        self.config.duration_ms + self.config.stagger_ms * self.count.saturating_sub(1) as f64
    }

    /// Restart from zero. Returns whether frames are needed at all.
    pub fn start(&mut self, now: f64, count: usize) -> bool {
        self.count = count;
        self.elapsed = 0.0;
        if self.instant() || count == 0 {
            self.started_at = None;
            self.running = false;
            return false;
        }
        self.started_at = Some(now);
        self.running = true;
        true
    }

    pub fn tick(&mut self, now: f64) -> FrameStatus {
        let Some(started_at) = self.started_at else {
            return FrameStatus::Finished;
        };
        if !self.running {
            return FrameStatus::Finished;
        }
        self.elapsed = (now - started_at).max(0.0);
        if self.elapsed >= self.total_duration() {
            self.running = false;
            FrameStatus::Finished
        } else {
            FrameStatus::Continue
        }
    }

    /// Stop and jump to the final frame.
    pub fn finish(&mut self) {
        self.running = false;
        self.started_at = None;
    }

    /// Stop without advancing; progress stays where it was.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Eased progress of item `index`, delayed by `index * stagger`.
    pub fn item_progress(&self, index: usize) -> f64 {
        if self.started_at.is_none() || self.instant() {
            return 1.0;
        }
        let local = self.elapsed - self.config.stagger_ms * index as f64;
        ease_out_cubic(local / self.config.duration_ms)
    }

    /// Eased progress of the whole animation, ignoring stagger.
    pub fn progress(&self) -> f64 {
        self.item_progress(0)
    }
}

/// Eased interpolation between two transforms (zoom reset).
#[derive(Debug, Clone, PartialEq)]
pub struct TransformTransition {
    from: Transform,
    to: Transform,
    scheduler: AnimationScheduler,
}

impl TransformTransition {
    pub fn new(from: Transform, to: Transform, config: AnimationConfig, now: f64) -> Self {
        let mut scheduler = AnimationScheduler::new(config);
        scheduler.start(now, 1);
        Self { from, to, scheduler }
    }

    pub fn tick(&mut self, now: f64) -> FrameStatus {
        self.scheduler.tick(now)
    }

    pub fn current(&self) -> Transform {
        self.from.lerp(&self.to, self.scheduler.progress())
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }
}
