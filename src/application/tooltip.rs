//! Tooltip resolution for the two interaction modalities.

use crate::domain::chart::{Hit, ScreenPoint};
use strum::{AsRefStr, EnumIter};

/// How pointer input turns into a visible tooltip. Chosen by the layout
/// pass, never inside event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum InteractionStrategy {
    /// Follows the pointer; leaving the plot clears it
    #[default]
    Hover,
    /// A tap shows; tapping the same element again or empty space hides
    TapToggle,
}

/// Tooltip attachment. The anchor is in plot space so it follows the
/// transform when the chart is zoomed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub resolved_index: Option<usize>,
    pub resolved_series: Option<usize>,
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> ScreenPoint {
        ScreenPoint::new(self.anchor_x, self.anchor_y)
    }

    /// Index to highlight, only while visible.
    pub fn focused(&self) -> Option<usize> {
        if self.visible { self.resolved_index } else { None }
    }

    fn shows(&self, hit: &Hit) -> bool {
        self.visible && self.resolved_index == Some(hit.index) && self.resolved_series == hit.series()
    }

    fn show(&mut self, hit: &Hit) {
        *self = Self {
            visible: true,
            anchor_x: hit.anchor.x,
            anchor_y: hit.anchor.y,
            resolved_index: Some(hit.index),
            resolved_series: hit.series(),
        };
    }

    fn hide(&mut self) {
        *self = Self::hidden();
    }
}

/// Pointer input after hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Move(Option<Hit>),
    Leave,
    Tap(Option<Hit>),
}

/// Holds one tooltip per modality; only the active strategy's is shown.
#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    strategy: InteractionStrategy,
    hover: TooltipState,
    tap: TooltipState,
}

impl TooltipController {
    pub fn new(strategy: InteractionStrategy) -> Self {
        Self { strategy, ..Self::default() }
    }

    pub fn strategy(&self) -> InteractionStrategy {
        self.strategy
    }

    /// Switching modality hides whatever was showing.
    pub fn set_strategy(&mut self, strategy: InteractionStrategy) {
        if self.strategy != strategy {
            self.strategy = strategy;
            self.hide_all();
        }
    }

    pub fn active(&self) -> &TooltipState {
        match self.strategy {
            InteractionStrategy::Hover => &self.hover,
            InteractionStrategy::TapToggle => &self.tap,
        }
    }

    pub fn hide_all(&mut self) {
        self.hover.hide();
        self.tap.hide();
    }

    /// Move visible tooltips onto freshly computed anchors. A tooltip whose
    /// element no longer resolves is hidden.
    pub fn reanchor(&mut self, anchor_of: impl Fn(&TooltipState) -> Option<ScreenPoint>) {
        for state in [&mut self.hover, &mut self.tap] {
            if !state.visible {
                continue;
            }
            match anchor_of(state) {
                Some(anchor) => {
                    state.anchor_x = anchor.x;
                    state.anchor_y = anchor.y;
                }
                None => state.hide(),
            }
        }
    }

    /// Apply the input; returns whether the visible tooltip changed.
    pub fn handle(&mut self, input: PointerInput) -> bool {
        let before = *self.active();
        match (self.strategy, input) {
            (InteractionStrategy::Hover, PointerInput::Move(Some(hit))) => self.hover.show(&hit),
            (InteractionStrategy::Hover, PointerInput::Move(None) | PointerInput::Leave) => self.hover.hide(),
            (InteractionStrategy::TapToggle, PointerInput::Tap(Some(hit))) => {
                if self.tap.shows(&hit) {
                    self.tap.hide();
                } else {
                    self.tap.show(&hit);
                }
            }
            (InteractionStrategy::TapToggle, PointerInput::Tap(None)) => self.tap.hide(),
            _ => {}
        }
        before != *self.active()
    }
}
