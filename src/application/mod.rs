pub mod animation;
pub mod chart_service;
pub mod config;
pub mod gesture;
pub mod layout;
pub mod tooltip;

pub use animation::{AnimationScheduler, FrameStatus, TransformTransition, ease_out_cubic};
pub use chart_service::ChartController;
pub use config::{AnimationConfig, ChartConfig, GestureConfig, LayoutConfig, Margins};
pub use gesture::{GestureController, GestureEvent, GestureOutcome};
pub use layout::{ChartLayout, FittedLabel, LayoutManager, LayoutRules, truncate_label};
pub use tooltip::{InteractionStrategy, PointerInput, TooltipController, TooltipState};
