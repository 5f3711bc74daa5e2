//! DOM glue: clock, media queries, host measurement, resize observation
//! and the frame loop.

pub mod environment;
pub mod frame_loop;
pub mod resize_observer;

pub use environment::{host_point, host_width, hover_capable, now_ms, touch_points, window};
pub use frame_loop::{AnimationHandle, start_frame_loop};
pub use resize_observer::{ResizeHandle, observe_width};
