//! Chart aggregate: data entities, value objects and the pure geometry
//! built on top of them.

pub mod entities;
pub mod format;
pub mod geometry;
pub mod scale;
pub mod theme;
pub mod transform;
pub mod value_objects;

pub use entities::*;
pub use format::{FormatSpec, ValueFormatter};
pub use geometry::{BarGeometry, ChartGeometry, DonutGeometry, Hit, HitElement, LineGeometry};
pub use theme::Theme;
pub use transform::{MAX_SCALE, MIN_SCALE, Transform, anchor_zoom};
pub use value_objects::*;
