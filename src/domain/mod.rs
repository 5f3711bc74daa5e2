//! Pure chart model: data types, scale mapping, transform math, geometry
//! and hit-testing. Nothing in here touches the DOM.

pub mod chart;
pub mod errors;
pub mod logging;
