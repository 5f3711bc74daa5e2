use crate::domain::chart::ScreenPoint;
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::{LogComponent, get_logger};
use web_sys::{Element, TouchList};

/// Media query for a device whose primary pointer can hover precisely.
pub const HOVER_QUERY: &str = "(hover: hover) and (pointer: fine)";

pub fn window() -> ChartResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| ChartError::BrowserApi("window is not available".to_string()))
}

/// High resolution timestamp, falling back to `Date.now()`.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Hover capability of the primary pointer. Defaults to `true` when the
/// query cannot be evaluated.
pub fn hover_capable() -> bool {
    let matched = window().and_then(|w| {
        w.match_media(HOVER_QUERY)
            .map_err(|e| ChartError::BrowserApi(format!("matchMedia failed: {:?}", e)))
    });
    match matched {
        Ok(Some(list)) => list.matches(),
        Ok(None) => true,
        Err(e) => {
            get_logger().warn(LogComponent::Infrastructure("Environment"), &e.to_string());
            true
        }
    }
}

pub fn host_width(host: &Element) -> f64 {
    host.get_bounding_client_rect().width()
}

/// Client coordinates to host-relative coordinates.
pub fn host_point(host: &Element, client_x: f64, client_y: f64) -> ScreenPoint {
    let rect = host.get_bounding_client_rect();
    ScreenPoint::new(client_x - rect.left(), client_y - rect.top())
}

pub fn touch_points(host: &Element, touches: &TouchList) -> Vec<ScreenPoint> {
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| host_point(host, t.client_x() as f64, t.client_y() as f64))
        .collect()
}
