use js_sys::{Array, Function};
use leptos::{IntoView, mount_to, view};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::{
    app::{ChartView, next_chart_id},
    application::{ChartConfig, ChartController, FrameStatus, GestureEvent},
    domain::{
        chart::{ChartData, ChartKind, ScreenPoint, Theme, ValueFormatter, format::format_number},
        errors::{ChartError, ChartResult},
        logging::LogComponent,
    },
    infrastructure::{
        browser::{hover_capable, now_ms, window},
        rendering::SvgWriter,
    },
    log_info,
};

fn to_js(err: ChartError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_inputs(kind: &str, data_json: &str, config_json: Option<String>) -> ChartResult<(ChartData, ChartConfig)> {
    let kind: ChartKind = kind.parse().map_err(|_| ChartError::Config(format!("Unknown chart kind '{}'", kind)))?;
    let data = ChartData::from_json(kind, data_json)?;
    let config = match config_json.as_deref() {
        Some(json) if !json.trim().is_empty() => ChartConfig::from_json(json)?,
        _ => ChartConfig::default(),
    };
    Ok((data, config))
}

/// Flat `[x0, y0, x1, y1, ...]` host-relative coordinates.
fn points_from_flat(coords: &[f64]) -> Vec<ScreenPoint> {
    coords.chunks_exact(2).map(|xy| ScreenPoint::new(xy[0], xy[1])).collect()
}

/// JS-facing chart handle for hosts that manage their own DOM: feed it
/// measurements and pointer input, call `tick` from `requestAnimationFrame`
/// and paint `renderSvg()`.
#[wasm_bindgen]
pub struct ChartApi {
    controller: ChartController,
    writer: SvgWriter,
}

#[wasm_bindgen]
impl ChartApi {
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, data_json: &str, config_json: Option<String>) -> Result<ChartApi, JsValue> {
        let (data, config) = parse_inputs(kind, data_json, config_json).map_err(to_js)?;
        log_info!(LogComponent::Presentation("ChartApi"), "Created {} chart with {} items", data.kind(), data.len());
        Ok(Self {
            controller: ChartController::new(data, config, Theme::default()),
            writer: SvgWriter::new(next_chart_id()).with_tooltip(),
        })
    }

    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&mut self, data_json: &str) -> Result<bool, JsValue> {
        let kind = self.controller.data().kind();
        let data = ChartData::from_json(kind, data_json).map_err(to_js)?;
        Ok(self.controller.set_data(data, now_ms()))
    }

    /// Formats every displayed number through a JS `(value) => string`.
    #[wasm_bindgen(js_name = setValueFormatter)]
    pub fn set_value_formatter(&mut self, formatter: Function) {
        self.controller.set_formatter(ValueFormatter::new(move |value| {
            formatter
                .call1(&JsValue::NULL, &JsValue::from_f64(value))
                .ok()
                .and_then(|out| out.as_string())
                .unwrap_or_else(|| format_number(value, None))
        }));
    }

    /// Returns true when the chart needs a repaint.
    pub fn resize(&mut self, width: f64, hover: Option<bool>) -> bool {
        let hover = hover.unwrap_or_else(hover_capable);
        self.controller.resize(width, hover, now_ms())
    }

    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) -> bool {
        let position = ScreenPoint::new(x, y);
        self.controller.handle_gesture(GestureEvent::Wheel { delta_y, position }, now_ms())
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, coords: &[f64]) -> bool {
        let event = GestureEvent::Down { points: points_from_flat(coords), time_ms: now_ms() };
        self.controller.handle_gesture(event, now_ms())
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, coords: &[f64]) -> bool {
        self.controller.handle_gesture(GestureEvent::Move { points: points_from_flat(coords) }, now_ms())
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, remaining: &[f64], x: f64, y: f64) -> bool {
        let event = GestureEvent::Up {
            remaining: points_from_flat(remaining),
            position: ScreenPoint::new(x, y),
            time_ms: now_ms(),
        };
        self.controller.handle_gesture(event, now_ms())
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> bool {
        self.controller.pointer_leave()
    }

    pub fn tap(&mut self, x: f64, y: f64) -> bool {
        self.controller.tap(ScreenPoint::new(x, y))
    }

    #[wasm_bindgen(js_name = doubleTap)]
    pub fn double_tap(&mut self) -> bool {
        self.controller.handle_gesture(GestureEvent::DoubleTap, now_ms())
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) -> bool {
        self.controller.reset_zoom(now_ms())
    }

    /// Advance animations to `timestamp`; false once nothing is moving.
    pub fn tick(&mut self, timestamp: f64) -> bool {
        self.controller.tick(timestamp) == FrameStatus::Continue
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    #[wasm_bindgen(js_name = isZoomed)]
    pub fn is_zoomed(&self) -> bool {
        self.controller.is_zoomed()
    }

    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self) -> String {
        self.writer.write(&self.controller.scene())
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> String {
        self.controller.export_table().to_json()
    }

    #[wasm_bindgen(js_name = accessibilityLines)]
    pub fn accessibility_lines(&self) -> Array {
        self.controller.accessibility_lines().into_iter().map(JsValue::from).collect()
    }

    /// Stops animations and drops interaction state; later calls are no-ops.
    pub fn dispose(&mut self) {
        self.controller.teardown();
    }
}

/// Mount a self-managing Leptos chart into the element with `element_id`.
#[wasm_bindgen(js_name = mountChart)]
pub fn mount_chart(kind: &str, element_id: &str, data_json: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let (data, config) = parse_inputs(kind, data_json, config_json).map_err(to_js)?;
    let parent = window()
        .map_err(to_js)?
        .document()
        .and_then(|doc| doc.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("Element '{}' not found", element_id)))?;

    log_info!(LogComponent::Presentation("mountChart"), "Mounting {} chart into #{}", data.kind(), element_id);
    mount_to(parent, move || view! { <ChartView data=data config=config /> }.into_view());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_coordinates_pair_up() {
        assert_eq!(
            points_from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            vec![ScreenPoint::new(1.0, 2.0), ScreenPoint::new(3.0, 4.0)]
        );
    }

    #[test]
    fn parse_inputs_rejects_unknown_kind() {
        let err = parse_inputs("pie", "[]", None).unwrap_err();
        assert_eq!(err, ChartError::Config("Unknown chart kind 'pie'".to_string()));
    }

    #[test]
    fn parse_inputs_reads_camel_case_config() {
        let (data, config) =
            parse_inputs("bar", r#"[{"label":"A","value":1}]"#, Some(r#"{"showValues":true}"#.to_string())).unwrap();
        assert_eq!(data.len(), 1);
        assert!(config.show_values);
        assert_eq!(config.height, 300.0);
    }
}
