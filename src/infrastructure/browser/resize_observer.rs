//! Container size tracking through `ResizeObserver`, so hosts that grow
//! without a window resize (tabs, collapsible panels) are remeasured.

use crate::domain::errors::{ChartError, ChartResult};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, ResizeObserver, ResizeObserverEntry};

type ResizeCallback = Closure<dyn FnMut(js_sys::Array, ResizeObserver)>;

/// Live observation of one element. Dropping it disconnects.
pub struct ResizeHandle {
    observer: ResizeObserver,
    _callback: ResizeCallback,
}

impl ResizeHandle {
    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for ResizeHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Call `on_resize` with the element's content-box width whenever it changes.
/// The observer also fires once right after `observe`.
pub fn observe_width(target: &Element, mut on_resize: impl FnMut(f64) + 'static) -> ChartResult<ResizeHandle> {
    let callback: ResizeCallback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: ResizeObserver| {
        let width = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<ResizeObserverEntry>().ok())
            .last()
            .map(|entry| entry.content_rect().width());
        if let Some(width) = width {
            on_resize(width);
        }
    }) as Box<dyn FnMut(js_sys::Array, ResizeObserver)>);

    let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| ChartError::BrowserApi(format!("ResizeObserver unavailable: {:?}", e)))?;
    observer.observe(target);
    Ok(ResizeHandle { observer, _callback: callback })
}
