//! `requestAnimationFrame` loop that stops itself when the callback
//! reports `Finished` and can be cancelled from outside at any time.

use crate::application::animation::FrameStatus;
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::log_error;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct FrameLoop {
    stopped: Cell<bool>,
    request_id: Cell<Option<i32>>,
    callback: RefCell<Option<FrameCallback>>,
}

impl FrameLoop {
    fn request(&self) -> ChartResult<()> {
        let window = super::environment::window()?;
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let id = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| ChartError::BrowserApi(format!("requestAnimationFrame failed: {:?}", e)))?;
        self.request_id.set(Some(id));
        Ok(())
    }

    fn stop(&self) {
        self.stopped.set(true);
        if let (Some(id), Some(window)) = (self.request_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

/// Owner of a running frame loop. Dropping it cancels the loop.
pub struct AnimationHandle {
    state: Rc<FrameLoop>,
}

impl AnimationHandle {
    /// No further frame callbacks run after this returns.
    pub fn cancel(&self) {
        self.state.stop();
    }

    pub fn is_active(&self) -> bool {
        !self.state.stopped.get()
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.state.stop();
    }
}

/// Call `on_frame` once per animation frame until it returns `Finished`
/// or the handle is cancelled.
pub fn start_frame_loop(mut on_frame: impl FnMut(f64) -> FrameStatus + 'static) -> ChartResult<AnimationHandle> {
    let state = Rc::new(FrameLoop {
        stopped: Cell::new(false),
        request_id: Cell::new(None),
        callback: RefCell::new(None),
    });
    let weak: Weak<FrameLoop> = Rc::downgrade(&state);

    let callback = Closure::wrap(Box::new(move |timestamp: f64| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        state.request_id.set(None);
        if state.stopped.get() {
            return;
        }
        match on_frame(timestamp) {
            FrameStatus::Continue => {
                if let Err(e) = state.request() {
                    log_error!(LogComponent::Infrastructure("FrameLoop"), "Frame request failed: {}", e);
                    state.stopped.set(true);
                }
            }
            FrameStatus::Finished => state.stopped.set(true),
        }
    }) as Box<dyn FnMut(f64)>);

    *state.callback.borrow_mut() = Some(callback);
    state.request()?;
    Ok(AnimationHandle { state })
}
