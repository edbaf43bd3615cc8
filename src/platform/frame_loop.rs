//! Cancellable `requestAnimationFrame` loop

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Handle to a running frame loop. Clones share the same loop.
///
/// The callback keeps itself alive until [`FrameLoop::stop`] is called;
/// dropping the handle does not stop it.
#[derive(Clone)]
pub struct FrameLoop {
    callback: FrameCallback,
    request_id: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Call `frame` with the frame timestamp once per display refresh
    pub fn start(mut frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let next = callback.clone();
        let id = request_id.clone();
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            frame(time);
            let scheduled = next
                .borrow()
                .as_ref()
                .and_then(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            id.set(scheduled);
        }));

        let first = callback
            .borrow()
            .as_ref()
            .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()))
            .transpose()?;
        request_id.set(first);

        Ok(Self {
            callback,
            request_id,
        })
    }

    pub fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// Cancel the pending frame and release the callback
    pub fn stop(&self) {
        if let Some(id) = self.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        if self.callback.borrow_mut().take().is_some() {
            log::info!("Frame loop stopped");
        }
    }
}
