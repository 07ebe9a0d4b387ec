//! Frame scheduling and pointer input provided by the embedding environment.
//!
//! The scheduler owns the callbacks it hands to the host; the host only
//! registers and unregisters them. [`BrowserHost`] drives the real page via
//! `requestAnimationFrame` and canvas `click` listeners.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::interaction::PointerEvent;

/// The environment an animation loop runs in.
pub trait Host: Clone + 'static {
	/// Handle for one pending frame request.
	type FrameId: Copy;
	/// Host-owned wrapper around a frame callback.
	type FrameCallback;
	/// Host-owned wrapper around a click handler.
	type ClickCallback;

	/// Wraps `tick` so the host can call it on a frame boundary.
	fn frame_callback(&self, tick: Box<dyn FnMut()>) -> Self::FrameCallback;

	/// Schedules `callback` for the next frame boundary. `None` if the host
	/// refused the request.
	fn request_frame(&self, callback: &Self::FrameCallback) -> Option<Self::FrameId>;

	/// Cancels a pending request. Unknown ids are ignored.
	fn cancel_frame(&self, id: Self::FrameId);

	/// Wraps `handler` for registration as a click listener.
	fn click_callback(&self, handler: Box<dyn FnMut(PointerEvent)>) -> Self::ClickCallback;

	/// Starts delivering clicks to `callback`.
	fn add_click_listener(&self, callback: &Self::ClickCallback);

	/// Stops delivering clicks to `callback`.
	fn remove_click_listener(&self, callback: &Self::ClickCallback);
}

/// Browser window plus the canvas that receives clicks.
#[derive(Clone, Debug)]
pub struct BrowserHost {
	window: Window,
	canvas: HtmlCanvasElement,
}

impl BrowserHost {
	/// Host over `window`, taking clicks from `canvas`.
	pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
		Self { window, canvas }
	}
}

impl Host for BrowserHost {
	type FrameId = i32;
	type FrameCallback = Closure<dyn FnMut()>;
	type ClickCallback = Closure<dyn FnMut(MouseEvent)>;

	fn frame_callback(&self, mut tick: Box<dyn FnMut()>) -> Self::FrameCallback {
		Closure::new(move || tick())
	}

	fn request_frame(&self, callback: &Self::FrameCallback) -> Option<i32> {
		match self
			.window
			.request_animation_frame(callback.as_ref().unchecked_ref())
		{
			Ok(id) => Some(id),
			Err(e) => {
				warn!("relationship-graph: requestAnimationFrame failed: {:?}", e);
				None
			}
		}
	}

	fn cancel_frame(&self, id: i32) {
		if let Err(e) = self.window.cancel_animation_frame(id) {
			warn!("relationship-graph: cancelAnimationFrame failed: {:?}", e);
		}
	}

	fn click_callback(&self, mut handler: Box<dyn FnMut(PointerEvent)>) -> Self::ClickCallback {
		Closure::new(move |ev: MouseEvent| {
			handler(PointerEvent {
				client_x: ev.client_x() as f64,
				client_y: ev.client_y() as f64,
			})
		})
	}

	fn add_click_listener(&self, callback: &Self::ClickCallback) {
		if let Err(e) = self
			.canvas
			.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
		{
			warn!("relationship-graph: failed to attach click listener: {:?}", e);
		}
	}

	fn remove_click_listener(&self, callback: &Self::ClickCallback) {
		if let Err(e) = self
			.canvas
			.remove_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
		{
			warn!("relationship-graph: failed to detach click listener: {:?}", e);
		}
	}
}
