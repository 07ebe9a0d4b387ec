//! Leptos component wrapping the relationship graph canvas.
//!
//! The component sizes the canvas, builds a [`GraphView`] over it and shows
//! the current record list. Every change to the `records` signal rebuilds the
//! graph; the view stops the previous animation loop first. Unmounting stops
//! the loop and removes all listeners the component registered.

use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::GraphConfig;
use super::host::BrowserHost;
use super::scheduler::{GraphView, NodeSelectHandler};
use super::types::LogRecord;

type CanvasView = GraphView<BrowserHost, CanvasRenderingContext2d>;

/// How the canvas picks its size.
#[derive(Clone, Copy, Debug)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl Sizing {
	fn measure(&self, window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
		if self.fullscreen {
			return window_size(window).unwrap_or((800.0, 600.0));
		}
		(
			self.width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			self.height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		)
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn mount_view(
	canvas: &HtmlCanvasElement,
	sizing: Sizing,
	config: GraphConfig,
	on_select: NodeSelectHandler,
) -> Option<CanvasView> {
	let window = web_sys::window()?;
	let (w, h) = sizing.measure(&window, canvas);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
		Ok(Some(ctx)) => ctx.dyn_into().ok()?,
		Ok(None) | Err(_) => {
			warn!("relationship-graph: canvas has no 2d context");
			return None;
		}
	};

	Some(GraphView::new(
		BrowserHost::new(window, canvas.clone()),
		ctx,
		config,
		on_select,
	))
}

/// Fills an empty `slot` with `mount()`. `on_mounted` runs only when that
/// produced a value, so a failed mount registers nothing and is retried on
/// the next call.
fn ensure_mounted<V>(
	slot: &mut Option<V>,
	mount: impl FnOnce() -> Option<V>,
	on_mounted: impl FnOnce(&V),
) -> Option<&mut V> {
	if slot.is_none() {
		*slot = mount();
		if let Some(value) = slot.as_ref() {
			on_mounted(value);
		}
	}
	slot.as_mut()
}

/// Renders the relationship graph for `records` on a canvas element.
///
/// `on_node_select` runs with the full record whenever a log entry node is
/// clicked. The component sizes itself to its parent container by default;
/// set `fullscreen = true` to fill the viewport and follow window resizes.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn RelationshipGraphCanvas(
	#[prop(into)] records: Signal<Vec<LogRecord>>,
	#[prop(into)] on_node_select: Callback<LogRecord>,
	#[prop(default = GraphConfig::default())] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let active_view: StoredValue<Option<CanvasView>, LocalStorage> = StoredValue::new_local(None);
	let resize_cb: StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage> =
		StoredValue::new_local(None);
	let sizing = Sizing {
		fullscreen,
		width,
		height,
	};

	Effect::new(move |_| {
		let records = records.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		active_view.update_value(|slot| {
			let mounted = ensure_mounted(
				slot,
				|| {
					let on_select: NodeSelectHandler =
						Rc::new(move |record: &LogRecord| on_node_select.run(record.clone()));
					mount_view(&canvas, sizing, config.clone(), on_select)
				},
				|_| {
					if fullscreen {
						attach_resize(&canvas, resize_cb);
					}
				},
			);
			if let Some(graph_view) = mounted {
				graph_view.show(&records);
			}
		});
	});

	on_cleanup(move || {
		active_view.try_update_value(|slot| {
			if let Some(graph_view) = slot.as_mut() {
				graph_view.unmount();
			}
			*slot = None;
		});
		resize_cb.try_update_value(detach_resize);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="relationship-graph-canvas"
			style="display: block; cursor: pointer;"
		/>
	}
}

/// Keeps the canvas the size of the window. The engine reads the new size on
/// its next frame.
fn attach_resize(
	canvas: &HtmlCanvasElement,
	slot: StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage>,
) {
	let Some(window) = web_sys::window() else {
		return;
	};
	slot.update_value(detach_resize);
	let canvas = canvas.clone();
	let cb: Closure<dyn FnMut()> = Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Some((w, h)) = window_size(&win) {
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
		}
	});
	if let Err(e) = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref()) {
		warn!("relationship-graph: failed to attach resize listener: {:?}", e);
		return;
	}
	slot.set_value(Some(cb));
}

/// Unregisters and drops the stored resize listener, if any.
fn detach_resize(slot: &mut Option<Closure<dyn FnMut()>>) {
	if let (Some(cb), Some(window)) = (slot.take(), web_sys::window()) {
		let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn failed_mounts_attach_nothing() {
		let attached = Cell::new(0);
		let mut slot: Option<u32> = None;

		for _ in 0..3 {
			let mounted = ensure_mounted(&mut slot, || None, |_| attached.set(attached.get() + 1));
			assert!(mounted.is_none());
		}
		assert_eq!(attached.get(), 0);
	}

	#[test]
	fn successful_mount_attaches_once() {
		let attached = Cell::new(0);
		let mounts = Cell::new(0);
		let mut slot: Option<u32> = None;

		for _ in 0..3 {
			let mounted = ensure_mounted(
				&mut slot,
				|| {
					mounts.set(mounts.get() + 1);
					Some(7)
				},
				|_| attached.set(attached.get() + 1),
			);
			assert_eq!(mounted.copied(), Some(7));
		}
		assert_eq!((mounts.get(), attached.get()), (1, 1));
	}

	#[test]
	fn mount_is_retried_after_a_failure() {
		let attached = Cell::new(0);
		let mut slot: Option<u32> = None;

		ensure_mounted(&mut slot, || None, |_| attached.set(attached.get() + 1));
		ensure_mounted(&mut slot, || Some(1), |_| attached.set(attached.get() + 1));
		assert_eq!(slot, Some(1));
		assert_eq!(attached.get(), 1);
	}
}
