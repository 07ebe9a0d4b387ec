//! In-memory stand-ins for the browser, used by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::host::Host;
use super::interaction::PointerEvent;
use super::render::Surface;
use super::theme::{Color, EdgeStyle};

/// A surface call, reduced to what tests assert on.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
	Clear,
	Line {
		from: (f64, f64),
		to: (f64, f64),
	},
	Circle {
		center: (f64, f64),
		radius: f64,
		fill: Color,
	},
	Text {
		text: String,
		x: f64,
		top: f64,
	},
}

#[derive(Default)]
struct Recording {
	size: (f64, f64),
	offset: (f64, f64),
	calls: Vec<DrawCall>,
	frames: usize,
}

/// Records draw calls instead of drawing. Clones share one recording.
#[derive(Clone, Default)]
pub struct RecordingSurface {
	inner: Rc<RefCell<Recording>>,
}

impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		let surface = Self::default();
		surface.resize(width, height);
		surface
	}

	pub fn resize(&self, width: f64, height: f64) {
		self.inner.borrow_mut().size = (width, height);
	}

	pub fn set_offset(&self, left: f64, top: f64) {
		self.inner.borrow_mut().offset = (left, top);
	}

	/// Calls since the most recent clear.
	pub fn calls(&self) -> Vec<DrawCall> {
		self.inner.borrow().calls.clone()
	}

	/// Number of frames drawn so far.
	pub fn frames(&self) -> usize {
		self.inner.borrow().frames
	}
}

impl Surface for RecordingSurface {
	fn size(&self) -> (f64, f64) {
		self.inner.borrow().size
	}

	fn offset(&self) -> (f64, f64) {
		self.inner.borrow().offset
	}

	fn clear(&self, _background: Color) {
		let mut inner = self.inner.borrow_mut();
		inner.frames += 1;
		inner.calls.clear();
		inner.calls.push(DrawCall::Clear);
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), _style: &EdgeStyle) {
		self.inner.borrow_mut().calls.push(DrawCall::Line { from, to });
	}

	fn fill_circle(&self, center: (f64, f64), radius: f64, fill: Color, _border: Option<(Color, f64)>) {
		self.inner
			.borrow_mut()
			.calls
			.push(DrawCall::Circle { center, radius, fill });
	}

	fn fill_text(&self, text: &str, x: f64, top: f64, _color: Color, _font: &str) {
		self.inner.borrow_mut().calls.push(DrawCall::Text {
			text: text.to_string(),
			x,
			top,
		});
	}
}

pub type FrameFn = Rc<RefCell<Box<dyn FnMut()>>>;
pub type ClickFn = Rc<RefCell<Box<dyn FnMut(PointerEvent)>>>;

#[derive(Default)]
struct Queue {
	next_id: Cell<u32>,
	frames: RefCell<Vec<(u32, FrameFn)>>,
	cancelled: RefCell<Vec<u32>>,
	listeners: RefCell<Vec<ClickFn>>,
}

/// A host whose frames only run when the test says so. Clones share one queue.
#[derive(Clone, Default)]
pub struct ManualHost {
	queue: Rc<Queue>,
}

impl ManualHost {
	/// Runs every frame requested before this call. Returns how many ran.
	pub fn run_frame(&self) -> usize {
		let due = std::mem::take(&mut *self.queue.frames.borrow_mut());
		for (_, callback) in &due {
			(callback.borrow_mut())();
		}
		due.len()
	}

	/// Runs `count` frames in sequence.
	pub fn run_frames(&self, count: usize) {
		for _ in 0..count {
			self.run_frame();
		}
	}

	pub fn pending_frames(&self) -> Vec<u32> {
		self.queue.frames.borrow().iter().map(|(id, _)| *id).collect()
	}

	/// The callbacks currently queued, for firing after cancellation.
	pub fn pending_callbacks(&self) -> Vec<FrameFn> {
		self.queue.frames.borrow().iter().map(|(_, cb)| cb.clone()).collect()
	}

	pub fn cancelled(&self) -> Vec<u32> {
		self.queue.cancelled.borrow().clone()
	}

	pub fn listener_count(&self) -> usize {
		self.queue.listeners.borrow().len()
	}

	/// Delivers a click at client coordinates to every registered listener.
	pub fn click(&self, client_x: f64, client_y: f64) {
		let listeners = self.queue.listeners.borrow().clone();
		for listener in listeners {
			(listener.borrow_mut())(PointerEvent { client_x, client_y });
		}
	}
}

impl Host for ManualHost {
	type FrameId = u32;
	type FrameCallback = FrameFn;
	type ClickCallback = ClickFn;

	fn frame_callback(&self, tick: Box<dyn FnMut()>) -> FrameFn {
		Rc::new(RefCell::new(tick))
	}

	fn request_frame(&self, callback: &FrameFn) -> Option<u32> {
		let id = self.queue.next_id.get() + 1;
		self.queue.next_id.set(id);
		self.queue.frames.borrow_mut().push((id, callback.clone()));
		Some(id)
	}

	fn cancel_frame(&self, id: u32) {
		self.queue.frames.borrow_mut().retain(|(queued, _)| *queued != id);
		self.queue.cancelled.borrow_mut().push(id);
	}

	fn click_callback(&self, handler: Box<dyn FnMut(PointerEvent)>) -> ClickFn {
		Rc::new(RefCell::new(handler))
	}

	fn add_click_listener(&self, callback: &ClickFn) {
		self.queue.listeners.borrow_mut().push(callback.clone());
	}

	fn remove_click_listener(&self, callback: &ClickFn) {
		self.queue
			.listeners
			.borrow_mut()
			.retain(|listener| !Rc::ptr_eq(listener, callback));
	}
}
