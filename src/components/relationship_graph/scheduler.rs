//! The simulate-then-render loop and its owner.
//!
//! An [`AnimationScheduler`] exclusively owns one graph. While running it
//! keeps exactly one frame request outstanding and one click listener
//! registered; [`AnimationScheduler::stop`] (also run on drop) cancels both
//! synchronously. Host callbacks only hold weak references, so a frame that
//! fires after its scheduler is gone does nothing.
//!
//! [`GraphView`] holds at most one scheduler and stops it before building a
//! replacement, so two loops can never run for the same view.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::GraphConfig;
use super::graph::{RelationshipGraph, build_graph};
use super::host::Host;
use super::interaction::{self, PointerEvent};
use super::render::{self, Surface};
use super::simulation::{self, Bounds, SimulationParameters};
use super::theme::Theme;
use super::types::LogRecord;

/// Host callback invoked with the record behind a clicked log entry node.
pub type NodeSelectHandler = Rc<dyn Fn(&LogRecord)>;

struct LoopState<H: Host, S: Surface> {
	host: H,
	surface: S,
	graph: RefCell<RelationshipGraph>,
	params: SimulationParameters,
	hit_radius: f64,
	theme: Theme,
	on_select: NodeSelectHandler,
	frame_callback: H::FrameCallback,
	click_callback: H::ClickCallback,
	pending: Cell<Option<H::FrameId>>,
	running: Cell<bool>,
}

impl<H: Host, S: Surface + 'static> LoopState<H, S> {
	fn frame(&self) {
		self.pending.set(None);
		if !self.running.get() {
			return;
		}

		let (width, height) = self.surface.size();
		let bounds = Bounds::new(width, height, self.params.margin);
		{
			let mut graph = self.graph.borrow_mut();
			simulation::step(&mut graph, bounds, &self.params);
			render::render(&graph, &self.surface, &self.theme);
		}

		self.request_next();
	}

	fn request_next(&self) {
		match self.host.request_frame(&self.frame_callback) {
			Some(id) => self.pending.set(Some(id)),
			None => {
				warn!("relationship-graph: frame request refused, stopping animation");
				self.halt();
			}
		}
	}

	fn click(&self, event: PointerEvent) {
		if !self.running.get() {
			return;
		}
		interaction::handle_click(
			&self.graph,
			self.surface.offset(),
			event,
			self.hit_radius,
			&*self.on_select,
		);
	}

	fn halt(&self) {
		if !self.running.replace(false) {
			return;
		}
		if let Some(id) = self.pending.take() {
			self.host.cancel_frame(id);
		}
		self.host.remove_click_listener(&self.click_callback);
		debug!("relationship-graph: animation stopped");
	}
}

/// A cancellable animation loop over one owned graph.
pub struct AnimationScheduler<H: Host, S: Surface + 'static> {
	state: Rc<LoopState<H, S>>,
}

impl<H: Host, S: Surface + 'static> AnimationScheduler<H, S> {
	/// Builds a stopped loop over `graph`. Call [`Self::start`] to run it.
	pub fn new(
		graph: RelationshipGraph,
		host: H,
		surface: S,
		config: &GraphConfig,
		theme: Theme,
		on_select: NodeSelectHandler,
	) -> Self {
		let state = Rc::new_cyclic(|weak: &Weak<LoopState<H, S>>| {
			let frame_weak = weak.clone();
			let frame_callback = host.frame_callback(Box::new(move || {
				if let Some(state) = frame_weak.upgrade() {
					state.frame();
				}
			}));
			let click_weak = weak.clone();
			let click_callback = host.click_callback(Box::new(move |event| {
				if let Some(state) = click_weak.upgrade() {
					state.click(event);
				}
			}));

			LoopState {
				host,
				surface,
				graph: RefCell::new(graph),
				params: config.simulation.clone().sanitized(),
				hit_radius: config.hit_radius,
				theme,
				on_select,
				frame_callback,
				click_callback,
				pending: Cell::new(None),
				running: Cell::new(false),
			}
		});
		Self { state }
	}

	/// Starts ticking and listening for clicks. Does nothing if already running.
	pub fn start(&self) {
		let state = &self.state;
		if state.running.replace(true) {
			return;
		}
		state.host.add_click_listener(&state.click_callback);
		state.request_next();
		debug!(
			"relationship-graph: animation started ({} nodes)",
			state.graph.borrow().len()
		);
	}

	/// Cancels the pending frame and removes the click listener.
	pub fn stop(&self) {
		self.state.halt();
	}

	/// Whether a frame is scheduled and clicks are delivered.
	pub fn is_running(&self) -> bool {
		self.state.running.get()
	}

	/// The live graph. Do not hold across a frame boundary.
	pub fn graph(&self) -> Ref<'_, RelationshipGraph> {
		self.state.graph.borrow()
	}
}

impl<H: Host, S: Surface + 'static> Drop for AnimationScheduler<H, S> {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Owner of the active scheduler for one drawing surface.
pub struct GraphView<H: Host, S: Surface + Clone + 'static> {
	host: H,
	surface: S,
	config: GraphConfig,
	theme: Theme,
	on_select: NodeSelectHandler,
	rng: StdRng,
	active: Option<AnimationScheduler<H, S>>,
}

impl<H: Host, S: Surface + Clone + 'static> GraphView<H, S> {
	/// Creates an empty view. Nothing runs until [`Self::show`].
	pub fn new(host: H, surface: S, config: GraphConfig, on_select: NodeSelectHandler) -> Self {
		let config = config.sanitized();
		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		let theme = config.theme();
		Self {
			host,
			surface,
			config,
			theme,
			on_select,
			rng,
			active: None,
		}
	}

	/// Replaces the displayed graph with one built from `records`.
	///
	/// The previous scheduler is stopped and dropped before the new graph is
	/// built.
	pub fn show(&mut self, records: &[LogRecord]) {
		if let Some(previous) = self.active.take() {
			previous.stop();
			drop(previous);
		}

		let (width, height) = self.surface.size();
		let graph = build_graph(
			records,
			width,
			height,
			self.config.label_length,
			&mut self.rng,
		);
		info!(
			"relationship-graph: showing {} records as {} nodes, {} edges",
			records.len(),
			graph.len(),
			graph.edge_count()
		);

		let scheduler = AnimationScheduler::new(
			graph,
			self.host.clone(),
			self.surface.clone(),
			&self.config,
			self.theme.clone(),
			self.on_select.clone(),
		);
		scheduler.start();
		self.active = Some(scheduler);
	}

	/// Stops and discards the active scheduler, if any.
	pub fn unmount(&mut self) {
		if let Some(active) = self.active.take() {
			active.stop();
		}
	}

	/// The running scheduler, if a graph is shown.
	pub fn scheduler(&self) -> Option<&AnimationScheduler<H, S>> {
		self.active.as_ref()
	}
}
