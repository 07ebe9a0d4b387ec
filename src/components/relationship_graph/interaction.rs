//! Pointer hit-testing and node selection.

use std::cell::RefCell;

use super::graph::RelationshipGraph;
use super::types::{LogRecord, NodeKind};

/// A pointer click in page (client) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
	/// Horizontal page coordinate.
	pub client_x: f64,
	/// Vertical page coordinate.
	pub client_y: f64,
}

/// Translates a client-space event into surface-local coordinates.
pub fn to_surface_coords(event: PointerEvent, offset: (f64, f64)) -> (f64, f64) {
	(event.client_x - offset.0, event.client_y - offset.1)
}

/// Index of the node nearest to `(x, y)` within `hit_radius`, if any.
/// Ties go to the earlier node.
pub fn node_at(graph: &RelationshipGraph, x: f64, y: f64, hit_radius: f64) -> Option<usize> {
	let mut best: Option<(usize, f64)> = None;
	for (idx, node) in graph.nodes().iter().enumerate() {
		let distance = (node.x - x).hypot(node.y - y);
		if distance > hit_radius {
			continue;
		}
		if best.is_none_or(|(_, d)| distance < d) {
			best = Some((idx, distance));
		}
	}
	best.map(|(idx, _)| idx)
}

/// The record behind the nearest hit, when that hit is a log entry.
pub fn selectable_record(
	graph: &RelationshipGraph,
	x: f64,
	y: f64,
	hit_radius: f64,
) -> Option<&LogRecord> {
	let node = &graph.nodes()[node_at(graph, x, y, hit_radius)?];
	match node.kind() {
		NodeKind::LogEntry => node.payload.as_ref(),
		NodeKind::Phase | NodeKind::Step | NodeKind::MemoryAnchor | NodeKind::Actor => None,
	}
}

/// Resolves a click against the live graph and notifies `on_select` for log
/// entries. Returns whether `on_select` ran.
///
/// The graph borrow ends before `on_select` is called, so the handler may
/// rebuild or tear down the view that owns `graph`. A panic in `on_select`
/// propagates to the caller.
pub fn handle_click(
	graph: &RefCell<RelationshipGraph>,
	surface_offset: (f64, f64),
	event: PointerEvent,
	hit_radius: f64,
	on_select: &dyn Fn(&LogRecord),
) -> bool {
	let (x, y) = to_surface_coords(event, surface_offset);
	let record = selectable_record(&graph.borrow(), x, y, hit_radius).cloned();
	match record {
		Some(record) => {
			on_select(&record);
			true
		}
		None => false,
	}
}
