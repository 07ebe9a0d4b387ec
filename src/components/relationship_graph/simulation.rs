//! Force-directed layout: one discrete physics step per call.
//!
//! Each step applies pairwise inverse-square repulsion, linear attraction along
//! connections, velocity damping, integration, and finally clamps every node
//! into the margin rectangle. All forces are computed from the positions at
//! the start of the step, so the result does not depend on node order.
//!
//! Cost is quadratic in the node count.

use log::warn;
use serde::Deserialize;

use super::graph::RelationshipGraph;

/// Tunable physics constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
	/// Repulsion numerator: force = repulsion / distance².
	pub repulsion: f64,
	/// Spring factor applied to the signed offset toward each connected node.
	pub attraction: f64,
	/// Per-step velocity multiplier, below 1.
	pub damping: f64,
	/// Distance kept clear along every surface edge.
	pub margin: f64,
	/// Distance floor used in the repulsion term.
	pub min_distance: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			repulsion: 100.0,
			attraction: 0.01,
			damping: 0.9,
			margin: 50.0,
			min_distance: 1.0,
		}
	}
}

impl SimulationParameters {
	/// Smallest allowed repulsion distance floor.
	pub const MIN_DISTANCE_FLOOR: f64 = 1.0;

	/// Replaces values that would break the step with safe ones.
	///
	/// Non-finite fields fall back to their defaults, `damping` must lie in
	/// `(0, 1)`, `min_distance` is raised to at least 1 and a negative margin
	/// becomes 0. Forces then stay finite for any finite positions.
	pub fn sanitized(self) -> Self {
		let defaults = Self::default();
		let finite_or = |name: &str, value: f64, fallback: f64| {
			if value.is_finite() {
				value
			} else {
				warn!("relationship-graph: {name} = {value} is not finite, using {fallback}");
				fallback
			}
		};

		let repulsion = finite_or("repulsion", self.repulsion, defaults.repulsion);
		let attraction = finite_or("attraction", self.attraction, defaults.attraction);
		let mut damping = finite_or("damping", self.damping, defaults.damping);
		if damping <= 0.0 || damping >= 1.0 {
			warn!(
				"relationship-graph: damping = {damping} outside (0, 1), using {}",
				defaults.damping
			);
			damping = defaults.damping;
		}
		let margin = finite_or("margin", self.margin, defaults.margin).max(0.0);
		let min_distance = finite_or("min_distance", self.min_distance, defaults.min_distance)
			.max(Self::MIN_DISTANCE_FLOOR);

		Self {
			repulsion,
			attraction,
			damping,
			margin,
			min_distance,
		}
	}
}

/// The rectangle node positions are clamped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Right edge.
	pub max_x: f64,
	/// Top edge.
	pub min_y: f64,
	/// Bottom edge.
	pub max_y: f64,
}

impl Bounds {
	/// Inset `width` x `height` by `margin` on every side.
	///
	/// An axis shorter than twice the margin collapses to its midpoint.
	pub fn new(width: f64, height: f64, margin: f64) -> Self {
		let (min_x, max_x) = inset(width, margin);
		let (min_y, max_y) = inset(height, margin);
		Self {
			min_x,
			max_x,
			min_y,
			max_y,
		}
	}

	/// Inclusive on every edge.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
	}

	fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
		(x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
	}
}

fn inset(extent: f64, margin: f64) -> (f64, f64) {
	let extent = extent.max(0.0);
	let margin = margin.max(0.0);
	if extent >= 2.0 * margin {
		(margin, extent - margin)
	} else {
		let mid = extent / 2.0;
		(mid, mid)
	}
}

/// Advances every node by one step, in place.
pub fn step(graph: &mut RelationshipGraph, bounds: Bounds, params: &SimulationParameters) {
	let positions: Vec<(f64, f64)> = graph.nodes().iter().map(|n| (n.x, n.y)).collect();
	let mut forces = vec![(0.0_f64, 0.0_f64); positions.len()];

	for (i, &(xi, yi)) in positions.iter().enumerate() {
		for (j, &(xj, yj)) in positions.iter().enumerate() {
			if i == j {
				continue;
			}
			let (dx, dy) = (xi - xj, yi - yj);
			// Coincident nodes have no direction to push along.
			if dx == 0.0 && dy == 0.0 {
				continue;
			}
			let distance = dx.hypot(dy).max(params.min_distance);
			let force = params.repulsion / (distance * distance);
			forces[i].0 += dx / distance * force;
			forces[i].1 += dy / distance * force;
		}
	}

	for (i, node) in graph.nodes().iter().enumerate() {
		let (xi, yi) = positions[i];
		for &j in &node.connections {
			let (xj, yj) = positions[j];
			forces[i].0 += (xj - xi) * params.attraction;
			forces[i].1 += (yj - yi) * params.attraction;
		}
	}

	for (node, (fx, fy)) in graph.nodes_mut().iter_mut().zip(forces) {
		node.vx = (node.vx + fx) * params.damping;
		node.vy = (node.vy + fy) * params.damping;
		(node.x, node.y) = bounds.clamp(node.x + node.vx, node.y + node.vy);
	}
}
