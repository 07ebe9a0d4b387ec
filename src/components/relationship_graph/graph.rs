//! Graph construction from log records.
//!
//! Every record becomes a log entry node; every distinct phase, step, memory
//! anchor and actor it references becomes one shared node of that kind. Edges
//! live in each node's `connections` set and are only ever added in pairs, so
//! adjacency is symmetric by construction.

use std::collections::{BTreeSet, HashMap};

use log::debug;
use rand::Rng;

use super::types::{GraphNode, LogRecord, NodeKey, NodeKind};

/// Node arena plus a key index. Rebuilt from scratch for every new record list.
#[derive(Clone, Debug, Default)]
pub struct RelationshipGraph {
	nodes: Vec<GraphNode>,
	index: HashMap<NodeKey, usize>,
}

impl RelationshipGraph {
	/// All nodes in arena order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub(crate) fn nodes_mut(&mut self) -> &mut [GraphNode] {
		&mut self.nodes
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when no records produced a node.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Node stored under `key`.
	pub fn get(&self, key: &NodeKey) -> Option<&GraphNode> {
		self.index.get(key).map(|&i| &self.nodes[i])
	}

	/// Node of `kind` with the given raw id.
	pub fn find(&self, kind: NodeKind, raw_id: &str) -> Option<&GraphNode> {
		self.get(&NodeKey::new(kind, raw_id))
	}

	/// Each undirected edge once, as `(lower, higher)` arena indices.
	pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.nodes.iter().enumerate().flat_map(|(i, node)| {
			node.connections
				.iter()
				.copied()
				.filter(move |&j| j > i)
				.map(move |j| (i, j))
		})
	}

	/// Number of undirected edges.
	pub fn edge_count(&self) -> usize {
		self.edges().count()
	}

	/// Returns the index for `key`, creating the node if it is new.
	fn intern(
		&mut self,
		key: NodeKey,
		make: impl FnOnce(&NodeKey) -> (String, Option<LogRecord>, (f64, f64)),
	) -> usize {
		if let Some(&idx) = self.index.get(&key) {
			return idx;
		}
		let (label, payload, (x, y)) = make(&key);
		let idx = self.nodes.len();
		self.nodes.push(GraphNode {
			key: key.clone(),
			label,
			payload,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			connections: BTreeSet::new(),
		});
		self.index.insert(key, idx);
		idx
	}

	fn connect(&mut self, a: usize, b: usize) {
		if a == b {
			return;
		}
		self.nodes[a].connections.insert(b);
		self.nodes[b].connections.insert(a);
	}
}

/// Truncates a summary to `max_chars` characters, marking the cut with `...`.
pub fn truncate_label(summary: &str, max_chars: usize) -> String {
	match summary.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}...", &summary[..cut]),
		None => summary.to_string(),
	}
}

fn random_in<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
	if extent > 0.0 {
		rng.gen_range(0.0..extent)
	} else {
		0.0
	}
}

/// Builds the relationship graph for `records`.
///
/// New nodes are placed uniformly at random inside `width` x `height` using
/// `rng`; velocities start at zero.
pub fn build_graph<R: Rng + ?Sized>(
	records: &[LogRecord],
	width: f64,
	height: f64,
	label_length: usize,
	rng: &mut R,
) -> RelationshipGraph {
	let mut graph = RelationshipGraph::default();
	let place = |rng: &mut R| (random_in(rng, width), random_in(rng, height));

	for record in records {
		let log_idx = graph.intern(NodeKey::new(NodeKind::LogEntry, &record.id), |_| {
			(
				truncate_label(&record.summary, label_length),
				Some(record.clone()),
				place(rng),
			)
		});

		let references = [
			(NodeKind::Phase, record.phase_id.as_deref()),
			(NodeKind::Step, record.step_id.as_deref()),
			(NodeKind::MemoryAnchor, record.memory_anchor_id.as_deref()),
			(NodeKind::Actor, Some(record.actor.as_str())),
		];

		for (kind, raw_id) in references {
			let Some(raw_id) = raw_id.filter(|id| !id.is_empty()) else {
				continue;
			};
			let ref_idx = graph.intern(NodeKey::new(kind, raw_id), |key| {
				(key.raw_id.clone(), None, place(rng))
			});
			graph.connect(log_idx, ref_idx);
		}
	}

	debug!(
		"relationship-graph: built {} nodes, {} edges from {} records",
		graph.len(),
		graph.edge_count(),
		records.len()
	);
	graph
}
