//! Input records and the node types they expand into.

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

/// A governance log record as supplied by the host.
///
/// Only the fields the graph consumes are modelled; anything else in the
/// source JSON is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LogRecord {
	/// Unique record identifier.
	pub id: String,
	/// Free-form summary. Source of the log node label.
	pub summary: String,
	/// Who produced the entry.
	pub actor: String,
	/// Optional phase reference.
	pub phase_id: Option<String>,
	/// Optional step reference.
	pub step_id: Option<String>,
	/// Optional memory anchor reference.
	pub memory_anchor_id: Option<String>,
}

/// The closed set of node kinds in a relationship graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
	/// One governance log record.
	LogEntry,
	/// A phase referenced by records.
	Phase,
	/// A step referenced by records.
	Step,
	/// A memory anchor referenced by records.
	MemoryAnchor,
	/// The actor that produced a record.
	Actor,
}

impl NodeKind {
	/// Every kind.
	pub const ALL: [NodeKind; 5] = [
		NodeKind::LogEntry,
		NodeKind::Phase,
		NodeKind::Step,
		NodeKind::MemoryAnchor,
		NodeKind::Actor,
	];

	/// Short tag used in the display form of node ids.
	pub fn tag(self) -> &'static str {
		match self {
			NodeKind::LogEntry => "log",
			NodeKind::Phase => "phase",
			NodeKind::Step => "step",
			NodeKind::MemoryAnchor => "anchor",
			NodeKind::Actor => "actor",
		}
	}
}

/// Type-qualified node identity.
///
/// Keys compare on `(kind, raw_id)`, so a phase and a log entry sharing a raw
/// id stay distinct no matter what characters the raw id contains.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
	/// What the node represents.
	pub kind: NodeKind,
	/// Identifier as it appears in the record.
	pub raw_id: String,
}

impl NodeKey {
	/// Key for `raw_id` under `kind`.
	pub fn new(kind: NodeKind, raw_id: impl Into<String>) -> Self {
		Self {
			kind,
			raw_id: raw_id.into(),
		}
	}
}

impl fmt::Display for NodeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.kind.tag(), self.raw_id)
	}
}

/// A vertex in the relationship graph, with its live simulation state.
#[derive(Clone, Debug)]
pub struct GraphNode {
	/// Identity.
	pub key: NodeKey,
	/// Display label drawn beneath the marker.
	pub label: String,
	/// The originating record. Only log entry nodes carry one.
	pub payload: Option<LogRecord>,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity.
	pub vx: f64,
	/// Vertical velocity.
	pub vy: f64,
	/// Arena indices of linked nodes. Always symmetric across the graph.
	pub connections: BTreeSet<usize>,
}

impl GraphNode {
	/// Kind of this node.
	pub fn kind(&self) -> NodeKind {
		self.key.kind
	}

	/// Display id, e.g. `phase-P1`.
	pub fn id(&self) -> String {
		self.key.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_deserializes_with_missing_optionals() {
		let json = r#"[
			{"id": "1", "summary": "Kickoff", "actor": "alice", "phase_id": "P1", "extra": 42},
			{"id": "2", "summary": "Review", "actor": "bob", "step_id": null}
		]"#;
		let records: Vec<LogRecord> = serde_json::from_str(json).unwrap();

		assert_eq!(records.len(), 2);
		assert_eq!(records[0].phase_id.as_deref(), Some("P1"));
		assert_eq!(records[0].step_id, None);
		assert_eq!(records[1].phase_id, None);
		assert_eq!(records[1].memory_anchor_id, None);
	}

	#[test]
	fn keys_are_type_qualified() {
		let phase = NodeKey::new(NodeKind::Phase, "x-1");
		let log = NodeKey::new(NodeKind::LogEntry, "x-1");

		assert_ne!(phase, log);
		assert_eq!(phase.to_string(), "phase-x-1");
		assert_eq!(log.to_string(), "log-x-1");
	}

	#[test]
	fn tags_are_unique() {
		let tags: BTreeSet<_> = NodeKind::ALL.iter().map(|k| k.tag()).collect();
		assert_eq!(tags.len(), NodeKind::ALL.len());
	}
}
