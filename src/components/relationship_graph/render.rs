//! Drawing the graph to a 2D surface.
//!
//! Each frame is drawn in three passes for correct z-ordering:
//! 1. Background
//! 2. Edges
//! 3. Node markers, each with its label beneath

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::graph::RelationshipGraph;
use super::theme::{Color, EdgeStyle, Theme};

/// The drawing operations the renderer needs from a 2D surface.
pub trait Surface {
	/// Current drawable size in surface units.
	fn size(&self) -> (f64, f64);
	/// Top-left corner of the surface in page (client) coordinates.
	fn offset(&self) -> (f64, f64);
	/// Wipe the whole surface and fill it with `background`.
	fn clear(&self, background: Color);
	/// Stroke a straight line in the given edge style.
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), style: &EdgeStyle);
	/// Fill a circle, optionally outlined with `(color, width)`.
	fn fill_circle(&self, center: (f64, f64), radius: f64, fill: Color, border: Option<(Color, f64)>);
	/// Draw `text` horizontally centred on `x`, hanging down from `top`.
	fn fill_text(&self, text: &str, x: f64, top: f64, color: Color, font: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn size(&self) -> (f64, f64) {
		self.canvas()
			.map(|c| (c.width() as f64, c.height() as f64))
			.unwrap_or((0.0, 0.0))
	}

	fn offset(&self) -> (f64, f64) {
		self.canvas()
			.map(|c| {
				let rect = c.get_bounding_client_rect();
				(rect.left(), rect.top())
			})
			.unwrap_or((0.0, 0.0))
	}

	fn clear(&self, background: Color) {
		let (width, height) = Surface::size(self);
		self.clear_rect(0.0, 0.0, width, height);
		self.set_fill_style_str(&background.to_css());
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), style: &EdgeStyle) {
		self.set_stroke_style_str(&style.color.to_css());
		self.set_line_width(style.width);
		let _ = match style.dash {
			Some((dash, gap)) => self.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			)),
			None => self.set_line_dash(&js_sys::Array::new()),
		};
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_circle(&self, center: (f64, f64), radius: f64, fill: Color, border: Option<(Color, f64)>) {
		self.begin_path();
		let _ = self.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(&fill.to_css());
		self.fill();

		if let Some((color, width)) = border {
			let _ = self.set_line_dash(&js_sys::Array::new());
			self.set_stroke_style_str(&color.to_css());
			self.set_line_width(width);
			self.stroke();
		}
	}

	fn fill_text(&self, text: &str, x: f64, top: f64, color: Color, font: &str) {
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline("top");
		self.set_fill_style_str(&color.to_css());
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, top);
	}
}

/// Renders the complete graph to the surface.
pub fn render<S: Surface + ?Sized>(graph: &RelationshipGraph, surface: &S, theme: &Theme) {
	surface.clear(theme.background);
	draw_edges(graph, surface, theme);
	draw_nodes(graph, surface, theme);
}

fn draw_edges<S: Surface + ?Sized>(graph: &RelationshipGraph, surface: &S, theme: &Theme) {
	let nodes = graph.nodes();
	for (a, b) in graph.edges() {
		surface.stroke_line((nodes[a].x, nodes[a].y), (nodes[b].x, nodes[b].y), &theme.edge);
	}
}

fn draw_nodes<S: Surface + ?Sized>(graph: &RelationshipGraph, surface: &S, theme: &Theme) {
	for node in graph.nodes() {
		let style = theme.node_style(node.kind());
		surface.fill_circle((node.x, node.y), style.radius, style.color, theme.node_border(style));
		surface.fill_text(
			&node.label,
			node.x,
			node.y + style.radius + theme.label.gap,
			theme.label.color,
			&theme.label.font,
		);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::relationship_graph::graph::build_graph;
	use crate::components::relationship_graph::testing::{DrawCall, RecordingSurface};
	use crate::components::relationship_graph::types::{LogRecord, NodeKind};

	fn sample() -> RelationshipGraph {
		let records = [
			LogRecord {
				id: "1".into(),
				summary: "Deploy".into(),
				actor: "alice".into(),
				phase_id: Some("P1".into()),
				..Default::default()
			},
			LogRecord {
				id: "2".into(),
				summary: "Rollback".into(),
				actor: "bob".into(),
				phase_id: Some("P1".into()),
				memory_anchor_id: Some("M7".into()),
				..Default::default()
			},
		];
		build_graph(&records, 640.0, 480.0, 30, &mut StdRng::seed_from_u64(11))
	}

	#[test]
	fn frame_is_cleared_then_edges_then_nodes() {
		let graph = sample();
		let surface = RecordingSurface::new(640.0, 480.0);
		render(&graph, &surface, &Theme::default());
		let calls = surface.calls();

		assert_eq!(calls.first(), Some(&DrawCall::Clear));
		let first_circle = calls
			.iter()
			.position(|c| matches!(c, DrawCall::Circle { .. }))
			.unwrap();
		let last_line = calls
			.iter()
			.rposition(|c| matches!(c, DrawCall::Line { .. }))
			.unwrap();
		assert!(last_line < first_circle);

		let lines = calls.iter().filter(|c| matches!(c, DrawCall::Line { .. })).count();
		let circles = calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. })).count();
		let texts = calls.iter().filter(|c| matches!(c, DrawCall::Text { .. })).count();
		assert_eq!(lines, graph.edge_count());
		assert_eq!(circles, graph.len());
		assert_eq!(texts, graph.len());
	}

	#[test]
	fn markers_use_kind_style_and_labels_sit_beneath() {
		let graph = sample();
		let theme = Theme::default();
		let surface = RecordingSurface::new(640.0, 480.0);
		render(&graph, &surface, &theme);
		let calls = surface.calls();

		let phase = graph.find(NodeKind::Phase, "P1").unwrap();
		let style = theme.node_style(NodeKind::Phase);
		assert!(calls.contains(&DrawCall::Circle {
			center: (phase.x, phase.y),
			radius: style.radius,
			fill: style.color,
		}));
		assert!(calls.contains(&DrawCall::Text {
			text: "P1".into(),
			x: phase.x,
			top: phase.y + style.radius + theme.label.gap,
		}));
	}

	#[test]
	fn edges_follow_current_positions() {
		let mut graph = sample();
		for node in graph.nodes_mut() {
			node.x += 5.0;
		}
		let surface = RecordingSurface::new(640.0, 480.0);
		render(&graph, &surface, &Theme::default());

		let nodes = graph.nodes();
		let expected: Vec<_> = graph
			.edges()
			.map(|(a, b)| DrawCall::Line {
				from: (nodes[a].x, nodes[a].y),
				to: (nodes[b].x, nodes[b].y),
			})
			.collect();
		let drawn: Vec<_> = surface
			.calls()
			.into_iter()
			.filter(|c| matches!(c, DrawCall::Line { .. }))
			.collect();
		assert_eq!(drawn, expected);
	}

	#[test]
	fn empty_graph_only_clears() {
		let surface = RecordingSurface::new(100.0, 100.0);
		render(&RelationshipGraph::default(), &surface, &Theme::default());
		assert_eq!(surface.calls(), vec![DrawCall::Clear]);
	}
}
