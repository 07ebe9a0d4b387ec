//! Visual theming for the relationship graph.
//!
//! Node appearance is keyed by [`NodeKind`] through an exhaustive match, so a
//! new kind cannot be added without choosing its style.

use super::types::NodeKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string for canvas styles.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Marker style for one node kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Fill color.
	pub color: Color,
	/// Marker radius.
	pub radius: f64,
}

/// Per-kind marker styles.
#[derive(Clone, Debug)]
pub struct NodeStyles {
	/// Log entry markers.
	pub log_entry: NodeStyle,
	/// Phase markers.
	pub phase: NodeStyle,
	/// Step markers.
	pub step: NodeStyle,
	/// Memory anchor markers.
	pub memory_anchor: NodeStyle,
	/// Actor markers.
	pub actor: NodeStyle,
	/// Outline width; the outline color is the fill darkened by `border_shade`.
	pub border_width: f64,
	/// Darken factor for outlines.
	pub border_shade: f64,
}

/// Edge line style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke color.
	pub color: Color,
	/// Line width.
	pub width: f64,
	/// Optional (dash, gap) pattern. `None` draws solid lines.
	pub dash: Option<(f64, f64)>,
}

/// Label text style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Text color.
	pub color: Color,
	/// CSS font shorthand.
	pub font: String,
	/// Gap between the bottom of the marker and the top of the text.
	pub gap: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name used to select the theme from config.
	pub name: &'static str,
	/// Surface fill.
	pub background: Color,
	/// Edge lines.
	pub edge: EdgeStyle,
	/// Node labels.
	pub label: LabelStyle,
	/// Per-kind node markers.
	pub nodes: NodeStyles,
}

impl Theme {
	/// Dark dashboard theme (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(22, 27, 34),
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				width: 1.0,
				dash: None,
			},
			label: LabelStyle {
				color: Color::rgba(230, 237, 243, 0.85),
				font: "10px sans-serif".to_string(),
				gap: 4.0,
			},
			nodes: NodeStyles {
				log_entry: NodeStyle {
					color: Color::rgb(94, 129, 172),
					radius: 8.0,
				},
				phase: NodeStyle {
					color: Color::rgb(46, 125, 50),
					radius: 12.0,
				},
				step: NodeStyle {
					color: Color::rgb(230, 81, 0),
					radius: 10.0,
				},
				memory_anchor: NodeStyle {
					color: Color::rgb(123, 31, 162),
					radius: 10.0,
				},
				actor: NodeStyle {
					color: Color::rgb(0, 131, 143),
					radius: 10.0,
				},
				border_width: 1.0,
				border_shade: 0.3,
			},
		}
	}

	/// Light theme for printed reports and bright rooms
	pub fn daylight() -> Self {
		Self {
			name: "daylight",
			background: Color::rgb(250, 250, 247),
			edge: EdgeStyle {
				color: Color::rgba(90, 100, 115, 0.45),
				width: 1.0,
				dash: Some((4.0, 3.0)),
			},
			label: LabelStyle {
				color: Color::rgb(40, 44, 52),
				font: "10px sans-serif".to_string(),
				gap: 4.0,
			},
			nodes: NodeStyles {
				log_entry: NodeStyle {
					color: Color::rgb(25, 118, 210),
					radius: 8.0,
				},
				phase: NodeStyle {
					color: Color::rgb(56, 142, 60),
					radius: 12.0,
				},
				step: NodeStyle {
					color: Color::rgb(245, 124, 0),
					radius: 10.0,
				},
				memory_anchor: NodeStyle {
					color: Color::rgb(142, 36, 170),
					radius: 10.0,
				},
				actor: NodeStyle {
					color: Color::rgb(198, 40, 40),
					radius: 10.0,
				},
				border_width: 0.0,
				border_shade: 0.0,
			},
		}
	}

	/// Looks up a built-in theme by name.
	pub fn named(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"daylight" => Some(Self::daylight()),
			_ => None,
		}
	}

	/// Marker style for `kind`.
	pub fn node_style(&self, kind: NodeKind) -> NodeStyle {
		match kind {
			NodeKind::LogEntry => self.nodes.log_entry,
			NodeKind::Phase => self.nodes.phase,
			NodeKind::Step => self.nodes.step,
			NodeKind::MemoryAnchor => self.nodes.memory_anchor,
			NodeKind::Actor => self.nodes.actor,
		}
	}

	/// Outline for node markers, if the theme draws one.
	pub fn node_border(&self, style: NodeStyle) -> Option<(Color, f64)> {
		(self.nodes.border_width > 0.0)
			.then(|| (style.color.darken(self.nodes.border_shade), self.nodes.border_width))
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_distinct_colors(theme: &Theme) {
		for (i, a) in NodeKind::ALL.iter().enumerate() {
			for b in &NodeKind::ALL[i + 1..] {
				assert_ne!(
					theme.node_style(*a).color,
					theme.node_style(*b).color,
					"{}: {a:?} and {b:?} share a color",
					theme.name
				);
			}
		}
	}

	#[test]
	fn kinds_map_to_distinct_colors() {
		assert_distinct_colors(&Theme::default_theme());
		assert_distinct_colors(&Theme::daylight());
	}

	#[test]
	fn named_lookup() {
		assert_eq!(Theme::named("daylight").map(|t| t.name), Some("daylight"));
		assert_eq!(Theme::named("default").map(|t| t.name), Some("default"));
		assert!(Theme::named("neon").is_none());
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn border_only_when_width_set() {
		let dark = Theme::default_theme();
		let style = dark.node_style(NodeKind::Phase);
		let (color, width) = dark.node_border(style).unwrap();
		assert_eq!(width, 1.0);
		assert_eq!(color, style.color.darken(0.3));

		let light = Theme::daylight();
		assert!(light.node_border(light.node_style(NodeKind::Phase)).is_none());
	}
}
