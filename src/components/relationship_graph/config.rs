//! Engine configuration.
//!
//! Every field has a default, so a partial (or empty) JSON object is a valid
//! configuration.

use log::warn;
use serde::Deserialize;

use super::simulation::SimulationParameters;
use super::theme::Theme;

/// Tunables for building, simulating and interacting with the graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Physics constants for the layout.
	pub simulation: SimulationParameters,
	/// Maximum click distance from a node centre that still selects it.
	pub hit_radius: f64,
	/// Log entry labels are cut to this many characters.
	pub label_length: usize,
	/// Fixed seed for initial placement. Unset means a fresh random layout.
	pub seed: Option<u64>,
	/// Built-in theme name.
	pub theme: String,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			simulation: SimulationParameters::default(),
			hit_radius: 15.0,
			label_length: 30,
			seed: None,
			theme: "default".to_string(),
		}
	}
}

impl GraphConfig {
	/// Returns a copy safe to run the engine with.
	///
	/// Physics values are repaired by [`SimulationParameters::sanitized`]; a
	/// negative or non-finite hit radius falls back to the default.
	pub fn sanitized(self) -> Self {
		let hit_radius = if self.hit_radius.is_finite() && self.hit_radius >= 0.0 {
			self.hit_radius
		} else {
			warn!(
				"relationship-graph: hit_radius = {} is invalid, using default",
				self.hit_radius
			);
			Self::default().hit_radius
		};
		Self {
			simulation: self.simulation.sanitized(),
			hit_radius,
			..self
		}
	}

	/// Resolves the configured theme, falling back to the default.
	pub fn theme(&self) -> Theme {
		Theme::named(&self.theme).unwrap_or_else(|| {
			warn!(
				"relationship-graph: unknown theme {:?}, using default",
				self.theme
			);
			Theme::default()
		})
	}
}
