//! relationship-graph: Force-directed relationship graph for governance logs.
//!
//! This crate provides a WASM-based graph component that links log entries to
//! the phases, steps, memory anchors and actors they reference, lays them out
//! with a physics simulation, and reports clicked entries back to the host.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod components;

pub use components::relationship_graph::{GraphConfig, LogRecord, RelationshipGraphCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("relationship-graph: logging initialized");
}

/// Parse the JSON body of the script element with the given id.
fn load_json<T: DeserializeOwned>(element_id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(element_id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("relationship-graph: failed to parse #{}: {}", element_id, e);
			None
		}
	}
}

/// Load records from a script element with id="graph-data".
/// Expected format: JSON array of records.
fn load_records() -> Vec<LogRecord> {
	let records: Vec<LogRecord> = load_json("graph-data").unwrap_or_default();
	info!("relationship-graph: loaded {} records", records.len());
	records
}

/// Load engine settings from an optional script element with id="graph-config".
fn load_config() -> GraphConfig {
	load_json::<GraphConfig>("graph-config")
		.unwrap_or_default()
		.sanitized()
}

/// Main application component.
/// Loads records from the DOM and shows the clicked entry beside the graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let records = load_records();
	let records_signal = Signal::derive(move || records.clone());
	let (selected, set_selected) = signal(None::<LogRecord>);

	let on_node_select = move |record: LogRecord| {
		info!("relationship-graph: selected {}", record.id);
		set_selected.set(Some(record));
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Governance Log Relationships" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<RelationshipGraphCanvas
				records=records_signal
				on_node_select=on_node_select
				config=load_config()
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Governance Log"</h1>
				<p class="subtitle">"Click a log entry to inspect it."</p>
				{move || {
					selected
						.get()
						.map(|record| {
							view! {
								<div class="record-details">
									<h2>{record.id}</h2>
									<p>{record.summary}</p>
									<p class="actor">{record.actor}</p>
								</div>
							}
						})
				}}
			</div>
		</div>
	}
}
