//! Relationship graph of governance log records.
//!
//! Turns a list of log records into a graph of log entries and the phases,
//! steps, memory anchors and actors they reference, then:
//! - Lays it out with a continuously running force simulation
//! - Renders it to a canvas every animation frame
//! - Reports clicks on log entry nodes back to the host with the full record
//!
//! The engine is split so that everything except the browser bindings runs
//! natively: [`build_graph`] and [`simulation::step`] are plain functions,
//! drawing goes through the [`Surface`] trait and frame scheduling through the
//! [`Host`] trait.
//!
//! # Example
//!
//! ```ignore
//! use relationship_graph::{LogRecord, RelationshipGraphCanvas};
//!
//! let records = vec![LogRecord {
//!     id: "1".into(),
//!     summary: "Phase kickoff".into(),
//!     actor: "alice".into(),
//!     phase_id: Some("P1".into()),
//!     ..Default::default()
//! }];
//!
//! view! {
//!     <RelationshipGraphCanvas
//!         records=Signal::stored(records)
//!         on_node_select=move |record: LogRecord| log::info!("{}", record.id)
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
pub mod config;
pub mod graph;
pub mod host;
pub mod interaction;
pub mod render;
pub mod scheduler;
pub mod simulation;
#[cfg(test)]
mod testing;
pub mod theme;
mod types;

pub use component::RelationshipGraphCanvas;
pub use config::GraphConfig;
pub use graph::{RelationshipGraph, build_graph};
pub use host::{BrowserHost, Host};
pub use render::Surface;
pub use scheduler::{AnimationScheduler, GraphView, NodeSelectHandler};
pub use theme::Theme;
pub use types::{GraphNode, LogRecord, NodeKey, NodeKind};
