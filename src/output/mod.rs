// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Rendering and planning are pure functions; only `writer` performs I/O.

mod render;
mod types;
mod writer;

// Re-export the public interface
pub use render::{render_catalog, render_outcomes};
pub use types::{DeliveryReport, Destination, OutputPlan};
pub use writer::deliver;
