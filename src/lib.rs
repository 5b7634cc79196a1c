//! SCC condensation and DAG path analysis for weighted directed graphs.
//!
//! The crate follows Clean Architecture layers:
//! - domain: graph types, distances, the SCC detector port
//! - usecase: condensation, topological ordering, DAG paths, the analysis pipeline
//! - infrastructure: Tarjan detector, serde + async IO, schema validation, events
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
