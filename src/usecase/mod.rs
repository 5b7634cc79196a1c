//! Usecase layer: graph algorithms, application workflows + events.

pub mod analyze;
pub mod build;
pub mod condense;
pub mod dag_paths;
pub mod event;
pub mod stats;
pub mod topo;
pub mod validate;
