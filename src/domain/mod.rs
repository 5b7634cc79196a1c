//! Domain layer: graph types and the detector port. No I/O.

pub mod graph;
pub mod model;
pub mod traits;
