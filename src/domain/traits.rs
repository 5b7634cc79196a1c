use crate::domain::graph::{Graph, SccResult};
use crate::usecase::stats::Metrics;

pub trait SccDetector {
    fn compute_scc(&self, graph: &Graph, metrics: &mut Metrics) -> SccResult;
}
