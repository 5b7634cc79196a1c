//! Single-source shortest and longest paths over a DAG.
//!
//! Both passes visit nodes once, in the supplied topological order, and relax the
//! outgoing edges of every reached node. This is O(V + E) and works with weights of
//! any sign because no cycle can feed a node after it has been scanned.
//!
//! If `topo` does not cover the whole graph (cyclic input), edges into nodes missing
//! from the order are still counted as relaxations but never update anything. The
//! distances for such input are not meaningful.

use crate::domain::graph::Graph;
use crate::domain::model::{Distance, DistanceResult, Objective};
use crate::usecase::stats::Metrics;
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("source not found in topological order: {0}")]
    SourceNotFound(String),
}

pub struct DagPathfinder<'g> {
    graph: &'g Graph,
}

impl<'g> DagPathfinder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    pub fn shortest_from(
        &self,
        source: &str,
        topo: &[String],
        metrics: &mut Metrics,
    ) -> Result<DistanceResult, PathError> {
        self.relax_in_order(Objective::Shortest, source, topo, metrics)
    }

    pub fn longest_from(
        &self,
        source: &str,
        topo: &[String],
        metrics: &mut Metrics,
    ) -> Result<DistanceResult, PathError> {
        self.relax_in_order(Objective::Longest, source, topo, metrics)
    }

    fn relax_in_order(
        &self,
        objective: Objective,
        source: &str,
        topo: &[String],
        metrics: &mut Metrics,
    ) -> Result<DistanceResult, PathError> {
        let mut distances: IndexMap<String, Distance> = topo
            .iter()
            .map(|v| (v.clone(), Distance::Unreached))
            .collect();

        match distances.get_mut(source) {
            Some(d) => *d = Distance::Reached(0.0),
            None => return Err(PathError::SourceNotFound(source.to_owned())),
        }

        let mut parents: IndexMap<String, String> = IndexMap::new();

        for u in topo {
            let Some(du) = distances.get(u).and_then(|d| d.value()) else {
                continue;
            };
            for e in self.graph.edges(u) {
                metrics.count_relaxation();
                let Some(dv) = distances.get_mut(&e.to) else {
                    continue;
                };
                let candidate = du + e.weight;
                if objective.improves(candidate, *dv) {
                    *dv = Distance::Reached(candidate);
                    parents.insert(e.to.clone(), u.clone());
                }
            }
        }

        Ok(DistanceResult {
            objective,
            source: source.to_owned(),
            distances,
            parents,
        })
    }
}

/// Walks parent pointers back from `target` and returns the path source-first.
///
/// A target without a parent yields `[target]`; for an unreached target that single
/// node is not a real path, so check the distance first.
pub fn reconstruct_path(parents: &IndexMap<String, String>, target: &str) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    let mut cur = Some(target);
    while let Some(node) = cur {
        if !seen.insert(node) {
            break;
        }
        cur = parents.get(node).map(String::as_str);
    }
    seen.into_iter().rev().map(str::to_owned).collect()
}

impl DistanceResult {
    /// Source-to-target path, or `None` when `target` was not reached.
    pub fn path_to(&self, target: &str) -> Option<Vec<String>> {
        self.distance_to(target)
            .map(|_| reconstruct_path(&self.parents, target))
    }
}
