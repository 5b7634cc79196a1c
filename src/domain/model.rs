use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;

/// Best known distance to a node.
///
/// `Unreached` is kept apart from any numeric value so that a legitimately negative or
/// very large distance is never mistaken for "no path yet".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Unreached,
    Reached(f64),
}

impl Distance {
    pub fn value(self) -> Option<f64> {
        match self {
            Distance::Reached(d) => Some(d),
            Distance::Unreached => None,
        }
    }

    pub fn is_reached(self) -> bool {
        matches!(self, Distance::Reached(_))
    }
}

/// Which extreme a DAG relaxation pass optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Shortest,
    Longest,
}

impl Objective {
    /// True when `candidate` strictly beats `current` under this objective.
    pub fn improves(self, candidate: f64, current: Distance) -> bool {
        let Distance::Reached(current) = current else {
            return true;
        };
        let want = match self {
            Objective::Shortest => Ordering::Less,
            Objective::Longest => Ordering::Greater,
        };
        candidate.partial_cmp(&current) == Some(want)
    }
}

/// Output of one single-source pass over a DAG.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceResult {
    pub objective: Objective,
    pub source: String,
    /// One entry per node of the topological order, in that order.
    pub distances: IndexMap<String, Distance>,
    /// Predecessor on the best known path. Absent for the source and unreached nodes.
    pub parents: IndexMap<String, String>,
}

impl DistanceResult {
    pub fn distance_to(&self, target: &str) -> Option<f64> {
        self.distances.get(target).and_then(|d| d.value())
    }

    pub fn reached(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.distances
            .iter()
            .filter_map(|(id, d)| d.value().map(|v| (id.as_str(), v)))
    }
}

/// Longest path found from the source, as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPath {
    pub target: String,
    pub length: f64,
    pub path: Vec<String>,
}
