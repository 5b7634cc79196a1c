use crate::usecase::stats::MetricsSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    SccComputed {
        nodes: usize,
        edges: usize,
        components: usize,
        cyclic_components: usize,
    },

    CondensationBuilt {
        nodes: usize,
        edges: usize,
    },

    TopoOrdered {
        order: Vec<String>,
        complete: bool,
    },

    PathsComputed {
        source: String,
        reached: usize,
        critical_target: Option<String>,
        critical_length: Option<f64>,
    },

    Finished {
        metrics: MetricsSnapshot,
    },
}
