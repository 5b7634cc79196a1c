use crate::domain::graph::{Graph, SccResult};
use crate::domain::model::{CriticalPath, DistanceResult};
use crate::domain::traits::SccDetector;
use crate::usecase::condense::{build_condensation, Condensation};
use crate::usecase::dag_paths::{reconstruct_path, DagPathfinder, PathError};
use crate::usecase::event::AppEvent;
use crate::usecase::stats::{Metrics, MetricsSnapshot};
use crate::usecase::topo::{is_complete, topo_sort};
use anyhow::Result;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Original node to measure distances from. Defaults to the first component in
    /// topological order.
    pub source: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PathAnalysis {
    /// Condensation label the passes started from.
    pub source: String,
    pub shortest: DistanceResult,
    pub longest: DistanceResult,
    pub critical_path: Option<CriticalPath>,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub scc: SccResult,
    pub condensation: Condensation,
    pub topo_order: Vec<String>,
    /// `None` for an empty graph.
    pub paths: Option<PathAnalysis>,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct CondensedEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Serializable view of an [`Analysis`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub components: Vec<Vec<String>>,
    pub cyclic_components: usize,
    pub condensation_nodes: usize,
    pub condensation_edges: Vec<CondensedEdge>,
    pub topo_order: Vec<String>,
    pub topo_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortest: Option<DistanceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest: Option<DistanceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_path: Option<CriticalPath>,
    pub metrics: MetricsSnapshot,
}

impl Analysis {
    pub fn report(&self) -> AnalysisReport {
        let cond = &self.condensation.graph;
        let condensation_edges = cond
            .nodes()
            .flat_map(|u| {
                cond.edges(u).iter().map(move |e| CondensedEdge {
                    from: u.to_string(),
                    to: e.to.clone(),
                    weight: e.weight,
                })
            })
            .collect();

        AnalysisReport {
            components: self.scc.components.clone(),
            cyclic_components: self.scc.cyclic_count(),
            condensation_nodes: cond.node_count(),
            condensation_edges,
            topo_order: self.topo_order.clone(),
            topo_complete: is_complete(&self.topo_order, cond),
            source: self.paths.as_ref().map(|p| p.source.clone()),
            shortest: self.paths.as_ref().map(|p| p.shortest.clone()),
            longest: self.paths.as_ref().map(|p| p.longest.clone()),
            critical_path: self.paths.as_ref().and_then(|p| p.critical_path.clone()),
            metrics: self.metrics.clone(),
        }
    }
}

/// SCC → condensation → topological order → shortest/longest paths, timed as one run.
pub async fn analyze_graph(
    graph: &Graph,
    options: &AnalyzeOptions,
    scc: &dyn SccDetector,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<Analysis> {
    let mut metrics = Metrics::new();
    metrics.start_timer();

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let scc_res = scc.compute_scc(graph, &mut metrics);
    debug!(
        components = scc_res.components.len(),
        dfs_visits = metrics.dfs_visits(),
        "scc computed"
    );
    emit(
        &sink,
        AppEvent::SccComputed {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            components: scc_res.components.len(),
            cyclic_components: scc_res.cyclic_count(),
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "scc".into() }).await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "condensation".into(),
        },
    )
    .await;
    let condensation = build_condensation(graph, &scc_res);
    emit(
        &sink,
        AppEvent::CondensationBuilt {
            nodes: condensation.graph.node_count(),
            edges: condensation.graph.edge_count(),
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "condensation".into(),
        },
    )
    .await;

    emit(&sink, AppEvent::PhaseStarted { name: "topo".into() }).await;
    let topo_order = topo_sort(&condensation.graph, &mut metrics);
    let complete = is_complete(&topo_order, &condensation.graph);
    debug!(len = topo_order.len(), complete, "topological order computed");
    emit(
        &sink,
        AppEvent::TopoOrdered {
            order: topo_order.clone(),
            complete,
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "topo".into() }).await;

    let paths = match resolve_source(options, graph, &condensation, &topo_order)? {
        None => None,
        Some(source) => {
            emit(
                &sink,
                AppEvent::PhaseStarted {
                    name: "dag_paths".into(),
                },
            )
            .await;
            let pf = DagPathfinder::new(&condensation.graph);
            let shortest = pf.shortest_from(&source, &topo_order, &mut metrics)?;
            let longest = pf.longest_from(&source, &topo_order, &mut metrics)?;
            let critical_path = critical_path(&longest);

            emit(
                &sink,
                AppEvent::PathsComputed {
                    source: source.clone(),
                    reached: longest.reached().count(),
                    critical_target: critical_path.as_ref().map(|c| c.target.clone()),
                    critical_length: critical_path.as_ref().map(|c| c.length),
                },
            )
            .await;
            emit(
                &sink,
                AppEvent::PhaseFinished {
                    name: "dag_paths".into(),
                },
            )
            .await;

            Some(PathAnalysis {
                source,
                shortest,
                longest,
                critical_path,
            })
        }
    };

    metrics.stop_timer();
    let metrics = metrics.snapshot();
    info!(
        nodes = graph.node_count(),
        components = scc_res.components.len(),
        relaxations = metrics.relaxations,
        elapsed_nanos = metrics.elapsed_nanos,
        "analysis finished"
    );

    emit(
        &sink,
        AppEvent::Finished {
            metrics: metrics.clone(),
        },
    )
    .await;

    Ok(Analysis {
        scc: scc_res,
        condensation,
        topo_order,
        paths,
        metrics,
    })
}

/// Maps the requested source to its component label. Only original nodes are
/// accepted; an empty graph has no default source.
fn resolve_source(
    options: &AnalyzeOptions,
    graph: &Graph,
    condensation: &Condensation,
    topo_order: &[String],
) -> Result<Option<String>, PathError> {
    match options.source.as_deref() {
        Some(s) => condensation
            .label_of(s)
            .map(Some)
            .ok_or_else(|| PathError::SourceNotFound(s.to_owned())),
        None if graph.is_empty() => Ok(None),
        None => Ok(topo_order.first().cloned()),
    }
}

/// Reached node with the greatest longest-path distance; the earliest in topological
/// order wins ties.
pub fn critical_path(longest: &DistanceResult) -> Option<CriticalPath> {
    let mut best: Option<(&str, f64)> = None;
    for (id, d) in longest.reached() {
        if best.map_or(true, |(_, b)| d > b) {
            best = Some((id, d));
        }
    }
    best.map(|(target, length)| CriticalPath {
        target: target.to_owned(),
        length,
        path: reconstruct_path(&longest.parents, target),
    })
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}
