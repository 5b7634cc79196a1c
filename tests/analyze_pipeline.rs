use scc_dagsp::domain::graph::Graph;
use scc_dagsp::infrastructure::scc_tarjan::TarjanSccDetector;
use scc_dagsp::infrastructure::serde_json_adapter::{EdgeDto, GraphFileDto, NodeDto};
use scc_dagsp::usecase::analyze::{analyze_graph, AnalyzeOptions};
use scc_dagsp::usecase::build::build_graph_from_dto;
use scc_dagsp::usecase::dag_paths::reconstruct_path;
use scc_dagsp::usecase::event::AppEvent;
use scc_dagsp::usecase::topo::is_complete;
use tokio::sync::mpsc;

fn node(id: &str) -> NodeDto {
    NodeDto {
        id: id.to_string(),
        extra: Default::default(),
    }
}

fn edge(from: &str, to: &str, weight: f64) -> EdgeDto {
    EdgeDto {
        from: from.to_string(),
        to: to.to_string(),
        weight,
        extra: Default::default(),
    }
}

fn mk_input(nodes: &[&str], edges: Vec<EdgeDto>) -> GraphFileDto {
    GraphFileDto {
        nodes: nodes.iter().map(|n| node(n)).collect(),
        edges,
        source: None,
        extra: Default::default(),
    }
}

fn chain_with_cycle() -> Graph {
    let dto = mk_input(
        &["A", "B", "C", "D"],
        vec![
            edge("A", "B", 1.0),
            edge("B", "A", 1.0),
            edge("B", "C", 2.0),
            edge("C", "D", 3.0),
        ],
    );
    build_graph_from_dto(&dto).expect("build")
}

#[tokio::test]
async fn cycle_then_chain_condenses_to_three_component_path() {
    let g = chain_with_cycle();

    let a = analyze_graph(&g, &AnalyzeOptions::default(), &TarjanSccDetector, None)
        .await
        .expect("analyze");

    // {A,B} together, C and D alone.
    assert_eq!(a.scc.components.len(), 3);
    let ab = a.condensation.label_of("A").expect("A");
    let c = a.condensation.label_of("C").expect("C");
    let d = a.condensation.label_of("D").expect("D");
    assert_eq!(a.condensation.label_of("B"), Some(ab.clone()));
    assert_ne!(ab, c);
    assert_ne!(c, d);

    assert_eq!(a.condensation.graph.node_count(), 3);
    assert_eq!(a.condensation.graph.edge_count(), 2);

    assert_eq!(a.topo_order, vec![ab.clone(), c.clone(), d.clone()]);

    let paths = a.paths.as_ref().expect("paths");
    assert_eq!(paths.source, ab);
    assert_eq!(paths.shortest.distance_to(&d), Some(5.0));
    assert_eq!(paths.longest.distance_to(&d), Some(5.0));
    assert_eq!(
        reconstruct_path(&paths.longest.parents, &d),
        vec![ab.clone(), c.clone(), d.clone()]
    );

    let cp = paths.critical_path.as_ref().expect("critical path");
    assert_eq!(cp.target, d);
    assert_eq!(cp.length, 5.0);

    assert_eq!(a.metrics.dfs_visits, 4);
    assert_eq!(a.metrics.edges_visited, 4);
    assert_eq!(a.metrics.kahn_pops, 3);
    assert_eq!(a.metrics.kahn_pushes, 2);
    assert_eq!(a.metrics.relaxations, 4);
    assert!(a.metrics.elapsed_nanos.is_some());
}

#[tokio::test]
async fn single_node_without_edges() {
    let g = build_graph_from_dto(&mk_input(&["solo"], vec![])).expect("build");

    let a = analyze_graph(&g, &AnalyzeOptions::default(), &TarjanSccDetector, None)
        .await
        .expect("analyze");

    assert_eq!(a.scc.components, vec![vec!["solo".to_string()]]);
    assert_eq!(a.condensation.graph.node_count(), 1);
    assert_eq!(a.condensation.graph.edge_count(), 0);

    let only = a.condensation.label_of("solo").expect("solo");
    assert_eq!(a.topo_order, vec![only.clone()]);

    let paths = a.paths.as_ref().expect("paths");
    assert_eq!(paths.shortest.distance_to(&only), Some(0.0));
    assert_eq!(paths.longest.distance_to(&only), Some(0.0));
    assert_eq!(reconstruct_path(&paths.longest.parents, &only), vec![only]);
}

#[tokio::test]
async fn condensation_of_cyclic_graph_is_always_acyclic() {
    let dto = mk_input(
        &["a", "b", "c", "d", "e", "f"],
        vec![
            edge("a", "b", 1.0),
            edge("b", "c", 1.0),
            edge("c", "a", 1.0),
            edge("c", "d", 4.0),
            edge("d", "e", 1.0),
            edge("e", "d", 1.0),
            edge("e", "f", -2.0),
            edge("a", "f", 10.0),
        ],
    );
    let g = build_graph_from_dto(&dto).expect("build");

    let a = analyze_graph(&g, &AnalyzeOptions::default(), &TarjanSccDetector, None)
        .await
        .expect("analyze");

    assert_eq!(a.scc.cyclic_count(), 2);
    assert!(is_complete(&a.topo_order, &a.condensation.graph));

    let paths = a.paths.as_ref().expect("paths");
    let f = a.condensation.label_of("f").expect("f");
    assert_eq!(paths.shortest.distance_to(&f), Some(2.0));
    assert_eq!(paths.longest.distance_to(&f), Some(10.0));
}

#[tokio::test]
async fn explicit_source_limits_reachability() {
    let g = chain_with_cycle();
    let opts = AnalyzeOptions {
        source: Some("C".to_string()),
    };

    let a = analyze_graph(&g, &opts, &TarjanSccDetector, None)
        .await
        .expect("analyze");

    let paths = a.paths.as_ref().expect("paths");
    let ab = a.condensation.label_of("A").expect("A");
    let d = a.condensation.label_of("D").expect("D");
    assert_eq!(paths.shortest.distance_to(&ab), None);
    assert_eq!(paths.shortest.path_to(&ab), None);
    assert_eq!(paths.longest.distance_to(&d), Some(3.0));

    let report = serde_json::to_value(a.report()).expect("serialize");
    assert_eq!(report["condensation_edges"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["topo_complete"], true);
}

#[tokio::test]
async fn pipeline_emits_finished_event_with_metrics() {
    let g = chain_with_cycle();
    let (tx, mut rx) = mpsc::channel::<AppEvent>(64);

    analyze_graph(&g, &AnalyzeOptions::default(), &TarjanSccDetector, Some(tx))
        .await
        .expect("analyze");

    let mut finished = None;
    let mut condensed = None;
    while let Some(ev) = rx.recv().await {
        match ev {
            AppEvent::Finished { metrics } => finished = Some(metrics),
            AppEvent::CondensationBuilt { nodes, edges } => condensed = Some((nodes, edges)),
            _ => {}
        }
    }

    assert_eq!(condensed, Some((3, 2)));
    assert_eq!(finished.expect("finished").relaxations, 4);
}
