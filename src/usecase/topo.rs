use crate::domain::graph::Graph;
use crate::usecase::stats::Metrics;
use std::collections::VecDeque;

/// Kahn's algorithm.
///
/// Ties between ready nodes are broken by arrival order, which follows the graph's
/// insertion order, so the result is reproducible. On cyclic input the returned order
/// silently covers only the acyclic prefix; see [`is_complete`].
pub fn topo_sort(graph: &Graph, metrics: &mut Metrics) -> Vec<String> {
    let n = graph.node_count();
    let mut indeg = vec![0usize; n];
    for u in 0..n {
        for e in graph.edges_at(u) {
            if let Some(v) = graph.index_of(&e.to) {
                indeg[v] += 1;
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&v| indeg[v] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(u) = queue.pop_front() {
        metrics.count_kahn_pop();
        if let Some(id) = graph.node_at(u) {
            order.push(id.to_owned());
        }
        for e in graph.edges_at(u) {
            let Some(v) = graph.index_of(&e.to) else {
                continue;
            };
            indeg[v] -= 1;
            metrics.count_kahn_push();
            if indeg[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    order
}

/// True when `order` covers every node of `graph`, i.e. the input was acyclic.
pub fn is_complete(order: &[String], graph: &Graph) -> bool {
    order.len() == graph.node_count()
}
