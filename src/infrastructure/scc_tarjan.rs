use crate::domain::graph::{Graph, SccResult};
use crate::domain::traits::SccDetector;
use crate::usecase::stats::Metrics;

pub struct TarjanSccDetector;

impl SccDetector for TarjanSccDetector {
    fn compute_scc(&self, graph: &Graph, metrics: &mut Metrics) -> SccResult {
        tarjan_scc(graph, metrics)
    }
}

const UNVISITED: usize = usize::MAX;

/// One simulated call of the recursive DFS.
struct Frame {
    node: usize,
    next_edge: usize,
    /// Child whose low-link must be folded in before scanning the next edge.
    returned_from: Option<usize>,
}

struct TarjanState {
    index: Vec<usize>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
}

impl TarjanState {
    fn discover(&mut self, v: usize, metrics: &mut Metrics) -> Frame {
        metrics.count_dfs_visit();
        self.index[v] = self.next_index;
        self.low[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
        Frame {
            node: v,
            next_edge: 0,
            returned_from: None,
        }
    }
}

fn tarjan_scc(graph: &Graph, metrics: &mut Metrics) -> SccResult {
    let n = graph.node_count();
    let mut st = TarjanState {
        index: vec![UNVISITED; n],
        low: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        next_index: 0,
    };

    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut call_stack: Vec<Frame> = Vec::new();

    for start in 0..n {
        if st.index[start] != UNVISITED {
            continue;
        }
        call_stack.push(st.discover(start, metrics));

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.node;

            if let Some(child) = frame.returned_from.take() {
                st.low[v] = st.low[v].min(st.low[child]);
            }

            let edges = graph.edges_at(v);
            if frame.next_edge < edges.len() {
                let edge = &edges[frame.next_edge];
                frame.next_edge += 1;
                metrics.count_edge_visited();

                let Some(w) = graph.index_of(&edge.to) else {
                    continue;
                };
                if st.index[w] == UNVISITED {
                    frame.returned_from = Some(w);
                    let child = st.discover(w, metrics);
                    call_stack.push(child);
                } else if st.on_stack[w] {
                    st.low[v] = st.low[v].min(st.index[w]);
                }
                continue;
            }

            call_stack.pop();
            if st.low[v] == st.index[v] {
                let mut comp = Vec::new();
                while let Some(w) = st.stack.pop() {
                    st.on_stack[w] = false;
                    comp.push(w);
                    if w == v {
                        break;
                    }
                }
                components.push(comp);
            }
        }
    }

    let cyclic_component = components
        .iter()
        .map(|comp| match comp.as_slice() {
            [only] => graph
                .edges_at(*only)
                .iter()
                .any(|e| graph.index_of(&e.to) == Some(*only)),
            _ => true,
        })
        .collect();

    let components = components
        .into_iter()
        .map(|comp| {
            comp.into_iter()
                .filter_map(|i| graph.node_at(i).map(str::to_owned))
                .collect()
        })
        .collect();

    SccResult {
        components,
        cyclic_component,
    }
}
