use crate::domain::graph::{Graph, SccResult};
use indexmap::IndexMap;

const LABEL_PREFIX: &str = "C";

/// Stable node label for component `index` in the condensation.
pub fn component_label(index: usize) -> String {
    format!("{LABEL_PREFIX}{index}")
}

/// Inverse of [`component_label`].
pub fn parse_component_label(label: &str) -> Option<usize> {
    let digits = label.strip_prefix(LABEL_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// The component DAG plus the node → component lookup used to build it.
#[derive(Debug, Clone)]
pub struct Condensation {
    pub graph: Graph,
    pub component_of: IndexMap<String, usize>,
}

impl Condensation {
    /// Condensation label of the component holding original node `node`.
    pub fn label_of(&self, node: &str) -> Option<String> {
        self.component_of.get(node).map(|&c| component_label(c))
    }
}

/// Contracts every component to one node.
///
/// Intra-component edges are dropped; inter-component edges keep their weight and are
/// never deduplicated, so parallel edges all take part in later path computations.
pub fn build_condensation(graph: &Graph, scc: &SccResult) -> Condensation {
    let mut component_of: IndexMap<String, usize> = IndexMap::with_capacity(graph.node_count());
    for (cid, comp) in scc.components.iter().enumerate() {
        for v in comp {
            component_of.insert(v.clone(), cid);
        }
    }

    let mut cond = Graph::new();
    for cid in 0..scc.components.len() {
        cond.add_node(component_label(cid));
    }

    for u in graph.nodes() {
        let Some(&a) = component_of.get(u) else {
            continue;
        };
        for e in graph.edges(u) {
            let Some(&b) = component_of.get(&e.to) else {
                continue;
            };
            if a != b {
                cond.add_edge(component_label(a), component_label(b), e.weight);
            }
        }
    }

    Condensation {
        graph: cond,
        component_of,
    }
}
