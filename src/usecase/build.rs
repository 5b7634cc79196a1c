use crate::domain::graph::Graph;
use crate::infrastructure::serde_json_adapter::GraphFileDto;
use anyhow::{anyhow, Result};

/// Converts a loaded file into the in-memory graph.
///
/// Nodes keep declaration order and edges keep file order. Duplicate node ids and
/// edges touching undeclared nodes are rejected here so the algorithms never see them.
pub fn build_graph_from_dto(dto: &GraphFileDto) -> Result<Graph> {
    let mut g = Graph::new();

    for node in dto.nodes.iter() {
        if g.contains(&node.id) {
            return Err(anyhow!("duplicate node id: {}", node.id));
        }
        g.add_node(node.id.clone());
    }

    for (i, edge) in dto.edges.iter().enumerate() {
        for end in [&edge.from, &edge.to] {
            if !g.contains(end) {
                return Err(anyhow!("edge #{i} references unknown node: {end}"));
            }
        }
        g.add_edge(edge.from.clone(), edge.to.clone(), edge.weight);
    }

    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::serde_json_adapter::{EdgeDto, NodeDto};

    fn node(id: &str) -> NodeDto {
        NodeDto {
            id: id.to_string(),
            ..NodeDto::default()
        }
    }

    fn edge(from: &str, to: &str, weight: f64) -> EdgeDto {
        EdgeDto {
            from: from.to_string(),
            to: to.to_string(),
            weight,
            ..EdgeDto::default()
        }
    }

    #[test]
    fn builds_graph_in_declaration_order() {
        let dto = GraphFileDto {
            nodes: vec![node("B"), node("A")],
            edges: vec![edge("A", "B", 1.0), edge("A", "A", 0.5)],
            ..GraphFileDto::default()
        };

        let g = build_graph_from_dto(&dto).expect("build");
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(g.edges("A").len(), 2);
        assert_eq!(g.edges("A")[1].to, "A");
    }

    #[test]
    fn rejects_duplicates_and_dangling_edges() {
        let dup = GraphFileDto {
            nodes: vec![node("A"), node("A")],
            ..GraphFileDto::default()
        };
        let err = build_graph_from_dto(&dup).unwrap_err().to_string();
        assert!(err.contains("duplicate node id"));

        let dangling = GraphFileDto {
            nodes: vec![node("A")],
            edges: vec![edge("A", "Z", 1.0)],
            ..GraphFileDto::default()
        };
        let err = build_graph_from_dto(&dangling).unwrap_err().to_string();
        assert!(err.contains("unknown node: Z"));
    }
}
