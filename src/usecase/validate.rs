use crate::infrastructure::schema_validator::{validate_all_graph_items, validate_graph_file};
use crate::infrastructure::serde_json_adapter::GraphFileDto;
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Schema checks on the raw document, then the invariants the analysis relies on.
pub fn validate_graph_value(raw: &Value) -> Result<GraphFileDto> {
    validate_graph_file(raw)?;
    validate_all_graph_items(raw)?;

    let dto: GraphFileDto = serde_json::from_value(raw.clone())?;
    validate_graph(&dto)?;
    Ok(dto)
}

pub fn validate_graph(dto: &GraphFileDto) -> Result<()> {
    let mut declared: BTreeMap<&str, usize> = BTreeMap::new();

    for (i, node) in dto.nodes.iter().enumerate() {
        if node.id.is_empty() {
            return Err(anyhow!("nodes[{i}] has an empty id"));
        }
        if let Some(first) = declared.insert(node.id.as_str(), i) {
            return Err(anyhow!(
                "node id must be unique: {} (saw at nodes[{first}] and nodes[{i}])",
                node.id
            ));
        }
    }

    for (i, edge) in dto.edges.iter().enumerate() {
        for end in [&edge.from, &edge.to] {
            if !declared.contains_key(end.as_str()) {
                return Err(anyhow!("edges[{i}] references undeclared node: {end}"));
            }
        }
        if !edge.weight.is_finite() {
            return Err(anyhow!("edges[{i}] has a non-finite weight"));
        }
    }

    if let Some(source) = dto.source.as_deref() {
        if !declared.contains_key(source) {
            return Err(anyhow!("source is not a declared node: {source}"));
        }
    }

    Ok(())
}
