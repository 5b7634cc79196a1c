use anyhow::{anyhow, Result};
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::Value;

static GRAPH_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/graph_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid graph schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile graph schema")
});

static NODE_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/node_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid node schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile node schema")
});

static EDGE_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/edge_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid edge schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile edge schema")
});

fn check(schema: &JSONSchema, instance: &Value, what: &str) -> Result<()> {
    match schema.validate(instance) {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_list: Vec<String> = errors.map(|e| e.to_string()).collect();
            Err(anyhow!("{what} validation failed:\n{}", error_list.join("\n")))
        }
    }
}

/// Validate the top-level shape of a graph file
pub fn validate_graph_file(graph: &Value) -> Result<()> {
    check(&GRAPH_SCHEMA, graph, "Graph file")
}

pub fn validate_node_item(node: &Value) -> Result<()> {
    check(&NODE_SCHEMA, node, "Node item")
}

pub fn validate_edge_item(edge: &Value) -> Result<()> {
    check(&EDGE_SCHEMA, edge, "Edge item")
}

/// Validate every node and edge entry, reporting the first offending position
pub fn validate_all_graph_items(graph: &Value) -> Result<()> {
    if let Some(nodes) = graph.get("nodes").and_then(Value::as_array) {
        for (i, node) in nodes.iter().enumerate() {
            validate_node_item(node).map_err(|e| anyhow!("nodes[{i}]: {e}"))?;
        }
    }

    if let Some(edges) = graph.get("edges").and_then(Value::as_array) {
        for (i, edge) in edges.iter().enumerate() {
            validate_edge_item(edge).map_err(|e| anyhow!("edges[{i}]: {e}"))?;
        }
    }

    Ok(())
}
