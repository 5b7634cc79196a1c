use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::fs;

/// On-disk graph description: `{"nodes":[{"id":..}], "edges":[{"from":..,"to":..,"weight":..}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphFileDto {
    #[serde(default)]
    pub nodes: Vec<NodeDto>,

    #[serde(default)]
    pub edges: Vec<EdgeDto>,

    /// Preferred pathfinding source (an original node id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NodeDto {
    pub id: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EdgeDto {
    pub from: String,
    pub to: String,

    #[serde(default)]
    pub weight: f64,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

pub async fn read_graph_value(path: &str) -> Result<Value> {
    let raw = fs::read_to_string(path).await?;
    let value: Value = serde_json::from_str(&raw)?;
    Ok(value)
}

pub async fn read_graph_file(path: &str) -> Result<GraphFileDto> {
    let raw = fs::read_to_string(path).await?;
    let dto: GraphFileDto = serde_json::from_str(&raw)?;
    Ok(dto)
}

/// Writes any serializable report as pretty JSON.
pub async fn write_report_file<T: Serialize>(path: &str, report: &T) -> Result<()> {
    write_json_pretty(path, report).await
}

async fn write_json_pretty<T: Serialize + ?Sized>(path: &str, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    fs::write(path, pretty)
        .await
        .with_context(|| format!("writing {path}"))?;
    Ok(())
}
