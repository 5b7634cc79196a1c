//! Tabular metrics summary, one CSV row per analyzed graph.

use crate::domain::graph::Graph;
use crate::usecase::analyze::Analysis;
use anyhow::{Context, Result};
use tokio::fs;

const HEADER: [&str; 14] = [
    "file",
    "nodes",
    "edges",
    "components",
    "cyclic_components",
    "condensation_nodes",
    "condensation_edges",
    "dfs_visits",
    "edges_visited",
    "kahn_pushes",
    "kahn_pops",
    "relaxations",
    "elapsed_nanos",
    "critical_path_length",
];

#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub file: String,
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub cyclic_components: usize,
    pub condensation_nodes: usize,
    pub condensation_edges: usize,
    pub dfs_visits: u64,
    pub edges_visited: u64,
    pub kahn_pushes: u64,
    pub kahn_pops: u64,
    pub relaxations: u64,
    pub elapsed_nanos: Option<u64>,
    pub critical_path_length: Option<f64>,
}

impl SummaryRow {
    pub fn from_analysis(file: impl Into<String>, graph: &Graph, analysis: &Analysis) -> Self {
        let m = &analysis.metrics;
        Self {
            file: file.into(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            components: analysis.scc.components.len(),
            cyclic_components: analysis.scc.cyclic_count(),
            condensation_nodes: analysis.condensation.graph.node_count(),
            condensation_edges: analysis.condensation.graph.edge_count(),
            dfs_visits: m.dfs_visits,
            edges_visited: m.edges_visited,
            kahn_pushes: m.kahn_pushes,
            kahn_pops: m.kahn_pops,
            relaxations: m.relaxations,
            elapsed_nanos: m.elapsed_nanos,
            critical_path_length: analysis
                .paths
                .as_ref()
                .and_then(|p| p.critical_path.as_ref())
                .map(|c| c.length),
        }
    }

    fn cells(&self) -> Vec<String> {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }
        vec![
            escape_value(&self.file),
            self.nodes.to_string(),
            self.edges.to_string(),
            self.components.to_string(),
            self.cyclic_components.to_string(),
            self.condensation_nodes.to_string(),
            self.condensation_edges.to_string(),
            self.dfs_visits.to_string(),
            self.edges_visited.to_string(),
            self.kahn_pushes.to_string(),
            self.kahn_pops.to_string(),
            self.relaxations.to_string(),
            opt(self.elapsed_nanos),
            opt(self.critical_path_length),
        ]
    }
}

/// Quote a field if it contains a delimiter, quote or line break.
fn escape_value(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn render_summary_csv(rows: &[SummaryRow]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.cells().join(","));
        out.push('\n');
    }
    out
}

pub async fn write_summary_csv(path: &str, rows: &[SummaryRow]) -> Result<()> {
    fs::write(path, render_summary_csv(rows))
        .await
        .with_context(|| format!("writing metrics summary: {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(file: &str) -> SummaryRow {
        SummaryRow {
            file: file.to_string(),
            nodes: 4,
            edges: 4,
            components: 3,
            cyclic_components: 1,
            condensation_nodes: 3,
            condensation_edges: 2,
            dfs_visits: 4,
            edges_visited: 4,
            kahn_pushes: 2,
            kahn_pops: 3,
            relaxations: 4,
            elapsed_nanos: None,
            critical_path_length: Some(5.0),
        }
    }

    #[test]
    fn renders_header_and_rows() {
        let csv = render_summary_csv(&[row("small.json")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("file,nodes,edges"));
        assert_eq!(lines[1], "small.json,4,4,3,1,3,2,4,4,2,3,4,,5");
    }

    #[test]
    fn escapes_awkward_file_names() {
        assert_eq!(escape_value("a,b.json"), "\"a,b.json\"");
        assert_eq!(escape_value("say \"hi\".json"), "\"say \"\"hi\"\".json\"");
        assert_eq!(escape_value("plain.json"), "plain.json");
    }
}
