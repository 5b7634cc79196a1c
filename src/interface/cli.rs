use crate::infrastructure::data_dir::list_graph_files;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::metrics_csv::{write_summary_csv, SummaryRow};
use crate::infrastructure::scc_tarjan::TarjanSccDetector;
use crate::infrastructure::serde_json_adapter::{
    read_graph_file, read_graph_value, write_report_file,
};
use crate::usecase::analyze::{analyze_graph, Analysis, AnalyzeOptions};
use crate::usecase::build::build_graph_from_dto;
use crate::usecase::event::AppEvent;
use crate::usecase::validate::validate_graph_value;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, warn};

const DATA_DIR_ENV: &str = "GRAPH_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::GraphAnalyze {
            input,
            output,
            source,
            emit_events,
        } => {
            let (tx, rx) = mpsc::channel::<AppEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let dto = read_graph_file(&input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;
            let graph = build_graph_from_dto(&dto)
                .with_context(|| format!("building graph: {input}"))?;

            let options = AnalyzeOptions {
                source: source.or(dto.source.clone()),
            };
            let sink = if emit_events { Some(tx) } else { None };
            let analysis = analyze_graph(&graph, &options, &TarjanSccDetector, sink)
                .await
                .with_context(|| format!("analyzing graph: {input}"))?;

            if let Some(output) = output.as_deref() {
                write_report_file(output, &analysis.report())
                    .await
                    .with_context(|| format!("writing analysis report: {output}"))?;
            }

            if let Some(handle) = printer {
                handle.await.ok();
            }

            eprintln!("{}", summary_line(&analysis));
            Ok(())
        }

        Cli::GraphBatch { dir, csv } => {
            let dir = dir
                .or_else(|| env::var(DATA_DIR_ENV).ok())
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
            let files = list_graph_files(Path::new(&dir)).await?;
            info!(dir = %dir, files = files.len(), "batch started");

            let mut rows = Vec::with_capacity(files.len());
            let mut failed = 0usize;
            for path in files.iter() {
                match analyze_file(path).await {
                    Ok(row) => {
                        eprintln!("--- {}", row.file);
                        rows.push(row);
                    }
                    Err(err) => {
                        failed += 1;
                        let msg = format!("{err:#}");
                        warn!(file = %path.display(), error = %msg, "graph failed");
                        eprintln!("--- {}: error: {msg}", path.display());
                    }
                }
            }

            if let Some(csv) = csv.as_deref() {
                write_summary_csv(csv, &rows).await?;
            }

            eprintln!(
                "summary: files={} analyzed={} failed={}",
                files.len(),
                rows.len(),
                failed
            );

            if failed > 0 {
                return Err(anyhow!("{failed} of {} graphs failed", files.len()));
            }
            Ok(())
        }

        Cli::GraphValidate { input } => {
            let raw = read_graph_value(&input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;

            validate_graph_value(&raw).with_context(|| format!("validating graph: {input}"))?;

            eprintln!("schema validation passed");
            eprintln!("ok: invariants validated");
            Ok(())
        }
    }
}

async fn analyze_file(path: &Path) -> Result<SummaryRow> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let path = path
        .to_str()
        .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))?;

    let dto = read_graph_file(path)
        .await
        .with_context(|| format!("reading input graph JSON: {path}"))?;
    let graph = build_graph_from_dto(&dto)?;
    let options = AnalyzeOptions {
        source: dto.source.clone(),
    };
    let analysis = analyze_graph(&graph, &options, &TarjanSccDetector, None).await?;

    Ok(SummaryRow::from_analysis(name, &graph, &analysis))
}

fn summary_line(a: &Analysis) -> String {
    let m = &a.metrics;
    let critical = a
        .paths
        .as_ref()
        .and_then(|p| p.critical_path.as_ref())
        .map(|c| format!(" critical_path={} length={}", c.path.join("->"), c.length))
        .unwrap_or_default();
    format!(
        "summary: components={} cyclic_components={} condensation_nodes={} topo={} dfs_visits={} edges_visited={} kahn_pushes={} kahn_pops={} relaxations={} elapsed_nanos={}{}",
        a.scc.components.len(),
        a.scc.cyclic_count(),
        a.condensation.graph.node_count(),
        a.topo_order.join(","),
        m.dfs_visits,
        m.edges_visited,
        m.kahn_pushes,
        m.kahn_pops,
        m.relaxations,
        m.elapsed_nanos.map(|n| n.to_string()).unwrap_or_default(),
        critical
    )
}

#[derive(Debug)]
enum Cli {
    GraphAnalyze {
        input: String,
        output: Option<String>,
        source: Option<String>,
        emit_events: bool,
    },
    GraphBatch {
        dir: Option<String>,
        csv: Option<String>,
    },
    GraphValidate {
        input: String,
    },
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> graph analyze --in/--input <graph.json> [--source <id>] [--out/--output <report.json>] [--emit-events]
        // <bin> graph batch [--dir <dir>] [--csv <summary.csv>]
        // <bin> graph validate --in/--input <graph.json>
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "graph" {
            return Err(anyhow!(usage()));
        }

        match args[2].as_str() {
            "analyze" => Self::parse_analyze(args),
            "batch" => Self::parse_batch(args),
            "validate" => Self::parse_validate(args),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_analyze(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut output: Option<String> = None;
        let mut source: Option<String> = None;
        let mut emit_events = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--out" | "--output" => {
                    i += 1;
                    output = args.get(i).cloned();
                }
                "--source" => {
                    i += 1;
                    source = args.get(i).cloned();
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::GraphAnalyze {
            input,
            output,
            source,
            emit_events,
        })
    }

    fn parse_batch(args: &[String]) -> Result<Self> {
        let mut dir: Option<String> = None;
        let mut csv: Option<String> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--dir" => {
                    i += 1;
                    dir = args.get(i).cloned();
                }
                "--csv" => {
                    i += 1;
                    csv = args.get(i).cloned();
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        Ok(Cli::GraphBatch { dir, csv })
    }

    fn parse_validate(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;

        Ok(Cli::GraphValidate { input })
    }
}

fn usage() -> &'static str {
    "Usage:\n  graph analyze --in/--input <graph.json> [--source <node>] [--out/--output <report.json>] [--emit-events]\n  graph batch [--dir <dir>] [--csv <summary.csv>]\n  graph validate --in/--input <graph.json>\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr.\n\nEnvironment:\n  GRAPH_DATA_DIR  default directory for `graph batch` (falls back to ./data)\n  RUST_LOG        log filter (default: warn)"
}
