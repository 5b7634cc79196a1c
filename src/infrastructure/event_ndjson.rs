use crate::usecase::event::AppEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn app_event_to_json(ev: &AppEvent) -> serde_json::Value {
    match ev {
        AppEvent::PhaseStarted { name } => json!({"type":"phase_started","name":name}),
        AppEvent::PhaseFinished { name } => json!({"type":"phase_finished","name":name}),
        AppEvent::SccComputed {
            nodes,
            edges,
            components,
            cyclic_components,
        } => {
            json!({"type":"scc_computed","nodes":nodes,"edges":edges,"components":components,"cyclic_components":cyclic_components})
        }
        AppEvent::CondensationBuilt { nodes, edges } => {
            json!({"type":"condensation_built","nodes":nodes,"edges":edges})
        }
        AppEvent::TopoOrdered { order, complete } => {
            json!({"type":"topo_ordered","order":order,"complete":complete})
        }
        AppEvent::PathsComputed {
            source,
            reached,
            critical_target,
            critical_length,
        } => {
            json!({"type":"paths_computed","source":source,"reached":reached,"critical_target":critical_target,"critical_length":critical_length})
        }
        AppEvent::Finished { metrics } => json!({"type":"finished","metrics":metrics}),
    }
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = app_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::stats::MetricsSnapshot;

    #[test]
    fn app_event_to_json_covers_all_variants() {
        let v = app_event_to_json(&AppEvent::PhaseStarted {
            name: "x".to_string(),
        });
        assert_eq!(v["type"], "phase_started");

        let v = app_event_to_json(&AppEvent::PhaseFinished {
            name: "x".to_string(),
        });
        assert_eq!(v["type"], "phase_finished");

        let v = app_event_to_json(&AppEvent::SccComputed {
            nodes: 1,
            edges: 2,
            components: 3,
            cyclic_components: 4,
        });
        assert_eq!(v["type"], "scc_computed");
        assert_eq!(v["nodes"], 1);

        let v = app_event_to_json(&AppEvent::CondensationBuilt { nodes: 3, edges: 2 });
        assert_eq!(v["type"], "condensation_built");
        assert_eq!(v["edges"], 2);

        let v = app_event_to_json(&AppEvent::TopoOrdered {
            order: vec!["C1".to_string(), "C0".to_string()],
            complete: true,
        });
        assert_eq!(v["type"], "topo_ordered");
        assert_eq!(v["order"][0], "C1");

        let v = app_event_to_json(&AppEvent::PathsComputed {
            source: "C1".to_string(),
            reached: 2,
            critical_target: None,
            critical_length: None,
        });
        assert_eq!(v["type"], "paths_computed");
        assert!(v["critical_target"].is_null());

        let v = app_event_to_json(&AppEvent::Finished {
            metrics: MetricsSnapshot::default(),
        });
        assert_eq!(v["type"], "finished");
        assert_eq!(v["metrics"]["relaxations"], 0);
    }

    #[tokio::test]
    async fn spawn_ndjson_printer_drains_and_exits() {
        let (tx, rx) = mpsc::channel::<AppEvent>(8);
        let handle = spawn_ndjson_printer(rx);

        tx.send(AppEvent::PhaseStarted {
            name: "x".to_string(),
        })
        .await
        .expect("send");
        drop(tx);

        handle.await.expect("join");
    }
}
