// Infrastructure layer: adapters, file I/O, serde, eventing
pub mod data_dir;
pub mod event_ndjson;
pub mod metrics_csv;
pub mod scc_tarjan;
pub mod schema_validator;
pub mod serde_json_adapter;
