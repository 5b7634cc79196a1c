use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// `*.json` files directly inside `dir`, sorted by file name.
pub async fn list_graph_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("listing graph directory: {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        if is_json && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
