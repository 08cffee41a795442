use super::models::Task;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn write_task_file(path: &Path, tasks: &[&Task]) -> Result<()> {
    let content = serialize_tasks(tasks);
    fs::write(path, content)
        .with_context(|| format!("Failed to write task file: {}", path.display()))?;
    Ok(())
}

/// Each task on its own line with a trailing terminator; no escaping.
pub fn serialize_tasks(tasks: &[&Task]) -> String {
    tasks
        .iter()
        .map(|task| format!("{}\n", task.text))
        .collect()
}
