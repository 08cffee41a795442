use super::models::Task;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn read_task_file(path: &Path) -> Result<Vec<Task>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file: {}", path.display()))?;
    Ok(parse_tasks(&content))
}

/// One task per line, terminators stripped. Blank lines become empty-text
/// tasks so a file round-trips line for line; interior whitespace is kept.
pub fn parse_tasks(content: &str) -> Vec<Task> {
    content
        .lines()
        .map(|line| Task::new(line.to_string()))
        .collect()
}
