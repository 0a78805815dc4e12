//! File system operations for task files and reports.
use super::{GameTask, LayoutSource, SearchTask};
use crate::grid::Layout;
use crate::SearchFailure;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::prelude::*;
use std::path::Path;

/// Read a JSON or YAML file, depending on its extension.
pub fn read_task<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> std::io::Result<T> {
    let content = std::fs::read_to_string(&path)?;
    let extension = path.as_ref().extension().and_then(|e| e.to_str());
    if matches!(extension, Some("yaml") | Some("yml")) {
        match serde_yaml::from_str(&content) {
            Ok(value) => Ok(value),
            Err(error) => Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to parse task YAML: {error}"),
            )),
        }
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

impl LayoutSource {
    /// Make a relative layout path relative to the directory containing `task_path` instead.
    pub fn resolve<P: AsRef<Path>>(&mut self, task_path: P) {
        if let LayoutSource::File(path) = self {
            if path.is_relative() {
                if let Some(dir) = task_path.as_ref().parent() {
                    *path = dir.join(&path);
                }
            }
        }
    }

    pub fn load(&self) -> Result<Layout, SearchFailure> {
        match self {
            LayoutSource::Inline(text) => Layout::parse(text),
            LayoutSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|error| {
                    SearchFailure::BadInput(format!(
                        "Cannot read layout {}: {}",
                        path.display(),
                        error
                    ))
                })?;
                Layout::parse(&text)
            }
        }
    }
}

impl SearchTask {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<SearchTask> {
        let mut task: SearchTask = read_task(&path)?;
        task.layout.resolve(&path);
        Ok(task)
    }
}

impl GameTask {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<GameTask> {
        let mut task: GameTask = read_task(&path)?;
        task.layout.resolve(&path);
        Ok(task)
    }
}

/// Save the given value as a human-readable (pretty) JSON file. Fails if the file exists.
pub fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> std::io::Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::options()
        .read(false)
        .write(true)
        .create_new(true)
        .open(path)?;
    let content = match serde_json::to_string_pretty(value) {
        Ok(s) => s,
        Err(e) => {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };
    file.write_all(content.as_bytes())?;
    log::info!("Saved report: {}", path.display());
    Ok(())
}
