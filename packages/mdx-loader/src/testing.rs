//! Testing Fakes
//!
//! In-memory capabilities for exercising the loader without a build tool,
//! a data layer or a disk.

use crate::error::QueryError;
use crate::host::{BuildContext, FileSystem, QueryResult, QueryRunner};
use crate::logging::{LogLevel, Logger};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File system held in memory. Writes are recorded in order.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    writes: Mutex<Vec<(PathBuf, String)>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_with_files(&self, files: Vec<(&str, &str)>) {
        let mut tree = self.files.lock().unwrap();
        for (path, content) in files {
            tree.insert(PathBuf::from(path), content.to_string());
        }
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File {} not found", path.display()),
            )
        })
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }
}

/// Build context that records registered dependencies.
#[derive(Debug)]
pub struct RecordingBuildContext {
    resource_path: PathBuf,
    dependencies: Mutex<Vec<PathBuf>>,
}

impl RecordingBuildContext {
    pub fn new(resource_path: impl Into<PathBuf>) -> Self {
        Self {
            resource_path: resource_path.into(),
            dependencies: Mutex::new(Vec::new()),
        }
    }

    pub fn dependencies(&self) -> Vec<PathBuf> {
        self.dependencies.lock().unwrap().clone()
    }
}

impl BuildContext for RecordingBuildContext {
    fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    fn add_dependency(&self, path: &Path) {
        self.dependencies.lock().unwrap().push(path.to_path_buf());
    }
}

/// Answers every query with the same result (or error) and records calls.
#[derive(Debug)]
pub struct StaticQueryRunner {
    response: Result<QueryResult, String>,
    calls: Mutex<Vec<(String, Option<Value>)>>,
}

impl StaticQueryRunner {
    pub fn new(result: QueryResult) -> Self {
        Self {
            response: Ok(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryRunner for StaticQueryRunner {
    async fn run(&self, query: &str, context: Option<&Value>) -> Result<QueryResult, QueryError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), context.cloned()));
        self.response.clone().map_err(QueryError::Execution)
    }
}

/// Logger that keeps every message.
#[derive(Debug, Default)]
pub struct CapturingLogger {
    messages: Mutex<Vec<(LogLevel, String)>>,
}

impl CapturingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.messages()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }

    fn record(&self, level: LogLevel, msg: &str) {
        self.messages.lock().unwrap().push((level, msg.to_string()));
    }
}

impl Logger for CapturingLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
    fn debug(&self, msg: &str) {
        self.record(LogLevel::Debug, msg);
    }
    fn info(&self, msg: &str) {
        self.record(LogLevel::Info, msg);
    }
    fn warn(&self, msg: &str) {
        self.record(LogLevel::Warn, msg);
    }
    fn error(&self, msg: &str) {
        self.record(LogLevel::Error, msg);
    }
}
