//! File tools backed by the sandboxed store.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Tool, names};
use crate::store::{FileStore, WriteRequest};

#[derive(Debug, Deserialize)]
struct ListInput {
    dir: String,
}

#[derive(Debug, Deserialize)]
struct ReadInput {
    file: String,
    #[serde(default)]
    max_bytes: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct WriteInput {
    file: String,
    #[serde(default)]
    contents: Option<String>,
    #[serde(default)]
    patch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteInput {
    path: String,
}

pub struct ListTool {
    store: Arc<FileStore>,
}

impl ListTool {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListTool {
    async fn execute(&self, args: Value) -> Result<Value> {
        let input: ListInput = serde_json::from_value(args)?;
        let entries = self.store.list(&input.dir).await?;
        Ok(serde_json::to_value(entries)?)
    }

    fn name(&self) -> &'static str {
        names::FS_LIST
    }

    fn description(&self) -> &'static str {
        "List files in a directory (relative to the project root)."
    }
}

pub struct ReadTool {
    store: Arc<FileStore>,
}

impl ReadTool {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ReadTool {
    async fn execute(&self, args: Value) -> Result<Value> {
        let input: ReadInput = serde_json::from_value(args)?;
        let text = self.store.read(&input.file, input.max_bytes).await?;
        Ok(Value::String(text))
    }

    fn name(&self) -> &'static str {
        names::FS_READ
    }

    fn description(&self) -> &'static str {
        "Read a UTF-8 text file."
    }
}

pub struct WriteTool {
    store: Arc<FileStore>,
}

impl WriteTool {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for WriteTool {
    async fn execute(&self, args: Value) -> Result<Value> {
        let input: WriteInput = serde_json::from_value(args)?;
        let outcome = self
            .store
            .write(
                &input.file,
                WriteRequest {
                    contents: input.contents,
                    patch: input.patch,
                },
            )
            .await?;
        Ok(json!({ "ok": true, "wroteBytes": outcome.wrote_bytes }))
    }

    fn name(&self) -> &'static str {
        names::FS_WRITE
    }

    fn description(&self) -> &'static str {
        "Write a UTF-8 text file. Prefer passing a unified diff in `patch` when editing."
    }
}

pub struct DeleteTool {
    store: Arc<FileStore>,
}

impl DeleteTool {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DeleteTool {
    async fn execute(&self, args: Value) -> Result<Value> {
        let input: DeleteInput = serde_json::from_value(args)?;
        self.store.delete(&input.path).await?;
        Ok(json!({ "ok": true }))
    }

    fn name(&self) -> &'static str {
        names::FS_DELETE
    }

    fn description(&self) -> &'static str {
        "Delete a file or directory (recursively for directories)."
    }
}
