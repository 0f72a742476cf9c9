//! Agent-facing tool layer.
//!
//! Wraps the [`FileStore`](crate::store::FileStore) operations and the
//! workspace script runner as function-calling tools: serde-typed inputs,
//! `serde_json::Value` results, dispatched by name through [`ToolRegistry`].

pub mod declarations;
pub mod fs;
pub mod names;
pub mod scripts;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::WorkspaceConfig;
use crate::store::FileStore;

pub use declarations::{FunctionDeclaration, function_declarations};

#[async_trait]
pub trait Tool: Send + Sync {
    async fn execute(&self, args: Value) -> Result<Value>;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;
}

/// Registry of the built-in tools for one workspace root.
pub struct ToolRegistry {
    tools: HashMap<&'static str, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(config: WorkspaceConfig) -> Result<Self> {
        let script_timeout = Duration::from_secs(config.script_timeout_secs);
        let store = Arc::new(FileStore::new(config)?);
        let root = store.root().to_path_buf();

        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.register(Box::new(fs::ListTool::new(Arc::clone(&store))));
        registry.register(Box::new(fs::ReadTool::new(Arc::clone(&store))));
        registry.register(Box::new(fs::WriteTool::new(Arc::clone(&store))));
        registry.register(Box::new(fs::DeleteTool::new(store)));
        registry.register(Box::new(scripts::ScriptListTool::new(root.clone())));
        registry.register(Box::new(scripts::ScriptRunTool::new(
            root.clone(),
            script_timeout,
        )));
        registry.register(Box::new(scripts::PkgInstallTool::new(root, script_timeout)));
        Ok(registry)
    }

    fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name(), tool);
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut tool_names: Vec<&'static str> = self.tools.keys().copied().collect();
        tool_names.sort_unstable();
        tool_names
    }

    /// Dispatches `args` to the tool registered under `name`, accepting known
    /// aliases. Unknown tools are an error; tool-level failures are returned
    /// as errors for the caller to surface, never panics.
    pub async fn execute_tool(&self, name: &str, args: Value) -> Result<Value> {
        let canonical = names::canonical_tool_name(name);
        let tool = self
            .tools
            .get(canonical.as_ref())
            .ok_or_else(|| anyhow!("unknown tool: {name}"))?;
        debug!(tool = canonical.as_ref(), "executing tool");
        tool.execute(args).await
    }
}
