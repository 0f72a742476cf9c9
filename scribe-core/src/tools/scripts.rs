//! Workspace script tools: inspect and run the scripts declared in the
//! project's `package.json`, and install packages.
//!
//! Unlike the file tools, process failures here are reported in the tool
//! result (`ok: false`) rather than as errors, so the agent can read the
//! compiler/runner output and react.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use super::{Tool, names};

#[derive(Debug, Deserialize)]
struct RunInput {
    script: String,
}

#[derive(Debug, Deserialize)]
struct InstallInput {
    packages: Vec<String>,
}

pub struct ScriptListTool {
    root: PathBuf,
}

impl ScriptListTool {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for ScriptListTool {
    async fn execute(&self, _args: Value) -> Result<Value> {
        let manifest_path = self.root.join("package.json");
        let raw = match tokio::fs::read_to_string(&manifest_path).await {
            Ok(raw) => raw,
            Err(err) => {
                return Ok(json!({
                    "ok": false,
                    "error": format!("failed to read package.json: {err}"),
                }));
            }
        };

        let manifest: Value = serde_json::from_str(&raw)?;
        let scripts = manifest
            .get("scripts")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_else(Map::new);

        Ok(json!({ "ok": true, "scripts": scripts }))
    }

    fn name(&self) -> &'static str {
        names::SCRIPT_LIST
    }

    fn description(&self) -> &'static str {
        "List available npm scripts in the project package.json."
    }
}

pub struct ScriptRunTool {
    root: PathBuf,
    timeout: Duration,
}

impl ScriptRunTool {
    pub fn new(root: PathBuf, timeout: Duration) -> Self {
        Self { root, timeout }
    }
}

#[async_trait]
impl Tool for ScriptRunTool {
    async fn execute(&self, args: Value) -> Result<Value> {
        let input: RunInput = serde_json::from_value(args)?;
        if !is_safe_script_name(&input.script) {
            return Ok(json!({
                "ok": false,
                "error": format!("invalid script name: {}", input.script),
            }));
        }

        let mut command = Command::new("npm");
        command.arg("run").arg(&input.script);
        run_in_root(command, &self.root, self.timeout).await
    }

    fn name(&self) -> &'static str {
        names::SCRIPT_RUN
    }

    fn description(&self) -> &'static str {
        "Run an npm script defined in the project package.json."
    }
}

pub struct PkgInstallTool {
    root: PathBuf,
    timeout: Duration,
}

impl PkgInstallTool {
    pub fn new(root: PathBuf, timeout: Duration) -> Self {
        Self { root, timeout }
    }
}

#[async_trait]
impl Tool for PkgInstallTool {
    async fn execute(&self, args: Value) -> Result<Value> {
        let input: InstallInput = serde_json::from_value(args)?;
        if input.packages.is_empty() {
            return Ok(json!({ "ok": false, "error": "no packages given" }));
        }
        if let Some(bad) = input.packages.iter().find(|p| !is_safe_package_name(p)) {
            return Ok(json!({
                "ok": false,
                "error": format!("invalid package name: {bad}"),
            }));
        }

        let mut command = Command::new("npm");
        command.arg("install").args(&input.packages);
        run_in_root(command, &self.root, self.timeout).await
    }

    fn name(&self) -> &'static str {
        names::PKG_INSTALL
    }

    fn description(&self) -> &'static str {
        "Install npm packages in the project root."
    }
}

async fn run_in_root(mut command: Command, root: &Path, limit: Duration) -> Result<Value> {
    command.current_dir(root);
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let output = match timeout(limit, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            return Ok(json!({
                "ok": false,
                "error": format!("failed to spawn npm: {err}"),
            }));
        }
        Err(_) => {
            return Ok(json!({
                "ok": false,
                "error": format!("npm timed out after {}s", limit.as_secs()),
            }));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    if !stderr.is_empty() {
        warn!(stderr = %stderr, "npm wrote to stderr");
    }

    Ok(json!({
        "ok": output.status.success(),
        "exit_code": output.status.code().unwrap_or_default(),
        "stdout": stdout,
        "stderr": stderr,
    }))
}

fn is_safe_script_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

fn is_safe_package_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '/' | '-' | '_' | '.' | '^' | '~'))
}
