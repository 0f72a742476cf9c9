use anyhow::Result;
use serde_json::json;
use tempfile::tempdir;

use scribe_core::config::WorkspaceConfig;
use scribe_core::tools::{ToolRegistry, function_declarations, names};

#[tokio::test]
async fn write_read_delete_through_the_registry() -> Result<()> {
    let temp_dir = tempdir()?;
    let registry = ToolRegistry::new(WorkspaceConfig::with_root(temp_dir.path()))?;

    let written = registry
        .execute_tool(
            names::FS_WRITE,
            json!({ "file": "notes.txt", "contents": "hello" }),
        )
        .await?;
    assert_eq!(written["ok"], true);
    assert_eq!(written["wroteBytes"], 5);

    let text = registry
        .execute_tool(names::FS_READ, json!({ "file": "notes.txt" }))
        .await?;
    assert_eq!(text, "hello");

    let listing = registry
        .execute_tool(names::FS_LIST, json!({ "dir": "" }))
        .await?;
    assert_eq!(listing[0]["name"], "notes.txt");
    assert_eq!(listing[0]["kind"], "file");

    let deleted = registry
        .execute_tool(names::FS_DELETE, json!({ "path": "notes.txt" }))
        .await?;
    assert_eq!(deleted["ok"], true);
    assert!(!temp_dir.path().join("notes.txt").exists());
    Ok(())
}

#[tokio::test]
async fn patch_writes_apply_through_the_registry() -> Result<()> {
    let temp_dir = tempdir()?;
    let registry = ToolRegistry::new(WorkspaceConfig::with_root(temp_dir.path()))?;

    registry
        .execute_tool(
            names::FS_WRITE,
            json!({ "file": "src/app.js", "contents": "const x = 1\nconsole.log(x)" }),
        )
        .await?;

    let diff = "@@ -1,1 +1,1 @@\n-const x = 1\n+const x = 2";
    registry
        .execute_tool(names::FS_WRITE, json!({ "file": "src/app.js", "patch": diff }))
        .await?;

    let text = registry
        .execute_tool(names::FS_READ, json!({ "file": "src/app.js" }))
        .await?;
    assert_eq!(text, "const x = 2\nconsole.log(x)");
    Ok(())
}

#[tokio::test]
async fn legacy_delete_alias_is_accepted() -> Result<()> {
    assert!(names::tool_aliases(names::FS_DELETE).contains(&names::FS_DELETE_LEGACY));

    let temp_dir = tempdir()?;
    let registry = ToolRegistry::new(WorkspaceConfig::with_root(temp_dir.path()))?;

    registry
        .execute_tool(names::FS_WRITE, json!({ "file": "old.txt", "contents": "x" }))
        .await?;
    let deleted = registry
        .execute_tool(names::FS_DELETE_LEGACY, json!({ "path": "old.txt" }))
        .await?;
    assert_eq!(deleted["ok"], true);
    Ok(())
}

#[tokio::test]
async fn tool_failures_are_errors_not_panics() -> Result<()> {
    let temp_dir = tempdir()?;
    let registry = ToolRegistry::new(WorkspaceConfig::with_root(temp_dir.path()))?;

    let escape = registry
        .execute_tool(names::FS_READ, json!({ "file": "../outside" }))
        .await;
    assert!(escape.is_err());

    let unknown = registry.execute_tool("no_such_tool", json!({})).await;
    assert!(unknown.is_err());
    Ok(())
}

#[tokio::test]
async fn script_list_reads_package_manifest() -> Result<()> {
    let temp_dir = tempdir()?;
    std::fs::write(
        temp_dir.path().join("package.json"),
        r#"{ "name": "demo", "scripts": { "build": "tsc", "test": "vitest" } }"#,
    )?;
    let registry = ToolRegistry::new(WorkspaceConfig::with_root(temp_dir.path()))?;

    let result = registry.execute_tool(names::SCRIPT_LIST, json!({})).await?;
    assert_eq!(result["ok"], true);
    assert_eq!(result["scripts"]["build"], "tsc");
    assert_eq!(result["scripts"]["test"], "vitest");
    Ok(())
}

#[tokio::test]
async fn script_list_reports_missing_manifest_in_result() -> Result<()> {
    let temp_dir = tempdir()?;
    let registry = ToolRegistry::new(WorkspaceConfig::with_root(temp_dir.path()))?;

    let result = registry.execute_tool(names::SCRIPT_LIST, json!({})).await?;
    assert_eq!(result["ok"], false);
    Ok(())
}

#[tokio::test]
async fn script_run_rejects_hostile_names_in_result() -> Result<()> {
    let temp_dir = tempdir()?;
    let registry = ToolRegistry::new(WorkspaceConfig::with_root(temp_dir.path()))?;

    let result = registry
        .execute_tool(names::SCRIPT_RUN, json!({ "script": "build; rm -rf /" }))
        .await?;
    assert_eq!(result["ok"], false);
    Ok(())
}

#[test]
fn declarations_cover_every_registered_tool() {
    let declared: Vec<String> = function_declarations()
        .into_iter()
        .map(|d| d.name)
        .collect();
    for name in [
        names::FS_LIST,
        names::FS_READ,
        names::FS_WRITE,
        names::FS_DELETE,
        names::SCRIPT_LIST,
        names::SCRIPT_RUN,
        names::PKG_INSTALL,
    ] {
        assert!(declared.contains(&name.to_string()), "missing {name}");
    }
}
