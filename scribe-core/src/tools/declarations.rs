//! Function-calling declarations for the built-in tools, in the JSON-schema
//! shape LLM providers expect.

use serde::Serialize;
use serde_json::{Value, json};

use super::names;

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

pub fn function_declarations() -> Vec<FunctionDeclaration> {
    vec![
        FunctionDeclaration {
            name: names::FS_LIST.to_string(),
            description: "List files in a directory (relative to the project root).".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "dir": {"type": "string", "description": "Directory path (relative)"}
                },
                "required": ["dir"]
            }),
        },
        FunctionDeclaration {
            name: names::FS_READ.to_string(),
            description: "Read a UTF-8 text file.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "file": {"type": "string", "description": "File path (relative)"},
                    "max_bytes": {"type": "integer", "description": "Truncate to this many bytes", "default": 120000}
                },
                "required": ["file"]
            }),
        },
        FunctionDeclaration {
            name: names::FS_WRITE.to_string(),
            description: "Write a UTF-8 text file. Prefer passing a unified diff in `patch` when editing.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "file": {"type": "string", "description": "File path (relative)"},
                    "contents": {"type": "string", "description": "Full file contents"},
                    "patch": {"type": "string", "description": "Unified diff to apply instead of a full overwrite"}
                },
                "required": ["file"]
            }),
        },
        FunctionDeclaration {
            name: names::FS_DELETE.to_string(),
            description: "Delete a file or directory (recursively for directories).".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "path": {"type": "string", "description": "Path to delete (relative)"}
                },
                "required": ["path"]
            }),
        },
        FunctionDeclaration {
            name: names::SCRIPT_LIST.to_string(),
            description: "List available npm scripts in the project package.json.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        },
        FunctionDeclaration {
            name: names::SCRIPT_RUN.to_string(),
            description: "Run an npm script defined in the project package.json.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "script": {"type": "string", "description": "The npm script to run"}
                },
                "required": ["script"]
            }),
        },
        FunctionDeclaration {
            name: names::PKG_INSTALL.to_string(),
            description: "Install npm packages in the project root.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "packages": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "List of npm packages to install"
                    }
                },
                "required": ["packages"]
            }),
        },
    ]
}
