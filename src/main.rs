use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use scribe_core::config::WorkspaceConfig;
use scribe_core::tools::{ToolRegistry, function_declarations, names};

#[derive(Parser)]
#[command(name = "scribe", about = "Sandboxed file tools for coding agents", version)]
struct Cli {
    /// Workspace root; every path argument is resolved inside it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory inside the workspace.
    Ls {
        #[arg(default_value = "")]
        dir: String,
    },
    /// Print a file's contents.
    Cat {
        file: String,
        #[arg(long)]
        max_bytes: Option<usize>,
    },
    /// Write a file from full contents or a unified diff.
    Write {
        file: String,
        #[arg(long, conflicts_with_all = ["patch", "patch_file"])]
        contents: Option<String>,
        #[arg(long, conflicts_with = "patch_file")]
        patch: Option<String>,
        /// Read the unified diff from a file instead of the command line.
        #[arg(long)]
        patch_file: Option<PathBuf>,
    },
    /// Delete a file or directory.
    Rm { path: String },
    /// List the npm scripts declared in package.json.
    Scripts,
    /// Run an npm script.
    Run { script: String },
    /// Install npm packages.
    Install { packages: Vec<String> },
    /// Dump the tool declarations as JSON.
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Tools = cli.command {
        println!("{}", serde_json::to_string_pretty(&function_declarations())?);
        return Ok(());
    }

    let config = WorkspaceConfig::load(&cli.root).await?;
    let registry = ToolRegistry::new(config)?;

    let (tool, args) = match cli.command {
        Commands::Ls { dir } => (names::FS_LIST, json!({ "dir": dir })),
        Commands::Cat { file, max_bytes } => (
            names::FS_READ,
            json!({ "file": file, "max_bytes": max_bytes }),
        ),
        Commands::Write {
            file,
            contents,
            patch,
            patch_file,
        } => {
            let patch = match patch_file {
                Some(path) => Some(tokio::fs::read_to_string(&path).await?),
                None => patch,
            };
            if contents.is_none() && patch.is_none() {
                bail!("provide --contents, --patch, or --patch-file");
            }
            (
                names::FS_WRITE,
                json!({ "file": file, "contents": contents, "patch": patch }),
            )
        }
        Commands::Rm { path } => (names::FS_DELETE, json!({ "path": path })),
        Commands::Scripts => (names::SCRIPT_LIST, json!({})),
        Commands::Run { script } => (names::SCRIPT_RUN, json!({ "script": script })),
        Commands::Install { packages } => (names::PKG_INSTALL, json!({ "packages": packages })),
        Commands::Tools => unreachable!("handled above"),
    };

    let result = registry.execute_tool(tool, args).await?;
    match result {
        // fs_read returns the text itself; print it verbatim.
        Value::String(text) => print!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }

    Ok(())
}
