//! Core library for scribe: a constrained file-mutation service for coding
//! agents.
//!
//! Three leaf pieces compose into the service:
//!
//! - [`sandbox::PathGuard`] confines every path to a fixed root.
//! - [`patch`] parses and applies unified diffs in memory.
//! - [`store::FileStore`] exposes `list`/`read`/`write`/`delete` on top of
//!   the two, with [`config::WorkspaceConfig`] supplying root and limits.
//!
//! [`tools`] wraps the store as LLM function-calling tools.
//!
//! There is deliberately no cross-call isolation: concurrent writers against
//! the same file can lose updates, and hardening that (advisory locks or
//! content-hash preconditions) is left to callers that need it.

pub mod config;
pub mod patch;
pub mod sandbox;
pub mod store;
pub mod tools;

pub use config::WorkspaceConfig;
pub use patch::{ApplyMode, PatchError};
pub use sandbox::{PathGuard, SandboxError};
pub use store::{EntryInfo, EntryKind, FileStore, StoreError, WriteOutcome, WriteRequest};
pub use tools::ToolRegistry;
