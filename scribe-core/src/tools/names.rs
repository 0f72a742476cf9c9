use std::borrow::Cow;

pub const FS_LIST: &str = "fs_list";
pub const FS_READ: &str = "fs_read";
pub const FS_WRITE: &str = "fs_write";
pub const FS_DELETE: &str = "fs_delete";
/// Older models were prompted with this name; keep accepting it.
pub const FS_DELETE_LEGACY: &str = "fs_remove";
pub const SCRIPT_LIST: &str = "script_list";
pub const SCRIPT_RUN: &str = "script_run";
pub const PKG_INSTALL: &str = "pkg_install";

const FS_DELETE_ALIASES: &[&str] = &[FS_DELETE_LEGACY];

/// Normalize tool identifiers to their canonical registry names.
pub fn canonical_tool_name(name: &str) -> Cow<'_, str> {
    match name {
        FS_DELETE_LEGACY => Cow::Borrowed(FS_DELETE),
        _ => Cow::Borrowed(name),
    }
}

/// Return known aliases for a canonical tool name.
pub fn tool_aliases(name: &str) -> &'static [&'static str] {
    match name {
        FS_DELETE => FS_DELETE_ALIASES,
        _ => &[],
    }
}
