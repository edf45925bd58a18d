//! Workspace root discovery for relative-path headers.

use std::path::{Path, PathBuf};

/// Root of the repository enclosing `path`, when there is one.
pub fn workspace_root(path: &Path) -> Option<PathBuf> {
    let anchor = if path.is_dir() { path } else { path.parent()? };
    let repo = gix::discover(anchor).ok()?;
    repo.work_dir().map(Path::to_path_buf)
}

/// `path` relative to the enclosing repository, else to the current
/// directory, else as given.
pub fn relative_path(path: &Path) -> String {
    if let Some(root) = workspace_root(path)
        && let Ok(relative) = path.strip_prefix(&root)
    {
        return relative.display().to_string();
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Ok(relative) = path.strip_prefix(&cwd)
    {
        return relative.display().to_string();
    }

    path.display().to_string()
}
