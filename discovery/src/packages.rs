//! Enumeration of top-level installed packages.

use std::io;
use std::path::Path;

use tracing::debug;

/// Lists the packages installed directly under `root`.
///
/// Entries are returned as names relative to `root`. Scope directories
/// (`@scope`) are expanded one level into `@scope/<name>`; nested
/// `node_modules` trees are never visited, so transitive dependencies
/// installed inside another package do not appear. Dot-entries such as
/// `.bin` are skipped. Names are sorted so that discovery order does not
/// depend on directory iteration order.
///
/// No file contents are read; whether an entry is really a package is decided
/// later by the collection filter.
///
/// # Errors
///
/// A missing `root` is not an error and yields an empty list. Other failures
/// to read `root` or a scope directory are returned.
pub fn list_packages(root: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let root = root.as_ref();
    let mut packages = Vec::new();

    let Some(entries) = read_dir_names(root)? else {
        debug!(root = %root.display(), "package root does not exist");
        return Ok(packages);
    };

    for name in entries {
        if name.starts_with('.') {
            continue;
        }
        if name.starts_with('@') {
            let scope_dir = root.join(&name);
            if !scope_dir.is_dir() {
                continue;
            }
            for scoped in read_dir_names(&scope_dir)?.unwrap_or_default() {
                if !scoped.starts_with('.') {
                    packages.push(format!("{name}/{scoped}"));
                }
            }
        } else {
            packages.push(name);
        }
    }

    packages.sort();
    debug!(root = %root.display(), count = packages.len(), "listed packages");
    Ok(packages)
}

/// Returns the UTF-8 entry names of `dir`, or `None` if it does not exist.
fn read_dir_names(dir: &Path) -> io::Result<Option<Vec<String>>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(dir = %dir.display(), name = ?raw, "skipping non-UTF-8 entry"),
        }
    }
    Ok(Some(names))
}
