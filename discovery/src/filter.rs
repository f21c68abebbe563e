//! Collection filter: does a package declare schematics?

use std::path::Path;

use tracing::debug;

use crate::error::{DiscoveryError, Result};
use crate::fs::read_json_file;
use crate::policy::is_truthy;

/// Manifest file name inside every package directory.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Returns `true` if `package` (relative to `root`) declares a truthy
/// `schematics` field in its manifest.
///
/// A missing manifest, or a package entry that is not a directory, is an
/// ordinary non-schematics package and yields `false`.
///
/// # Errors
///
/// Returns [`DiscoveryError::Manifest`] when the manifest exists but cannot
/// be read or parsed.
pub fn is_schematic_collection(root: &Path, package: &str) -> Result<bool> {
    let manifest_path = Path::new(package).join(PACKAGE_MANIFEST);
    match read_json_file(&manifest_path, root) {
        Ok(manifest) => {
            let member = manifest.json.get("schematics").is_some_and(is_truthy);
            if member {
                debug!(package, "package declares schematics");
            }
            Ok(member)
        }
        Err(err) if err.is_absent() => {
            debug!(package, kind = ?err.kind(), "no readable manifest, skipping");
            Ok(false)
        }
        Err(source) => Err(DiscoveryError::Manifest {
            package: package.to_string(),
            source,
        }),
    }
}

/// Keeps the packages that declare schematics, preserving order.
///
/// # Errors
///
/// Stops at the first fatal manifest failure.
pub fn filter_collections(root: &Path, packages: Vec<String>) -> Result<Vec<String>> {
    let mut members = Vec::new();
    for package in packages {
        if is_schematic_collection(root, &package)? {
            members.push(package);
        }
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_package_with_schematics_field_is_member() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/package.json", r#"{"schematics": "./collection.json"}"#);
        assert!(is_schematic_collection(dir.path(), "pkg").unwrap());
    }

    #[test]
    fn test_package_without_schematics_field_is_not_member() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/package.json", r#"{"name": "pkg"}"#);
        write(dir.path(), "empty/package.json", r#"{"schematics": ""}"#);
        assert!(!is_schematic_collection(dir.path(), "pkg").unwrap());
        assert!(!is_schematic_collection(dir.path(), "empty").unwrap());
    }

    #[test]
    fn test_missing_manifest_is_not_member() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
        assert!(!is_schematic_collection(dir.path(), "pkg").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_plain_file_entry_is_not_member() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "yarn-integrity", "{}");
        assert!(!is_schematic_collection(dir.path(), "yarn-integrity").unwrap());
    }

    #[test]
    fn test_corrupt_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/package.json", "{ \"schematics\": ");
        let err = is_schematic_collection(dir.path(), "pkg").unwrap_err();
        assert!(matches!(err, DiscoveryError::Manifest { ref package, .. } if package == "pkg"));
    }

    #[test]
    fn test_filter_keeps_members_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/package.json", r#"{"schematics": "c.json"}"#);
        write(dir.path(), "b/package.json", r#"{}"#);
        write(dir.path(), "c/package.json", r#"{"schematics": "c.json"}"#);

        let members = filter_collections(
            dir.path(),
            vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()],
        )
        .unwrap();
        assert_eq!(members, vec!["a", "c"]);
    }
}
