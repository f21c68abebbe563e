//! Collection resolver: from an accepted package to its generators.
//!
//! The package manifest's `schematics` field points at a collection file
//! whose `schematics` map declares the generators. Each included entry's
//! `schema` file is read and normalized. Failures reading the manifest or the
//! collection file are fatal; failures on a single entry are reported to the
//! [`DiagnosticsSink`] and the entry is skipped.

use std::path::{Path, PathBuf};

use schematics_core::{DiscoveryWarning, Schematic, SchematicCollection};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::diagnostics::DiagnosticsSink;
use crate::error::{DiscoveryError, Result};
use crate::filter::PACKAGE_MANIFEST;
use crate::fs::{ReadJsonError, file_exists, read_json_file};
use crate::normalize::{NormalizeError, normalize_schema};
use crate::policy::InclusionPolicy;

/// Why a single generator entry was dropped.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("entry is not an object")]
    NotAnObject,

    #[error("entry has no schema path")]
    MissingSchema,

    #[error("schema file {} does not exist", .0.display())]
    SchemaNotFound(PathBuf),

    #[error(transparent)]
    Read(#[from] ReadJsonError),

    #[error("invalid schema: {0}")]
    Normalize(#[from] NormalizeError),
}

/// Resolves the generators of one accepted package.
///
/// The returned collection may be empty when every entry was excluded by
/// `policy` or failed; callers drop empty collections.
///
/// # Errors
///
/// Returns [`DiscoveryError::Manifest`] or [`DiscoveryError::CollectionFile`]
/// when the package manifest or the collection file cannot be read, and
/// [`DiscoveryError::InvalidManifest`] when either has the wrong shape.
pub fn resolve_collection(
    root: &Path,
    package: &str,
    policy: &InclusionPolicy,
    sink: &dyn DiagnosticsSink,
) -> Result<SchematicCollection> {
    let manifest = read_json_file(Path::new(package).join(PACKAGE_MANIFEST), root).map_err(
        |source| DiscoveryError::Manifest {
            package: package.to_string(),
            source,
        },
    )?;

    let collection_path = manifest
        .json
        .get("schematics")
        .and_then(Value::as_str)
        .ok_or_else(|| DiscoveryError::InvalidManifest {
            package: package.to_string(),
            reason: "`schematics` must be a path to a collection file".to_string(),
        })?;

    let collection_file = read_json_file(collection_path, manifest.dir()).map_err(|source| {
        DiscoveryError::CollectionFile {
            package: package.to_string(),
            source,
        }
    })?;

    let entries = collection_file
        .json
        .get("schematics")
        .and_then(Value::as_object)
        .ok_or_else(|| DiscoveryError::InvalidManifest {
            package: package.to_string(),
            reason: format!(
                "{} has no `schematics` map",
                collection_file.path.display()
            ),
        })?;

    let mut collection = SchematicCollection::new(package);
    for (name, entry) in entries {
        if !policy.includes(name, entry) {
            debug!(collection = package, schematic = %name, "excluded by inclusion policy");
            continue;
        }
        match resolve_schematic(package, name, entry, collection_file.dir()) {
            Ok(schematic) => collection.schematics.push(schematic),
            Err(err) => sink.warn(DiscoveryWarning::new(package, name.as_str(), err.to_string())),
        }
    }

    debug!(
        collection = package,
        schematics = collection.schematics.len(),
        "resolved collection"
    );
    Ok(collection)
}

/// Builds one [`Schematic`] from a collection-file entry.
///
/// `collection_dir` is the directory of the collection file; the entry's
/// `schema` path is resolved against it.
pub fn resolve_schematic(
    collection: &str,
    name: &str,
    entry: &Value,
    collection_dir: &Path,
) -> std::result::Result<Schematic, EntryError> {
    let entry = entry.as_object().ok_or(EntryError::NotAnObject)?;
    let schema_path = entry
        .get("schema")
        .and_then(Value::as_str)
        .ok_or(EntryError::MissingSchema)?;

    let resolved = collection_dir.join(schema_path);
    if !file_exists(&resolved) {
        return Err(EntryError::SchemaNotFound(resolved));
    }

    let schema_file = read_json_file(schema_path, collection_dir)?;
    let normalized = normalize_schema(&schema_file.json)?;

    Ok(Schematic {
        collection: collection.to_string(),
        name: name.to_string(),
        description: entry
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        schema: normalized.parameters,
        completions: normalized.completions,
    })
}
