//! Fatal discovery errors.
//!
//! Absent manifests and broken generator schemas are not errors at this
//! level: the former are negative filter results, the latter become
//! [`DiscoveryWarning`](schematics_core::DiscoveryWarning)s. What remains
//! aborts discovery for the whole package root.

use std::path::PathBuf;

use thiserror::Error;

use crate::fs::ReadJsonError;

/// Errors that abort a discovery run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The package root exists but could not be listed.
    #[error("failed to list packages in {}: {source}", root.display())]
    ListPackages {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A package manifest exists but could not be read or parsed.
    #[error("invalid package manifest for {package}: {source}")]
    Manifest {
        package: String,
        #[source]
        source: ReadJsonError,
    },

    /// The schematics collection file a manifest points at could not be read.
    #[error("invalid schematics collection file for {package}: {source}")]
    CollectionFile {
        package: String,
        #[source]
        source: ReadJsonError,
    },

    /// A manifest or collection file has the wrong shape.
    #[error("invalid manifest for {package}: {reason}")]
    InvalidManifest { package: String, reason: String },
}

/// Convenience alias for results with [`DiscoveryError`].
pub type Result<T> = std::result::Result<T, DiscoveryError>;
