//! Structured summary of a discovery run.

use std::path::Path;

use chrono::Utc;
use schematics_core::{DiscoveryOutcome, DiscoveryWarning};
use serde::{Deserialize, Serialize};

/// Per-collection line of a [`DiscoveryReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub name: String,
    pub schematics: Vec<String>,
}

/// Serializable summary of one discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// RFC 3339 timestamp of report creation.
    pub generated_at: String,
    /// Project base directory that was scanned.
    pub base_dir: String,
    pub collection_count: usize,
    pub schematic_count: usize,
    pub collections: Vec<CollectionSummary>,
    /// Generators dropped during discovery.
    pub warnings: Vec<DiscoveryWarning>,
}

impl DiscoveryReport {
    /// Summarizes `outcome`, stamping the current time.
    pub fn from_outcome(base_dir: &Path, outcome: &DiscoveryOutcome) -> Self {
        Self::with_timestamp(base_dir, outcome, Utc::now().to_rfc3339())
    }

    /// Summarizes `outcome` with an explicit timestamp.
    pub fn with_timestamp(
        base_dir: &Path,
        outcome: &DiscoveryOutcome,
        generated_at: impl Into<String>,
    ) -> Self {
        Self {
            generated_at: generated_at.into(),
            base_dir: base_dir.display().to_string(),
            collection_count: outcome.collections.len(),
            schematic_count: outcome.schematic_count(),
            collections: outcome
                .collections
                .iter()
                .map(|c| CollectionSummary {
                    name: c.name.clone(),
                    schematics: c.schematics.iter().map(|s| s.name.clone()).collect(),
                })
                .collect(),
            warnings: outcome.warnings.clone(),
        }
    }

    /// Returns `true` if any generator was dropped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
