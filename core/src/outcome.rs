use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SchematicCollection;

/// A generator entry dropped during discovery.
///
/// Raised for per-entry faults (unreadable or malformed schema files, entries
/// without a schema path). Discovery of sibling generators and collections
/// continues after each one.
///
/// # Examples
///
/// ```
/// use schematics_core::DiscoveryWarning;
///
/// let warning = DiscoveryWarning::new("@nrwl/react", "library", "schema.json: no such file");
/// assert_eq!(
///     warning.to_string(),
///     "invalid schematic @nrwl/react:library: schema.json: no such file"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryWarning {
    /// Collection the entry belongs to.
    pub collection: String,
    /// Manifest key of the dropped entry.
    pub schematic: String,
    /// Underlying failure.
    pub reason: String,
}

impl DiscoveryWarning {
    pub fn new(
        collection: impl Into<String>,
        schematic: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            schematic: schematic.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DiscoveryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid schematic {}:{}: {}",
            self.collection, self.schematic, self.reason
        )
    }
}

/// Result of one discovery run: collections plus the warnings it produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryOutcome {
    /// Non-empty collections in enumeration order.
    pub collections: Vec<SchematicCollection>,
    /// One entry per dropped generator.
    pub warnings: Vec<DiscoveryWarning>,
}

impl DiscoveryOutcome {
    /// Total number of generators across all collections.
    ///
    /// # Examples
    ///
    /// ```
    /// use schematics_core::*;
    ///
    /// let mut collection = SchematicCollection::new("pkg");
    /// collection.schematics.push(Schematic::new("pkg", "a"));
    /// collection.schematics.push(Schematic::new("pkg", "b"));
    ///
    /// let outcome = DiscoveryOutcome { collections: vec![collection], warnings: Vec::new() };
    /// assert_eq!(outcome.schematic_count(), 2);
    /// ```
    pub fn schematic_count(&self) -> usize {
        self.collections.iter().map(|c| c.schematics.len()).sum()
    }

    /// Looks up a collection by name.
    pub fn collection(&self, name: &str) -> Option<&SchematicCollection> {
        self.collections.iter().find(|c| c.name == name)
    }
}
