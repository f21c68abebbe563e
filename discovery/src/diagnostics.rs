//! Sinks for per-entry discovery warnings.
//!
//! The resolver never prints. Each dropped generator is handed to a
//! [`DiagnosticsSink`] supplied by the caller, so tests and UIs can observe
//! exactly which entries were skipped.

use std::sync::Mutex;

use schematics_core::DiscoveryWarning;

/// Receives one warning per generator entry dropped during discovery.
///
/// Sinks are shared across worker threads when collections are resolved in
/// parallel, hence the `Sync` bound.
pub trait DiagnosticsSink: Sync {
    fn warn(&self, warning: DiscoveryWarning);
}

impl<F> DiagnosticsSink for F
where
    F: Fn(DiscoveryWarning) + Sync,
{
    fn warn(&self, warning: DiscoveryWarning) {
        self(warning)
    }
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn warn(&self, warning: DiscoveryWarning) {
        tracing::warn!(
            collection = %warning.collection,
            schematic = %warning.schematic,
            reason = %warning.reason,
            "invalid schematic, skipping"
        );
    }
}

/// Collects warnings in arrival order and also forwards them to `tracing`.
///
/// # Examples
///
/// ```
/// use schematics_core::DiscoveryWarning;
/// use schematics_discovery::diagnostics::{CollectingSink, DiagnosticsSink};
///
/// let sink = CollectingSink::new();
/// sink.warn(DiscoveryWarning::new("pkg", "gen", "bad schema"));
/// let warnings = sink.into_warnings();
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].schematic, "gen");
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<DiscoveryWarning>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the warnings recorded so far.
    pub fn warnings(&self) -> Vec<DiscoveryWarning> {
        match self.warnings.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Consumes the sink, returning every recorded warning.
    pub fn into_warnings(self) -> Vec<DiscoveryWarning> {
        match self.warnings.into_inner() {
            Ok(warnings) => warnings,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl DiagnosticsSink for CollectingSink {
    fn warn(&self, warning: DiscoveryWarning) {
        TracingSink.warn(warning.clone());
        match self.warnings.lock() {
            Ok(mut guard) => guard.push(warning),
            Err(poisoned) => poisoned.into_inner().push(warning),
        }
    }
}
