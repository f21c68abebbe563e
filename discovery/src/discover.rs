//! Top-level discovery: enumerate, filter, resolve, drop empty.

use std::path::Path;
use std::sync::Mutex;

use schematics_core::{DiscoveryOutcome, DiscoveryWarning, SchematicCollection};
use tracing::{debug, info, warn};

use crate::config::DiscoverConfig;
use crate::diagnostics::{CollectingSink, DiagnosticsSink, TracingSink};
use crate::error::{DiscoveryError, Result};
use crate::filter::filter_collections;
use crate::packages::list_packages;
use crate::policy::InclusionPolicy;
use crate::resolver::resolve_collection;

/// Discovers every schematics collection installed under
/// `<base>/node_modules`, logging dropped generators through `tracing`.
///
/// # Errors
///
/// Fails only on fatal manifest problems (see [`DiscoveryError`]). An absent
/// `node_modules`, or packages without schematics, yield an empty list.
pub fn read_all_schematic_collections(base: impl AsRef<Path>) -> Result<Vec<SchematicCollection>> {
    read_all_schematic_collections_with(base, &DiscoverConfig::default(), &TracingSink)
}

/// Like [`read_all_schematic_collections`], with explicit settings and an
/// injected sink for dropped generators.
///
/// Warnings reach `sink` grouped by collection in enumeration order, and in
/// declaration order within a collection, whether or not collections are
/// resolved in parallel.
pub fn read_all_schematic_collections_with(
    base: impl AsRef<Path>,
    config: &DiscoverConfig,
    sink: &dyn DiagnosticsSink,
) -> Result<Vec<SchematicCollection>> {
    let root = base.as_ref().join(&config.package_dir);

    let packages = list_packages(&root).map_err(|source| DiscoveryError::ListPackages {
        root: root.clone(),
        source,
    })?;

    let candidates = packages
        .into_iter()
        .filter(|package| {
            let excluded = config.is_excluded(package);
            if excluded {
                debug!(package = %package, "excluded by configuration");
            }
            !excluded
        })
        .collect();
    let members = filter_collections(&root, candidates)?;

    let policy = config.inclusion_policy();
    let resolved = resolve_all(&root, &members, &policy, config.effective_jobs())?;

    let mut collections = Vec::with_capacity(resolved.len());
    for (collection, warnings) in resolved {
        for warning in warnings {
            sink.warn(warning);
        }
        if collection.is_empty() {
            debug!(collection = %collection.name, "no invocable schematics, dropping");
            continue;
        }
        collections.push(collection);
    }

    info!(
        root = %root.display(),
        candidates = members.len(),
        collections = collections.len(),
        "schematics discovery finished"
    );
    Ok(collections)
}

/// Runs discovery and returns the collections together with every warning.
///
/// # Examples
///
/// ```
/// use schematics_discovery::config::DiscoverConfig;
/// use schematics_discovery::discover_with_config;
///
/// let base = tempfile::tempdir().unwrap();
/// let outcome = discover_with_config(base.path(), &DiscoverConfig::default()).unwrap();
/// assert!(outcome.collections.is_empty());
/// assert!(outcome.warnings.is_empty());
/// ```
pub fn discover_with_config(
    base: impl AsRef<Path>,
    config: &DiscoverConfig,
) -> Result<DiscoveryOutcome> {
    let sink = CollectingSink::new();
    let collections = read_all_schematic_collections_with(base, config, &sink)?;
    Ok(DiscoveryOutcome {
        collections,
        warnings: sink.into_warnings(),
    })
}

type Resolved = (SchematicCollection, Vec<DiscoveryWarning>);

fn resolve_all(
    root: &Path,
    members: &[String],
    policy: &InclusionPolicy,
    jobs: usize,
) -> Result<Vec<Resolved>> {
    if jobs <= 1 || members.len() <= 1 {
        return members
            .iter()
            .map(|package| resolve_buffered(root, package, policy))
            .collect();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => {
            use rayon::prelude::*;
            // Gather every result first so the reported error is the first
            // in enumeration order, not the first to finish.
            let results: Vec<Result<Resolved>> = pool.install(|| {
                members
                    .par_iter()
                    .map(|package| resolve_buffered(root, package, policy))
                    .collect()
            });
            results.into_iter().collect()
        }
        Err(err) => {
            warn!(error = %err, "failed to build thread pool, resolving sequentially");
            members
                .iter()
                .map(|package| resolve_buffered(root, package, policy))
                .collect()
        }
    }
}

/// Resolves one package, holding its warnings back so the caller can emit
/// them in a deterministic order.
fn resolve_buffered(root: &Path, package: &str, policy: &InclusionPolicy) -> Result<Resolved> {
    let buffer = Mutex::new(Vec::new());
    let sink = |warning: DiscoveryWarning| match buffer.lock() {
        Ok(mut guard) => guard.push(warning),
        Err(poisoned) => poisoned.into_inner().push(warning),
    };
    let collection = resolve_collection(root, package, policy, &sink)?;
    let warnings = match buffer.into_inner() {
        Ok(warnings) => warnings,
        Err(poisoned) => poisoned.into_inner(),
    };
    Ok((collection, warnings))
}
