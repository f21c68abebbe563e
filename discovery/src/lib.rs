//! Discovery of installed schematics collections.
//!
//! Given a project directory, this crate finds every package under
//! `node_modules` whose `package.json` declares `schematics`, reads the
//! collection file it points at, and normalizes each user-invocable
//! generator's JSON Schema into [`ParameterDescriptor`]s.
//!
//! # Pipeline
//!
//! 1. [`packages::list_packages`]: top-level (and `@scope/`) packages.
//! 2. [`filter::is_schematic_collection`]: keep packages that declare
//!    schematics; a missing manifest is a plain "no".
//! 3. [`resolver::resolve_collection`]: load the collection file, apply the
//!    [`policy::InclusionPolicy`], normalize each generator schema with
//!    [`normalize::normalize_schema`].
//! 4. [`read_all_schematic_collections`]: compose the above and drop empty
//!    collections.
//!
//! Problems with a single generator never stop discovery; they are handed to
//! a [`diagnostics::DiagnosticsSink`]. Only unreadable manifests and
//! collection files are fatal ([`DiscoveryError`]).
//!
//! # Example
//!
//! ```
//! use schematics_discovery::read_all_schematic_collections;
//!
//! let base = tempfile::tempdir().unwrap();
//! let pkg = base.path().join("node_modules/@acme/tools");
//! std::fs::create_dir_all(&pkg).unwrap();
//! std::fs::write(pkg.join("package.json"), r#"{"schematics": "./collection.json"}"#).unwrap();
//! std::fs::write(
//!     pkg.join("collection.json"),
//!     r#"{"schematics": {"service": {"schema": "./service.json", "description": "Add a service"}}}"#,
//! )
//! .unwrap();
//! std::fs::write(
//!     pkg.join("service.json"),
//!     r#"{"properties": {"project": {"type": "string", "x-completion-type": "project"}}}"#,
//! )
//! .unwrap();
//!
//! let collections = read_all_schematic_collections(base.path()).unwrap();
//! assert_eq!(collections.len(), 1);
//! assert_eq!(collections[0].name, "@acme/tools");
//! assert_eq!(collections[0].schematics[0].qualified_name(), "@acme/tools:service");
//! ```
//!
//! [`ParameterDescriptor`]: schematics_core::ParameterDescriptor

pub mod config;
pub mod diagnostics;
pub mod discover;
pub mod filter;
pub mod fs;
pub mod normalize;
pub mod output;
pub mod packages;
pub mod policy;
pub mod report;
pub mod resolver;

mod error;

pub use discover::{
    discover_with_config, read_all_schematic_collections, read_all_schematic_collections_with,
};
pub use error::{DiscoveryError, Result};
