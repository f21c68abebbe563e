//! Core types for discovered schematics collections.
//!
//! This crate defines the output contract of schematics discovery:
//!
//! - [`SchematicCollection`]: one installed package that declares
//!   generators.
//! - [`Schematic`]: one invocable generator with its normalized parameters.
//! - [`ParameterDescriptor`]: a flat, canonical parameter description ready
//!   for prompting and autocompletion.
//! - [`CompletionType`] and [`CompletionTable`]: the `x-completion-type` /
//!   `x-completion-glob` vocabulary, kept beside the parameters.
//! - [`DiscoveryOutcome`] and [`DiscoveryWarning`]: a run's collections and
//!   the generator entries it had to drop.
//!
//! Validation ([`validate_collections`], [`validate_collection`]) reports
//! structural problems such as duplicate names.
//!
//! # Example
//!
//! ```
//! use schematics_core::*;
//!
//! let mut collection = SchematicCollection::new("@nrwl/react");
//! let mut library = Schematic::new("@nrwl/react", "library");
//! library.schema.push(
//!     ParameterDescriptor::new("name", "string")
//!         .with_description("Library name")
//!         .required(),
//! );
//! library.schema.push(
//!     ParameterDescriptor::new("project", "string").with_completion(CompletionType::Project),
//! );
//! collection.schematics.push(library);
//!
//! assert_eq!(collection.find("library").unwrap().schema.len(), 2);
//! assert!(validate_collection(&collection).is_empty());
//! ```

mod completion;
mod outcome;
mod types;
mod validate;

pub use completion::{
    CompletionHint, CompletionTable, CompletionType, UnknownCompletionType, X_COMPLETION_GLOB,
    X_COMPLETION_TYPE,
};
pub use outcome::{DiscoveryOutcome, DiscoveryWarning};
pub use types::*;
pub use validate::{ValidationError, validate_collection, validate_collections};
