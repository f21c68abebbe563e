//! Structural validation of discovered collections.
//!
//! Discovery itself never rejects a collection for these problems; callers
//! that publish or cache results can use [`validate_collections`] to catch
//! empty names, duplicates and misplaced completion globs.
//!
//! # Examples
//!
//! ```
//! use schematics_core::*;
//!
//! let mut collection = SchematicCollection::new("pkg");
//! collection.schematics.push(Schematic::new("pkg", "component"));
//! assert!(validate_collection(&collection).is_empty());
//!
//! collection.schematics.push(Schematic::new("pkg", "component"));
//! assert!(!validate_collection(&collection).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Schematic, SchematicCollection};

/// Collection/schematic validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Collection name is empty or whitespace-only.
    #[error("collection name cannot be empty")]
    EmptyCollectionName,
    /// Two collections in one result share a name.
    #[error("duplicate collection: {0}")]
    DuplicateCollection(String),
    /// Generator name is empty or whitespace-only.
    #[error("schematic name cannot be empty in collection {0}")]
    EmptySchematicName(String),
    /// Two generators in one collection share a name.
    #[error("duplicate schematic: {0}")]
    DuplicateSchematic(String),
    /// A generator's back-reference names a different collection.
    #[error("schematic {schematic} references collection {found}, expected {expected}")]
    CollectionMismatch {
        schematic: String,
        expected: String,
        found: String,
    },
    /// Two parameters of one generator share a name.
    #[error("duplicate parameter in {schematic}: {parameter}")]
    DuplicateParameter { schematic: String, parameter: String },
    /// A glob is attached to a completion type that does not complete paths.
    #[error("completion glob on non-path parameter {schematic}/{parameter}")]
    GlobWithoutPathCompletion { schematic: String, parameter: String },
}

/// Validates a full discovery result.
///
/// Checks for duplicate collection names and validates each collection.
pub fn validate_collections(collections: &[SchematicCollection]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for collection in collections {
        if !seen.insert(collection.name.as_str()) {
            errors.push(ValidationError::DuplicateCollection(
                collection.name.clone(),
            ));
            continue;
        }
        errors.extend(validate_collection(collection));
    }

    errors
}

/// Validates one collection and its generators.
pub fn validate_collection(collection: &SchematicCollection) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if collection.name.trim().is_empty() {
        errors.push(ValidationError::EmptyCollectionName);
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for schematic in &collection.schematics {
        let name = schematic.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptySchematicName(
                collection.name.clone(),
            ));
            continue;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateSchematic(
                schematic.qualified_name(),
            ));
            continue;
        }
        if schematic.collection != collection.name {
            errors.push(ValidationError::CollectionMismatch {
                schematic: schematic.name.clone(),
                expected: collection.name.clone(),
                found: schematic.collection.clone(),
            });
        }
        errors.extend(validate_parameters(schematic));
    }

    errors
}

fn validate_parameters(schematic: &Schematic) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for param in &schematic.schema {
        if !seen.insert(param.name.as_str()) {
            errors.push(ValidationError::DuplicateParameter {
                schematic: schematic.qualified_name(),
                parameter: param.name.clone(),
            });
        }
    }

    for (parameter, hint) in schematic.completions.iter() {
        if hint.glob.is_some() && !hint.completion_type.is_path() {
            errors.push(ValidationError::GlobWithoutPathCompletion {
                schematic: schematic.qualified_name(),
                parameter: parameter.to_string(),
            });
        }
    }

    errors
}
