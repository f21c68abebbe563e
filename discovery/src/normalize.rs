//! Generator schema normalization.
//!
//! Turns a generator's raw JSON Schema into an ordered list of
//! [`ParameterDescriptor`]s. Only the handful of keywords a prompt or
//! completion client needs are interpreted; `$ref` chains and general JSON
//! Schema validation are out of scope.
//!
//! Completion keywords (`x-completion-type`, `x-completion-glob`) are
//! collected into a [`CompletionTable`] keyed by parameter name, and each
//! descriptor's `completion` is filled from that table.

use std::collections::HashSet;

use schematics_core::{
    CompletionHint, CompletionTable, CompletionType, ParameterDescriptor, X_COMPLETION_GLOB,
    X_COMPLETION_TYPE,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::policy::is_truthy;

/// Type reported for properties that declare none.
pub const DEFAULT_TYPE: &str = "string";

/// Normalized parameters of one generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSchema {
    /// Positional parameters first (by argv index), then the rest in
    /// declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Completion metadata keyed by parameter name.
    pub completions: CompletionTable,
}

/// Schema shapes normalization cannot make sense of.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("schema must be a JSON object")]
    NotAnObject,

    #[error("schema properties must be an object")]
    InvalidProperties,

    #[error("property {0} must be an object")]
    InvalidProperty(String),

    /// `x-completion-type` is not one of the recognized keywords.
    #[error("property {property}: unknown completion type {value}")]
    UnknownCompletionType { property: String, value: String },

    #[error("property {0}: completion glob must be a string")]
    InvalidCompletionGlob(String),
}

/// Normalizes a raw generator schema.
///
/// # Errors
///
/// Fails when the schema or one of its properties is not an object, or when
/// a property carries an unrecognized `x-completion-type` or a non-string
/// `x-completion-glob`.
///
/// # Examples
///
/// ```
/// use schematics_core::CompletionType;
/// use schematics_discovery::normalize::normalize_schema;
/// use serde_json::json;
///
/// let schema = json!({
///     "properties": {
///         "name": { "type": "string", "$default": { "$source": "argv", "index": 0 } },
///         "project": { "type": "string", "x-completion-type": "project" },
///         "skipTests": { "type": "boolean", "default": false }
///     },
///     "required": ["name"]
/// });
///
/// let normalized = normalize_schema(&schema).unwrap();
/// let names: Vec<&str> = normalized.parameters.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, vec!["name", "project", "skipTests"]);
/// assert!(normalized.parameters[0].positional);
/// assert!(normalized.parameters[0].required);
/// assert_eq!(normalized.parameters[1].completion, Some(CompletionType::Project));
/// assert_eq!(normalized.parameters[2].default_value.as_deref(), Some("false"));
/// ```
pub fn normalize_schema(schema: &Value) -> Result<NormalizedSchema, NormalizeError> {
    let object = schema.as_object().ok_or(NormalizeError::NotAnObject)?;

    let required: HashSet<&str> = object
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let properties = match object.get("properties") {
        None | Some(Value::Null) => return Ok(NormalizedSchema::default()),
        Some(Value::Object(properties)) => properties,
        Some(_) => return Err(NormalizeError::InvalidProperties),
    };

    let mut completions = CompletionTable::default();
    let mut positional: Vec<(u64, ParameterDescriptor)> = Vec::new();
    let mut named = Vec::new();

    for (name, property) in properties {
        let property = property
            .as_object()
            .ok_or_else(|| NormalizeError::InvalidProperty(name.clone()))?;
        if is_hidden(property) {
            continue;
        }

        if let Some(hint) = completion_hint(name, property)? {
            completions.insert(name.as_str(), hint);
        }

        let argv_index = argv_index(property);
        let descriptor = ParameterDescriptor {
            name: name.clone(),
            value_type: type_name(property),
            description: property
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            default_value: default_value(property),
            required: required.contains(name.as_str()),
            positional: argv_index.is_some(),
            enum_values: enum_values(property),
            completion: completions.completion_type(name),
            aliases: aliases(property),
            prompt: prompt(property),
        };

        match argv_index {
            Some(index) => positional.push((index, descriptor)),
            None => named.push(descriptor),
        }
    }

    positional.sort_by_key(|(index, _)| *index);
    let parameters = positional
        .into_iter()
        .map(|(_, descriptor)| descriptor)
        .chain(named)
        .collect();

    Ok(NormalizedSchema {
        parameters,
        completions,
    })
}

fn is_hidden(property: &Map<String, Value>) -> bool {
    property.get("visible") == Some(&Value::Bool(false))
        || property.get("hidden").is_some_and(is_truthy)
}

fn completion_hint(
    name: &str,
    property: &Map<String, Value>,
) -> Result<Option<CompletionHint>, NormalizeError> {
    let glob = match property.get(X_COMPLETION_GLOB) {
        None | Some(Value::Null) => None,
        Some(Value::String(glob)) => Some(glob.clone()),
        Some(_) => return Err(NormalizeError::InvalidCompletionGlob(name.to_string())),
    };

    let completion_type = match property.get(X_COMPLETION_TYPE) {
        None | Some(Value::Null) => {
            if glob.is_some() {
                debug!(property = name, "completion glob without completion type, ignoring");
            }
            return Ok(None);
        }
        Some(Value::String(raw)) => raw.parse::<CompletionType>().map_err(|_| {
            NormalizeError::UnknownCompletionType {
                property: name.to_string(),
                value: raw.clone(),
            }
        })?,
        Some(other) => {
            return Err(NormalizeError::UnknownCompletionType {
                property: name.to_string(),
                value: other.to_string(),
            });
        }
    };

    let glob = match glob {
        Some(_) if !completion_type.is_path() => {
            debug!(
                property = name,
                %completion_type,
                "completion glob only applies to file and directory completion, ignoring"
            );
            None
        }
        glob => glob,
    };

    Ok(Some(CompletionHint {
        completion_type,
        glob,
    }))
}

/// Argv position for parameters filled from positional arguments.
fn argv_index(property: &Map<String, Value>) -> Option<u64> {
    let source = property.get("$default")?.as_object()?;
    if source.get("$source").and_then(Value::as_str) != Some("argv") {
        return None;
    }
    Some(source.get("index").and_then(Value::as_u64).unwrap_or(0))
}

fn type_name(property: &Map<String, Value>) -> String {
    match property.get("type") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Array(names)) => {
            let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
            if names.is_empty() {
                DEFAULT_TYPE.to_string()
            } else {
                names.join("|")
            }
        }
        _ => DEFAULT_TYPE.to_string(),
    }
}

fn default_value(property: &Map<String, Value>) -> Option<String> {
    match property.get("default") {
        Some(Value::Null) | None => {}
        Some(value) => return Some(literal(value)),
    }
    match property.get("$default") {
        Some(Value::Object(smart)) if smart.contains_key("$source") => None,
        Some(Value::Null) | None => None,
        Some(value) => Some(literal(value)),
    }
}

fn enum_values(property: &Map<String, Value>) -> Vec<String> {
    let values = property.get("enum").or_else(|| {
        property
            .get("items")
            .and_then(|items| items.get("enum"))
    });
    values
        .and_then(Value::as_array)
        .map(|values| values.iter().map(literal).collect())
        .unwrap_or_default()
}

fn aliases(property: &Map<String, Value>) -> Vec<String> {
    match property.get("aliases").or_else(|| property.get("alias")) {
        Some(Value::String(alias)) => vec![alias.clone()],
        Some(Value::Array(aliases)) => aliases
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

fn prompt(property: &Map<String, Value>) -> Option<String> {
    match property.get("x-prompt")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(prompt) => prompt
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        _ => None,
    }
}

/// Renders a literal the way a prompt would show it: strings verbatim,
/// everything else as JSON text.
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
