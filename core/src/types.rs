//! Discovered schematics data model.
//!
//! A [`SchematicCollection`] groups the generators one installed package
//! exposes. Each [`Schematic`] carries its parameters as a flat, ordered list
//! of [`ParameterDescriptor`]s, already normalized from the generator's JSON
//! Schema so that prompt and completion clients never re-read raw schemas.
//!
//! Field names serialize in camelCase (`defaultValue`, `enum`, `type`) to
//! match the shape clients of the collection files expect.

use serde::{Deserialize, Serialize};

use crate::completion::{CompletionTable, CompletionType};

/// One installed package that declares schematics.
///
/// # Examples
///
/// ```
/// use schematics_core::{Schematic, SchematicCollection};
///
/// let mut collection = SchematicCollection::new("@schematics/angular");
/// assert!(collection.is_empty());
///
/// collection.schematics.push(Schematic::new("@schematics/angular", "component"));
/// assert_eq!(collection.schematic_names(), vec!["component"]);
/// assert!(collection.find("component").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchematicCollection {
    /// Package identifier relative to the package root (e.g. `@scope/pkg`).
    pub name: String,
    /// Generators in manifest declaration order.
    pub schematics: Vec<Schematic>,
}

impl SchematicCollection {
    /// Creates an empty collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schematics: Vec::new(),
        }
    }

    /// Returns `true` when no generator survived filtering.
    pub fn is_empty(&self) -> bool {
        self.schematics.is_empty()
    }

    /// Looks up a generator by name.
    pub fn find(&self, name: &str) -> Option<&Schematic> {
        self.schematics.iter().find(|s| s.name == name)
    }

    /// Returns generator names in declaration order.
    pub fn schematic_names(&self) -> Vec<&str> {
        self.schematics.iter().map(|s| s.name.as_str()).collect()
    }
}

/// One invocable generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schematic {
    /// Name of the owning [`SchematicCollection`].
    pub collection: String,
    /// Generator name, unique within its collection.
    pub name: String,
    /// Free-text description (empty when the manifest gives none).
    #[serde(default)]
    pub description: String,
    /// Normalized parameters.
    #[serde(default)]
    pub schema: Vec<ParameterDescriptor>,
    /// Completion metadata for [`schema`](Self::schema), keyed by parameter name.
    #[serde(default, skip_serializing_if = "CompletionTable::is_empty")]
    pub completions: CompletionTable,
}

impl Schematic {
    /// Creates a generator with no description and no parameters.
    pub fn new(collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the `collection:name` form used to invoke the generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use schematics_core::Schematic;
    ///
    /// let schematic = Schematic::new("@nrwl/react", "library");
    /// assert_eq!(schematic.qualified_name(), "@nrwl/react:library");
    /// ```
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.collection, self.name)
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.schema.iter().find(|p| p.name == name)
    }

    /// Returns positional parameters in invocation order.
    pub fn positional(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.schema.iter().filter(|p| p.positional)
    }

    /// Returns the `x-completion-glob` recorded for a parameter.
    pub fn completion_glob(&self, parameter: &str) -> Option<&str> {
        self.completions.glob(parameter)
    }
}

/// One normalized generator parameter.
///
/// # Examples
///
/// ```
/// use schematics_core::{CompletionType, ParameterDescriptor};
///
/// let param = ParameterDescriptor::new("project", "string")
///     .with_description("The project to target")
///     .with_completion(CompletionType::Project);
/// assert_eq!(param.completion, Some(CompletionType::Project));
/// assert!(!param.required);
/// assert!(param.enum_values.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,
    /// JSON Schema type name (`string`, `boolean`, `number|string`, ...).
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub description: String,
    /// Literal default rendered as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Filled from the command line's positional arguments.
    #[serde(default)]
    pub positional: bool,
    /// Allowed values; empty means unconstrained.
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionType>,
    /// Alternative option names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Message shown when interactively asking for the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_completion(mut self, completion: CompletionType) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns `true` when the value must come from [`enum_values`](Self::enum_values).
    pub fn is_constrained(&self) -> bool {
        !self.enum_values.is_empty()
    }
}
