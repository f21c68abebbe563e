//! Completion-type vocabulary for schematic parameters.
//!
//! Generator schemas mark parameters with two extension keywords:
//! `x-completion-type` names what kind of value an interactive client should
//! suggest, and `x-completion-glob` narrows file and directory suggestions.
//! Rather than attaching those keywords to a schema type, normalization
//! collects them into a [`CompletionTable`] keyed by parameter name.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// JSON Schema keyword carrying a [`CompletionType`].
pub const X_COMPLETION_TYPE: &str = "x-completion-type";

/// JSON Schema keyword carrying a glob for file/directory completion.
pub const X_COMPLETION_GLOB: &str = "x-completion-glob";

/// Hint describing how values for a parameter should be suggested.
///
/// # Examples
///
/// ```
/// use schematics_core::CompletionType;
///
/// let kind: CompletionType = "projectTarget".parse().unwrap();
/// assert_eq!(kind, CompletionType::ProjectTarget);
/// assert_eq!(kind.as_str(), "projectTarget");
/// assert!("component".parse::<CompletionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionType {
    /// A module inside a project.
    Module,
    /// A file path.
    File,
    /// A directory path.
    Directory,
    /// A workspace project name.
    Project,
    /// A `project:target` pair.
    ProjectTarget,
    /// A target name.
    Targets,
    /// A project tag.
    Tags,
}

impl CompletionType {
    /// Every recognized completion type, in declaration order.
    pub const ALL: [CompletionType; 7] = [
        Self::Module,
        Self::File,
        Self::Directory,
        Self::Project,
        Self::ProjectTarget,
        Self::Targets,
        Self::Tags,
    ];

    /// Returns the keyword spelling used in schema files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::File => "file",
            Self::Directory => "directory",
            Self::Project => "project",
            Self::ProjectTarget => "projectTarget",
            Self::Targets => "targets",
            Self::Tags => "tags",
        }
    }

    /// Returns `true` for completion types whose values are filesystem paths.
    ///
    /// Only these accept an `x-completion-glob`.
    pub fn is_path(self) -> bool {
        matches!(self, Self::File | Self::Directory)
    }
}

impl fmt::Display for CompletionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `x-completion-type` value outside the recognized vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown completion type: {0}")]
pub struct UnknownCompletionType(pub String);

impl FromStr for CompletionType {
    type Err = UnknownCompletionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownCompletionType(s.to_string()))
    }
}

/// Completion metadata for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionHint {
    /// What kind of value to suggest.
    pub completion_type: CompletionType,
    /// Glob restricting path suggestions (`file`/`directory` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glob: Option<String>,
}

/// Completion metadata for a schematic's parameters, keyed by parameter name.
///
/// # Examples
///
/// ```
/// use schematics_core::{CompletionHint, CompletionTable, CompletionType};
///
/// let mut table = CompletionTable::default();
/// table.insert(
///     "path",
///     CompletionHint { completion_type: CompletionType::File, glob: Some("*.ts".into()) },
/// );
/// assert_eq!(table.completion_type("path"), Some(CompletionType::File));
/// assert_eq!(table.glob("path"), Some("*.ts"));
/// assert_eq!(table.completion_type("name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionTable {
    entries: BTreeMap<String, CompletionHint>,
}

impl CompletionTable {
    /// Records the hint for `parameter`, replacing any previous one.
    pub fn insert(&mut self, parameter: impl Into<String>, hint: CompletionHint) {
        self.entries.insert(parameter.into(), hint);
    }

    /// Returns the hint recorded for `parameter`.
    pub fn get(&self, parameter: &str) -> Option<&CompletionHint> {
        self.entries.get(parameter)
    }

    /// Returns the completion type recorded for `parameter`.
    pub fn completion_type(&self, parameter: &str) -> Option<CompletionType> {
        self.get(parameter).map(|hint| hint.completion_type)
    }

    /// Returns the glob recorded for `parameter`.
    pub fn glob(&self, parameter: &str) -> Option<&str> {
        self.get(parameter).and_then(|hint| hint.glob.as_deref())
    }

    /// Iterates over `(parameter, hint)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompletionHint)> {
        self.entries.iter().map(|(name, hint)| (name.as_str(), hint))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
