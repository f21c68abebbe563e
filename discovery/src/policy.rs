//! Inclusion policy for generator entries.

use serde_json::Value;

/// Generator name reserved for package setup rather than scaffolding.
pub const NG_ADD: &str = "ng-add";

/// JavaScript-style truthiness of a manifest value.
///
/// Manifests are written for Node tooling, which tests flags such as
/// `hidden` or `schematics` with plain truthiness, so `"false"` (a non-empty
/// string) counts as set while `0` and `""` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decides whether a declared generator is independently user-invocable.
///
/// An entry is included when its `hidden`, `private` and `extends` fields are
/// all falsy and its name is not reserved. Entries that only extend another
/// collection's generator have no schema of their own.
///
/// # Examples
///
/// ```
/// use schematics_discovery::policy::InclusionPolicy;
/// use serde_json::json;
///
/// let policy = InclusionPolicy::default();
/// assert!(policy.includes("component", &json!({"schema": "./schema.json"})));
/// assert!(!policy.includes("component", &json!({"hidden": true})));
/// assert!(!policy.includes("ng-add", &json!({"schema": "./schema.json"})));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionPolicy {
    reserved_names: Vec<String>,
}

impl InclusionPolicy {
    /// Creates a policy reserving exactly `reserved_names`.
    pub fn new<I, S>(reserved_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved_names: reserved_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `name` is reserved.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_names.iter().any(|n| n == name)
    }

    /// Applies the policy to one manifest entry.
    ///
    /// Entries that are not objects carry no flags and pass; they fail later
    /// when their schema path is resolved.
    pub fn includes(&self, name: &str, entry: &Value) -> bool {
        let flag = |key: &str| entry.get(key).is_some_and(is_truthy);
        !flag("hidden") && !flag("private") && !flag("extends") && !self.is_reserved(name)
    }
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self::new([NG_ADD])
    }
}
