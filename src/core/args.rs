//! Arguments forwarded from a trigger invocation to state callbacks.

use crate::error::CallbackError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Positional and named values passed unchanged to every enter/exit callback
/// fired by one trigger invocation.
///
/// `Args` is serde-serializable, so an invocation can be read from a JSON
/// payload (`{"positional": [...], "named": {...}}`). Either field may be
/// omitted.
///
/// # Example
///
/// ```rust
/// use switchyard::Args;
///
/// let args = Args::new().arg(200).kwarg("b", 300);
///
/// assert_eq!(args.param(0, "a").and_then(|v| v.as_i64()), Some(200));
/// assert_eq!(args.param(1, "b").and_then(|v| v.as_i64()), Some(300));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Args {
    #[serde(default)]
    positional: Vec<Value>,
    #[serde(default)]
    named: BTreeMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a named argument, replacing any previous value under that name.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Look up a parameter that may be passed either by position or by name.
    ///
    /// The positional slot wins when both are present.
    pub fn param(&self, index: usize, name: &str) -> Option<&Value> {
        self.get(index).or_else(|| self.named(name))
    }

    /// Deserialize the parameter at `index` / `name` into `T`.
    ///
    /// Returns `Ok(None)` when the parameter was not supplied, so callers can
    /// fall back to a default.
    pub fn extract<T: DeserializeOwned>(
        &self,
        index: usize,
        name: &str,
    ) -> Result<Option<T>, CallbackError> {
        match self.param(index, name) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named_values(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl<V: Into<Value>> FromIterator<V> for Args {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            positional: iter.into_iter().map(Into::into).collect(),
            named: BTreeMap::new(),
        }
    }
}
