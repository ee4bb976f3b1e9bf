//! # Check Options
//!
//! Per-invocation configuration of the traversal checker. Options are
//! plain values: they are passed to every call (and forwarded unchanged to
//! nested calls in recursive mode), never stored by the checker.
//!
//! Options deserialize from JSON or YAML with camelCase keys; missing keys
//! take the defaults below and unknown keys are ignored.
//!
//! | Key                   | Default |
//! |-----------------------|---------|
//! | `abortWhenFail`       | `false` |
//! | `excludes`            | `[]`    |
//! | `includes`            | `[]`    |
//! | `order`               | none    |
//! | `ignoreValIsUndefined`| `true`  |
//! | `ignoreNotHasVal`     | `true`  |
//! | `recursive`           | `false` |
//! | `returnRawResult`     | `false` |

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Configuration for a single check call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckOptions {
    /// Stop at the first failing field.
    pub abort_when_fail: bool,
    /// Field names never checked.
    pub excludes: Vec<String>,
    /// When non-empty, exactly these names are candidates, registered or not.
    pub includes: Vec<String>,
    /// Names checked first, in this order; other names keep their relative order.
    pub order: Option<Vec<String>>,
    /// Skip rule-bearing fields whose value is `Undefined`.
    pub ignore_val_is_undefined: bool,
    /// Skip rule-bearing fields the target does not own.
    pub ignore_not_has_val: bool,
    /// Descend into fields without rules to find nested validated objects.
    pub recursive: bool,
    /// Record raw outcomes instead of rendered messages.
    pub return_raw_result: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            abort_when_fail: false,
            excludes: Vec::new(),
            includes: Vec::new(),
            order: None,
            ignore_val_is_undefined: true,
            ignore_not_has_val: true,
            recursive: false,
            return_raw_result: false,
        }
    }
}

impl CheckOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `abort_when_fail`.
    pub fn with_abort_when_fail(mut self, abort: bool) -> Self {
        self.abort_when_fail = abort;
        self
    }

    /// Set the excluded names.
    pub fn with_excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the included names.
    pub fn with_includes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preferred order.
    pub fn with_order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set `ignore_val_is_undefined`.
    pub fn with_ignore_val_is_undefined(mut self, ignore: bool) -> Self {
        self.ignore_val_is_undefined = ignore;
        self
    }

    /// Set `ignore_not_has_val`.
    pub fn with_ignore_not_has_val(mut self, ignore: bool) -> Self {
        self.ignore_not_has_val = ignore;
        self
    }

    /// Set `recursive`.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set `return_raw_result`.
    pub fn with_return_raw_result(mut self, raw: bool) -> Self {
        self.return_raw_result = raw;
        self
    }

    /// Parse options from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Json` on malformed input.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse options from a YAML mapping.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Yaml` on malformed input.
    pub fn from_yaml(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(text)?)
    }
}
