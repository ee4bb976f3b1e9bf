//! # Check Outcome
//!
//! The pass/fail result a validator returns for a single value. The checker
//! inspects only [`Outcome::is_ok`] and the rendered message; everything
//! else belongs to the validator that produced it.

use serde::{Deserialize, Serialize};

/// Result of checking one value against one validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the value passed.
    pub ok: bool,
    /// Human-readable failure description. `None` when the value passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Outcome {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    /// A failing outcome with the given description.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
        }
    }

    /// Whether the value passed.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// The failure description, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.message, self.ok) {
            (Some(message), _) => f.write_str(message),
            (None, true) => f.write_str("ok"),
            (None, false) => f.write_str("check failed"),
        }
    }
}
