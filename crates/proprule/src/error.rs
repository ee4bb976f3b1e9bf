//! # Document Errors
//!
//! Errors raised while loading check options or rule documents from text.
//! Registration errors ([`RuleError`]) are defined in `proprule-core` and
//! wrapped here when they occur while applying a document.

use proprule_core::RuleError;
use thiserror::Error;

/// Error while loading a rule document or check options.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// JSON parsing failed.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported document format for '{path}': expected .json, .yaml or .yml")]
    UnsupportedFormat {
        /// Path of the rejected document.
        path: String,
    },

    /// A rule or type in the document was rejected at registration.
    #[error("rule document rejected: {0}")]
    Rule(#[from] RuleError),

    /// IO error reading the document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
