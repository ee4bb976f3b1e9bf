//! # Rule Documents
//!
//! Declarative rule tables loaded from YAML or JSON, for rules that are
//! configured rather than compiled in.
//!
//! ```yaml
//! types:
//!   - name: Person
//!     fields:
//!       - name: name
//!         rule: { type: string }
//!         default: imcuttle
//!       - name: gender
//!         rule: { oneOf: [M, F] }
//!   - name: MyPerson
//!     extends: Person
//!     fields:
//!       - name: age
//!         rule: { type: string }
//! ```
//!
//! Types are applied in document order, so a parent must precede its
//! children unless it is already declared in the target registry. A field
//! without `rule` is a plain field; a field without `default` starts
//! undefined. Rules go through the same registration-time verification as
//! compiled rules, so `rule: {}` rejects the whole document.

use std::path::Path;

use proprule_core::{Candidate, TypeKey, Value};
use serde::{Deserialize, Serialize};

use crate::decorate::{rule, TypeDef};
use crate::error::DocumentError;
use crate::registry::RuleRegistry;

/// A set of type declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    /// Types, parents first.
    pub types: Vec<TypeDocument>,
}

/// One type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDocument {
    /// Type name.
    pub name: String,
    /// Parent type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

/// One field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDocument {
    /// Field name.
    pub name: String,
    /// Rule descriptor, e.g. `{ type: number }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<serde_json::Value>,
    /// Initial value of the field on new instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl RuleDocument {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Json` on malformed input.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Yaml` on malformed input.
    pub fn from_yaml(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read a document from disk, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Io` if the file cannot be read,
    /// `DocumentError::UnsupportedFormat` for other extensions, and parse
    /// errors as for [`from_json`](Self::from_json) / [`from_yaml`](Self::from_yaml).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        match ext {
            "json" => Self::from_json(&std::fs::read_to_string(path)?),
            "yaml" | "yml" => Self::from_yaml(&std::fs::read_to_string(path)?),
            _ => Err(DocumentError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Declare every type and register every rule into `registry`.
    ///
    /// All rules are verified before the registry is touched, so a rejected
    /// rule leaves the registry as it was.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Rule` for a rejected rule, an unknown parent,
    /// or a conflicting redeclaration.
    pub fn apply(&self, registry: &mut RuleRegistry) -> Result<Vec<TypeDef>, DocumentError> {
        let verified = self
            .types
            .iter()
            .map(|ty| {
                ty.fields
                    .iter()
                    .map(|field| {
                        field
                            .rule
                            .clone()
                            .map(|descriptor| rule(Candidate::Descriptor(descriptor)))
                            .transpose()
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut defs: Vec<TypeDef> = Vec::with_capacity(self.types.len());
        for (ty, rules) in self.types.iter().zip(verified) {
            let mut builder = match &ty.extends {
                Some(parent) => {
                    let parent_key = TypeKey::new(parent.as_str());
                    match defs.iter().find(|d| d.key() == &parent_key) {
                        Some(parent_def) => registry.define_subtype(parent_def, ty.name.as_str())?,
                        None => registry.define_under(&parent_key, ty.name.as_str())?,
                    }
                }
                None => registry.define(ty.name.as_str())?,
            };
            for (field, field_rule) in ty.fields.iter().zip(rules) {
                let initial = field.default.clone().map_or(Value::Undefined, Value::from);
                builder = match field_rule {
                    Some(field_rule) => builder.validated(field.name.as_str(), field_rule, initial),
                    None => builder.field(field.name.as_str(), initial),
                };
            }
            let def = builder.build();
            tracing::debug!(type_key = %def.key(), fields = def.fields().len(), "applied rule document type");
            defs.push(def);
        }
        Ok(defs)
    }
}
