//! Normalized OpenAPI data model (`spec.md` §3).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// One of `path`/`query`/`header`/`cookie`, but an unrecognized value
    /// from the source document is retained verbatim rather than rejected.
    pub location: String,
    pub required: bool,
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_id: String,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// content-type -> schema
    #[serde(default)]
    pub request_body: BTreeMap<String, Schema>,
    /// status code -> response
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub schema_version: String,
    pub info: Info,
    pub servers: Vec<String>,
    /// keyed by `OperationId`, declaration order preserved via `Vec`.
    pub operations: Vec<Operation>,
}

impl Specification {
    #[must_use]
    pub fn find(&self, operation_id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.operation_id == operation_id)
    }
}

/// `METHOD_path_with_slashes_as_underscores`, assigned when the source
/// document omits an explicit `operationId`. Stable across runs over the
/// same input since it is a pure function of method and path.
#[must_use]
pub fn synthesize_operation_id(method: &str, path: &str) -> String {
    let normalized_path: String = path
        .chars()
        .map(|c| if c == '/' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("{}_{}", method.to_ascii_uppercase(), normalized_path.trim_matches('_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_ids_are_stable_for_the_same_input() {
        let a = synthesize_operation_id("get", "/pets/{id}");
        let b = synthesize_operation_id("get", "/pets/{id}");
        assert_eq!(a, b);
        assert_eq!(a, "GET_pets_id");
    }
}
