//! Spec Normalizer (C2): walks the generic tree produced by the loader into
//! a strongly-typed [`Specification`]. Missing optional fields are tolerated;
//! only structural surprises (a section present but of the wrong shape) fail.

use serde_json::Value;

use crate::error::SpecError;
use crate::model::{Info, Operation, Parameter, Response, Schema, Specification};

const NON_METHOD_KEYS: &[&str] = &["parameters", "servers"];

pub fn normalize(tree: &Value) -> Result<Specification, SpecError> {
    let root = tree.as_object().ok_or_else(|| SpecError::Structure {
        path: "$".to_string(),
        reason: "document root is not a mapping".to_string(),
    })?;

    let schema_version = root
        .get("openapi")
        .or_else(|| root.get("swagger"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let info = normalize_info(root.get("info"));
    let servers = normalize_servers(root.get("servers"));
    let operations = normalize_paths(root.get("paths"))?;

    Ok(Specification { schema_version, info, servers, operations })
}

fn normalize_info(value: Option<&Value>) -> Info {
    let Some(obj) = value.and_then(Value::as_object) else {
        return Info::default();
    };
    Info {
        title: obj.get("title").and_then(Value::as_str).unwrap_or_default().to_string(),
        description: obj.get("description").and_then(Value::as_str).map(str::to_string),
        version: obj.get("version").and_then(Value::as_str).unwrap_or_default().to_string(),
        contact: obj.get("contact").and_then(|c| c.get("email")).and_then(Value::as_str).map(str::to_string),
    }
}

fn normalize_servers(value: Option<&Value>) -> Vec<String> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.get("url").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn normalize_paths(value: Option<&Value>) -> Result<Vec<Operation>, SpecError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let paths = value.as_object().ok_or_else(|| SpecError::Structure {
        path: "$.paths".to_string(),
        reason: "`paths` is present but is not a mapping".to_string(),
    })?;

    let mut operations = Vec::new();
    for (path, path_item) in paths {
        let Some(path_item) = path_item.as_object() else {
            return Err(SpecError::Structure {
                path: format!("$.paths.{path}"),
                reason: "path item is not a mapping".to_string(),
            });
        };
        for (key, operation_value) in path_item {
            if NON_METHOD_KEYS.contains(&key.as_str()) {
                continue;
            }
            operations.push(normalize_operation(path, key, operation_value)?);
        }
    }
    Ok(operations)
}

fn normalize_operation(path: &str, method: &str, value: &Value) -> Result<Operation, SpecError> {
    let obj = value.as_object().ok_or_else(|| SpecError::Structure {
        path: format!("$.paths.{path}.{method}"),
        reason: "operation is not a mapping".to_string(),
    })?;

    let method = method.to_ascii_uppercase();
    let operation_id = obj
        .get("operationId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| crate::model::synthesize_operation_id(&method, path));

    let parameters = obj
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| params.iter().map(normalize_parameter).collect())
        .unwrap_or_default();

    let request_body = obj
        .get("requestBody")
        .and_then(|rb| rb.get("content"))
        .and_then(Value::as_object)
        .map(|content| {
            content
                .iter()
                .map(|(content_type, media)| (content_type.clone(), normalize_schema(media.get("schema"))))
                .collect()
        })
        .unwrap_or_default();

    let responses = obj
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(status, body)| {
                    let description =
                        body.get("description").and_then(Value::as_str).unwrap_or_default().to_string();
                    (status.clone(), Response { description })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Operation {
        operation_id,
        method,
        path: path.to_string(),
        summary: obj.get("summary").and_then(Value::as_str).map(str::to_string),
        description: obj.get("description").and_then(Value::as_str).map(str::to_string),
        parameters,
        request_body,
        responses,
    })
}

fn normalize_parameter(value: &Value) -> Parameter {
    let location = value.get("in").and_then(Value::as_str).unwrap_or_default().to_string();
    Parameter {
        name: value.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        location,
        required: value.get("required").and_then(Value::as_bool).unwrap_or(false),
        schema: normalize_schema(value.get("schema")),
    }
}

fn normalize_schema(value: Option<&Value>) -> Schema {
    let Some(obj) = value.and_then(Value::as_object) else {
        return Schema::default();
    };
    let properties = obj
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| props.iter().map(|(name, schema)| (name.clone(), normalize_schema(Some(schema)))).collect())
        .unwrap_or_default();
    let required = obj
        .get("required")
        .and_then(Value::as_array)
        .map(|req| req.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    Schema {
        r#type: obj.get("type").and_then(Value::as_str).unwrap_or_default().to_string(),
        format: obj.get("format").and_then(Value::as_str).map(str::to_string),
        reference: obj.get("$ref").and_then(Value::as_str).map(str::to_string),
        properties,
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_not_a_mapping_is_a_structure_error() {
        let tree = json!({"openapi": "3.0.0", "paths": "nope"});
        let err = normalize(&tree).unwrap_err();
        assert!(matches!(err, SpecError::Structure { .. }));
    }

    #[test]
    fn missing_operation_id_is_synthesized_and_stable() {
        let tree = json!({
            "openapi": "3.0.0",
            "paths": {"/pets/{id}": {"get": {"responses": {}}}}
        });
        let spec = normalize(&tree).unwrap();
        assert_eq!(spec.operations.len(), 1);
        assert_eq!(spec.operations[0].operation_id, "GET_pets_id");
    }

    #[test]
    fn servers_missing_url_are_skipped_silently() {
        let tree = json!({"openapi": "3.0.0", "servers": [{"url": "https://a"}, {}], "paths": {}});
        let spec = normalize(&tree).unwrap();
        assert_eq!(spec.servers, vec!["https://a".to_string()]);
    }

    #[test]
    fn servers_key_under_a_path_item_is_not_treated_as_a_method() {
        let tree = json!({
            "openapi": "3.0.0",
            "paths": {"/pets": {"servers": [], "get": {"responses": {}}}}
        });
        let spec = normalize(&tree).unwrap();
        assert_eq!(spec.operations.len(), 1);
        assert_eq!(spec.operations[0].method, "GET");
    }

    #[test]
    fn unknown_parameter_location_is_retained_verbatim() {
        let tree = json!({
            "openapi": "3.0.0",
            "paths": {"/pets": {"get": {
                "parameters": [{"name": "x", "in": "weird", "schema": {}}],
                "responses": {}
            }}}
        });
        let spec = normalize(&tree).unwrap();
        assert_eq!(spec.operations[0].parameters[0].location, "weird");
    }
}
