//! Prompt Builder (C4): a pure function from an [`Operation`] to a
//! deterministic textual prompt. Same input must produce a bit-identical
//! prompt so that generation is reproducible given a deterministic provider.
//! Provider-specific preamble is added by the provider adapter, not here.

use std::fmt::Write as _;

use oaschecker_spec::Operation;

#[must_use]
pub fn build(operation: &Operation, framework: Option<&str>) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Method: {}", operation.method);
    let _ = writeln!(prompt, "Path: {}", operation.path);
    let _ = writeln!(prompt, "Operation ID: {}", operation.operation_id);
    if let Some(summary) = &operation.summary {
        let _ = writeln!(prompt, "Summary: {summary}");
    }
    if let Some(description) = &operation.description {
        let _ = writeln!(prompt, "Description: {description}");
    }

    prompt.push_str("\nParameters:\n");
    if operation.parameters.is_empty() {
        prompt.push_str("  (none)\n");
    } else {
        for param in &operation.parameters {
            let _ = writeln!(
                prompt,
                "  - {} ({}, {}, type={})",
                param.name,
                param.location,
                if param.required { "required" } else { "optional" },
                if param.schema.r#type.is_empty() { "unknown" } else { &param.schema.r#type },
            );
        }
    }

    prompt.push_str("\nRequest body:\n");
    if operation.request_body.is_empty() {
        prompt.push_str("  (none)\n");
    } else {
        for (content_type, schema) in &operation.request_body {
            let schema_type = if schema.r#type.is_empty() { "object" } else { &schema.r#type };
            let _ = writeln!(prompt, "  - {content_type}: {schema_type}");
        }
    }

    prompt.push_str("\nResponses:\n");
    if operation.responses.is_empty() {
        prompt.push_str("  (none documented)\n");
    } else {
        for (status, response) in &operation.responses {
            let _ = writeln!(prompt, "  - {status}: {}", response.description);
        }
    }

    match framework {
        Some(framework) => {
            let _ = writeln!(
                prompt,
                "\nWrite a self-contained, runnable integration test for this operation using {framework}. \
                 At minimum, cover: one successful request, one negative test per documented non-2xx \
                 response, and a parameter-validation test for every required parameter listed above.",
            );
        }
        None => {
            prompt.push_str(
                "\nWrite a self-contained, runnable integration test for this operation in the project's \
                 target testing framework. At minimum, cover: one successful request, one negative test \
                 per documented non-2xx response, and a parameter-validation test for every required \
                 parameter listed above.\n",
            );
        }
    }

    prompt
}
