//! Spec Loader (C1): retrieves raw bytes from a URL or filesystem path and
//! decodes them into a generic dynamic tree. No schema is imposed here.

use crate::error::SpecError;

/// Loads `source` and parses it into a generic `serde_json::Value` tree,
/// regardless of whether the document was written as JSON or YAML.
pub async fn load(source: &str) -> Result<serde_json::Value, SpecError> {
    let raw = fetch_raw(source).await?;
    parse_tree(source, &raw)
}

async fn fetch_raw(source: &str) -> Result<String, SpecError> {
    // A bare filesystem path (including Windows drive letters like `C:\spec.json`)
    // does not contain `://`, so it never parses as a URL with a real scheme.
    if !source.contains("://") {
        return read_path(source);
    }

    match reqwest::Url::parse(source) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            let response = reqwest::get(url.clone())
                .await
                .map_err(|err| SpecError::Fetch { url: source.to_string(), reason: err.to_string() })?;
            if response.status() != reqwest::StatusCode::OK {
                return Err(SpecError::Fetch {
                    url: source.to_string(),
                    reason: format!("unexpected status {}", response.status()),
                });
            }
            response
                .text()
                .await
                .map_err(|err| SpecError::Fetch { url: source.to_string(), reason: err.to_string() })
        }
        _ => Err(SpecError::UnsupportedSource(source.to_string())),
    }
}

fn read_path(path: &str) -> Result<String, SpecError> {
    std::fs::read_to_string(path).map_err(|err| SpecError::Read { path: path.to_string(), reason: err.to_string() })
}

fn looks_like_yaml(source: &str, body: &str) -> bool {
    let lower_source = source.to_ascii_lowercase();
    if lower_source.ends_with(".yaml") || lower_source.ends_with(".yml") {
        return true;
    }
    let trimmed = body.trim_start();
    trimmed.starts_with("openapi:") || trimmed.starts_with("swagger:")
}

fn parse_tree(source: &str, body: &str) -> Result<serde_json::Value, SpecError> {
    if looks_like_yaml(source, body) {
        serde_yaml::from_str(body).map_err(|err| SpecError::Parse { reason: err.to_string() })
    } else {
        serde_json::from_str(body).map_err(|err| SpecError::Parse { reason: err.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_is_detected_by_extension() {
        assert!(looks_like_yaml("spec.yaml", "{}"));
        assert!(looks_like_yaml("spec.yml", "{}"));
    }

    #[test]
    fn yaml_is_detected_by_leading_token() {
        assert!(looks_like_yaml("spec.txt", "openapi: 3.0.0\ninfo: {}"));
        assert!(looks_like_yaml("spec.txt", "swagger: '2.0'"));
    }

    #[test]
    fn json_is_the_default() {
        assert!(!looks_like_yaml("spec.txt", "{\"openapi\": \"3.0.0\"}"));
    }

    #[tokio::test]
    async fn non_http_url_schemes_are_rejected() {
        let err = fetch_raw("ftp://example.com/spec.json").await;
        assert!(matches!(err, Err(SpecError::UnsupportedSource(_))));
    }
}
