//! Provider Registry (C3): turns a list of requested identifiers into live
//! `LlmProvider` objects, failing fast on any credential that is missing
//! rather than deferring the failure to generation time.

use std::sync::Arc;

use crate::cloud::CloudProvider;
use crate::error::RegistryError;
use crate::identifier::ProviderIdentifier;
use crate::local::LocalProvider;
use crate::mock::MockProvider;
use crate::types::LlmProvider;

pub struct ProviderRegistry {
    providers: Vec<Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    /// Resolves every requested identifier into a provider. The first
    /// malformed identifier or missing credential aborts the whole build —
    /// this is a run-fatal error (`CredentialsMissing` / `FilterNoMatch`
    /// in the taxonomy), not a per-provider skip.
    pub fn build(requested: &[String]) -> Result<Self, RegistryError> {
        let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::with_capacity(requested.len());
        for raw in requested {
            let parsed = ProviderIdentifier::parse(raw)?;
            let provider: Arc<dyn LlmProvider> = match parsed {
                ProviderIdentifier::Cloud(id) => Arc::new(CloudProvider::new(id)?),
                ProviderIdentifier::Local(model) => Arc::new(LocalProvider::new(&model)),
                ProviderIdentifier::Mock(id) => Arc::new(MockProvider::new(id)),
            };
            providers.push(provider);
        }
        Ok(Self { providers })
    }

    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn LlmProvider>] {
        &self.providers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_providers_never_require_credentials() {
        let registry = ProviderRegistry::build(&["mock".to_string(), "mock-rich".to_string()]).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn malformed_identifier_aborts_the_whole_build() {
        let err = ProviderRegistry::build(&["mock".to_string(), "not-a-real-provider".to_string()]).unwrap_err();
        assert!(matches!(err, RegistryError::MalformedIdentifier(_)));
    }

    #[test]
    fn missing_cloud_credential_is_reported_by_env_var_name() {
        std::env::remove_var("OPENAI_API_KEY");
        let err = ProviderRegistry::build(&["openai".to_string()]).unwrap_err();
        match err {
            RegistryError::Credentials(crate::error::LlmError::CredentialsMissing { env_var, .. }) => {
                assert_eq!(env_var, "OPENAI_API_KEY");
            }
            other => panic!("expected CredentialsMissing, got {other:?}"),
        }
    }
}
