//! Typed configuration for provider credentials and pipeline behaviour.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file. Empty values count as absent so that an exported but blank
//! variable behaves like an unset one.

use secrecy::SecretString;
use thiserror::Error;

use crate::synthesis::SynthesisStrategy;

/// Default chat-completions base URL.
pub const DEFAULT_MODEL_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "glm-4";

/// Default deployment API base URL.
pub const DEFAULT_DEPLOYMENT_BASE_URL: &str = "https://api.vercel.com";

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value outside its accepted set.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Rejected value.
        value: String,
        /// Accepted values or constraint.
        reason: String,
    },
}

/// Language-model provider settings.
#[derive(Debug)]
pub struct ModelProviderConfig {
    /// Bearer token; absent means the provider is unconfigured.
    pub api_key: Option<SecretString>,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
}

impl ModelProviderConfig {
    /// Creates settings with default endpoint and model.
    #[must_use]
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_MODEL_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Deployment provider settings.
#[derive(Debug)]
pub struct DeploymentProviderConfig {
    /// Bearer token; absent selects mock deployment.
    pub token: Option<SecretString>,
    /// Team or organisation identifier.
    pub org_id: Option<String>,
    /// Project identifier deployments are attached to.
    pub project_id: Option<String>,
    /// API base URL.
    pub base_url: String,
}

impl DeploymentProviderConfig {
    /// Creates settings with the default API base URL.
    #[must_use]
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            token,
            org_id: None,
            project_id: None,
            base_url: DEFAULT_DEPLOYMENT_BASE_URL.to_owned(),
        }
    }

    /// Sets the organisation identifier.
    #[must_use]
    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Sets the project identifier.
    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Complete configuration for one pipeline instance.
#[derive(Debug)]
pub struct FactoriaConfig {
    /// Language-model provider settings.
    pub model: ModelProviderConfig,
    /// Deployment provider settings.
    pub deployment: DeploymentProviderConfig,
    /// Code synthesis strategy.
    pub synthesis: SynthesisStrategy,
}

impl FactoriaConfig {
    /// Reads configuration from the process environment after loading a
    /// `.env` file when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `FACTORIA_SYNTHESIS` holds
    /// an unknown strategy.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `FACTORIA_SYNTHESIS` holds
    /// an unknown strategy.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = read("LLM_API_KEY")
            .or_else(|| read("GLM_API_KEY"))
            .map(SecretString::from);
        let mut model = ModelProviderConfig::new(api_key);
        if let Some(base_url) = read("LLM_BASE_URL") {
            model = model.with_base_url(base_url);
        }
        if let Some(name) = read("LLM_MODEL") {
            model = model.with_model(name);
        }

        let mut deployment =
            DeploymentProviderConfig::new(read("VERCEL_TOKEN").map(SecretString::from));
        if let Some(org_id) = read("VERCEL_ORG_ID") {
            deployment = deployment.with_org_id(org_id);
        }
        if let Some(project_id) = read("VERCEL_PROJECT_ID") {
            deployment = deployment.with_project_id(project_id);
        }
        if let Some(base_url) = read("VERCEL_API_BASE") {
            deployment = deployment.with_base_url(base_url);
        }

        let synthesis = read("FACTORIA_SYNTHESIS")
            .map(|value| {
                SynthesisStrategy::try_from(value.as_str()).map_err(|err| {
                    ConfigError::InvalidValue {
                        key: "FACTORIA_SYNTHESIS".to_owned(),
                        value: value.clone(),
                        reason: err.to_string(),
                    }
                })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            model,
            deployment,
            synthesis,
        })
    }
}
