/// `config` module: collects environment-backed configuration into owned,
/// explicit structs constructed once at process start and passed by
/// reference into the clients. No global client handles, no hidden state.
///
/// # Responsibilities
/// - Read the required credentials from the environment (`GITHUB_TOKEN`,
///   `GITHUB_USERNAME`, `GEMINI_API_KEY`, `VERCEL_TOKEN`)
/// - Validate completeness before a single remote call is made; serving
///   refuses to start on an incomplete environment
/// - Map missing credentials to the classified configuration failure so the
///   outward response carries a stable, human-readable message
use std::env;

use portfolio_forge_core::error::PipelineError;

/// Credentials and account for the source-control host.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub username: String,
}

/// Credentials and model selection for the generative host.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

/// Credentials for the deployment host.
#[derive(Debug, Clone)]
pub struct VercelConfig {
    pub token: String,
}

/// Raw environment snapshot; fields are `None` when unset or blank.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub github_username: Option<String>,
    pub gemini_api_key: Option<String>,
    pub vercel_token: Option<String>,
}

/// Validated, ready-to-use credentials for all three remote hosts.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub github: GithubConfig,
    pub gemini: GeminiConfig,
    pub vercel: VercelConfig,
}

const DEFAULT_MODEL: &str = "gemini-1.5-flash";

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            github_token: env_non_empty("GITHUB_TOKEN"),
            github_username: env_non_empty("GITHUB_USERNAME"),
            gemini_api_key: env_non_empty("GEMINI_API_KEY"),
            vercel_token: env_non_empty("VERCEL_TOKEN"),
        }
    }

    /// Check completeness and hand out owned credentials.
    pub fn validate(&self) -> Result<Credentials, PipelineError> {
        let github = match (&self.github_token, &self.github_username) {
            (Some(token), Some(username)) => GithubConfig {
                token: token.clone(),
                username: username.clone(),
            },
            _ => {
                return Err(PipelineError::Configuration(
                    "GitHub credentials are not properly configured".to_string(),
                ))
            }
        };

        let gemini = self.gemini_api_key.clone().ok_or_else(|| {
            PipelineError::Configuration("GEMINI_API_KEY is not configured".to_string())
        })?;

        let vercel = self.vercel_token.clone().ok_or_else(|| {
            PipelineError::Configuration("Vercel token is not configured".to_string())
        })?;

        Ok(Credentials {
            github,
            gemini: GeminiConfig {
                api_key: gemini,
                model: DEFAULT_MODEL.to_string(),
            },
            vercel: VercelConfig { token: vercel },
        })
    }
}
