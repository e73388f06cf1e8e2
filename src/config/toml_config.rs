use crate::adapters::random_org::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::{ArenaError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub random: Option<RandomConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomConfig {
    /// One of `os`, `seeded`, `random-org`.
    pub backend: Option<String>,
    pub seed: Option<u64>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ArenaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ArenaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute `${VAR_NAME}` placeholders with environment values.
    ///
    /// Unset variables are left as-is so the parse error points at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("service.name", &self.service.name)?;

        if let Some(random) = &self.random {
            if let Some(backend) = &random.backend {
                crate::utils::validation::validate_allowed_value(
                    "random.backend",
                    backend,
                    &["os", "seeded", "random-org"],
                )?;

                if backend == "seeded" {
                    crate::utils::validation::validate_required_field("random.seed", &random.seed)?;
                }
            }

            if let Some(endpoint) = &random.endpoint {
                crate::utils::validation::validate_url("random.endpoint", endpoint)?;
            }
        }

        Ok(())
    }

    fn backend_name(&self) -> Option<&str> {
        self.random.as_ref().and_then(|r| r.backend.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn random_seed(&self) -> Option<u64> {
        match self.backend_name() {
            // An explicit non-seeded backend disables the seed.
            Some("os") | Some("random-org") => None,
            _ => self.random.as_ref().and_then(|r| r.seed),
        }
    }

    fn random_org_url(&self) -> Option<&str> {
        let endpoint = self.random.as_ref().and_then(|r| r.endpoint.as_deref());
        match self.backend_name() {
            Some("random-org") => Some(endpoint.unwrap_or(DEFAULT_ENDPOINT)),
            Some(_) => None,
            None => endpoint,
        }
    }

    fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
