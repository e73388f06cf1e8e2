//! Battle draws backed by random.org's decimal-fractions service.
//!
//! The service answers a plain-text body holding one decimal fraction
//! per line. One request is made per battle; any transport failure or
//! malformed body fails the draw rather than falling back silently.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::ports::RandomSource;
use crate::utils::error::{ArenaError, Result};

/// One two-decimal fraction in plain text.
pub const DEFAULT_ENDPOINT: &str =
    "https://www.random.org/decimal-fractions/?num=1&dec=2&col=1&format=plain";

pub struct RandomOrgSource {
    client: Client,
    endpoint: String,
}

impl RandomOrgSource {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

impl Default for RandomOrgSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT.to_string())
    }
}

#[async_trait]
impl RandomSource for RandomOrgSource {
    async fn next_uniform(&self) -> Result<f64> {
        tracing::debug!("Requesting a decimal fraction from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("random.org response status: {}", response.status());
        if !response.status().is_success() {
            return Err(ArenaError::RandomSourceError {
                message: format!("random.org returned status {}", response.status()),
            });
        }

        let body = response.text().await?;
        let trimmed = body.trim();
        let value: f64 = trimmed.parse().map_err(|_| ArenaError::RandomSourceError {
            message: format!("Invalid random number response from random.org: {}", trimmed),
        })?;

        if !(0.0..1.0).contains(&value) {
            return Err(ArenaError::RandomSourceError {
                message: format!("Random draw {} is outside the unit interval", value),
            });
        }

        Ok(value)
    }
}
