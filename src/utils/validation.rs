use crate::utils::error::{ArenaError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ArenaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ArenaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ArenaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_allowed_value(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ArenaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("must be one of: {}", allowed.join(", ")),
        })
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ArenaError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ArenaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("random.endpoint", "https://www.random.org").is_ok());
        assert!(validate_url("random.endpoint", "http://localhost:8080/draw").is_ok());
        assert!(validate_url("random.endpoint", "").is_err());
        assert!(validate_url("random.endpoint", "not-a-url").is_err());
        assert!(validate_url("random.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_allowed_value() {
        let allowed = ["os", "seeded", "random-org"];
        assert!(validate_allowed_value("random.backend", "seeded", &allowed).is_ok());
        assert!(validate_allowed_value("random.backend", "dice", &allowed).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(42u64);
        let missing: Option<u64> = None;
        assert_eq!(validate_required_field("random.seed", &present).unwrap(), &42);
        assert!(validate_required_field("random.seed", &missing).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("service.name", "meal-arena").is_ok());
        assert!(validate_non_empty_string("service.name", "   ").is_err());
    }
}
