use crate::utils::error::{GatewayError, Result};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GatewayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| GatewayError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// 檢查字串非空白；錯誤訊息不回顯內容，避免把密鑰寫進日誌
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// NaN 與任何值比較都是 false，範圍檢查前先擋掉非有限數
pub fn validate_finite(field_name: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(GatewayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("serper_url", "https://google.serper.dev/search").is_ok());
        assert!(validate_url("serper_url", "http://127.0.0.1:9000/search").is_ok());
        assert!(validate_url("serper_url", "").is_err());
        assert!(validate_url("serper_url", "invalid-url").is_err());
        assert!(validate_url("serper_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("bind_addr", "0.0.0.0:8000").is_ok());
        assert!(validate_socket_addr("bind_addr", "localhost").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_results", 5, 1).is_ok());
        assert!(validate_positive_number("max_results", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string_hides_value() {
        assert!(validate_non_empty_string("service_secret", "s3cret").is_ok());
        match validate_non_empty_string("service_secret", "   ") {
            Err(GatewayError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "service_secret");
                assert!(value.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("temperature", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range("temperature", 2.5, 0.0, 2.0).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("temperature", 0.7).is_ok());
        assert!(validate_finite("temperature", f32::NAN).is_err());
        assert!(validate_finite("temperature", f32::INFINITY).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("x".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("a", &present).unwrap(), "x");
        assert!(matches!(
            validate_required_field("service_secret", &missing),
            Err(GatewayError::MissingConfigError { .. })
        ));
    }
}
