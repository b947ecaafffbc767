//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. The signing
//! secret has no built-in default: configuration fails when it is missing.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use projecthub_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ConfigError, Lookup};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days (default: 7).
    pub token_expiry_days: i64,
}

/// Default token expiry in days.
const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Longest accepted token lifetime (ten years).
const MAX_EXPIRY_DAYS: i64 = 3650;

impl JwtConfig {
    /// Load JWT configuration from a variable lookup.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_DAYS` | no       | `7`     |
    ///
    /// `JWT_EXPIRY_DAYS` must lie in `1..=3650`.
    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_expiry_days = match lookup("JWT_EXPIRY_DAYS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(days) if (1..=MAX_EXPIRY_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "JWT_EXPIRY_DAYS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_EXPIRY_DAYS,
        };

        Ok(Self {
            secret,
            token_expiry_days,
        })
    }

    /// Token lifetime in seconds.
    pub fn expiry_secs(&self) -> i64 {
        self.token_expiry_days * 24 * 60 * 60
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        exp: now + config.expiry_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_days: 7,
        }
    }

    fn lookup_from(vars: &[(&'static str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token = generate_token(42, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            token_expiry_days: 7,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            token_expiry_days: 7,
        };

        let token = generate_token(1, &config_a).expect("token generation should succeed");
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let lookup = lookup_from(&[]);
        assert_matches!(
            JwtConfig::from_lookup(&lookup),
            Err(ConfigError::Missing("JWT_SECRET"))
        );

        let lookup = lookup_from(&[("JWT_SECRET", "   ")]);
        assert_matches!(
            JwtConfig::from_lookup(&lookup),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn test_expiry_defaults_to_seven_days() {
        let lookup = lookup_from(&[("JWT_SECRET", "s3cret")]);
        let config = JwtConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.token_expiry_days, 7);
        assert_eq!(config.secret, "s3cret");
    }

    #[test]
    fn test_bad_expiry_is_an_error() {
        let lookup = lookup_from(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY_DAYS", "soon")]);
        assert_matches!(
            JwtConfig::from_lookup(&lookup),
            Err(ConfigError::Invalid { var: "JWT_EXPIRY_DAYS", .. })
        );
    }

    #[test]
    fn test_expiry_out_of_range_rejected() {
        for raw in ["0", "-3", "3651", "9223372036854775807", "week"] {
            let lookup = lookup_from(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY_DAYS", raw)]);
            assert_matches!(
                JwtConfig::from_lookup(&lookup),
                Err(ConfigError::Invalid { var: "JWT_EXPIRY_DAYS", .. }),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_expiry_bounds_accepted() {
        for (raw, days) in [("1", 1), ("3650", 3650)] {
            let lookup = lookup_from(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRY_DAYS", raw)]);
            assert_eq!(JwtConfig::from_lookup(&lookup).unwrap().token_expiry_days, days);
        }
    }
}
