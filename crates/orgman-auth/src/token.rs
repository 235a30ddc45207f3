//! JWT access token issuance and validation.
//!
//! Tokens are stateless: validity is determined purely by signature and
//! expiry. There is no revocation list, so a token stays usable until it
//! expires.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject — the admin's email.
    pub sub: String,
    /// Organization id (UUID string).
    pub org_id: String,
    /// Organization name at issuance time.
    pub org_name: String,
    /// Role of the subject (always "admin" today).
    pub role: String,
    /// Expiration (Unix timestamp, seconds).
    pub exp: i64,
}

/// Identity claims supplied by callers; the expiry is added at issuance.
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    pub email: String,
    pub org_id: String,
    pub org_name: String,
    pub role: String,
}

/// Issue a signed HS256 access token.
///
/// `ttl_secs` overrides the configured fallback lifetime; the login flow
/// passes its own, longer TTL explicitly.
pub fn issue_access_token(
    identity: &TokenIdentity,
    ttl_secs: Option<u64>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let ttl = ttl_secs.unwrap_or(config.default_token_ttl_secs);
    let claims = AccessTokenClaims {
        sub: identity.email.clone(),
        org_id: identity.org_id.clone(),
        org_name: identity.org_name.clone(),
        role: identity.role.clone(),
        exp: Utc::now().timestamp() + ttl as i64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an access token (signature and expiry).
///
/// Expiry is a distinct failure from every other defect: bad signature,
/// malformed payload, or missing `sub`/`org_id` claims all map to
/// `TokenInvalid`.
pub fn validate_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);

    let claims = jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })?;

    if claims.sub.is_empty() || claims.org_id.is_empty() {
        return Err(AuthError::TokenInvalid(
            "missing subject or org_id claim".into(),
        ));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            ..AuthConfig::default()
        }
    }

    fn test_identity() -> TokenIdentity {
        TokenIdentity {
            email: "a@x.com".into(),
            org_id: "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d".into(),
            org_name: "Acme Corp".into(),
            role: "admin".into(),
        }
    }

    #[test]
    fn claims_roundtrip() {
        let config = test_config();
        let token = issue_access_token(&test_identity(), None, &config).unwrap();
        let claims = validate_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.org_id, "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d");
        assert_eq!(claims.org_name, "Acme Corp");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn fallback_and_explicit_ttls_differ() {
        let config = test_config();
        let now = Utc::now().timestamp();

        let short = issue_access_token(&test_identity(), None, &config).unwrap();
        let long =
            issue_access_token(&test_identity(), Some(config.login_token_ttl_secs), &config)
                .unwrap();

        let short_exp = validate_access_token(&short, &config).unwrap().exp;
        let long_exp = validate_access_token(&long, &config).unwrap().exp;

        // 15-minute fallback vs 30-minute login lifetime.
        assert!((short_exp - now - 900).abs() <= 5);
        assert!((long_exp - now - 1800).abs() <= 5);
    }

    #[test]
    fn expired_token_fails_with_expired_kind() {
        let config = test_config();
        let claims = AccessTokenClaims {
            sub: "a@x.com".into(),
            org_id: "some-org".into(),
            org_name: "Acme".into(),
            role: "admin".into(),
            // Beyond the default 60s validation leeway.
            exp: Utc::now().timestamp() - 300,
        };
        let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        match validate_access_token(&token, &config) {
            Err(AuthError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn wrong_secret_is_invalid_not_expired() {
        let config = test_config();
        let token = issue_access_token(&test_identity(), None, &config).unwrap();

        let other = AuthConfig {
            jwt_secret: "other-secret".into(),
            ..AuthConfig::default()
        };
        match validate_access_token(&token, &other) {
            Err(AuthError::TokenInvalid(_)) => {}
            other => panic!("expected TokenInvalid, got {other:?}"),
        }
    }

    #[test]
    fn garbage_token_is_invalid() {
        let config = test_config();
        match validate_access_token("not-a-jwt", &config) {
            Err(AuthError::TokenInvalid(_)) => {}
            other => panic!("expected TokenInvalid, got {other:?}"),
        }
    }

    #[test]
    fn empty_subject_is_invalid() {
        let config = test_config();
        let claims = AccessTokenClaims {
            sub: String::new(),
            org_id: "some-org".into(),
            org_name: "Acme".into(),
            role: "admin".into(),
            exp: Utc::now().timestamp() + 900,
        };
        let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        match validate_access_token(&token, &config) {
            Err(AuthError::TokenInvalid(_)) => {}
            other => panic!("expected TokenInvalid, got {other:?}"),
        }
    }
}
