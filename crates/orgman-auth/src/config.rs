//! Authentication configuration.

/// Configuration for the credential service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric secret for HS256 JWT signing and verification.
    pub jwt_secret: String,
    /// Lifetime of tokens issued by the login flow
    /// (default: 1800 = 30 minutes).
    pub login_token_ttl_secs: u64,
    /// Fallback lifetime when a token is issued without an explicit TTL
    /// (default: 900 = 15 minutes). Kept separate from the login TTL;
    /// the two call sites have always used different defaults.
    pub default_token_ttl_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Minimum password length for policy enforcement.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            login_token_ttl_secs: 1_800,
            default_token_ttl_secs: 900,
            pepper: None,
            min_password_length: 8,
        }
    }
}
