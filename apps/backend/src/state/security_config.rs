use jsonwebtoken::Algorithm;

/// Access tokens live for 15 minutes.
pub const ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;

/// JWT signing settings shared by the login route and the bearer middleware.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    /// Always HS256 today
    pub algorithm: Algorithm,
    pub token_ttl_secs: u64,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl_secs: ACCESS_TOKEN_TTL_SECS,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only_0000".to_vec())
    }
}
