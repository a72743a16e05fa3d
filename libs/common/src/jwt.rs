//! JWT service for token generation and validation
//!
//! Access tokens are short-lived and authorize API calls; refresh tokens live
//! longer and can only be exchanged for a new access token. The two kinds are
//! signed with distinct HS256 secrets and carry their type in the claims, so
//! one can never pass for the other.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

use crate::error::{TokenError, TokenResult};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret for signing access tokens
    pub access_secret: String,
    /// Secret for signing refresh tokens
    pub refresh_secret: String,
    /// Access token expiration time in seconds (default: 15 minutes)
    pub access_token_expiry: u64,
    /// Refresh token expiration time in seconds (default: 7 days)
    pub refresh_token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Secret for signing access tokens
    /// - `JWT_REFRESH_SECRET`: Secret for signing refresh tokens
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 900)
    /// - `JWT_REFRESH_TOKEN_EXPIRY`: Refresh token expiry in seconds (default: 604800)
    pub fn from_env() -> anyhow::Result<Self> {
        let access_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_REFRESH_SECRET environment variable not set"))?;

        if access_secret == refresh_secret {
            anyhow::bail!("JWT_SECRET and JWT_REFRESH_SECRET must differ");
        }

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string()) // 15 minutes
            .parse()
            .unwrap_or(900);

        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604800);

        Ok(JwtConfig {
            access_secret,
            refresh_secret,
            access_token_expiry,
            refresh_token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

/// Token type enum
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum TokenType {
    /// Access token
    Access,
    /// Refresh token
    Refresh,
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    access: std::sync::Arc<SigningKeys>,
    refresh: std::sync::Arc<SigningKeys>,
    validation: Validation,
    config: JwtConfig,
}

fn now_secs() -> TokenResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| TokenError::Encoding(format!("Failed to get current time: {}", e)))
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            access: std::sync::Arc::new(SigningKeys::from_secret(&config.access_secret)),
            refresh: std::sync::Arc::new(SigningKeys::from_secret(&config.refresh_secret)),
            validation,
            config,
        }
    }

    fn keys(&self, token_type: TokenType) -> &SigningKeys {
        match token_type {
            TokenType::Access => &self.access,
            TokenType::Refresh => &self.refresh,
        }
    }

    fn generate(&self, user_id: Uuid, email: &str, token_type: TokenType) -> TokenResult<String> {
        let now = now_secs()?;
        let lifetime = match token_type {
            TokenType::Access => self.config.access_token_expiry,
            TokenType::Refresh => self.config.refresh_token_expiry,
        };

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + lifetime,
            token_type,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys(token_type).encoding,
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn validate(&self, token: &str, expected: TokenType) -> TokenResult<Claims> {
        let token_data = decode::<Claims>(token, &self.keys(expected).decoding, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        if token_data.claims.token_type != expected {
            return Err(TokenError::WrongType);
        }

        Ok(token_data.claims)
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> TokenResult<String> {
        self.generate(user_id, email, TokenType::Access)
    }

    /// Generate a refresh token for a user
    pub fn generate_refresh_token(&self, user_id: Uuid, email: &str) -> TokenResult<String> {
        self.generate(user_id, email, TokenType::Refresh)
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> TokenResult<Claims> {
        self.validate(token, TokenType::Access)
    }

    /// Validate a refresh token and return its claims
    pub fn validate_refresh_token(&self, token: &str) -> TokenResult<Claims> {
        self.validate(token, TokenType::Refresh)
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.config.access_token_expiry
    }

    /// Get the refresh token expiry time
    pub fn refresh_token_expiry(&self) -> u64 {
        self.config.refresh_token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn service() -> JwtService {
        JwtService::new(JwtConfig {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        })
    }

    #[test]
    fn test_access_token_round_trip() {
        let jwt = service();
        let user_id = Uuid::new_v4();

        let token = jwt.generate_access_token(user_id, "ana@example.com").unwrap();
        let claims = jwt.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let jwt = service();
        let token = jwt
            .generate_refresh_token(Uuid::new_v4(), "ana@example.com")
            .unwrap();

        // Signed with the refresh secret, so the access key rejects it outright
        assert_eq!(jwt.validate_access_token(&token), Err(TokenError::Invalid));
        assert!(jwt.validate_refresh_token(&token).is_ok());
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let jwt = service();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            iat: 1_000_000,
            exp: 1_000_900,
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"access-secret-for-tests"),
        )
        .unwrap();

        assert_eq!(jwt.validate_access_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_type_claim_is_checked() {
        let jwt = service();
        let now = now_secs().unwrap();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            iat: now,
            exp: now + 60,
            token_type: TokenType::Refresh,
        };
        // Refresh claims signed with the access secret
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"access-secret-for-tests"),
        )
        .unwrap();

        assert_eq!(jwt.validate_access_token(&token), Err(TokenError::WrongType));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(
            service().validate_access_token("not.a.token"),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", "one");
            std::env::set_var("JWT_REFRESH_SECRET", "two");
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
            std::env::set_var("JWT_REFRESH_TOKEN_EXPIRY", "3600");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 3600);

        unsafe {
            std::env::set_var("JWT_REFRESH_SECRET", "one");
        }
        assert!(JwtConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("JWT_REFRESH_SECRET");
            std::env::remove_var("JWT_REFRESH_TOKEN_EXPIRY");
        }
    }
}
