use anyhow::{anyhow, Result};
/// Bearer token generation and validation using HS256.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

const DEFAULT_TTL_SECS: i64 = 3600;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username bound to the token
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

struct KeyMaterial {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

// Thread-safe mutable storage for the signing keys loaded from configuration
lazy_static! {
    static ref JWT_KEYS: RwLock<Option<KeyMaterial>> = RwLock::new(None);
}

/// Initialize the HMAC signing keys from the configured secret.
/// Must be called during application startup before any token operation.
pub fn initialize_keys(secret: &str, ttl_secs: i64) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    let material = KeyMaterial {
        encoding: EncodingKey::from_secret(secret.as_bytes()),
        decoding: DecodingKey::from_secret(secret.as_bytes()),
        ttl_secs: if ttl_secs > 0 {
            ttl_secs
        } else {
            DEFAULT_TTL_SECS
        },
    };

    let mut keys = JWT_KEYS
        .write()
        .map_err(|e| anyhow!("Failed to acquire write lock on JWT keys: {}", e))?;
    *keys = Some(material);

    Ok(())
}

fn with_keys<T>(f: impl FnOnce(&KeyMaterial) -> Result<T>) -> Result<T> {
    let keys = JWT_KEYS
        .read()
        .map_err(|e| anyhow!("Failed to acquire read lock on JWT keys: {}", e))?;

    match keys.as_ref() {
        Some(material) => f(material),
        None => Err(anyhow!(
            "JWT keys not initialized. Call initialize_keys() during startup"
        )),
    }
}

/// Generate a bearer token for an authenticated user
pub fn generate_token(user_id: Uuid, username: &str) -> Result<String> {
    with_keys(|material| {
        let now = Utc::now();
        let expiry = now + Duration::seconds(material.ttl_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::default(), &claims, &material.encoding)
            .map_err(|e| anyhow!("Failed to generate token: {}", e))
    })
}

/// Validate and decode a token
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    with_keys(|material| {
        decode::<Claims>(
            token,
            &material.decoding,
            &Validation::new(jsonwebtoken::Algorithm::HS256),
        )
        .map_err(|e| anyhow!("Token validation failed: {}", e))
    })
}

/// Extract user ID from a token
pub fn user_id_from_token(token: &str) -> Result<Uuid> {
    let token_data = validate_token(token)?;
    Uuid::parse_str(&token_data.claims.sub).map_err(|e| anyhow!("Invalid user ID in token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // JWT_KEYS is process-global; tests that install keys run serialized so
    // one module's secret cannot swap in under another's token.
    fn init() {
        initialize_keys("unit-test-secret", 3600).unwrap();
    }

    #[test]
    #[serial]
    fn test_generate_token() {
        init();
        let token = generate_token(Uuid::new_v4(), "alice").unwrap();
        assert!(!token.is_empty());
        // JWT tokens have 3 parts separated by dots
        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    #[serial]
    fn test_validate_valid_token() {
        init();
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, "alice").unwrap();

        let token_data = validate_token(&token).unwrap();
        assert_eq!(token_data.claims.sub, user_id.to_string());
        assert_eq!(token_data.claims.username, "alice");
        assert!(token_data.claims.exp > token_data.claims.iat);
    }

    #[test]
    #[serial]
    fn test_validate_invalid_token() {
        init();
        assert!(validate_token("not.a.valid.token").is_err());
    }

    #[test]
    #[serial]
    fn test_validate_corrupted_token() {
        init();
        let token = generate_token(Uuid::new_v4(), "alice").unwrap();
        let corrupted = format!("{}x", token);
        assert!(validate_token(&corrupted).is_err());
    }

    #[test]
    #[serial]
    fn test_user_id_round_trip() {
        init();
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, "bob").unwrap();
        assert_eq!(user_id_from_token(&token).unwrap(), user_id);
    }
}
