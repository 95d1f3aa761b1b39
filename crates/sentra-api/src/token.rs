use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use sentra_types::api::Claims;
use sentra_types::models::User;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies identity tokens with a shared HS256 secret.
///
/// Without a configured lifetime no `exp` claim is written, and the same user
/// always yields the same token.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional; when present it is still checked.
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn claims_for(&self, user: &User) -> Claims {
        Claims {
            sub: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            exp: self
                .ttl
                .map(|ttl| (Utc::now() + ttl).timestamp() as usize),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        encode(
            &Header::new(Algorithm::HS256),
            &self.claims_for(user),
            &self.encoding,
        )
        .map_err(TokenError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
