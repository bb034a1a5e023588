use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::domain::Claims;
use super::errors::AuthError;

/// Issues and verifies HS256 bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Fails with `TokenError` when the expiry is not representable.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = Duration::try_hours(self.ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::TokenError(format!("token ttl of {} hours is out of range", self.ttl_hours)))?;
        let claims = Claims { sub: subject.to_string(), iat: now.timestamp(), exp: exp.timestamp() };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Signature and expiry are both checked; any failure is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthorized)
    }
}
