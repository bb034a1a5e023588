use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Hash a password into an argon2 PHC string suitable for `auth.password_hash`.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// The single operator account allowed to obtain tokens.
#[derive(Clone, Debug)]
pub struct CredentialVerifier {
    username: String,
    /// `None` disables login.
    password_hash: Option<String>,
}

impl CredentialVerifier {
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self { username: username.into(), password_hash }
    }

    pub fn is_enabled(&self) -> bool { self.password_hash.is_some() }

    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let Some(stored) = &self.password_hash else { return Err(AuthError::Unauthorized) };
        if username != self.username {
            return Err(AuthError::Unauthorized);
        }
        let parsed = PasswordHash::new(stored).map_err(|e| AuthError::HashError(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::Unauthorized)
    }
}

impl From<&configs::AuthConfig> for CredentialVerifier {
    fn from(c: &configs::AuthConfig) -> Self {
        let hash = c.password_hash.trim();
        Self::new(c.username.clone(), (!hash.is_empty()).then(|| hash.to_string()))
    }
}
