use tracing::{info, instrument, warn};

use super::credentials::CredentialVerifier;
use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::token::TokenService;

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    tokens: TokenService,
    credentials: CredentialVerifier,
}

impl AuthService {
    pub fn new(tokens: TokenService, credentials: CredentialVerifier) -> Self { Self { tokens, credentials } }

    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self::new(TokenService::new(&cfg.jwt_secret, cfg.token_ttl_hours), CredentialVerifier::from(cfg))
    }

    /// Check the operator credentials and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, CredentialVerifier, TokenService};
    /// use service::auth::credentials::hash_password;
    /// use service::auth::domain::LoginInput;
    /// let verifier = CredentialVerifier::new("admin", Some(hash_password("Passw0rd").unwrap()));
    /// let svc = AuthService::new(TokenService::new("secret", 1), verifier);
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "admin".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(svc.verify(&session.token).unwrap().sub, "admin");
    /// ```
    #[instrument(skip_all, fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if !self.credentials.is_enabled() {
            warn!("login attempted while no password hash is configured");
        }
        self.credentials.verify(&input.username, &input.password)?;
        let token = self.tokens.issue(&input.username)?;
        info!("user_logged_in");
        Ok(AuthSession { token })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> { self.tokens.verify(token) }

    /// Token for `subject` without a password check; used to seed tests and tooling.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> { self.tokens.issue(subject) }
}
