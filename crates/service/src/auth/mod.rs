//! Auth module: bearer tokens for the mutating character routes.
//!
//! `token` issues and verifies HS256 JWTs, `credentials` checks the configured
//! operator account, and `service` ties both together for the HTTP layer.

pub mod credentials;
pub mod domain;
pub mod errors;
pub mod service;
pub mod token;

pub use credentials::CredentialVerifier;
pub use service::AuthService;
pub use token::TokenService;
