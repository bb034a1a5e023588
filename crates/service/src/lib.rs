//! Service layer for the character resource.
//! - Business rules (validation, value derivation) live here and nowhere else.
//! - Persistence is reached only through the `CharacterRepository` trait.
//! - Bearer-token issuing and verification for the HTTP layer.

pub mod errors;
pub mod pagination;
pub mod character;
pub mod auth;
#[cfg(test)]
pub mod test_support;
