use std::sync::Arc;

use service::auth::AuthService;
use service::character::{CharacterRepository, CharacterService};

pub type Characters = CharacterService<dyn CharacterRepository>;

/// Shared handler state. Built once at startup; cloning only bumps refcounts.
#[derive(Clone)]
pub struct ServerState {
    pub characters: Arc<Characters>,
    pub auth: Arc<AuthService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CharacterRepository>, auth: AuthService) -> Self {
        Self { characters: Arc::new(CharacterService::new(repo)), auth: Arc::new(auth) }
    }

    pub fn with_characters(characters: Characters, auth: AuthService) -> Self {
        Self { characters: Arc::new(characters), auth: Arc::new(auth) }
    }
}
