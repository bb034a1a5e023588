//! Character use cases: domain shapes, value rules, storage contract and the
//! service that ties them together.

pub mod domain;
pub mod valuation;
pub mod repository;
pub mod service;

pub use domain::{Character, CreateCharacterRequest, UpdateCharacterRequest};
pub use repository::{CharacterRepository, SeaOrmCharacterRepository};
pub use service::CharacterService;
