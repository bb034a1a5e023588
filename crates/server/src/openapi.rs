use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct TokenResponse { pub token: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String, pub message: Option<String> }

#[derive(ToSchema)]
pub struct CharacterDoc {
    pub id: String,
    pub name: String,
    pub character_code: i64,
    pub character_power: i64,
    pub character_value: i64,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

#[derive(ToSchema)]
pub struct CreateCharacterDoc { pub name: String, pub character_code: i64, pub character_power: i64 }

#[derive(ToSchema)]
pub struct UpdateCharacterDoc { pub name: String, pub character_power: i64 }

#[derive(ToSchema)]
pub struct CharacterPageDoc {
    pub page: u64,
    pub page_size: u64,
    pub page_count: u64,
    pub total_count: u64,
    pub items: Vec<CharacterDoc>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::characters::list,
        crate::routes::characters::get,
        crate::routes::characters::create,
        crate::routes::characters::update,
        crate::routes::characters::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            TokenResponse,
            ErrorBody,
            CharacterDoc,
            CreateCharacterDoc,
            UpdateCharacterDoc,
            CharacterPageDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "characters")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_character_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for p in ["/characters", "/characters/{id}", "/auth/login", "/health"] {
            assert!(paths.iter().any(|k| k == p), "{p} missing");
        }
        assert!(doc.components.unwrap().security_schemes.contains_key("bearer"));
    }
}
