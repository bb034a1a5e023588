use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::character::{Character, CreateCharacterRequest, UpdateCharacterRequest};
use service::pagination::{Page, PageRequest};

use crate::{errors::JsonApiError, state::ServerState};

// Malformed bodies are reported as 400 regardless of the rejection kind.
fn body<T>(input: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    input.map(|Json(v)| v).map_err(|e| JsonApiError::bad_request(e.body_text()))
}

#[utoipa::path(
    get, path = "/characters", tag = "characters",
    params(
        ("page" = Option<u64>, Query, description = "1-based page index"),
        ("page_size" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List OK", body = crate::openapi::CharacterPageDoc),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<PageRequest>,
) -> Result<Json<Page<Character>>, JsonApiError> {
    let page = state.characters.list(q).await?;
    info!(count = page.items.len(), total = page.total_count, "list characters");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/characters/{id}", tag = "characters",
    params(("id" = String, Path, description = "Character ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CharacterDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Character>, JsonApiError> {
    Ok(Json(state.characters.get(&id).await?))
}

#[utoipa::path(
    post, path = "/characters", tag = "characters",
    request_body = crate::openapi::CreateCharacterDoc,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created", body = crate::openapi::CharacterDoc),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    input: Result<Json<CreateCharacterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Character>), JsonApiError> {
    let created = state.characters.create(body(input)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/characters/{id}", tag = "characters",
    params(("id" = String, Path, description = "Character ID")),
    request_body = crate::openapi::UpdateCharacterDoc,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CharacterDoc),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    input: Result<Json<UpdateCharacterRequest>, JsonRejection>,
) -> Result<Json<Character>, JsonApiError> {
    Ok(Json(state.characters.update(&id, body(input)?).await?))
}

#[utoipa::path(
    delete, path = "/characters/{id}", tag = "characters",
    params(("id" = String, Path, description = "Character ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::CharacterDoc),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Character>, JsonApiError> {
    Ok(Json(state.characters.delete(&id).await?))
}
