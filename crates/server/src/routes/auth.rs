use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use tracing::warn;

use service::auth::domain::{AuthSession, LoginInput};

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::TokenResponse),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    input: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthSession>, JsonApiError> {
    let Json(input) = input.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
    let session = state.auth.login(input).await.map_err(|e| {
        warn!(err = %e, "login rejected");
        JsonApiError::from(e)
    })?;
    Ok(Json(session))
}

/// Extract the token from `Authorization: Bearer <token>`.
fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Route middleware: a missing header, another scheme, or an invalid or
/// expired token is rejected with 401.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let Some(token) = bearer_token(&req) else {
        warn!(path = %req.uri().path(), method = %req.method(), "missing or malformed Authorization header");
        return Err(JsonApiError::unauthorized());
    };
    if let Err(e) = state.auth.verify(token) {
        warn!(path = %req.uri().path(), err = %e, "token validation failed");
        return Err(JsonApiError::unauthorized());
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(authz: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/characters");
        if let Some(v) = authz {
            builder = builder.header(AUTHORIZATION, v);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&request(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&request(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&request(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request(Some("Bearer "))), None);
        assert_eq!(bearer_token(&request(Some("abc"))), None);
        assert_eq!(bearer_token(&request(None)), None);
    }
}
