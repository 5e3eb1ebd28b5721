use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};
pub use tokens::{Identity, TokenService};

mod admin;
mod change;
mod credentials;
mod credit;
mod home;
mod login;
mod register;
mod server;
mod shop;
mod tokens;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Unauthorized,
    InvalidToken,
    Forbidden,
    NotFound(String),
    Internal(String),
    Generic(String),
}

/// Failure body: the numeric status is mirrored next to the message.
#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) | EngineError::InvalidId(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidInput(_)
        | EngineError::ExistingKey(_)
        | EngineError::LimitReached(_) => StatusCode::BAD_REQUEST,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "no token provided".to_string())
            }
            ServerError::InvalidToken => (
                StatusCode::BAD_REQUEST,
                "invalid token was provided".to_string(),
            ),
            ServerError::Forbidden => (StatusCode::FORBIDDEN, "access denied".to_string()),
            ServerError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ServerError::Internal(message) => {
                tracing::error!("internal error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Generic(message) => (StatusCode::BAD_REQUEST, message),
        };

        (
            status,
            Json(ErrorBody {
                status: status.as_u16(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_invalid_id_maps_to_404() {
        let res = ServerError::from(EngineError::InvalidId("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_duplicate_maps_to_400() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_limit_maps_to_400() {
        let res = ServerError::from(EngineError::LimitReached("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_errors_map_to_expected_statuses() {
        assert_eq!(
            ServerError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::InvalidToken.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
