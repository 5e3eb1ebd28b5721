//! Login endpoints: verify credentials, issue the identity token.
//!
//! Wrong email and wrong password are indistinguishable on the wire; both
//! answer 404 with the same message.

use api_types::{
    Envelope,
    admin::AdminLogin,
    shop::ShopLogin,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    ServerError, admin, credentials,
    server::{ServerState, X_AUTH_TOKEN},
    shop,
    tokens::Identity,
};

pub async fn shop_login(
    State(state): State<ServerState>,
    Json(payload): Json<ShopLogin>,
) -> Result<impl IntoResponse, ServerError> {
    let invalid = || ServerError::NotFound("invalid email or password".to_string());

    let Some(model) = state.engine.shop_by_email(&payload.email).await? else {
        return Err(invalid());
    };
    if !credentials::verify_password(&payload.password, &model.password) {
        return Err(invalid());
    }

    let token = state.tokens.issue(&Identity::Shop {
        id: model.id.clone(),
    })?;

    Ok((
        StatusCode::OK,
        [(X_AUTH_TOKEN.clone(), token)],
        Json(Envelope::ok(shop::shop_view(model))),
    ))
}

pub async fn admin_login(
    State(state): State<ServerState>,
    Json(payload): Json<AdminLogin>,
) -> Result<impl IntoResponse, ServerError> {
    let invalid = || ServerError::NotFound("invalid email or password".to_string());

    let Some(model) = state.engine.admin_by_email(&payload.email).await? else {
        return Err(invalid());
    };
    if !credentials::verify_password(&payload.password, &model.password) {
        return Err(invalid());
    }

    let token = state.tokens.issue(&Identity::Admin {
        id: model.id.clone(),
        power: model.power,
    })?;

    Ok((
        StatusCode::OK,
        [(X_AUTH_TOKEN.clone(), token)],
        Json(Envelope::ok(admin::admin_view(model))),
    ))
}
