//! Registration endpoints for shops and admins.

use api_types::{Envelope, admin::AdminRegister, shop::ShopRegister};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use engine::{NewAdmin, NewShop};

use crate::{
    ServerError, admin, credentials,
    server::{ServerState, X_AUTH_TOKEN},
    shop,
    tokens::Identity,
};

pub async fn shop_register(
    State(state): State<ServerState>,
    Json(payload): Json<ShopRegister>,
) -> Result<impl IntoResponse, ServerError> {
    credentials::validate_password(&payload.password)?;
    let password = credentials::hash_password(&payload.password)?;

    let model = state
        .engine
        .register_shop(NewShop {
            name: payload.name,
            email: payload.email,
            shop_type: payload.shop_type,
            description: payload.description,
            city: payload.city,
            phone_number: payload.phone_number,
            password,
        })
        .await?;

    let token = state.tokens.issue(&Identity::Shop {
        id: model.id.clone(),
    })?;

    Ok((
        StatusCode::CREATED,
        [(X_AUTH_TOKEN.clone(), token)],
        Json(Envelope::created(shop::shop_view(model))),
    ))
}

/// Open registration, bounded by the engine's admin cap; the first account
/// created becomes the super-admin.
pub async fn admin_register(
    State(state): State<ServerState>,
    Json(payload): Json<AdminRegister>,
) -> Result<impl IntoResponse, ServerError> {
    credentials::validate_password(&payload.password)?;
    let password = credentials::hash_password(&payload.password)?;

    let model = state
        .engine
        .register_admin(NewAdmin {
            username: payload.username,
            email: payload.email,
            password,
        })
        .await?;

    let token = state.tokens.issue(&Identity::Admin {
        id: model.id.clone(),
        power: model.power,
    })?;

    Ok((
        StatusCode::CREATED,
        [(X_AUTH_TOKEN.clone(), token)],
        Json(Envelope::created(admin::admin_view(model))),
    ))
}
