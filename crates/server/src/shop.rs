//! Shop profile endpoints.

use api_types::{
    Envelope, PasswordChange,
    shop::{ShopEdit as ShopEditBody, ShopListing, ShopView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::{ShopEdit, shops};

use crate::{ServerError, credentials, server::ServerState, tokens::Identity};

/// Profile view of a shop row; the password hash never leaves the server.
pub(crate) fn shop_view(model: shops::Model) -> ShopView {
    ShopView {
        id: model.id,
        name: model.name,
        email: model.email,
        shop_type: model.shop_type,
        description: model.description,
        created_at: model.created_at,
        phone_number: model.phone_number,
        city: model.city,
        change: model.change_refs.0,
        credit: model.credit_refs.0,
    }
}

fn shop_listing(model: shops::Model) -> ShopListing {
    ShopListing {
        id: model.id,
        name: model.name,
        email: model.email,
        description: model.description,
        city: model.city,
        phone_number: model.phone_number,
    }
}

pub async fn my_shop(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<ShopView>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let model = state.engine.my_shop(shop_id).await?;
    Ok(Json(Envelope::ok(shop_view(model))))
}

pub async fn edit_shop(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Json(payload): Json<ShopEditBody>,
) -> Result<Json<Envelope<ShopView>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let model = state
        .engine
        .edit_shop(
            shop_id,
            ShopEdit {
                name: payload.name,
                shop_type: payload.shop_type,
                description: payload.description,
                city: payload.city,
                phone_number: payload.phone_number,
            },
        )
        .await?;
    Ok(Json(Envelope::ok(shop_view(model))))
}

pub async fn change_password(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Json(payload): Json<PasswordChange>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let model = state.engine.my_shop(shop_id).await?;

    if !credentials::verify_password(&payload.old_password, &model.password) {
        return Err(ServerError::Generic("invalid inputs".to_string()));
    }
    credentials::validate_password(&payload.new_password)?;

    let password = credentials::hash_password(&payload.new_password)?;
    state.engine.set_shop_password(shop_id, password).await?;

    Ok(Json(Envelope::ok("password updated".to_string())))
}

pub async fn get_all(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<ShopListing>>>, ServerError> {
    let shops = state.engine.shops().await?;
    Ok(Json(Envelope::ok(
        shops.into_iter().map(shop_listing).collect(),
    )))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ShopView>>, ServerError> {
    let model = state.engine.shop(&id).await?;
    Ok(Json(Envelope::ok(shop_view(model))))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ShopView>>, ServerError> {
    let model = state.engine.delete_shop(&id).await?;
    Ok(Json(Envelope::ok(shop_view(model))))
}
