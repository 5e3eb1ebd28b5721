//! Admin account endpoints.

use api_types::{Envelope, PasswordChange, admin::AdminView};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use engine::admins;

use crate::{ServerError, credentials, server::ServerState, tokens::Identity};

pub(crate) fn admin_view(model: admins::Model) -> AdminView {
    AdminView {
        id: model.id,
        username: model.username,
        email: model.email,
        power: model.power,
    }
}

pub async fn all_admin(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<AdminView>>>, ServerError> {
    let admins = state.engine.admins().await?;
    Ok(Json(Envelope::ok(
        admins.into_iter().map(admin_view).collect(),
    )))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AdminView>>, ServerError> {
    let model = state.engine.admin(&id).await?;
    Ok(Json(Envelope::ok(admin_view(model))))
}

pub async fn change_password(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Json(payload): Json<PasswordChange>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let admin_id = identity.admin_id()?;
    let model = state.engine.admin(admin_id).await?;

    if !credentials::verify_password(&payload.old_password, &model.password) {
        return Err(ServerError::Generic("invalid inputs".to_string()));
    }
    credentials::validate_password(&payload.new_password)?;

    let password = credentials::hash_password(&payload.new_password)?;
    state.engine.set_admin_password(admin_id, password).await?;

    Ok(Json(Envelope::ok("password updated".to_string())))
}

pub async fn empower(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AdminView>>, ServerError> {
    let model = state.engine.empower_admin(&id).await?;
    Ok(Json(Envelope::ok(admin_view(model))))
}

pub async fn reduce(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AdminView>>, ServerError> {
    let model = state.engine.reduce_admin(&id).await?;
    Ok(Json(Envelope::ok(admin_view(model))))
}

/// Deleting an account is reserved to the super-admin; the route itself sits
/// behind the plain admin gate.
pub async fn remove(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AdminView>>, ServerError> {
    if !identity.is_super_admin() {
        return Err(ServerError::Forbidden);
    }
    let model = state.engine.delete_admin(&id).await?;
    Ok(Json(Envelope::ok(admin_view(model))))
}
