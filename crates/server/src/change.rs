//! Change record endpoints.

use api_types::{
    Envelope,
    change::{ChangeNew, ChangeView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{Gender, MoneyCents, NewChange, changes};

use crate::{ServerError, server::ServerState, tokens::Identity};

fn change_view(model: changes::Model) -> ChangeView {
    ChangeView {
        id: model.id,
        name_of_collector: model.name_of_collector,
        gender_of_collector: model.gender_of_collector,
        amount: MoneyCents::new(model.amount).to_major_f64(),
        date_in: model.date_in,
        date_out: model.date_out,
        collected: model.collected,
    }
}

pub async fn create(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Json(payload): Json<ChangeNew>,
) -> Result<impl IntoResponse, ServerError> {
    let shop_id = identity.shop_id()?;

    let gender = Gender::try_from(payload.gender_of_collector.as_str()).map_err(ServerError::Engine)?;
    let amount = MoneyCents::from_major_f64(payload.amount)?;

    let model = state
        .engine
        .create_change(
            shop_id,
            NewChange {
                name_of_collector: payload.name_of_collector,
                gender_of_collector: gender,
                amount,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::created(change_view(model))),
    ))
}

pub async fn my_changes(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<ChangeView>>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let changes = state.engine.my_changes(shop_id).await?;
    Ok(Json(Envelope::ok(
        changes.into_iter().map(change_view).collect(),
    )))
}

pub async fn get_one(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ChangeView>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let model = state.engine.change(shop_id, &id).await?;
    Ok(Json(Envelope::ok(change_view(model))))
}

pub async fn get_all(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<ChangeView>>>, ServerError> {
    let changes = state.engine.changes().await?;
    Ok(Json(Envelope::ok(
        changes.into_iter().map(change_view).collect(),
    )))
}

pub async fn collect(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ChangeView>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let model = state.engine.collect_change(shop_id, &id).await?;
    Ok(Json(Envelope::ok(change_view(model))))
}

pub async fn remove(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let shop_id = identity.shop_id()?;
    state.engine.delete_change(shop_id, &id).await?;
    Ok(Json(Envelope::ok("removed successfully".to_string())))
}
