//! Home-page content endpoints.

use api_types::{
    Envelope,
    home::{HomeEdit as HomeEditBody, HomeNew, HomeView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{HomeEdit, NewHome, homes};

use crate::{ServerError, server::ServerState};

fn home_view(model: homes::Model) -> HomeView {
    HomeView {
        id: model.id,
        title: model.title,
        description1: model.description1,
        description2: model.description2,
        image_link: model.image_link,
        is_published: model.is_published,
        created_at: model.created_at,
    }
}

/// Root greeting, kept for clients probing the service.
pub async fn welcome() -> Json<Envelope<String>> {
    Json(Envelope::ok("welcome to the collector".to_string()))
}

/// Public landing content: the latest published document, or the greeting
/// when nothing is published yet.
pub async fn landing(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Option<HomeView>>>, ServerError> {
    let latest = state.engine.latest_published_home().await?;
    let message = if latest.is_some() {
        "success".to_string()
    } else {
        "welcome to the collector home".to_string()
    };

    Ok(Json(Envelope {
        status: 200,
        message,
        data: latest.map(home_view),
    }))
}

pub async fn all_published(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<HomeView>>>, ServerError> {
    let homes = state.engine.published_homes().await?;
    Ok(Json(Envelope::ok(
        homes.into_iter().map(home_view).collect(),
    )))
}

pub async fn not_published(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<HomeView>>>, ServerError> {
    let homes = state.engine.unpublished_homes().await?;
    Ok(Json(Envelope::ok(
        homes.into_iter().map(home_view).collect(),
    )))
}

pub async fn inspect(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<HomeView>>, ServerError> {
    let model = state.engine.home(&id).await?;
    Ok(Json(Envelope::ok(home_view(model))))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HomeNew>,
) -> Result<impl IntoResponse, ServerError> {
    let model = state
        .engine
        .create_home(NewHome {
            title: payload.title,
            description1: payload.description1,
            description2: payload.description2,
            image_link: payload.image_link,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::created(home_view(model)))))
}

pub async fn edit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<HomeEditBody>,
) -> Result<Json<Envelope<HomeView>>, ServerError> {
    let model = state
        .engine
        .edit_home(
            &id,
            HomeEdit {
                title: payload.title,
                description1: payload.description1,
                description2: payload.description2,
                image_link: payload.image_link,
            },
        )
        .await?;
    Ok(Json(Envelope::ok(home_view(model))))
}

pub async fn publish(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<HomeView>>, ServerError> {
    let model = state.engine.publish_home(&id).await?;
    Ok(Json(Envelope::ok(home_view(model))))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<HomeView>>, ServerError> {
    let model = state.engine.delete_home(&id).await?;
    Ok(Json(Envelope::ok(home_view(model))))
}
