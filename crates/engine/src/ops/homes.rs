//! Home-page content operations.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, homes, util};

use super::{Engine, with_tx};

/// Input for creating a home document.
#[derive(Clone, Debug)]
pub struct NewHome {
    pub title: String,
    pub description1: String,
    pub description2: Option<String>,
    pub image_link: String,
}

/// Partial content update; only unpublished documents accept one.
#[derive(Clone, Debug, Default)]
pub struct HomeEdit {
    pub title: Option<String>,
    pub description1: Option<String>,
    pub description2: Option<String>,
    pub image_link: Option<String>,
}

impl Engine {
    /// Creates an unpublished home document.
    pub async fn create_home(&self, new: NewHome) -> ResultEngine<homes::Model> {
        let model = homes::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            title: ActiveValue::Set(util::required_text(&new.title, "title", 5, 20)?),
            description1: ActiveValue::Set(util::required_text(
                &new.description1,
                "description1",
                15,
                300,
            )?),
            description2: ActiveValue::Set(
                new.description2
                    .as_deref()
                    .map(|v| util::required_text(v, "description2", 15, 300))
                    .transpose()?,
            ),
            image_link: ActiveValue::Set(util::required_text(&new.image_link, "imageLink", 1, 2048)?),
            is_published: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
        };

        with_tx!(self, |db_tx| model
            .insert(&db_tx)
            .await
            .map_err(Into::into))
    }

    /// Latest published document, if any. This is what the public landing
    /// route serves.
    pub async fn latest_published_home(&self) -> ResultEngine<Option<homes::Model>> {
        homes::Entity::find()
            .filter(homes::Column::IsPublished.eq(true))
            .order_by_desc(homes::Column::CreatedAt)
            .one(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Every published document, newest first.
    pub async fn published_homes(&self) -> ResultEngine<Vec<homes::Model>> {
        homes::Entity::find()
            .filter(homes::Column::IsPublished.eq(true))
            .order_by_desc(homes::Column::CreatedAt)
            .all(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Every unpublished document, newest first.
    pub async fn unpublished_homes(&self) -> ResultEngine<Vec<homes::Model>> {
        homes::Entity::find()
            .filter(homes::Column::IsPublished.eq(false))
            .order_by_desc(homes::Column::CreatedAt)
            .all(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Reads a single home document by path id.
    pub async fn home(&self, home_id: &str) -> ResultEngine<homes::Model> {
        with_tx!(self, |db_tx| self.require_home(&db_tx, home_id).await)
    }

    /// Applies a partial content update; published documents reject it.
    pub async fn edit_home(&self, home_id: &str, edit: HomeEdit) -> ResultEngine<homes::Model> {
        let title = edit
            .title
            .as_deref()
            .map(|v| util::required_text(v, "title", 5, 20))
            .transpose()?;
        let description1 = edit
            .description1
            .as_deref()
            .map(|v| util::required_text(v, "description1", 15, 300))
            .transpose()?;
        let description2 = edit
            .description2
            .as_deref()
            .map(|v| util::required_text(v, "description2", 15, 300))
            .transpose()?;
        let image_link = edit
            .image_link
            .as_deref()
            .map(|v| util::required_text(v, "imageLink", 1, 2048))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let home = self.require_home(&db_tx, home_id).await?;
            if home.is_published {
                return Err(EngineError::InvalidInput(
                    "cannot modify a published home".to_string(),
                ));
            }

            let update = homes::ActiveModel {
                id: ActiveValue::Set(home.id.clone()),
                title: title.map_or(ActiveValue::NotSet, ActiveValue::Set),
                description1: description1.map_or(ActiveValue::NotSet, ActiveValue::Set),
                description2: description2.map_or(ActiveValue::NotSet, |v| {
                    ActiveValue::Set(Some(v))
                }),
                image_link: image_link.map_or(ActiveValue::NotSet, ActiveValue::Set),
                ..Default::default()
            };
            update.update(&db_tx).await.map_err(Into::into)
        })
    }

    /// Publishes a document. The transition is one-way; publishing an already
    /// published document is a no-op.
    pub async fn publish_home(&self, home_id: &str) -> ResultEngine<homes::Model> {
        with_tx!(self, |db_tx| {
            let home = self.require_home(&db_tx, home_id).await?;
            let update = homes::ActiveModel {
                id: ActiveValue::Set(home.id.clone()),
                is_published: ActiveValue::Set(true),
                ..Default::default()
            };
            update.update(&db_tx).await.map_err(Into::into)
        })
    }

    /// Deletes a home document.
    pub async fn delete_home(&self, home_id: &str) -> ResultEngine<homes::Model> {
        with_tx!(self, |db_tx| {
            let home = self.require_home(&db_tx, home_id).await?;
            home.clone().delete(&db_tx).await?;
            Ok(home)
        })
    }
}
