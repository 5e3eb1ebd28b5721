//! Shop account operations.
//!
//! Password material never originates here: callers hash before registering
//! and the engine stores the opaque hash.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, changes, credits, shops, util};

use super::{Engine, with_tx};

/// Input for registering a shop. `password` is the already-hashed credential.
#[derive(Clone, Debug)]
pub struct NewShop {
    pub name: String,
    pub email: String,
    pub shop_type: String,
    pub description: String,
    pub city: String,
    pub phone_number: String,
    pub password: String,
}

/// Partial shop profile update; `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
pub struct ShopEdit {
    pub name: Option<String>,
    pub shop_type: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub phone_number: Option<String>,
}

impl Engine {
    /// Registers a shop; the email must be unique across the store.
    pub async fn register_shop(&self, new: NewShop) -> ResultEngine<shops::Model> {
        let model = shops::Model {
            id: Uuid::new_v4().to_string(),
            name: util::required_text(&new.name, "name", 2, 50)?,
            email: util::required_email(&new.email)?,
            shop_type: util::required_text(&new.shop_type, "shopType", 2, 30)?,
            description: util::required_text(&new.description, "description", 10, 200)?,
            created_at: Utc::now(),
            phone_number: util::required_text(&new.phone_number, "phoneNumber", 10, 15)?,
            city: util::required_text(&new.city, "city", 2, 30)?,
            password: new.password,
            change_refs: shops::OwnedIds::default(),
            credit_refs: shops::OwnedIds::default(),
        };

        with_tx!(self, |db_tx| {
            let exists = shops::Entity::find()
                .filter(shops::Column::Email.eq(model.email.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(model.email.clone()));
            }

            let shop_model = shops::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                name: ActiveValue::Set(model.name.clone()),
                email: ActiveValue::Set(model.email.clone()),
                shop_type: ActiveValue::Set(model.shop_type.clone()),
                description: ActiveValue::Set(model.description.clone()),
                created_at: ActiveValue::Set(model.created_at),
                phone_number: ActiveValue::Set(model.phone_number.clone()),
                city: ActiveValue::Set(model.city.clone()),
                password: ActiveValue::Set(model.password.clone()),
                change_refs: ActiveValue::Set(model.change_refs.clone()),
                credit_refs: ActiveValue::Set(model.credit_refs.clone()),
            };
            shop_model.insert(&db_tx).await?;
            Ok::<(), EngineError>(())
        })?;

        Ok(model)
    }

    /// Credential lookup for login; `None` when no shop carries the email.
    pub async fn shop_by_email(&self, email: &str) -> ResultEngine<Option<shops::Model>> {
        shops::Entity::find()
            .filter(shops::Column::Email.eq(email.to_string()))
            .one(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Loads the caller's own shop (token identity, no id-format check).
    pub async fn my_shop(&self, shop_id: &str) -> ResultEngine<shops::Model> {
        with_tx!(self, |db_tx| self.require_shop(&db_tx, shop_id).await)
    }

    /// Admin read of a shop by path id.
    pub async fn shop(&self, shop_id: &str) -> ResultEngine<shops::Model> {
        util::parse_uuid(shop_id, "shop")?;
        shops::Entity::find_by_id(shop_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("shop not exists".to_string()))
    }

    /// Admin directory of every shop.
    pub async fn shops(&self) -> ResultEngine<Vec<shops::Model>> {
        shops::Entity::find()
            .all(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Applies a partial profile update to the caller's shop.
    pub async fn edit_shop(&self, shop_id: &str, edit: ShopEdit) -> ResultEngine<shops::Model> {
        let name = edit
            .name
            .as_deref()
            .map(|v| util::required_text(v, "name", 2, 50))
            .transpose()?;
        let shop_type = edit
            .shop_type
            .as_deref()
            .map(|v| util::required_text(v, "shopType", 2, 30))
            .transpose()?;
        let description = edit
            .description
            .as_deref()
            .map(|v| util::required_text(v, "description", 10, 200))
            .transpose()?;
        let city = edit
            .city
            .as_deref()
            .map(|v| util::required_text(v, "city", 2, 30))
            .transpose()?;
        let phone_number = edit
            .phone_number
            .as_deref()
            .map(|v| util::required_text(v, "phoneNumber", 10, 15))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;

            let update = shops::ActiveModel {
                id: ActiveValue::Set(shop.id.clone()),
                name: name.map_or(ActiveValue::NotSet, ActiveValue::Set),
                shop_type: shop_type.map_or(ActiveValue::NotSet, ActiveValue::Set),
                description: description.map_or(ActiveValue::NotSet, ActiveValue::Set),
                city: city.map_or(ActiveValue::NotSet, ActiveValue::Set),
                phone_number: phone_number.map_or(ActiveValue::NotSet, ActiveValue::Set),
                ..Default::default()
            };
            update.update(&db_tx).await.map_err(Into::into)
        })
    }

    /// Replaces the stored password hash of a shop.
    pub async fn set_shop_password(&self, shop_id: &str, password: String) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            let update = shops::ActiveModel {
                id: ActiveValue::Set(shop.id),
                password: ActiveValue::Set(password),
                ..Default::default()
            };
            update.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Admin deletion of a shop together with every owned child record.
    pub async fn delete_shop(&self, shop_id: &str) -> ResultEngine<shops::Model> {
        util::parse_uuid(shop_id, "shop")?;

        with_tx!(self, |db_tx| {
            let Some(shop) = shops::Entity::find_by_id(shop_id.to_string())
                .one(&db_tx)
                .await?
            else {
                return Err(EngineError::KeyNotFound("shop not exists".to_string()));
            };

            credits::Entity::delete_many()
                .filter(credits::Column::Id.is_in(shop.credit_refs.0.clone()))
                .exec(&db_tx)
                .await?;
            changes::Entity::delete_many()
                .filter(changes::Column::Id.is_in(shop.change_refs.0.clone()))
                .exec(&db_tx)
                .await?;

            shop.clone().delete(&db_tx).await?;
            Ok(shop)
        })
    }
}
