//! Change record operations, mirroring the credit ownership pattern.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Gender, MoneyCents, ResultEngine, changes, shops, util};

use super::{Engine, with_tx};

/// Input for recording held change.
#[derive(Clone, Debug)]
pub struct NewChange {
    pub name_of_collector: String,
    pub gender_of_collector: Gender,
    pub amount: MoneyCents,
}

impl Engine {
    /// Records change held for a customer and the ownership reference.
    pub async fn create_change(
        &self,
        shop_id: &str,
        new: NewChange,
    ) -> ResultEngine<changes::Model> {
        let name = util::required_text(&new.name_of_collector, "nameOfCollector", 3, 50)?;
        if new.amount.is_negative() {
            return Err(EngineError::InvalidInput(
                "amount must not be negative".to_string(),
            ));
        }

        let model = changes::Model {
            id: Uuid::new_v4().to_string(),
            name_of_collector: name,
            gender_of_collector: new.gender_of_collector.as_str().to_string(),
            amount: new.amount.cents(),
            date_in: Utc::now(),
            date_out: None,
            collected: false,
        };

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;

            let change_model = changes::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                name_of_collector: ActiveValue::Set(model.name_of_collector.clone()),
                gender_of_collector: ActiveValue::Set(model.gender_of_collector.clone()),
                amount: ActiveValue::Set(model.amount),
                date_in: ActiveValue::Set(model.date_in),
                date_out: ActiveValue::Set(model.date_out),
                collected: ActiveValue::Set(model.collected),
            };
            change_model.insert(&db_tx).await?;

            let mut refs = shop.change_refs.clone();
            refs.push(model.id.clone());
            let shop_update = shops::ActiveModel {
                id: ActiveValue::Set(shop.id.clone()),
                change_refs: ActiveValue::Set(refs),
                ..Default::default()
            };
            shop_update.update(&db_tx).await?;
            Ok::<(), EngineError>(())
        })?;

        Ok(model)
    }

    /// Every change record referenced by the shop, in reference-list order.
    pub async fn my_changes(&self, shop_id: &str) -> ResultEngine<Vec<changes::Model>> {
        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;

            let models = changes::Entity::find()
                .filter(changes::Column::Id.is_in(shop.change_refs.0.clone()))
                .all(&db_tx)
                .await?;
            let mut by_id: HashMap<String, changes::Model> =
                models.into_iter().map(|m| (m.id.clone(), m)).collect();

            Ok(shop
                .change_refs
                .0
                .iter()
                .filter_map(|id| by_id.remove(id))
                .collect())
        })
    }

    /// Owned read of a single change record.
    pub async fn change(&self, shop_id: &str, change_id: &str) -> ResultEngine<changes::Model> {
        util::parse_uuid(change_id, "change")?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            self.require_owned_change(&db_tx, &shop, change_id).await
        })
    }

    /// Admin listing of every change record in the store.
    pub async fn changes(&self) -> ResultEngine<Vec<changes::Model>> {
        changes::Entity::find()
            .all(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Marks an owned change record as collected. One-way: a collected record
    /// rejects a second collection.
    pub async fn collect_change(
        &self,
        shop_id: &str,
        change_id: &str,
    ) -> ResultEngine<changes::Model> {
        util::parse_uuid(change_id, "change")?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            let model = self.require_owned_change(&db_tx, &shop, change_id).await?;

            if model.collected {
                return Err(EngineError::InvalidInput(
                    "change already collected".to_string(),
                ));
            }

            let update = changes::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                collected: ActiveValue::Set(true),
                date_out: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            update.update(&db_tx).await.map_err(Into::into)
        })
    }

    /// Removes the ownership reference and deletes the change row, in one
    /// transaction.
    pub async fn delete_change(&self, shop_id: &str, change_id: &str) -> ResultEngine<()> {
        util::parse_uuid(change_id, "change")?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            let model = self.require_owned_change(&db_tx, &shop, change_id).await?;

            let mut refs = shop.change_refs.clone();
            refs.remove(change_id);
            let shop_update = shops::ActiveModel {
                id: ActiveValue::Set(shop.id.clone()),
                change_refs: ActiveValue::Set(refs),
                ..Default::default()
            };
            shop_update.update(&db_tx).await?;

            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
