//! Shop accounts and the ownership lists for their child records.
//!
//! A shop owns its change and credit records through two ordered id lists
//! stored on the shop row itself. Ownership of a child record means its id
//! appears in the matching list; a row merely existing in the store never
//! authorizes access. Every owner-scoped operation therefore goes through a
//! membership check against these lists.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered list of child-record ids owned by a shop, stored as a JSON column.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
pub struct OwnedIds(pub Vec<String>);

impl OwnedIds {
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|v| v == id)
    }

    pub fn push(&mut self, id: String) {
        self.0.push(id);
    }

    /// Removes the first occurrence of `id`, returning whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.0.iter().position(|v| v == id) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub shop_type: String,
    pub description: String,
    pub created_at: DateTimeUtc,
    pub phone_number: String,
    pub city: String,
    pub password: String,
    pub change_refs: OwnedIds,
    pub credit_refs: OwnedIds,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
