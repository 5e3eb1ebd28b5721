//! Loose change held by a shop on behalf of a customer.
//!
//! A change record moves through exactly one transition: uncollected to
//! collected, which stamps `date_out`. After that the record is immutable;
//! the only remaining operation is shop-initiated deletion.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "changes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name_of_collector: String,
    pub gender_of_collector: String,
    pub amount: i64,
    pub date_in: DateTimeUtc,
    pub date_out: Option<DateTimeUtc>,
    pub collected: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
