//! Operator accounts.
//!
//! Power levels run from 1 (base admin) to 3 (super-admin). At most
//! [`MAX_ADMINS`] accounts may exist system-wide; the first one registered
//! receives the maximum power so the system always has a super-admin.

use sea_orm::entity::prelude::*;

/// System-wide cap on admin accounts.
pub const MAX_ADMINS: u64 = 3;

/// Lowest admin power level.
pub const MIN_POWER: i16 = 1;

/// Highest admin power level (super-admin).
pub const MAX_POWER: i16 = 3;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub power: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
