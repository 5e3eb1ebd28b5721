//! Ownership and existence checks shared by the operation modules.
//!
//! A shop owns a credit or change record only when the record's id appears in
//! the shop's reference list. The `require_owned_*` helpers check membership
//! **before** touching the child row, so a record that exists in the store but
//! belongs to another shop is indistinguishable from a missing one.

use sea_orm::{DatabaseTransaction, prelude::*};

use crate::{EngineError, ResultEngine, admins, changes, credits, homes, shops, util};

use super::Engine;

/// Generates a `require_owned_*` method performing the membership test for a
/// child entity of a shop. The caller has already rejected malformed ids.
macro_rules! impl_require_owned {
    ($require_fn:ident, $entity:path, $model:ty, $refs:ident, $label:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            shop: &shops::Model,
            target_id: &str,
        ) -> ResultEngine<$model> {
            if !shop.$refs.contains(target_id) {
                return Err(EngineError::KeyNotFound(format!("{} not exists", $label)));
            }
            <$entity>::find_by_id(target_id.to_string())
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("{} not exists", $label)))
        }
    };
}

impl Engine {
    impl_require_owned!(
        require_owned_credit,
        credits::Entity,
        credits::Model,
        credit_refs,
        "credit"
    );

    impl_require_owned!(
        require_owned_change,
        changes::Entity,
        changes::Model,
        change_refs,
        "change"
    );

    pub(super) async fn require_shop(
        &self,
        db: &DatabaseTransaction,
        shop_id: &str,
    ) -> ResultEngine<shops::Model> {
        shops::Entity::find_by_id(shop_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("shop not exists".to_string()))
    }

    pub(super) async fn require_admin(
        &self,
        db: &DatabaseTransaction,
        admin_id: &str,
    ) -> ResultEngine<admins::Model> {
        util::parse_uuid(admin_id, "admin")?;
        admins::Entity::find_by_id(admin_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("admin not exists".to_string()))
    }

    pub(super) async fn require_home(
        &self,
        db: &DatabaseTransaction,
        home_id: &str,
    ) -> ResultEngine<homes::Model> {
        util::parse_uuid(home_id, "home")?;
        homes::Entity::find_by_id(home_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("home not exists".to_string()))
    }
}
