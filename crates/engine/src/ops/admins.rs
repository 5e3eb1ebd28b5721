//! Admin account operations.
//!
//! The 3-account cap and the power bounds are enforced here, inside the same
//! transaction as the write they guard. Two registrations racing past the
//! count check is still possible across separate connections; the cap is a
//! best-effort invariant, not a serialized one.

use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    admins::{self, MAX_ADMINS, MAX_POWER, MIN_POWER},
    util,
};

use super::{Engine, with_tx};

/// Input for registering an admin. `password` is the already-hashed credential.
#[derive(Clone, Debug)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Engine {
    /// Registers an admin account.
    ///
    /// The first account ever created receives power 3 so the system always
    /// has a super-admin; later ones start at power 1. Registration fails
    /// once [`MAX_ADMINS`] accounts exist, email uniqueness aside.
    pub async fn register_admin(&self, new: NewAdmin) -> ResultEngine<admins::Model> {
        let username = util::required_text(&new.username, "username", 2, 20)?;
        let email = util::required_email(&new.email)?;

        with_tx!(self, |db_tx| {
            let count = admins::Entity::find().count(&db_tx).await?;
            if count >= MAX_ADMINS {
                return Err(EngineError::LimitReached(format!(
                    "admin accounts are capped at {MAX_ADMINS}"
                )));
            }

            let exists = admins::Entity::find()
                .filter(admins::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(email.clone()));
            }

            let power = if count == 0 { MAX_POWER } else { MIN_POWER };
            let model = admins::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4().to_string()),
                username: ActiveValue::Set(username.clone()),
                email: ActiveValue::Set(email.clone()),
                password: ActiveValue::Set(new.password.clone()),
                power: ActiveValue::Set(power),
            };
            model.insert(&db_tx).await.map_err(Into::into)
        })
    }

    /// Credential lookup for login; `None` when no admin carries the email.
    pub async fn admin_by_email(&self, email: &str) -> ResultEngine<Option<admins::Model>> {
        admins::Entity::find()
            .filter(admins::Column::Email.eq(email.to_string()))
            .one(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Reads a single admin by path id.
    pub async fn admin(&self, admin_id: &str) -> ResultEngine<admins::Model> {
        with_tx!(self, |db_tx| self.require_admin(&db_tx, admin_id).await)
    }

    /// Every admin account.
    pub async fn admins(&self) -> ResultEngine<Vec<admins::Model>> {
        admins::Entity::find()
            .all(&self.database)
            .await
            .map_err(Into::into)
    }

    /// Raises an admin's power by one; fails at the upper bound, leaving the
    /// stored value untouched.
    pub async fn empower_admin(&self, admin_id: &str) -> ResultEngine<admins::Model> {
        with_tx!(self, |db_tx| {
            let admin = self.require_admin(&db_tx, admin_id).await?;
            if admin.power >= MAX_POWER {
                return Err(EngineError::LimitReached(format!(
                    "admin already at max power {MAX_POWER}"
                )));
            }

            let update = admins::ActiveModel {
                id: ActiveValue::Set(admin.id.clone()),
                power: ActiveValue::Set(admin.power + 1),
                ..Default::default()
            };
            update.update(&db_tx).await.map_err(Into::into)
        })
    }

    /// Lowers an admin's power by one; fails at the lower bound, leaving the
    /// stored value untouched.
    pub async fn reduce_admin(&self, admin_id: &str) -> ResultEngine<admins::Model> {
        with_tx!(self, |db_tx| {
            let admin = self.require_admin(&db_tx, admin_id).await?;
            if admin.power <= MIN_POWER {
                return Err(EngineError::LimitReached(format!(
                    "admin already at min power {MIN_POWER}"
                )));
            }

            let update = admins::ActiveModel {
                id: ActiveValue::Set(admin.id.clone()),
                power: ActiveValue::Set(admin.power - 1),
                ..Default::default()
            };
            update.update(&db_tx).await.map_err(Into::into)
        })
    }

    /// Replaces the stored password hash of an admin.
    pub async fn set_admin_password(&self, admin_id: &str, password: String) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let admin = self.require_admin(&db_tx, admin_id).await?;
            let update = admins::ActiveModel {
                id: ActiveValue::Set(admin.id),
                password: ActiveValue::Set(password),
                ..Default::default()
            };
            update.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Deletes an admin account.
    pub async fn delete_admin(&self, admin_id: &str) -> ResultEngine<admins::Model> {
        with_tx!(self, |db_tx| {
            let admin = self.require_admin(&db_tx, admin_id).await?;
            admin.clone().delete(&db_tx).await?;
            Ok(admin)
        })
    }
}
