//! Credit ledger operations.
//!
//! Every mutation runs inside one DB transaction so the shop's reference list
//! and the credit row can never drift apart: the membership append/removal
//! and the child-row write commit or roll back together.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    Credit, CreditSummary, Gender, MoneyCents, ProductLine, ResultEngine, TimelineEntry, credits,
    shops, util,
};

use super::{Engine, with_tx};

/// Input for opening a credit account.
#[derive(Clone, Debug)]
pub struct NewCredit {
    pub name_of_collector: String,
    pub gender_of_collector: Gender,
    pub initial_pay: MoneyCents,
    pub products: Vec<NewProduct>,
}

/// One product line as supplied by the caller.
#[derive(Clone, Debug)]
pub struct NewProduct {
    pub product: String,
    pub price: MoneyCents,
    pub quantity: i64,
}

/// Name and gender of one debtor, as listed for a shop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debtor {
    pub id: String,
    pub name_of_collector: String,
    pub gender_of_collector: Gender,
}

impl Engine {
    /// Opens a credit account for a debtor of `shop_id` and records the
    /// ownership reference.
    pub async fn create_credit(&self, shop_id: &str, new: NewCredit) -> ResultEngine<Credit> {
        let products = new
            .products
            .iter()
            .map(|p| ProductLine::new(&p.product, p.price, p.quantity))
            .collect::<ResultEngine<Vec<_>>>()?;
        let credit = Credit::new(
            &new.name_of_collector,
            new.gender_of_collector,
            new.initial_pay,
            products,
        )?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;

            let credit_model: credits::ActiveModel = (&credit).into();
            credit_model.insert(&db_tx).await?;

            let mut refs = shop.credit_refs.clone();
            refs.push(credit.id.clone());
            let shop_update = shops::ActiveModel {
                id: ActiveValue::Set(shop.id.clone()),
                credit_refs: ActiveValue::Set(refs),
                ..Default::default()
            };
            shop_update.update(&db_tx).await?;
            Ok::<(), crate::EngineError>(())
        })?;

        Ok(credit)
    }

    /// Appends one product line to an owned credit. The completion flag is
    /// not recomputed: adding debt never closes or reopens an account.
    pub async fn more_debt(
        &self,
        shop_id: &str,
        credit_id: &str,
        new: NewProduct,
    ) -> ResultEngine<Credit> {
        util::parse_uuid(credit_id, "credit")?;
        let line = ProductLine::new(&new.product, new.price, new.quantity)?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            let model = self.require_owned_credit(&db_tx, &shop, credit_id).await?;

            let mut credit = Credit::try_from(model)?;
            credit.add_product(line);

            let update = credits::ActiveModel {
                id: ActiveValue::Set(credit.id.clone()),
                products: ActiveValue::Set(credits::ProductList(credit.products.clone())),
                ..Default::default()
            };
            update.update(&db_tx).await?;
            Ok(credit)
        })
    }

    /// Records one repayment on an owned credit and recomputes `completed`.
    ///
    /// The amount is accepted as-is, negative values included; the summary
    /// arithmetic absorbs them.
    pub async fn pay_debt(
        &self,
        shop_id: &str,
        credit_id: &str,
        amount: MoneyCents,
    ) -> ResultEngine<Credit> {
        util::parse_uuid(credit_id, "credit")?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            let model = self.require_owned_credit(&db_tx, &shop, credit_id).await?;

            let mut credit = Credit::try_from(model)?;
            credit.add_payment(amount, Utc::now());

            let update = credits::ActiveModel {
                id: ActiveValue::Set(credit.id.clone()),
                amount_paid: ActiveValue::Set(credits::PaymentList(credit.amount_paid.clone())),
                completed: ActiveValue::Set(credit.completed),
                ..Default::default()
            };
            update.update(&db_tx).await?;
            Ok(credit)
        })
    }

    /// Derived financial state of an owned credit.
    pub async fn debt_summary(
        &self,
        shop_id: &str,
        credit_id: &str,
    ) -> ResultEngine<CreditSummary> {
        let credit = self.owned_credit(shop_id, credit_id).await?;
        Ok(credit.summary())
    }

    /// Payment timeline of an owned credit, seeded with the down payment.
    pub async fn payment_timeline(
        &self,
        shop_id: &str,
        credit_id: &str,
    ) -> ResultEngine<Vec<TimelineEntry>> {
        let credit = self.owned_credit(shop_id, credit_id).await?;
        Ok(credit.payment_timeline())
    }

    /// Ordered product list of an owned credit.
    pub async fn products_bought(
        &self,
        shop_id: &str,
        credit_id: &str,
    ) -> ResultEngine<Vec<ProductLine>> {
        let credit = self.owned_credit(shop_id, credit_id).await?;
        Ok(credit.products)
    }

    /// Full document of an owned credit.
    pub async fn owned_credit(&self, shop_id: &str, credit_id: &str) -> ResultEngine<Credit> {
        util::parse_uuid(credit_id, "credit")?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            let model = self.require_owned_credit(&db_tx, &shop, credit_id).await?;
            Credit::try_from(model)
        })
    }

    /// Every debtor referenced by the shop, in reference-list order.
    pub async fn my_debtors(&self, shop_id: &str) -> ResultEngine<Vec<Debtor>> {
        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;

            let models = credits::Entity::find()
                .filter(credits::Column::Id.is_in(shop.credit_refs.0.clone()))
                .all(&db_tx)
                .await?;
            let mut by_id: HashMap<String, credits::Model> =
                models.into_iter().map(|m| (m.id.clone(), m)).collect();

            let mut debtors = Vec::with_capacity(shop.credit_refs.0.len());
            for id in &shop.credit_refs.0 {
                if let Some(model) = by_id.remove(id) {
                    debtors.push(Debtor {
                        id: model.id,
                        name_of_collector: model.name_of_collector,
                        gender_of_collector: Gender::try_from(
                            model.gender_of_collector.as_str(),
                        )?,
                    });
                }
            }
            Ok(debtors)
        })
    }

    /// Admin read of a single credit, ownership aside.
    pub async fn credit(&self, credit_id: &str) -> ResultEngine<Credit> {
        util::parse_uuid(credit_id, "credit")?;
        let model = credits::Entity::find_by_id(credit_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| crate::EngineError::KeyNotFound("credit not exists".to_string()))?;
        Credit::try_from(model)
    }

    /// Admin listing of every credit in the store.
    pub async fn credits(&self) -> ResultEngine<Vec<Credit>> {
        credits::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(Credit::try_from)
            .collect()
    }

    /// Removes the ownership reference and deletes the credit row, in one
    /// transaction.
    pub async fn delete_credit(&self, shop_id: &str, credit_id: &str) -> ResultEngine<()> {
        util::parse_uuid(credit_id, "credit")?;

        with_tx!(self, |db_tx| {
            let shop = self.require_shop(&db_tx, shop_id).await?;
            let model = self.require_owned_credit(&db_tx, &shop, credit_id).await?;

            let mut refs = shop.credit_refs.clone();
            refs.remove(credit_id);
            let shop_update = shops::ActiveModel {
                id: ActiveValue::Set(shop.id.clone()),
                credit_refs: ActiveValue::Set(refs),
                ..Default::default()
            };
            shop_update.update(&db_tx).await?;

            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
