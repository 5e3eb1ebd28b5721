//! The credit ledger: one debtor's running account with a shop.
//!
//! A credit document records what was bought (`products`, append-only), what
//! was paid back (`amount_paid`, append-only) and a down payment taken at
//! creation (`initial_pay`). Everything else is derived:
//!
//! ```text
//! debt = total_product_price - sum(amount_paid) - initial_pay
//! completed = (debt == 0)
//! ```
//!
//! Completion is **exact** integer equality on cents. An over-payment leaves
//! `debt` negative and the account open; there is no tolerance band and no
//! `<= 0` shortcut. Adding more debt never touches the flag: only a payment
//! recomputes it.

use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Gender, MoneyCents, ResultEngine, util};

/// One product line bought on credit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    pub product: String,
    pub price: MoneyCents,
    pub quantity: i64,
}

impl ProductLine {
    pub fn new(product: &str, price: MoneyCents, quantity: i64) -> ResultEngine<Self> {
        let product = util::required_text(product, "product", 2, 100)?;
        if price.is_negative() {
            return Err(EngineError::InvalidInput(
                "price must not be negative".to_string(),
            ));
        }
        if quantity < 1 {
            return Err(EngineError::InvalidInput(
                "quantity must be at least 1".to_string(),
            ));
        }
        if price.checked_mul(quantity).is_none() {
            return Err(EngineError::InvalidInput(
                "line total too large".to_string(),
            ));
        }
        Ok(Self {
            product,
            price,
            quantity,
        })
    }

    fn line_total(&self) -> MoneyCents {
        MoneyCents::new(self.price.cents() * self.quantity)
    }
}

/// One repayment event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: MoneyCents,
    pub date_paid: DateTime<Utc>,
}

/// JSON-column wrapper for the product list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ProductList(pub Vec<ProductLine>);

/// JSON-column wrapper for the payment history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PaymentList(pub Vec<Payment>);

/// Derived financial state of a credit document. Pure data, safe to recompute
/// any number of times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreditSummary {
    pub total_product_price: MoneyCents,
    pub amount_paid: MoneyCents,
    pub initial_amount_paid: MoneyCents,
    pub debt: MoneyCents,
    pub completed: bool,
}

/// One entry of the payment timeline: the creation date mapped to the down
/// payment, then every repayment in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineEntry {
    pub date: DateTime<Utc>,
    pub amount: MoneyCents,
}

/// A debtor's account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credit {
    pub id: String,
    pub name_of_collector: String,
    pub gender_of_collector: Gender,
    pub products: Vec<ProductLine>,
    pub amount_paid: Vec<Payment>,
    pub initial_pay: MoneyCents,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

impl Credit {
    /// Opens a new account. The product list must not be empty and the down
    /// payment must not be negative.
    pub fn new(
        name_of_collector: &str,
        gender_of_collector: Gender,
        initial_pay: MoneyCents,
        products: Vec<ProductLine>,
    ) -> ResultEngine<Self> {
        let name_of_collector = util::required_text(name_of_collector, "nameOfCollector", 2, 100)?;
        if products.is_empty() {
            return Err(EngineError::InvalidInput(
                "products must contain at least one entry".to_string(),
            ));
        }
        if initial_pay.is_negative() {
            return Err(EngineError::InvalidInput(
                "initialPay must not be negative".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name_of_collector,
            gender_of_collector,
            products,
            amount_paid: Vec::new(),
            initial_pay,
            created_at: Utc::now(),
            completed: false,
        })
    }

    /// Appends one product line. The completion flag is deliberately left
    /// alone: adding debt never closes or reopens an account.
    pub fn add_product(&mut self, line: ProductLine) {
        self.products.push(line);
    }

    /// Appends one repayment and recomputes `completed` from the summary.
    ///
    /// The amount is taken as-is; negative values are accepted and simply
    /// increase the outstanding debt.
    pub fn add_payment(&mut self, amount: MoneyCents, date_paid: DateTime<Utc>) {
        self.amount_paid.push(Payment { amount, date_paid });
        self.completed = self.summary().completed;
    }

    /// Computes the derived financial state. Pure function of the document.
    pub fn summary(&self) -> CreditSummary {
        let total_product_price: MoneyCents =
            self.products.iter().map(ProductLine::line_total).sum();
        let amount_paid: MoneyCents = self.amount_paid.iter().map(|p| p.amount).sum();
        let debt = total_product_price - amount_paid - self.initial_pay;

        CreditSummary {
            total_product_price,
            amount_paid,
            initial_amount_paid: self.initial_pay,
            debt,
            completed: debt.is_zero(),
        }
    }

    /// Maps payment dates to amounts: the creation date seeded with the down
    /// payment, then one entry per repayment in insertion order.
    pub fn payment_timeline(&self) -> Vec<TimelineEntry> {
        let mut timeline = Vec::with_capacity(self.amount_paid.len() + 1);
        timeline.push(TimelineEntry {
            date: self.created_at,
            amount: self.initial_pay,
        });
        timeline.extend(self.amount_paid.iter().map(|p| TimelineEntry {
            date: p.date_paid,
            amount: p.amount,
        }));
        timeline
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "credits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name_of_collector: String,
    pub gender_of_collector: String,
    pub products: ProductList,
    pub amount_paid: PaymentList,
    pub initial_pay: i64,
    pub created_at: DateTimeUtc,
    pub completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Credit> for ActiveModel {
    fn from(credit: &Credit) -> Self {
        Self {
            id: ActiveValue::Set(credit.id.clone()),
            name_of_collector: ActiveValue::Set(credit.name_of_collector.clone()),
            gender_of_collector: ActiveValue::Set(credit.gender_of_collector.as_str().to_string()),
            products: ActiveValue::Set(ProductList(credit.products.clone())),
            amount_paid: ActiveValue::Set(PaymentList(credit.amount_paid.clone())),
            initial_pay: ActiveValue::Set(credit.initial_pay.cents()),
            created_at: ActiveValue::Set(credit.created_at),
            completed: ActiveValue::Set(credit.completed),
        }
    }
}

impl TryFrom<Model> for Credit {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name_of_collector: model.name_of_collector,
            gender_of_collector: Gender::try_from(model.gender_of_collector.as_str())?,
            products: model.products.0,
            amount_paid: model.amount_paid.0,
            initial_pay: MoneyCents::new(model.initial_pay),
            created_at: model.created_at,
            completed: model.completed,
        })
    }
}
