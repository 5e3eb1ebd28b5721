//! Wire types shared by the server and its clients.
//!
//! Every response body is an [`Envelope`] mirroring the HTTP status, and all
//! JSON field names are camelCase.

use serde::{Deserialize, Serialize};

/// Response wrapper: the numeric status is repeated in the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: 200,
            message: "success".to_string(),
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: 201,
            message: "success".to_string(),
            data,
        }
    }
}

pub mod shop {
    use chrono::{DateTime, Utc};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ShopRegister {
        pub name: String,
        pub email: String,
        pub shop_type: String,
        pub description: String,
        pub password: String,
        pub city: String,
        pub phone_number: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShopLogin {
        pub email: String,
        pub password: String,
    }

    /// Partial update; absent fields keep their stored value.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ShopEdit {
        pub name: Option<String>,
        pub shop_type: Option<String>,
        pub description: Option<String>,
        pub city: Option<String>,
        pub phone_number: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ShopView {
        pub id: String,
        pub name: String,
        pub email: String,
        pub shop_type: String,
        pub description: String,
        pub created_at: DateTime<Utc>,
        pub phone_number: String,
        pub city: String,
        pub change: Vec<String>,
        pub credit: Vec<String>,
    }

    /// Directory entry returned by the admin shop listing.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ShopListing {
        pub id: String,
        pub name: String,
        pub email: String,
        pub description: String,
        pub city: String,
        pub phone_number: String,
    }
}

pub mod admin {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminRegister {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminLogin {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdminView {
        pub id: String,
        pub username: String,
        pub email: String,
        pub power: i16,
    }
}

/// Shared by shop and admin password-change endpoints.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

pub mod credit {
    use chrono::{DateTime, Utc};

    use super::*;

    /// One product line; `quantity` defaults to 1 when omitted.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductNew {
        pub product: String,
        pub price: f64,
        pub quantity: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreditNew {
        pub name_of_collector: String,
        pub gender_of_collector: String,
        pub initial_pay: Option<f64>,
        pub products: Vec<ProductNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MoreDebt {
        pub product: String,
        pub price: f64,
        pub quantity: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PayDebt {
        pub amount_paid: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductView {
        pub product: String,
        pub price: f64,
        pub quantity: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentView {
        pub amount_paid: f64,
        pub date_paid: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreditView {
        pub id: String,
        pub name_of_collector: String,
        pub gender_of_collector: String,
        pub products: Vec<ProductView>,
        pub amount_paid: Vec<PaymentView>,
        pub initial_pay: f64,
        pub created_at: DateTime<Utc>,
        pub completed: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryView {
        pub total_product_price: f64,
        pub amount_paid: f64,
        pub initial_amount_paid: f64,
        pub debt: f64,
        pub completed: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TimelineEntryView {
        pub date: DateTime<Utc>,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtorView {
        pub id: String,
        pub name_of_collector: String,
        pub gender_of_collector: String,
    }
}

pub mod change {
    use chrono::{DateTime, Utc};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChangeNew {
        pub name_of_collector: String,
        pub gender_of_collector: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChangeView {
        pub id: String,
        pub name_of_collector: String,
        pub gender_of_collector: String,
        pub amount: f64,
        pub date_in: DateTime<Utc>,
        pub date_out: Option<DateTime<Utc>>,
        pub collected: bool,
    }
}

pub mod home {
    use chrono::{DateTime, Utc};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HomeNew {
        pub title: String,
        pub description1: String,
        pub description2: Option<String>,
        pub image_link: String,
    }

    /// Partial update; only unpublished documents accept edits.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HomeEdit {
        pub title: Option<String>,
        pub description1: Option<String>,
        pub description2: Option<String>,
        pub image_link: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HomeView {
        pub id: String,
        pub title: String,
        pub description1: String,
        pub description2: Option<String>,
        pub image_link: String,
        pub is_published: bool,
        pub created_at: DateTime<Utc>,
    }
}
