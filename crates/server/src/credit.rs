//! Credit ledger endpoints.
//!
//! Amounts cross the wire as decimal numbers in major units and are converted
//! to integer cents at this boundary; the engine never sees a float.

use api_types::{
    Envelope,
    credit::{
        CreditNew, CreditView, DebtorView, MoreDebt, PayDebt, PaymentView, ProductView,
        SummaryView, TimelineEntryView,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{
    Credit, CreditSummary, Debtor, Gender, MoneyCents, NewCredit, NewProduct, Payment,
    ProductLine, TimelineEntry,
};

use crate::{ServerError, server::ServerState, tokens::Identity};

fn product_view(line: ProductLine) -> ProductView {
    ProductView {
        product: line.product,
        price: line.price.to_major_f64(),
        quantity: line.quantity,
    }
}

fn payment_view(payment: Payment) -> PaymentView {
    PaymentView {
        amount_paid: payment.amount.to_major_f64(),
        date_paid: payment.date_paid,
    }
}

fn credit_view(credit: Credit) -> CreditView {
    CreditView {
        id: credit.id,
        name_of_collector: credit.name_of_collector,
        gender_of_collector: credit.gender_of_collector.as_str().to_string(),
        products: credit.products.into_iter().map(product_view).collect(),
        amount_paid: credit.amount_paid.into_iter().map(payment_view).collect(),
        initial_pay: credit.initial_pay.to_major_f64(),
        created_at: credit.created_at,
        completed: credit.completed,
    }
}

fn summary_view(summary: CreditSummary) -> SummaryView {
    SummaryView {
        total_product_price: summary.total_product_price.to_major_f64(),
        amount_paid: summary.amount_paid.to_major_f64(),
        initial_amount_paid: summary.initial_amount_paid.to_major_f64(),
        debt: summary.debt.to_major_f64(),
        completed: summary.completed,
    }
}

fn timeline_view(entry: TimelineEntry) -> TimelineEntryView {
    TimelineEntryView {
        date: entry.date,
        amount: entry.amount.to_major_f64(),
    }
}

fn debtor_view(debtor: Debtor) -> DebtorView {
    DebtorView {
        id: debtor.id,
        name_of_collector: debtor.name_of_collector,
        gender_of_collector: debtor.gender_of_collector.as_str().to_string(),
    }
}

fn new_product(product: String, price: f64, quantity: Option<i64>) -> Result<NewProduct, ServerError> {
    Ok(NewProduct {
        product,
        price: MoneyCents::from_major_f64(price)?,
        quantity: quantity.unwrap_or(1),
    })
}

pub async fn create(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Json(payload): Json<CreditNew>,
) -> Result<impl IntoResponse, ServerError> {
    let shop_id = identity.shop_id()?;

    let gender = Gender::try_from(payload.gender_of_collector.as_str()).map_err(ServerError::Engine)?;
    let initial_pay = match payload.initial_pay {
        Some(value) => MoneyCents::from_major_f64(value)?,
        None => MoneyCents::ZERO,
    };
    let products = payload
        .products
        .into_iter()
        .map(|p| new_product(p.product, p.price, p.quantity))
        .collect::<Result<Vec<_>, _>>()?;

    let credit = state
        .engine
        .create_credit(
            shop_id,
            NewCredit {
                name_of_collector: payload.name_of_collector,
                gender_of_collector: gender,
                initial_pay,
                products,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::created(credit_view(credit))),
    ))
}

pub async fn more_debt(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MoreDebt>,
) -> Result<Json<Envelope<CreditView>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let line = new_product(payload.product, payload.price, payload.quantity)?;

    let credit = state.engine.more_debt(shop_id, &id, line).await?;
    Ok(Json(Envelope::ok(credit_view(credit))))
}

pub async fn pay_debt(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PayDebt>,
) -> Result<Json<Envelope<CreditView>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let amount = MoneyCents::from_major_f64(payload.amount_paid)?;

    let credit = state.engine.pay_debt(shop_id, &id, amount).await?;
    Ok(Json(Envelope::ok(credit_view(credit))))
}

pub async fn debt_summary(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<SummaryView>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let summary = state.engine.debt_summary(shop_id, &id).await?;
    Ok(Json(Envelope::ok(summary_view(summary))))
}

pub async fn debt_timeline(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Vec<TimelineEntryView>>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let timeline = state.engine.payment_timeline(shop_id, &id).await?;
    Ok(Json(Envelope::ok(
        timeline.into_iter().map(timeline_view).collect(),
    )))
}

pub async fn product_bought(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Vec<ProductView>>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let products = state.engine.products_bought(shop_id, &id).await?;
    Ok(Json(Envelope::ok(
        products.into_iter().map(product_view).collect(),
    )))
}

pub async fn my_debtors(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<DebtorView>>>, ServerError> {
    let shop_id = identity.shop_id()?;
    let debtors = state.engine.my_debtors(shop_id).await?;
    Ok(Json(Envelope::ok(
        debtors.into_iter().map(debtor_view).collect(),
    )))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<CreditView>>, ServerError> {
    let credit = state.engine.credit(&id).await?;
    Ok(Json(Envelope::ok(credit_view(credit))))
}

pub async fn get_all(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<CreditView>>>, ServerError> {
    let credits = state.engine.credits().await?;
    Ok(Json(Envelope::ok(
        credits.into_iter().map(credit_view).collect(),
    )))
}

pub async fn remove(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<String>>, ServerError> {
    let shop_id = identity.shop_id()?;
    state.engine.delete_credit(shop_id, &id).await?;
    Ok(Json(Envelope::ok("removed successfully".to_string())))
}
