use axum::{
    Router,
    extract::{Extension, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};

use std::sync::Arc;

use crate::{
    ServerError, admin, change, credit, home, login, register, shop,
    tokens::{Identity, TokenService},
};
use engine::Engine;

pub(crate) static X_AUTH_TOKEN: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-auth-token");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub tokens: Arc<TokenService>,
}

/// `TypedHeader` for the identity token header.
///
/// Authenticated requests must contain an "x-auth-token" entry in the header;
/// login and register responses set the same header on the way out.
#[derive(Debug)]
struct AuthTokenHeader(String);

impl Header for AuthTokenHeader {
    fn name() -> &'static axum::http::HeaderName {
        &X_AUTH_TOKEN
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(AuthTokenHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-auth-token header"),
        }
    }
}

async fn authenticate(
    State(state): State<ServerState>,
    token_header: Option<TypedHeader<AuthTokenHeader>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(AuthTokenHeader(token))) = token_header else {
        return Err(ServerError::Unauthorized);
    };

    let identity = state.tokens.decode(&token)?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

async fn require_admin(
    Extension(identity): Extension<Identity>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if !identity.is_admin() {
        return Err(ServerError::Forbidden);
    }
    Ok(next.run(request).await)
}

async fn require_super_admin(
    Extension(identity): Extension<Identity>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if !identity.is_super_admin() {
        return Err(ServerError::Forbidden);
    }
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/", get(home::welcome))
        .route("/api/login", post(login::shop_login))
        .route("/api/register", post(register::shop_register))
        .route("/api/admin/login", post(login::admin_login))
        .route("/api/admin/register", post(register::admin_register))
        .route("/api/home", get(home::landing));

    let shop_routes = Router::new()
        .route("/api/shop/my-shop", get(shop::my_shop))
        .route("/api/shop/edit-shop", put(shop::edit_shop))
        .route("/api/shop/change-password", put(shop::change_password))
        .route("/api/credit/create", post(credit::create))
        .route("/api/credit/my-debtors", get(credit::my_debtors))
        .route("/api/credit/debt-summary/{id}", get(credit::debt_summary))
        .route("/api/credit/debt-timeline/{id}", get(credit::debt_timeline))
        .route(
            "/api/credit/product-bought/{id}",
            get(credit::product_bought),
        )
        .route("/api/credit/more-debt/{id}", put(credit::more_debt))
        .route("/api/credit/pay-debt/{id}", put(credit::pay_debt))
        .route("/api/credit/{id}", delete(credit::remove))
        .route("/api/change/create", post(change::create))
        .route("/api/change/my-changes", get(change::my_changes))
        .route("/api/change/get-one/{id}", get(change::get_one))
        .route("/api/change/collect/{id}", put(change::collect))
        .route("/api/change/{id}", delete(change::remove));

    let admin_routes = Router::new()
        .route("/api/shop/get-all", get(shop::get_all))
        .route("/api/shop/{id}", get(shop::get_one).delete(shop::remove))
        .route("/api/admin/all-admin", get(admin::all_admin))
        .route("/api/admin/change-password", put(admin::change_password))
        .route("/api/admin/{id}", get(admin::get_one).delete(admin::remove))
        .route("/api/credit/get-all", get(credit::get_all))
        .route("/api/credit/get-one/{id}", get(credit::get_one))
        .route("/api/change/get-all", get(change::get_all))
        .route("/api/home/all-published", get(home::all_published))
        .route("/api/home/not-published", get(home::not_published))
        .route("/api/home/inspect/{id}", get(home::inspect))
        .route("/api/home/create", post(home::create))
        .route("/api/home/edit/{id}", put(home::edit))
        .route("/api/home/publish/{id}", put(home::publish))
        .route("/api/home/remove/{id}", delete(home::remove))
        .route_layer(middleware::from_fn(require_admin));

    let super_admin_routes = Router::new()
        .route("/api/admin/empower/{id}", put(admin::empower))
        .route("/api/admin/reduce/{id}", put(admin::reduce))
        .route_layer(middleware::from_fn(require_super_admin));

    let protected = shop_routes
        .merge(admin_routes)
        .merge(super_admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public.merge(protected).with_state(state)
}

pub async fn run(engine: Engine, tokens: TokenService) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:1818").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, tokens, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    tokens: TokenService,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        tokens: Arc::new(tokens),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    tokens: TokenService,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, tokens, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
