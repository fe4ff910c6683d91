use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use std::sync::Arc;

use crate::{admin, business, export, receipts, reports};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Admin gate: requires a Bearer session token minted by `/admin/login`.
/// The resolved admin username is attached to the request.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = auth_header.ok_or(StatusCode::UNAUTHORIZED)?;
    let username = state
        .engine
        .session_user(auth_header.token())
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(AdminUser(username));
    Ok(next.run(request).await)
}

/// The admin username resolved by the auth middleware.
#[derive(Clone, Debug)]
pub struct AdminUser(pub String);

pub fn router(state: ServerState) -> Router {
    let admin_routes = Router::new()
        .route("/admin/logout", post(admin::logout))
        .route("/admin/business", put(business::update))
        .route("/admin/summary", get(reports::summary))
        .route("/admin/sales/daily", get(reports::daily_sales))
        .route("/admin/sales/report", get(reports::thirty_day))
        .route("/admin/report/items", get(reports::daily_items))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/receipts", post(receipts::create).get(receipts::list))
        .route(
            "/receipts/{number}",
            get(receipts::get).delete(receipts::delete),
        )
        .route("/business", get(business::get))
        .route("/export", get(export::receipts_csv))
        .route("/admin/login", post(admin::login))
        .merge(admin_routes)
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
