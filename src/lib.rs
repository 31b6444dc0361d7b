rust_i18n::i18n!("locales", fallback = "en");

pub mod extractors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod names;
pub mod rejections;
pub mod session;
pub mod statics;
pub mod store;
pub mod utils;
pub mod views;

use axum::{extract::DefaultBodyLimit, middleware, Router};

#[derive(Clone)]
pub struct AppState {
    pub store: store::Store,
    pub secure_cookies: bool,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            store: store::Store::new(max_sessions),
            secure_cookies: false,
            max_upload_bytes: names::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::quiz::routes())
        .layer(middleware::from_fn(csrf_check))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .nest("/static", statics::routes())
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
