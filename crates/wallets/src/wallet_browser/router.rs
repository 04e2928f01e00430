use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use crate::wallet_browser::{handlers, state::BrowserWalletState};

/// Header the bridge page sends its session token in.
pub(crate) const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// `/` serves the bridge page. Everything under `/api` needs the session token.
pub(crate) fn build_router(state: Arc<BrowserWalletState>) -> Router {
    let api = Router::new()
        .route(
            "/connection",
            get(handlers::get_connection_info).post(handlers::post_connection_update),
        )
        .route("/transaction/request", get(handlers::get_next_transaction_request))
        .route("/transaction/response", post(handlers::post_transaction_response))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session_token))
        .with_state(state.clone());

    Router::new().route("/", get(handlers::serve_index)).nest("/api", api).with_state(state)
}

async fn require_session_token(
    State(state): State<Arc<BrowserWalletState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !carries_token(req.headers(), &state.session_token()) {
        trace!(path = %req.uri().path(), "rejected request without session token");
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(req).await)
}

fn carries_token(headers: &HeaderMap, token: &str) -> bool {
    headers.get(SESSION_TOKEN_HEADER).and_then(|value| value.to_str().ok()) == Some(token)
}
