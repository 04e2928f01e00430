use std::sync::Arc;

use axum::{Json, extract::State, response::Html};

use crate::{
    Connection,
    wallet_browser::{
        app::contents,
        state::BrowserWalletState,
        types::{BrowserApiResponse, BrowserTransaction, TransactionResponse},
    },
};

pub(crate) async fn serve_index(State(state): State<Arc<BrowserWalletState>>) -> Html<String> {
    Html(contents::index_html(&state.session_token()))
}

pub(crate) async fn get_next_transaction_request(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<BrowserTransaction>> {
    match state.read_next_transaction_request() {
        Some(tx) => Json(BrowserApiResponse::Ok(tx)),
        None => Json(BrowserApiResponse::error("No pending transaction")),
    }
}

pub(crate) async fn post_transaction_response(
    State(state): State<Arc<BrowserWalletState>>,
    Json(response): Json<TransactionResponse>,
) -> Json<BrowserApiResponse<()>> {
    if !state.has_transaction_request(&response.id) {
        warn!(id = %response.id, "browser reported an unknown transaction");
        return Json(BrowserApiResponse::error("Unknown transaction id"));
    }

    if response.hash.is_none() && response.error.is_none() {
        return Json(BrowserApiResponse::error("Either hash or error must be set"));
    }

    state.add_transaction_response(response);
    Json(BrowserApiResponse::Ok(()))
}

pub(crate) async fn get_connection_info(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<Option<Connection>>> {
    Json(BrowserApiResponse::Ok(state.get_connection()))
}

pub(crate) async fn post_connection_update(
    State(state): State<Arc<BrowserWalletState>>,
    Json(connection): Json<Option<Connection>>,
) -> Json<BrowserApiResponse<()>> {
    match &connection {
        Some(Connection { address, chain_id }) => {
            debug!(%address, chain_id, "browser wallet connection updated")
        }
        None => debug!("browser wallet disconnected"),
    }
    state.set_connection(connection);
    Json(BrowserApiResponse::Ok(()))
}
