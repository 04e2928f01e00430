use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    Connection,
    wallet_browser::{
        queue::{Identified, RequestQueue},
        types::{BrowserTransaction, TransactionResponse},
    },
};

impl Identified for BrowserTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// What the bridge page and the client share: the account the page reported and the
/// transactions waiting for it.
#[derive(Debug)]
pub(crate) struct BrowserWalletState {
    connection: Mutex<Option<Connection>>,
    transactions: Mutex<RequestQueue<BrowserTransaction, TransactionResponse>>,
    /// Presented by the page in the session token header.
    session_token: Arc<String>,
}

impl BrowserWalletState {
    pub fn new(session_token: String) -> Self {
        Self {
            connection: Mutex::new(None),
            transactions: Mutex::new(RequestQueue::new()),
            session_token: Arc::new(session_token),
        }
    }

    pub fn session_token(&self) -> Arc<String> {
        self.session_token.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.lock().is_some()
    }

    pub fn get_connection(&self) -> Option<Connection> {
        *self.connection.lock()
    }

    /// `None` when the page reports the account was disconnected.
    pub fn set_connection(&self, connection: Option<Connection>) {
        *self.connection.lock() = connection;
    }

    pub fn add_transaction_request(&self, request: BrowserTransaction) {
        self.transactions.lock().add_request(request);
    }

    pub fn has_transaction_request(&self, id: &Uuid) -> bool {
        self.transactions.lock().has_request(id)
    }

    /// The oldest transaction the page has not answered yet.
    pub fn read_next_transaction_request(&self) -> Option<BrowserTransaction> {
        self.transactions.lock().read_request().cloned()
    }

    /// Forgets `id` entirely: the page is no longer offered the request and a response that
    /// arrived meanwhile is dropped.
    pub fn discard_transaction(&self, id: &Uuid) {
        let mut transactions = self.transactions.lock();
        transactions.remove_request(id);
        transactions.get_response(id);
    }

    /// Records the page's answer. The request leaves the queue.
    pub fn add_transaction_response(&self, response: TransactionResponse) {
        let id = response.id;
        let mut transactions = self.transactions.lock();
        transactions.add_response(id, response);
        transactions.remove_request(&id);
    }

    /// Takes the answer for `id`, if the page sent one.
    pub fn get_transaction_response(&self, id: &Uuid) -> Option<TransactionResponse> {
        self.transactions.lock().get_response(id)
    }
}
