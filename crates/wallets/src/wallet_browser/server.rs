use std::{process::Command, sync::Arc, time::Duration};

use alloy_primitives::TxHash;
use parking_lot::Mutex;
use tokio::{net::TcpListener, sync::oneshot, time::Instant};
use uuid::Uuid;

use crate::{
    Connection,
    wallet_browser::{
        error::BrowserWalletError, router::build_router, state::BrowserWalletState,
        types::BrowserTransaction,
    },
};

/// How often pending requests are checked for an answer from the browser.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Local HTTP server bridging the client and a wallet extension running in the browser.
///
/// The bridge page connects to `window.ethereum`, reports the selected account and chain and
/// polls for transactions to sign. Clones share the same state and server.
#[derive(Debug, Clone)]
pub struct BrowserWalletServer {
    port: u16,
    open_browser: bool,
    timeout: Duration,
    state: Arc<BrowserWalletState>,
    shutdown: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl BrowserWalletServer {
    /// Create a new browser wallet server. Use port `0` for automatic assignment.
    pub fn new(port: u16, open_browser: bool, timeout: Duration) -> Self {
        Self {
            port,
            open_browser,
            timeout,
            state: Arc::new(BrowserWalletState::new(Uuid::new_v4().to_string())),
            shutdown: Arc::new(Mutex::new(None)),
        }
    }

    /// The port the server listens on, resolved once started.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn open_browser(&self) -> bool {
        self.open_browser
    }

    /// How long the server waits for the user to act in the browser.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The token the bridge page sends with every API call.
    pub fn session_token(&self) -> String {
        self.state.session_token().to_string()
    }

    /// Address of the bridge page.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn get_connection(&self) -> Option<Connection> {
        self.state.get_connection()
    }

    /// Binds the listener and serves the bridge in the background.
    pub async fn start(&mut self) -> Result<(), BrowserWalletError> {
        let listener = TcpListener::bind(("127.0.0.1", self.port)).await?;
        self.port = listener.local_addr()?.port();

        let router = build_router(self.state.clone());
        let (tx, rx) = oneshot::channel::<()>();
        *self.shutdown.lock() = Some(tx);

        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(err) = axum::serve(listener, router).with_graceful_shutdown(shutdown).await {
                error!(%err, "browser wallet server failed");
            }
        });

        info!(url = %self.url(), "browser wallet bridge listening");
        if self.open_browser {
            open_url(&self.url());
        }
        Ok(())
    }

    /// Shuts the server down. Calling it twice is a no-op.
    pub async fn stop(&mut self) -> Result<(), BrowserWalletError> {
        self.signal_shutdown()
    }

    pub(crate) fn signal_shutdown(&self) -> Result<(), BrowserWalletError> {
        if let Some(tx) = self.shutdown.lock().take() {
            tx.send(()).map_err(|_| {
                BrowserWalletError::ServerError("server task already exited".to_string())
            })?;
        }
        Ok(())
    }

    /// Waits until the bridge page reports a connected account.
    pub async fn wait_for_connection(&self) -> Result<Connection, BrowserWalletError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(connection) = self.state.get_connection() {
                return Ok(connection);
            }
            if Instant::now() >= deadline {
                return Err(BrowserWalletError::Timeout { operation: "Wallet connection" });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Queues `request` for the browser wallet and waits for it to be signed and sent.
    pub(crate) async fn request_transaction(
        &self,
        request: BrowserTransaction,
    ) -> Result<TxHash, BrowserWalletError> {
        if !self.is_connected() {
            return Err(BrowserWalletError::NotConnected);
        }

        let id = request.id;
        self.state.add_transaction_request(request);
        let _queued = QueuedTransaction { state: &self.state, id };
        debug!(%id, "queued browser transaction");

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(response) = self.state.get_transaction_response(&id) {
                return match (response.hash, response.error) {
                    (Some(hash), _) => Ok(hash),
                    (None, Some(reason)) => {
                        Err(BrowserWalletError::Rejected { operation: "Transaction", reason })
                    }
                    (None, None) => Err(BrowserWalletError::ServerError(
                        "browser returned neither hash nor error".to_string(),
                    )),
                };
            }

            if Instant::now() >= deadline {
                return Err(BrowserWalletError::Timeout { operation: "Transaction" });
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Withdraws a queued transaction once its requester stops waiting for it, including when the
/// waiting future is dropped.
struct QueuedTransaction<'a> {
    state: &'a BrowserWalletState,
    id: Uuid,
}

impl Drop for QueuedTransaction<'_> {
    fn drop(&mut self) {
        self.state.discard_transaction(&self.id);
    }
}

fn open_url(url: &str) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };
    if let Err(err) = result {
        warn!(%err, "could not open the browser, visit {url} manually");
    }
}
