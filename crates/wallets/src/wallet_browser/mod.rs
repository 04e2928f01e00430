pub mod error;
pub mod server;
pub mod wallet;

mod app;
mod handlers;
mod queue;
mod router;
mod state;
mod types;

pub use error::BrowserWalletError;
pub use server::BrowserWalletServer;
pub use wallet::BrowserWallet;
