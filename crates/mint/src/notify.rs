//! Transient user notifications.

use parking_lot::Mutex;
use std::{fmt, sync::Arc};

/// Shown when the wallet is on another network.
pub const WRONG_NETWORK_MESSAGE: &str = "Change the network to Avalanche";

/// Shown once a mint is confirmed.
pub const MINT_SUCCESS_MESSAGE: &str = "You successfully minted a TeamTree NFT!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Displays notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that logs through `tracing` only.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(target: "treemint::notify", "{notification}"),
            NotificationKind::Error => warn!(target: "treemint::notify", "{notification}"),
        }
    }
}

/// Notifier that keeps every notification, in order.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Messages of the given kind.
    pub fn messages(&self, kind: NotificationKind) -> Vec<String> {
        self.inner.lock().iter().filter(|n| n.kind == kind).map(|n| n.message.clone()).collect()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock())
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.inner.lock().push(notification);
    }
}
