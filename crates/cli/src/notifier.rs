use treemint::{Notification, NotificationKind, Notifier};
use yansi::Paint;

/// Prints notifications as coloured toasts.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        debug!(kind = ?notification.kind, "{notification}");
        match notification.kind {
            NotificationKind::Success => println!("{} {notification}", "✔".green().bold()),
            NotificationKind::Error => eprintln!("{} {notification}", "✖".red().bold()),
        }
    }
}
