//! Observable OS color scheme (`prefers-color-scheme`).

use tokio::sync::watch;

use super::scheme::ResolvedColorScheme;

/// Platform dark-mode signal. Subscribers get change notifications until
/// their receiver is dropped.
#[derive(Debug)]
pub struct SystemScheme {
    tx: watch::Sender<ResolvedColorScheme>,
}

impl SystemScheme {
    pub fn new(initial: ResolvedColorScheme) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Current platform scheme.
    pub fn current(&self) -> ResolvedColorScheme {
        *self.tx.borrow()
    }

    /// Report a platform change. Unchanged values do not notify.
    pub fn set(&self, scheme: ResolvedColorScheme) {
        self.tx.send_if_modified(|current| {
            if *current == scheme {
                return false;
            }
            *current = scheme;
            true
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolvedColorScheme> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SystemScheme {
    fn default() -> Self {
        Self::new(ResolvedColorScheme::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_only_on_change() {
        let system = SystemScheme::new(ResolvedColorScheme::Light);
        let mut rx = system.subscribe();

        system.set(ResolvedColorScheme::Light);
        assert!(!rx.has_changed().unwrap());

        system.set(ResolvedColorScheme::Dark);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ResolvedColorScheme::Dark);
    }

    #[test]
    fn test_dropping_receiver_unsubscribes() {
        let system = SystemScheme::default();
        let rx = system.subscribe();
        assert_eq!(system.subscriber_count(), 1);
        drop(rx);
        assert_eq!(system.subscriber_count(), 0);
    }
}
