// File: src/store.rs
// Purpose: Single-slot reactive cell holding the latest published value

use std::sync::Arc;
use tokio::sync::watch;

/// Latest-value publish/subscribe cell
///
/// Every `set` replaces the whole value and wakes subscribers. Subscribers
/// only ever observe the most recent value; intermediate values may be skipped.
#[derive(Debug)]
pub struct Store<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the value and notify subscribers (works with none attached)
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Modify the value in place and notify subscribers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// New subscriber; the current value counts as already seen
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Store<T> {
    /// Clone of the latest value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_value() {
        let store = Store::new(1);
        assert_eq!(store.get(), 1);

        store.set(2);
        store.set(3);
        assert_eq!(store.get(), 3);

        store.update(|n| *n += 1);
        assert_eq!(store.get(), 4);
    }

    #[test]
    fn test_clones_share_slot() {
        let store = Store::new(String::from("a"));
        let other = store.clone();
        other.set("b".to_string());
        assert_eq!(store.get(), "b");
    }

    #[test]
    fn test_subscriber_sees_latest_only() {
        let store = Store::new(0);
        let mut rx = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);
        assert!(!rx.has_changed().unwrap());

        store.set(1);
        store.set(2);

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 2);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_set() {
        let store = Store::new(0);
        let mut rx = store.subscribe();

        let publisher = store.clone();
        let handle = tokio::spawn(async move {
            publisher.set(42);
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 42);
        handle.await.unwrap();
    }
}
