use futures::stream::{self, Stream};
use log::debug;
use tokio::sync::watch;

/// One emission of a live query.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEvent<T> {
    /// The complete, ordered result set at this point in time.
    Snapshot(Vec<T>),
    /// The backend reported a failure for this subscription.
    Failed(String),
}

/// Creates a connected publisher/subscription pair.
///
/// The backend side keeps the publisher; the screen side owns the subscription.
/// Only the latest emission is retained, so a slow consumer always catches up
/// to the newest full snapshot.
pub fn channel<T>(label: impl Into<String>) -> (SnapshotPublisher<T>, Subscription<T>) {
    let (tx, rx) = watch::channel(None);
    let label = label.into();
    (
        SnapshotPublisher {
            tx,
            label: label.clone(),
        },
        Subscription {
            rx: Some(rx),
            label,
        },
    )
}

/// Producer half of a live query.
pub struct SnapshotPublisher<T> {
    tx: watch::Sender<Option<SnapshotEvent<T>>>,
    label: String,
}

impl<T> SnapshotPublisher<T> {
    /// Pushes a full snapshot. Returns false when the subscriber is gone.
    pub fn publish(&self, items: Vec<T>) -> bool {
        self.tx.send(Some(SnapshotEvent::Snapshot(items))).is_ok()
    }

    /// Reports a failure to the subscriber. Returns false when the subscriber is gone.
    pub fn fail(&self, message: impl Into<String>) -> bool {
        self.tx
            .send(Some(SnapshotEvent::Failed(message.into())))
            .is_ok()
    }

    /// True once the subscription has been released.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves when the subscription has been released.
    pub async fn closed(&self) {
        self.tx.closed().await;
        debug!("Subscription '{}' released", self.label);
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Consumer half of a live query.
///
/// Releasing happens through [`Subscription::unsubscribe`]; dropping the value
/// releases it as well, so a screen that goes away can never keep mutating
/// state it no longer owns.
pub struct Subscription<T> {
    rx: Option<watch::Receiver<Option<SnapshotEvent<T>>>>,
    label: String,
}

impl<T: Clone> Subscription<T> {
    /// Waits for the next emission.
    ///
    /// Returns `None` once the subscription was released or the publisher
    /// stopped.
    pub async fn next(&mut self) -> Option<SnapshotEvent<T>> {
        let rx = self.rx.as_mut()?;
        loop {
            rx.changed().await.ok()?;
            if let Some(event) = rx.borrow_and_update().clone() {
                return Some(event);
            }
        }
    }

    /// The most recent emission, if any, without waiting.
    pub fn latest(&self) -> Option<SnapshotEvent<T>> {
        self.rx.as_ref().and_then(|rx| rx.borrow().clone())
    }

    /// Converts the subscription into a `Stream` of emissions.
    pub fn into_stream(self) -> impl Stream<Item = SnapshotEvent<T>> {
        stream::unfold(self, |mut subscription| async move {
            subscription
                .next()
                .await
                .map(|event| (event, subscription))
        })
    }
}

impl<T> Subscription<T> {
    /// Releases the subscription. Further calls to `next` return `None`.
    pub fn unsubscribe(&mut self) {
        if self.rx.take().is_some() {
            debug!("Unsubscribed from '{}'", self.label);
        }
    }

    /// True while the subscription is held and its publisher is alive.
    pub fn is_active(&self) -> bool {
        self.rx
            .as_ref()
            .is_some_and(|rx| rx.has_changed().is_ok())
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_next_returns_published_snapshot() {
        let (publisher, mut subscription) = channel::<i32>("numbers");
        assert!(publisher.publish(vec![1, 2, 3]));

        assert_eq!(
            subscription.next().await,
            Some(SnapshotEvent::Snapshot(vec![1, 2, 3]))
        );
    }

    #[tokio::test]
    async fn test_only_latest_snapshot_is_delivered() {
        let (publisher, mut subscription) = channel::<i32>("numbers");
        publisher.publish(vec![1]);
        publisher.publish(vec![1, 2]);

        assert_eq!(
            subscription.next().await,
            Some(SnapshotEvent::Snapshot(vec![1, 2]))
        );
        assert_eq!(subscription.latest(), Some(SnapshotEvent::Snapshot(vec![1, 2])));
    }

    #[tokio::test]
    async fn test_failure_is_delivered_as_event() {
        let (publisher, mut subscription) = channel::<i32>("numbers");
        publisher.fail("permission denied");

        assert_eq!(
            subscription.next().await,
            Some(SnapshotEvent::Failed("permission denied".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unsubscribe_closes_publisher() {
        let (publisher, mut subscription) = channel::<i32>("numbers");
        assert!(subscription.is_active());
        assert!(!publisher.is_closed());

        subscription.unsubscribe();

        assert!(!subscription.is_active());
        assert!(publisher.is_closed());
        publisher.closed().await;
        assert!(!publisher.publish(vec![1]));
        assert_eq!(subscription.next().await, None);
    }

    #[tokio::test]
    async fn test_dropping_subscription_closes_publisher() {
        let (publisher, subscription) = channel::<i32>("numbers");
        drop(subscription);
        assert!(publisher.is_closed());
    }

    #[tokio::test]
    async fn test_stream_ends_when_publisher_stops() {
        let (publisher, subscription) = channel::<i32>("numbers");
        publisher.publish(vec![7]);
        drop(publisher);

        let events: Vec<_> = subscription.into_stream().collect().await;
        assert_eq!(events, vec![SnapshotEvent::Snapshot(vec![7])]);
    }
}
