//! Live queries over SQLite.
//!
//! Repositories announce every committed write on a [`ChangeFeed`]. A live
//! query listens on the feed, re-reads its collection whenever a matching
//! change arrives and publishes the full result as a new snapshot.

use log::{debug, warn};
use tokio::sync::broadcast;

use monezi_core::errors::{Error, Result};
use monezi_core::subscriptions::{channel, SnapshotPublisher, Subscription};

/// Collections that can be watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Goals,
    Users,
}

/// A committed write to one user's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub user_id: String,
}

/// Broadcast bus shared by every repository and live query on a database.
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn notify(&self, collection: Collection, user_id: &str) {
        // No listeners is the common case.
        let _ = self.sender.send(ChangeEvent {
            collection,
            user_id: user_id.to_string(),
        });
    }
}

/// Starts a live query.
///
/// The first snapshot is loaded before returning, so the subscriber always
/// has a current value to read. The background task stops as soon as the
/// subscription is released.
pub fn spawn_live_query<T, F>(
    changes: &ChangeFeed,
    collection: Collection,
    user_id: &str,
    label: impl Into<String>,
    load: F,
) -> Result<Subscription<T>>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Result<Vec<T>> + Send + 'static,
{
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| Error::Subscription(format!("no async runtime available: {}", e)))?;

    // Subscribe before the initial read so no write can fall in between.
    let mut rx = changes.subscribe();
    let (publisher, subscription) = channel(label);
    publish_reload(&publisher, &load);

    let user_id = user_id.to_string();
    runtime.spawn(async move {
        loop {
            tokio::select! {
                _ = publisher.closed() => break,
                received = rx.recv() => match received {
                    Ok(event) => {
                        if event.collection == collection && event.user_id == user_id {
                            publish_reload(&publisher, &load);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(
                            "Live query '{}' missed {} change events; reloading",
                            publisher.label(),
                            skipped
                        );
                        publish_reload(&publisher, &load);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        debug!("Live query '{}' stopped", publisher.label());
    });

    Ok(subscription)
}

fn publish_reload<T, F>(publisher: &SnapshotPublisher<T>, load: &F)
where
    F: Fn() -> Result<Vec<T>>,
{
    match load() {
        Ok(items) => {
            publisher.publish(items);
        }
        Err(e) => {
            warn!("Live query '{}' failed: {}", publisher.label(), e);
            publisher.fail(e.to_string());
        }
    }
}
