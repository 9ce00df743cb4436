//! Screen-scoped feeds.
//!
//! A feed owns the derived state of one screen and the live subscriptions
//! that drive it. `attach` subscribes, `detach` releases, and every snapshot
//! fully replaces what was derived from the previous one.

mod goals_feed;
mod home_feed;


pub use goals_feed::{GoalView, GoalsFeed};
pub use home_feed::{HomeFeed, HomeState, HomeUpdate};

use crate::subscriptions::{SnapshotEvent, Subscription};

/// Waits on an optional subscription; a missing one never resolves.
async fn next_event<T: Clone>(
    subscription: &mut Option<Subscription<T>>,
) -> Option<SnapshotEvent<T>> {
    match subscription {
        Some(subscription) => subscription.next().await,
        None => std::future::pending().await,
    }
}

fn release<T>(subscription: &mut Option<Subscription<T>>) {
    if let Some(mut subscription) = subscription.take() {
        subscription.unsubscribe();
    }
}
