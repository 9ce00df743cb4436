//! Cancelable live subscriptions.
//!
//! A live query is modeled as a channel of full-state snapshots: every emission
//! replaces whatever the consumer derived from the previous one, so there is no
//! incremental patching and a late or skipped emission is harmless.

mod subscription;

pub use subscription::{channel, SnapshotEvent, SnapshotPublisher, Subscription};
