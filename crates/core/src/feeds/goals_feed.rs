use log::{debug, warn};
use std::sync::Arc;

use super::{next_event, release};
use crate::errors::{Error, Result};
use crate::goals::{Goal, GoalProgress, GoalServiceTrait};
use crate::subscriptions::{SnapshotEvent, Subscription};
use crate::users::Session;

/// A goal together with its computed progress.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalView {
    pub goal: Goal,
    pub progress: GoalProgress,
}

impl From<Goal> for GoalView {
    fn from(goal: Goal) -> Self {
        let progress = goal.progress();
        Self { goal, progress }
    }
}

/// Owns the goals screen's list and its live subscription.
pub struct GoalsFeed {
    session: Session,
    goal_service: Arc<dyn GoalServiceTrait>,
    goals: Vec<GoalView>,
    subscription: Option<Subscription<Goal>>,
}

impl GoalsFeed {
    pub fn new(session: Session, goal_service: Arc<dyn GoalServiceTrait>) -> Self {
        Self {
            session,
            goal_service,
            goals: Vec::new(),
            subscription: None,
        }
    }

    /// Goals newest first.
    pub fn goals(&self) -> &[GoalView] {
        &self.goals
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn attach(&mut self) -> Result<()> {
        self.detach();
        self.goals.clear();
        self.subscription = Some(self.goal_service.subscribe_goals(&self.session)?);
        debug!("Goals feed attached for {}", self.session.user_id());
        Ok(())
    }

    pub fn detach(&mut self) {
        if self.is_attached() {
            debug!("Goals feed detached for {}", self.session.user_id());
        }
        release(&mut self.subscription);
    }

    /// Waits for the next snapshot and replaces the list with it.
    ///
    /// Returns the number of goals shown, or `None` once detached.
    pub async fn next_update(&mut self) -> Option<Result<usize>> {
        if !self.is_attached() {
            return None;
        }
        match next_event(&mut self.subscription).await {
            Some(SnapshotEvent::Snapshot(goals)) => {
                self.goals = goals.into_iter().map(GoalView::from).collect();
                Some(Ok(self.goals.len()))
            }
            Some(SnapshotEvent::Failed(message)) => {
                warn!("Goals subscription failed: {}", message);
                release(&mut self.subscription);
                self.goals.clear();
                Some(Err(Error::Subscription(message)))
            }
            None => {
                self.subscription = None;
                None
            }
        }
    }
}

impl Drop for GoalsFeed {
    fn drop(&mut self) {
        self.detach();
    }
}
