use async_trait::async_trait;
use log::{debug, error, warn};
use std::sync::Arc;

use super::goals_model::{Goal, GoalInput};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::money::normalize_non_negative_amount;
use crate::subscriptions::Subscription;
use crate::users::Session;
use crate::utils::time_utils::local_today;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        GoalService {
            goal_repo,
            event_sink,
        }
    }

    fn existing_goal(&self, session: &Session, goal_id: &str) -> Result<Goal> {
        self.goal_repo
            .get(session.user_id(), goal_id)?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("Goal {}", goal_id))))
    }

    async fn save(&self, session: &Session, goal: Goal) -> Result<Goal> {
        let goal_id = goal.id.clone();
        let saved = self
            .goal_repo
            .update(session.user_id(), goal)
            .await
            .map_err(|e| {
                error!("Failed to update goal {}: {}", goal_id, e);
                Error::remote_write("update the goal", e)
            })?;
        self.event_sink.emit(DomainEvent::goals_changed(
            session.user_id(),
            vec![saved.id.clone()],
        ));
        Ok(saved)
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, session: &Session) -> Result<Vec<Goal>> {
        self.goal_repo.list(session.user_id())
    }

    async fn create_goal(&self, session: &Session, input: GoalInput) -> Result<Goal> {
        let new_goal = input.validate_new(local_today())?;
        let goal = self
            .goal_repo
            .create(session.user_id(), new_goal)
            .await
            .map_err(|e| {
                error!("Failed to add goal: {}", e);
                Error::remote_write("add the goal", e)
            })?;
        debug!("Created goal {} (achieved: {})", goal.id, goal.is_achieved());
        self.event_sink.emit(DomainEvent::goals_changed(
            session.user_id(),
            vec![goal.id.clone()],
        ));
        Ok(goal)
    }

    async fn update_goal(
        &self,
        session: &Session,
        goal_id: &str,
        input: GoalInput,
    ) -> Result<Goal> {
        let update = input.validate_update(goal_id)?;
        let mut goal = self.existing_goal(session, goal_id)?;
        update.check_target_date(goal.target_date, local_today())?;
        goal.apply(update);
        self.save(session, goal).await
    }

    async fn record_progress(
        &self,
        session: &Session,
        goal_id: &str,
        current_amount: &str,
    ) -> Result<Goal> {
        let current_amount = normalize_non_negative_amount(current_amount, "Current amount")?;
        let mut goal = self.existing_goal(session, goal_id)?;
        goal.set_current_amount(current_amount);
        self.save(session, goal).await
    }

    async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<()> {
        let deleted = self
            .goal_repo
            .delete(session.user_id(), goal_id)
            .await
            .map_err(|e| {
                error!("Failed to delete goal {}: {}", goal_id, e);
                Error::remote_write("delete the goal", e)
            })?;
        if deleted == 0 {
            warn!("Goal {} was already gone", goal_id);
            return Ok(());
        }
        self.event_sink.emit(DomainEvent::goals_changed(
            session.user_id(),
            vec![goal_id.to_string()],
        ));
        Ok(())
    }

    fn subscribe_goals(&self, session: &Session) -> Result<Subscription<Goal>> {
        self.goal_repo.subscribe(session.user_id())
    }
}
