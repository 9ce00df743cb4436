use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalInput, NewGoal};
use crate::subscriptions::Subscription;
use crate::users::Session;
use async_trait::async_trait;

/// Trait for goal repository operations
///
/// Lists and live snapshots are ordered by creation time, newest first.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    async fn create(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    /// Persists the full goal, including its recomputed achieved flag.
    async fn update(&self, user_id: &str, goal: Goal) -> Result<Goal>;
    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize>;
    fn get(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>>;
    fn list(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn subscribe(&self, user_id: &str) -> Result<Subscription<Goal>>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, session: &Session) -> Result<Vec<Goal>>;
    async fn create_goal(&self, session: &Session, input: GoalInput) -> Result<Goal>;
    async fn update_goal(&self, session: &Session, goal_id: &str, input: GoalInput)
        -> Result<Goal>;
    /// Sets the saved amount from raw input, keeping everything else.
    async fn record_progress(
        &self,
        session: &Session,
        goal_id: &str,
        current_amount: &str,
    ) -> Result<Goal>;
    async fn delete_goal(&self, session: &Session, goal_id: &str) -> Result<()>;
    fn subscribe_goals(&self, session: &Session) -> Result<Subscription<Goal>>;
}
