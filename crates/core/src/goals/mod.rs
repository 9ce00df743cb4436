//! Goals module - domain models, progress, services, and traits.

mod goals_model;
mod goals_progress;
mod goals_service;
mod goals_traits;


pub use goals_model::{Goal, GoalInput, GoalRecord, GoalUpdate, NewGoal};
pub use goals_progress::GoalProgress;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
