//! Quest system
//!
//! A linear chain of starter quests driven by game events. `engine` is the
//! entry point; the submodules cover definitions, per-player state, event
//! types, requirement-key normalization, reward capacity, deferred task
//! scheduling, and panel view models.

pub mod definition;
pub mod display;
pub mod engine;
pub mod events;
pub mod normalize;
pub mod rewards;
pub mod schedule;
pub mod state;

pub use definition::{QuestCatalog, QuestDefinition, QuestId, QuestReward};
pub use display::{ActiveQuestView, QuestCompleteView};
pub use engine::{QuestEngine, QuestHost};
pub use events::{CraftTaskId, GameEvent};
pub use state::{PlayerId, QuestProgress};
