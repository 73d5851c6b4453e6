//! Quest Event Types
//!
//! Typed events from the trusted game-event sources. Every event carries the
//! acting player id directly; the core never probes host objects for
//! ownership. Craft tasks are tracked by an opaque id issued by the host at
//! task creation.

use super::state::PlayerId;

/// Opaque identifier for a queued craft task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CraftTaskId(pub u64);

/// Events that can drive quest progress
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Player harvested a resource node (tree, ore node, corpse)
    ResourceHarvested {
        player: PlayerId,
        /// Item short name (e.g. "wood", "metal.ore")
        item: String,
        amount: i32,
    },

    /// A craft task was queued; registers task ownership
    CraftStarted {
        player: PlayerId,
        task: CraftTaskId,
    },

    /// One item of a craft task finished
    CraftFinished {
        player: PlayerId,
        task: CraftTaskId,
        item: String,
        amount: i32,
        /// The task still has crafts queued; ownership is kept until the last
        more_crafts: bool,
    },

    /// A craft task was cancelled; drops task ownership
    CraftCancelled {
        task: CraftTaskId,
    },

    /// An item landed in one of the player's containers, by any path
    /// (pickup, stack split, move, loot)
    ItemAddedToContainer {
        player: PlayerId,
        item: String,
        amount: i32,
    },

    /// Player placed a construction or deployable
    EntityBuilt {
        player: PlayerId,
        /// Prefab short name of the placed entity
        prefab: String,
        /// Structural building piece (wall, foundation, ...)
        is_building_block: bool,
    },

    /// Player authorized on a tool cupboard
    CupboardAuthorized {
        player: PlayerId,
    },

    /// Player killed an entity
    EntityKilled {
        player: PlayerId,
        /// Prefab short name of the victim
        victim: String,
    },

    /// Player toggled a recycler
    RecyclerUsed {
        player: PlayerId,
    },
}

impl GameEvent {
    /// The acting player, when the event has one
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            GameEvent::ResourceHarvested { player, .. } => Some(*player),
            GameEvent::CraftStarted { player, .. } => Some(*player),
            GameEvent::CraftFinished { player, .. } => Some(*player),
            GameEvent::CraftCancelled { .. } => None,
            GameEvent::ItemAddedToContainer { player, .. } => Some(*player),
            GameEvent::EntityBuilt { player, .. } => Some(*player),
            GameEvent::CupboardAuthorized { player } => Some(*player),
            GameEvent::EntityKilled { player, .. } => Some(*player),
            GameEvent::RecyclerUsed { player } => Some(*player),
        }
    }

    /// Event type as string (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::ResourceHarvested { .. } => "resource_harvested",
            GameEvent::CraftStarted { .. } => "craft_started",
            GameEvent::CraftFinished { .. } => "craft_finished",
            GameEvent::CraftCancelled { .. } => "craft_cancelled",
            GameEvent::ItemAddedToContainer { .. } => "item_added_to_container",
            GameEvent::EntityBuilt { .. } => "entity_built",
            GameEvent::CupboardAuthorized { .. } => "cupboard_authorized",
            GameEvent::EntityKilled { .. } => "entity_killed",
            GameEvent::RecyclerUsed { .. } => "recycler_used",
        }
    }
}
