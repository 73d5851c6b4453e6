//! Quest Engine
//!
//! The single entry point for quest gameplay. Game events come in through
//! `handle_event`, deferred work (reward delivery, panel swaps, the intro
//! message) fires from `tick`, and player/admin commands have dedicated
//! operations. Everything runs on the host's main thread; the engine holds
//! no locks and never blocks.
//!
//! Rewards go through a gate: a capacity pre-check, a pending marker, a
//! short scheduled delay, then a liveness and capacity re-check at delivery
//! time. `reward_pending` is durable, so a delivery blocked by a full
//! inventory (or a restart mid-delay) resumes through the claim command.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::data::ItemRegistry;
use crate::inventory::InventorySnapshot;
use crate::persist::{self, DataStore, IGNORE_RECORD, PLAYER_DATA_RECORD};

use super::definition::{QuestCatalog, QuestDefinition, QuestId};
use super::display::{ActiveQuestView, QuestCompleteView};
use super::events::{CraftTaskId, GameEvent};
use super::normalize::{is_reconciled_key, normalize_requirement_key};
use super::rewards::{has_space_for_rewards, resolve_reward_lines};
use super::schedule::{Scheduler, TaskKind};
use super::state::{PlayerId, ProgressStore, QuestProgress};

// ============================================================================
// Timings & messages
// ============================================================================

/// Delay between completion and reward delivery, in milliseconds.
pub const REWARD_DELAY_MS: u64 = 1000;
/// Delay between reward delivery and the complete-panel swap.
pub const UI_SWAP_DELAY_MS: u64 = 600;
/// Delay after first login before the intro message shows.
pub const INTRO_DELAY_MS: u64 = 3000;

const MSG_PREFIX: &str = "Quest: ";

const INV_FULL_MSG: &str = "Thy pack is full. Make room, then use /reward to claim thy due.";

const CHAINS_LOCKED_MSG: &str = "Complete the starter quest chain before taking on quest chains.";

const CHAINS_PLACEHOLDER_MSG: &str =
    "These quests are still in early development and will be added soon!";

const CHAIN_COMPLETE_MSG: &str = "Starter quests complete! The following quest chains have been \
     unlocked: Fisherman, Hunter, Diver, Lumberjack, Treasure Hunter, Bounty Hunter, Explorer, \
     Barrel Smasher. Start one with /quest <name>.";

const IGNORE_ACK_MSG: &str = "Quest intro hidden. You can still use /quest at any time.";

const INTRO_MSG: &str = "MMO QUESTING\nThis server features an MMO-style questing system.\n\
     Use /quest to begin. Questing is optional and never required to play.\n\
     Use /questignore to never see this message again.";

fn msg(body: &str) -> String {
    format!("{MSG_PREFIX}{body}")
}

// ============================================================================
// Host interface
// ============================================================================

/// Everything the engine needs from the surrounding game server. The engine
/// never holds host entity handles across calls; players are always
/// addressed by id and re-checked for liveness when deferred work fires.
pub trait QuestHost {
    fn is_connected(&self, player: PlayerId) -> bool;

    /// Snapshot of the player's main and belt containers. `None` when the
    /// player (or their inventory) is unavailable.
    fn inventory(&self, player: PlayerId) -> Option<InventorySnapshot>;

    fn give_item(&mut self, player: PlayerId, item: &str, amount: i32);

    fn notify(&mut self, player: PlayerId, message: &str);

    fn play_complete_effect(&mut self, player: PlayerId);

    /// Draw (or redraw in place) the active-quest panel.
    fn draw_quest_panel(&mut self, player: PlayerId, view: &ActiveQuestView);
    fn destroy_quest_panel(&mut self, player: PlayerId);

    fn draw_complete_panel(&mut self, player: PlayerId, view: &QuestCompleteView);
    fn destroy_complete_panel(&mut self, player: PlayerId);
}

// ============================================================================
// Engine
// ============================================================================

pub struct QuestEngine {
    catalog: QuestCatalog,
    items: ItemRegistry,
    store: Box<dyn DataStore>,
    progress: ProgressStore,
    /// Players who opted out of the login intro. Persisted.
    ignored: HashMap<PlayerId, bool>,
    /// Players already given (or scheduled) the intro this session.
    intro_shown: HashSet<PlayerId>,
    /// Players with a delivery currently scheduled. Single-flight guard;
    /// never persisted, so a restart mid-delay falls back to the claim path.
    reward_in_flight: HashSet<PlayerId>,
    /// Craft task id -> owning player, registered at task creation.
    craft_owners: HashMap<CraftTaskId, PlayerId>,
    quest_panel_open: HashSet<PlayerId>,
    complete_panel_open: HashSet<PlayerId>,
    scheduler: Scheduler,
}

impl QuestEngine {
    pub fn new(catalog: QuestCatalog, items: ItemRegistry, store: Box<dyn DataStore>) -> Self {
        let records: HashMap<PlayerId, QuestProgress> =
            persist::read_object(store.as_ref(), PLAYER_DATA_RECORD);
        let ignored: HashMap<PlayerId, bool> = persist::read_object(store.as_ref(), IGNORE_RECORD);

        info!(
            quests = catalog.len(),
            players = records.len(),
            "Quest engine initialized"
        );

        Self {
            catalog,
            items,
            store,
            progress: ProgressStore::from_records(records),
            ignored,
            intro_shown: HashSet::new(),
            reward_in_flight: HashSet::new(),
            craft_owners: HashMap::new(),
            quest_panel_open: HashSet::new(),
            complete_panel_open: HashSet::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Write both persisted records out. Also called by the host on unload.
    pub fn save(&mut self) {
        self.persist_progress();
        self.persist_ignore();
    }

    pub fn progress_for(&self, player: PlayerId) -> Option<&QuestProgress> {
        self.progress.get(player)
    }

    pub fn delivery_in_flight(&self, player: PlayerId) -> bool {
        self.reward_in_flight.contains(&player)
    }

    fn persist_progress(&mut self) {
        persist::write_object(self.store.as_mut(), PLAYER_DATA_RECORD, self.progress.records());
    }

    fn persist_ignore(&mut self) {
        persist::write_object(self.store.as_mut(), IGNORE_RECORD, &self.ignored);
    }

    /// Lazily create and migrate the player's record, persisting only when
    /// a completed quest rolled forward onto its successor.
    fn sync_progress(&mut self, player: PlayerId) {
        if self.progress.prepare(player, &self.catalog) {
            self.persist_progress();
        }
    }

    /// The quest currently accepting progress for this player, if any.
    /// Opted-out, finished, and reward-owing players have no active quest.
    fn active_quest(&mut self, player: PlayerId) -> Option<Arc<QuestDefinition>> {
        self.sync_progress(player);
        let record = self.progress.get(player)?;
        if !record.started || record.completed || record.reward_pending {
            return None;
        }
        self.catalog.get(record.quest_id)
    }

    // ========================================================================
    // Event intake
    // ========================================================================

    pub fn handle_event(&mut self, host: &mut dyn QuestHost, now: u64, event: &GameEvent) {
        match event {
            GameEvent::ResourceHarvested { player, item, amount } => {
                self.credit_item(host, now, *player, item, *amount, None);
            }

            GameEvent::CraftStarted { player, task } => {
                self.craft_owners.insert(*task, *player);
            }

            GameEvent::CraftFinished { player, task, item, amount, more_crafts } => {
                // Queued crafts can finish after a relog; prefer the owner
                // registered at task creation over the event's player.
                let owner = self.craft_owners.get(task).copied().unwrap_or(*player);
                let override_key = item.eq_ignore_ascii_case("box.wooden")
                    .then_some("box.wooden.crafted");
                self.credit_item(host, now, owner, item, *amount, override_key);
                if !more_crafts {
                    self.craft_owners.remove(task);
                }
            }

            GameEvent::CraftCancelled { task } => {
                self.craft_owners.remove(task);
            }

            GameEvent::ItemAddedToContainer { player, item, amount } => {
                self.on_container_gain(host, now, *player, item, *amount);
            }

            GameEvent::EntityBuilt { player, prefab, is_building_block } => {
                self.on_entity_built(host, now, *player, prefab, *is_building_block);
            }

            GameEvent::CupboardAuthorized { player } => {
                self.accrue(host, now, *player, "tc_auth", 1, Some("tc_auth"));
            }

            GameEvent::EntityKilled { player, victim } => {
                let lower = victim.to_ascii_lowercase();
                if lower.contains("boar") {
                    self.accrue(host, now, *player, victim, 1, Some("boar.kill"));
                } else if lower.contains("barrel") {
                    self.accrue(host, now, *player, victim, 1, Some("road.barrel"));
                }
            }

            GameEvent::RecyclerUsed { player } => {
                self.accrue(host, now, *player, "recycler_use", 1, Some("recycler_use"));
            }
        }
    }

    /// Accrual plus, for spendable resources, an inventory reconciliation
    /// pass. Harvest and craft credits route through here.
    fn credit_item(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        item: &str,
        amount: i32,
        override_key: Option<&str>,
    ) {
        let Some(quest) = self.active_quest(player) else {
            return;
        };

        self.accrue(host, now, player, item, amount, override_key);

        let key = match override_key {
            Some(key) => key.to_string(),
            None => normalize_requirement_key(item),
        };
        if quest.has_reconciled_requirements && is_reconciled_key(&key) {
            self.reconcile(host, now, player);
        }
    }

    fn on_container_gain(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        item: &str,
        amount: i32,
    ) {
        if item.is_empty() {
            return;
        }
        let Some(quest) = self.active_quest(player) else {
            return;
        };

        // Reconcile first: a gain of a spendable resource is reflected in
        // the snapshot regardless of which requirement key it maps to.
        if quest.has_reconciled_requirements {
            self.reconcile(host, now, player);
        }

        let key = normalize_requirement_key(item);

        // Quests 1 and 3 credit wood/stones through harvest events only;
        // container gains for those materials would double count.
        // TODO(content): revisit this pair if wood or stones ever join the
        // reconciled resource set.
        if (quest.id == 1 || quest.id == 3)
            && (key.eq_ignore_ascii_case("wood") || key.eq_ignore_ascii_case("stones"))
        {
            return;
        }

        // Spendable resources only ever reconcile; accruing them here would
        // double count pickups against the snapshot.
        if is_reconciled_key(&key) {
            return;
        }

        self.accrue(host, now, player, item, amount, None);
    }

    fn on_entity_built(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        prefab: &str,
        is_building_block: bool,
    ) {
        let lower = prefab.to_ascii_lowercase();

        if lower == "cupboard.tool.deployed" {
            self.accrue(host, now, player, prefab, 1, Some("tool.cupboard"));
        } else if is_building_block {
            self.accrue(host, now, player, prefab, 1, Some("building_block"));
        } else if lower.contains("furnace") {
            self.accrue(host, now, player, prefab, 1, Some("furnace.placed"));
        } else if lower.contains("door.hinged") {
            let key = normalize_requirement_key(prefab);
            if key == "door.hinged.wood" || key == "door.hinged.metal" {
                self.accrue(host, now, player, prefab, 1, Some(key.as_str()));
            }
        } else if lower.contains("box.wooden") {
            self.accrue(host, now, player, prefab, 1, Some("box.wooden.placed"));
        } else if lower.contains("lock.key") {
            self.accrue(host, now, player, prefab, 1, Some("lock.key"));
        }
    }

    // ========================================================================
    // Progress updates
    // ========================================================================

    /// Add `amount` toward one requirement of the player's active quest,
    /// clamped to the target. Keys not required by the active quest are
    /// dropped silently.
    fn accrue(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        raw_key: &str,
        amount: i32,
        override_key: Option<&str>,
    ) {
        if raw_key.is_empty() || amount <= 0 {
            return;
        }
        let Some(quest) = self.active_quest(player) else {
            return;
        };

        let key = match override_key {
            Some(key) => key.to_string(),
            None => normalize_requirement_key(raw_key),
        };
        let Some(&required) = quest.requirements.get(&key) else {
            return;
        };
        let Some(record) = self.progress.get_mut(player) else {
            return;
        };

        let current = record.amount_for(&key);
        let updated = (current + amount).min(required);
        if updated != current {
            record.progress.insert(key, updated);
            self.persist_progress();
        }

        self.evaluate(host, now, player, &quest);
    }

    /// Reconcile every spendable-resource requirement of the active quest
    /// against the player's current inventory. Progress only moves up.
    fn reconcile(&mut self, host: &mut dyn QuestHost, now: u64, player: PlayerId) {
        let Some(quest) = self.active_quest(player) else {
            return;
        };
        if !quest.has_reconciled_requirements {
            return;
        }
        let Some(snapshot) = host.inventory(player) else {
            return;
        };

        let mut changed = false;
        {
            let Some(record) = self.progress.get_mut(player) else {
                return;
            };
            for (key, &required) in &quest.requirements {
                if !is_reconciled_key(key) {
                    continue;
                }
                let Some(def) = self.items.find_with_fallback(key) else {
                    warn!("Reconciled requirement has no item definition: {key}");
                    continue;
                };
                let total = snapshot.count_item(&def.id);
                let current = record.amount_for(key);
                let updated = current.max(total).min(required);
                if updated != current {
                    record.progress.insert(key.clone(), updated);
                    changed = true;
                }
            }
        }

        if changed {
            self.persist_progress();
            self.evaluate(host, now, player, &quest);
        }
    }

    /// Redraw an open panel and, when every requirement is met, enter the
    /// reward gate.
    fn evaluate(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        quest: &Arc<QuestDefinition>,
    ) {
        let Some(record) = self.progress.get(player) else {
            return;
        };

        if self.quest_panel_open.contains(&player) {
            let view = ActiveQuestView::build(quest, record, &self.items);
            host.draw_quest_panel(player, &view);
        }

        let fulfilled = quest
            .requirements
            .iter()
            .all(|(key, &required)| record.amount_for(key) >= required);
        if fulfilled {
            self.try_finish(host, now, player, quest);
        }
    }

    // ========================================================================
    // Reward gate
    // ========================================================================

    /// Capacity pre-check, then mark the reward owed and schedule delivery.
    /// A blocked pre-check still marks the reward owed; the claim command is
    /// the retry path.
    fn try_finish(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        quest: &Arc<QuestDefinition>,
    ) {
        if self.reward_in_flight.contains(&player) {
            return;
        }

        let fits = host
            .inventory(player)
            .is_some_and(|snapshot| has_space_for_rewards(&snapshot, quest, &self.items));

        if let Some(record) = self.progress.get_mut(player) {
            record.reward_pending = true;
        }
        self.persist_progress();

        if !fits {
            host.notify(player, &msg(INV_FULL_MSG));
            return;
        }

        self.reward_in_flight.insert(player);
        self.scheduler
            .schedule(now + REWARD_DELAY_MS, TaskKind::DeliverReward {
                player,
                quest_id: quest.id,
            });
    }

    /// Drive all deferred work due at `now`. The host calls this from its
    /// main-thread tick.
    pub fn tick(&mut self, host: &mut dyn QuestHost, now: u64) {
        for task in self.scheduler.take_due(now) {
            match task.kind {
                TaskKind::DeliverReward { player, quest_id } => {
                    self.fire_delivery(host, now, player, quest_id);
                }
                TaskKind::SwapCompletePanel { player, quest_id } => {
                    self.fire_panel_swap(host, player, quest_id);
                }
                TaskKind::IntroMessage { player } => {
                    if host.is_connected(player) {
                        host.notify(player, INTRO_MSG);
                    }
                }
            }
        }
    }

    fn fire_delivery(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        quest_id: QuestId,
    ) {
        self.reward_in_flight.remove(&player);

        // The record may have been reset or force-completed onto another
        // quest while this task sat in the queue; a stale task must not
        // deliver or advance anything.
        let still_owed = self
            .progress
            .get(player)
            .is_some_and(|r| r.reward_pending && r.quest_id == quest_id);
        if !still_owed {
            return;
        }

        // reward_pending survives; the claim command resumes after relog.
        if !host.is_connected(player) {
            return;
        }
        let Some(quest) = self.catalog.get(quest_id) else {
            warn!("Scheduled delivery for unknown quest {quest_id}");
            return;
        };

        let fits = host
            .inventory(player)
            .is_some_and(|snapshot| has_space_for_rewards(&snapshot, &quest, &self.items));
        if !fits {
            host.notify(player, &msg(INV_FULL_MSG));
            return;
        }

        self.deliver(host, now, player, &quest);
    }

    /// Hand over the reward lines and move the chain forward. Callers have
    /// already verified capacity.
    fn deliver(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        player: PlayerId,
        quest: &Arc<QuestDefinition>,
    ) {
        for (def, amount) in resolve_reward_lines(quest, &self.items) {
            host.give_item(player, &def.id, amount);
        }

        let has_next = self.catalog.contains(quest.id + 1);
        {
            let Some(record) = self.progress.get_mut(player) else {
                return;
            };
            if has_next {
                record.advance();
            } else {
                record.completed = true;
                record.reward_pending = false;
                record.completed_at = Some(Utc::now());
            }
        }
        self.persist_progress();

        info!(player, quest = quest.id, "Quest reward delivered");

        if has_next {
            if let Some(next) = self.catalog.get(quest.id + 1) {
                host.notify(player, &msg(&format!("Next quest unlocked: {}", next.title)));
            }
        } else {
            host.notify(player, &msg(CHAIN_COMPLETE_MSG));
        }

        if self.quest_panel_open.remove(&player) {
            host.destroy_quest_panel(player);
        }
        host.play_complete_effect(player);
        self.scheduler
            .schedule(now + UI_SWAP_DELAY_MS, TaskKind::SwapCompletePanel {
                player,
                quest_id: quest.id,
            });
    }

    fn fire_panel_swap(&mut self, host: &mut dyn QuestHost, player: PlayerId, quest_id: QuestId) {
        if !host.is_connected(player) {
            return;
        }
        let Some(quest) = self.catalog.get(quest_id) else {
            return;
        };

        host.destroy_complete_panel(player);
        let view = QuestCompleteView::build(&quest, &self.items);
        host.draw_complete_panel(player, &view);
        self.complete_panel_open.insert(player);
    }

    /// The claim command: immediate, marker-free retry of an owed delivery.
    pub fn claim_reward(&mut self, host: &mut dyn QuestHost, now: u64, player: PlayerId) {
        self.sync_progress(player);
        let Some(record) = self.progress.get(player) else {
            return;
        };
        if !record.reward_pending || self.reward_in_flight.contains(&player) {
            return;
        }
        let Some(quest) = self.catalog.get(record.quest_id) else {
            return;
        };

        let fits = host
            .inventory(player)
            .is_some_and(|snapshot| has_space_for_rewards(&snapshot, &quest, &self.items));
        if !fits {
            host.notify(player, &msg(INV_FULL_MSG));
            return;
        }

        self.deliver(host, now, player, &quest);
    }

    // ========================================================================
    // Player commands
    // ========================================================================

    /// The quest command. First use opts the player in; later uses toggle
    /// the quest panel. A chain argument is gated behind finishing the
    /// starter chain.
    pub fn cmd_quest(&mut self, host: &mut dyn QuestHost, player: PlayerId, chain: Option<&str>) {
        self.sync_progress(player);

        let mut newly_started = false;
        if let Some(record) = self.progress.get_mut(player) {
            if !record.started {
                record.started = true;
                record.started_at = Some(Utc::now());
                newly_started = true;
            }
        }
        if newly_started {
            self.persist_progress();
        }

        if chain.is_some() {
            let chain_done = self.progress.get(player).is_some_and(|r| r.completed);
            if chain_done {
                host.notify(player, &msg(CHAINS_PLACEHOLDER_MSG));
            } else {
                host.notify(player, &msg(CHAINS_LOCKED_MSG));
            }
            return;
        }

        if self.quest_panel_open.remove(&player) {
            host.destroy_quest_panel(player);
            return;
        }

        let Some(record) = self.progress.get(player) else {
            return;
        };
        if record.completed {
            host.notify(player, &msg(CHAIN_COMPLETE_MSG));
            return;
        }
        let Some(quest) = self.catalog.get(record.quest_id) else {
            return;
        };

        let view = ActiveQuestView::build(&quest, record, &self.items);
        host.draw_quest_panel(player, &view);
        self.quest_panel_open.insert(player);
    }

    /// The complete-panel "next" action: dismiss the panel and show the
    /// successor quest (migration already moved the record forward).
    pub fn advance_from_complete_panel(&mut self, host: &mut dyn QuestHost, player: PlayerId) {
        if self.complete_panel_open.remove(&player) {
            host.destroy_complete_panel(player);
        }
        self.sync_progress(player);

        let Some(record) = self.progress.get(player) else {
            return;
        };
        if record.completed {
            host.notify(player, &msg(CHAIN_COMPLETE_MSG));
            return;
        }
        let Some(quest) = self.catalog.get(record.quest_id) else {
            return;
        };

        let view = ActiveQuestView::build(&quest, record, &self.items);
        host.draw_quest_panel(player, &view);
        self.quest_panel_open.insert(player);
    }

    /// Permanently opt out of the login intro message.
    pub fn cmd_quest_ignore(&mut self, host: &mut dyn QuestHost, player: PlayerId) {
        self.ignored.insert(player, true);
        self.persist_ignore();
        host.notify(player, &msg(IGNORE_ACK_MSG));
    }

    // ========================================================================
    // Session hooks
    // ========================================================================

    /// Schedule the intro message for first-time connections; opted-out
    /// players and repeat connections this session are skipped.
    pub fn on_player_connected(&mut self, now: u64, player: PlayerId) {
        if self.ignored.contains_key(&player) {
            return;
        }
        if !self.intro_shown.insert(player) {
            return;
        }
        self.scheduler
            .schedule(now + INTRO_DELAY_MS, TaskKind::IntroMessage { player });
    }

    pub fn on_player_disconnected(&mut self, player: PlayerId) {
        self.intro_shown.remove(&player);
        self.quest_panel_open.remove(&player);
        self.complete_panel_open.remove(&player);
    }

    // ========================================================================
    // Admin operations
    // ========================================================================

    /// Reset the target onto a specific quest with empty progress. Redraws
    /// the panel when the target is online.
    pub fn admin_reset(
        &mut self,
        host: &mut dyn QuestHost,
        target: PlayerId,
        quest_id: QuestId,
    ) -> Result<(), String> {
        if !self.catalog.contains(quest_id) {
            return Err(format!("Unknown quest id {quest_id}"));
        }

        // Any delivery scheduled for the old record is void from here on.
        self.reward_in_flight.remove(&target);

        self.sync_progress(target);
        if let Some(record) = self.progress.get_mut(target) {
            record.reset_to(quest_id);
        }
        self.persist_progress();

        if host.is_connected(target) {
            host.destroy_quest_panel(target);
            host.destroy_complete_panel(target);
            self.complete_panel_open.remove(&target);
            self.quest_panel_open.remove(&target);

            if let (Some(record), Some(quest)) =
                (self.progress.get(target), self.catalog.get(quest_id))
            {
                let view = ActiveQuestView::build(&quest, record, &self.items);
                host.draw_quest_panel(target, &view);
                self.quest_panel_open.insert(target);
            }
        }

        Ok(())
    }

    /// Force a quest through the full completion path, reward gate included.
    pub fn admin_force_complete(
        &mut self,
        host: &mut dyn QuestHost,
        now: u64,
        target: PlayerId,
        quest_id: QuestId,
    ) -> Result<(), String> {
        let Some(quest) = self.catalog.get(quest_id) else {
            return Err(format!("Unknown quest id {quest_id}"));
        };

        self.reward_in_flight.remove(&target);

        host.destroy_quest_panel(target);
        host.destroy_complete_panel(target);
        self.quest_panel_open.remove(&target);
        self.complete_panel_open.remove(&target);

        self.sync_progress(target);
        if let Some(record) = self.progress.get_mut(target) {
            record.reset_to(quest_id);
            for (key, &required) in &quest.requirements {
                record.progress.insert(key.clone(), required);
            }
        }
        self.persist_progress();

        self.try_finish(host, now, target, &quest);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
