//! End-to-end engine scenarios against the built-in quest catalog and item
//! registry, driven through a mock host.

use std::collections::{HashMap, HashSet};

use questline::data::ItemRegistry;
use questline::inventory::{Container, InventorySnapshot, ItemStack};
use questline::persist::{JsonFileStore, MemoryStore};
use questline::quest::engine::REWARD_DELAY_MS;
use questline::quest::events::CraftTaskId;
use questline::quest::{ActiveQuestView, QuestCompleteView};
use questline::{GameEvent, PlayerId, QuestCatalog, QuestEngine, QuestHost};

const PLAYER: PlayerId = 76561198000000001;

struct MockHost {
    connected: HashSet<PlayerId>,
    inventories: HashMap<PlayerId, InventorySnapshot>,
    given: Vec<(PlayerId, String, i32)>,
    messages: Vec<(PlayerId, String)>,
    quest_panels: HashMap<PlayerId, ActiveQuestView>,
    complete_panels: HashMap<PlayerId, QuestCompleteView>,
    effects: Vec<PlayerId>,
}

impl MockHost {
    fn new() -> Self {
        Self {
            connected: HashSet::new(),
            inventories: HashMap::new(),
            given: Vec::new(),
            messages: Vec::new(),
            quest_panels: HashMap::new(),
            complete_panels: HashMap::new(),
            effects: Vec::new(),
        }
    }

    fn spawn(&mut self, player: PlayerId) {
        self.connected.insert(player);
        self.inventories.insert(
            player,
            InventorySnapshot::new(Container::new(24), Container::new(6)),
        );
    }

    fn fill_inventory(&mut self, player: PlayerId) {
        self.inventories.insert(
            player,
            InventorySnapshot::new(Container::new(0), Container::new(0)),
        );
    }

    fn given_amount(&self, item: &str) -> i32 {
        self.given
            .iter()
            .filter(|(_, i, _)| i == item)
            .map(|(_, _, a)| a)
            .sum()
    }
}

impl QuestHost for MockHost {
    fn is_connected(&self, player: PlayerId) -> bool {
        self.connected.contains(&player)
    }

    fn inventory(&self, player: PlayerId) -> Option<InventorySnapshot> {
        self.inventories.get(&player).cloned()
    }

    fn give_item(&mut self, player: PlayerId, item: &str, amount: i32) {
        self.given.push((player, item.to_string(), amount));
    }

    fn notify(&mut self, player: PlayerId, message: &str) {
        self.messages.push((player, message.to_string()));
    }

    fn play_complete_effect(&mut self, player: PlayerId) {
        self.effects.push(player);
    }

    fn draw_quest_panel(&mut self, player: PlayerId, view: &ActiveQuestView) {
        self.quest_panels.insert(player, view.clone());
    }

    fn destroy_quest_panel(&mut self, player: PlayerId) {
        self.quest_panels.remove(&player);
    }

    fn draw_complete_panel(&mut self, player: PlayerId, view: &QuestCompleteView) {
        self.complete_panels.insert(player, view.clone());
    }

    fn destroy_complete_panel(&mut self, player: PlayerId) {
        self.complete_panels.remove(&player);
    }
}

fn engine() -> QuestEngine {
    QuestEngine::new(
        QuestCatalog::builtin().unwrap(),
        ItemRegistry::builtin().unwrap(),
        Box::new(MemoryStore::new()),
    )
}

fn opt_in(engine: &mut QuestEngine, host: &mut MockHost, player: PlayerId) {
    engine.cmd_quest(host, player, None);
    engine.cmd_quest(host, player, None);
}

fn harvest(item: &str, amount: i32) -> GameEvent {
    GameEvent::ResourceHarvested {
        player: PLAYER,
        item: item.to_string(),
        amount,
    }
}

fn craft(engine: &mut QuestEngine, host: &mut MockHost, task: u64, item: &str) {
    engine.handle_event(host, 0, &GameEvent::CraftStarted {
        player: PLAYER,
        task: CraftTaskId(task),
    });
    engine.handle_event(host, 0, &GameEvent::CraftFinished {
        player: PLAYER,
        task: CraftTaskId(task),
        item: item.to_string(),
        amount: 1,
        more_crafts: false,
    });
}

#[test]
fn builtin_catalog_loads_dense_chain() {
    let catalog = QuestCatalog::builtin().unwrap();
    assert_eq!(catalog.len(), 23);
    assert_eq!(catalog.first_id(), 1);
    for id in 1..=23 {
        assert!(catalog.contains(id), "missing quest {id}");
    }
    assert!(!catalog.contains(24));
}

#[test]
fn quest_one_harvest_clamp_and_delivery() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);

    // Container gains of wood are suppressed on quest 1.
    engine.handle_event(&mut host, 0, &GameEvent::ItemAddedToContainer {
        player: PLAYER,
        item: "wood".to_string(),
        amount: 300,
    });
    assert_eq!(engine.progress_for(PLAYER).unwrap().amount_for("wood"), 0);

    // A 500-wood harvest clamps at the 400 target.
    engine.handle_event(&mut host, 0, &harvest("wood", 500));
    assert_eq!(engine.progress_for(PLAYER).unwrap().amount_for("wood"), 400);

    // Stones finish the quest and schedule a delayed delivery.
    engine.handle_event(&mut host, 100, &harvest("stones", 200));
    let record = engine.progress_for(PLAYER).unwrap();
    assert!(record.reward_pending);
    assert!(host.given.is_empty());

    engine.tick(&mut host, 100 + REWARD_DELAY_MS);
    assert_eq!(host.given_amount("wood"), 500);
    assert_eq!(host.given_amount("stones"), 500);
    assert_eq!(host.effects, vec![PLAYER]);

    let record = engine.progress_for(PLAYER).unwrap();
    assert_eq!(record.quest_id, 2);
    assert!(!record.reward_pending);
    assert!(record.progress.is_empty());
}

#[test]
fn door_and_lock_placement_normalizes() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);
    engine.admin_reset(&mut host, PLAYER, 7).unwrap();

    engine.handle_event(&mut host, 0, &GameEvent::EntityBuilt {
        player: PLAYER,
        prefab: "door.hinged.wood.deployed".to_string(),
        is_building_block: false,
    });
    engine.handle_event(&mut host, 0, &GameEvent::EntityBuilt {
        player: PLAYER,
        prefab: "lock.key.deployed".to_string(),
        is_building_block: false,
    });

    let record = engine.progress_for(PLAYER).unwrap();
    assert_eq!(record.amount_for("door.hinged.wood"), 1);
    assert_eq!(record.amount_for("lock.key"), 1);
    assert!(record.reward_pending);
}

#[test]
fn metal_door_counts_only_on_metal_quest() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);
    engine.admin_reset(&mut host, PLAYER, 16).unwrap();

    // A wood door placement does not count toward the metal-door quest.
    engine.handle_event(&mut host, 0, &GameEvent::EntityBuilt {
        player: PLAYER,
        prefab: "door.hinged.wood.deployed".to_string(),
        is_building_block: false,
    });
    assert_eq!(
        engine.progress_for(PLAYER).unwrap().amount_for("door.hinged.metal"),
        0
    );

    engine.handle_event(&mut host, 0, &GameEvent::EntityBuilt {
        player: PLAYER,
        prefab: "door.hinged.metal.deployed".to_string(),
        is_building_block: false,
    });
    assert!(engine.progress_for(PLAYER).unwrap().reward_pending);
}

#[test]
fn legacy_bow_craft_counts_as_hunting_bow() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);
    engine.admin_reset(&mut host, PLAYER, 10).unwrap();

    craft(&mut engine, &mut host, 1, "legacybow");
    assert_eq!(
        engine.progress_for(PLAYER).unwrap().amount_for("bow.hunting"),
        1
    );

    // Queued arrows: same task, multiple finishes.
    engine.handle_event(&mut host, 0, &GameEvent::CraftStarted {
        player: PLAYER,
        task: CraftTaskId(2),
    });
    for i in 0..10 {
        engine.handle_event(&mut host, 0, &GameEvent::CraftFinished {
            player: PLAYER,
            task: CraftTaskId(2),
            item: "arrow.wooden".to_string(),
            amount: 2,
            more_crafts: i < 9,
        });
    }
    assert!(engine.progress_for(PLAYER).unwrap().reward_pending);
}

#[test]
fn workbench3_craft_counts_as_engineering_table() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);
    engine.admin_reset(&mut host, PLAYER, 23).unwrap();

    craft(&mut engine, &mut host, 3, "workbench3.deployed");
    assert_eq!(engine.progress_for(PLAYER).unwrap().amount_for("iotable"), 1);
}

#[test]
fn building_and_cupboard_progress() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);
    engine.admin_reset(&mut host, PLAYER, 5).unwrap();

    engine.handle_event(&mut host, 0, &GameEvent::CupboardAuthorized { player: PLAYER });
    for _ in 0..4 {
        engine.handle_event(&mut host, 0, &GameEvent::EntityBuilt {
            player: PLAYER,
            prefab: "foundation".to_string(),
            is_building_block: true,
        });
    }

    let record = engine.progress_for(PLAYER).unwrap();
    assert_eq!(record.amount_for("tc_auth"), 1);
    assert_eq!(record.amount_for("building_block"), 4);
    assert!(record.reward_pending);
}

#[test]
fn boar_kills_and_recycler_use() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);

    engine.admin_reset(&mut host, PLAYER, 11).unwrap();
    for victim in ["boar", "boar", "chicken", "boar"] {
        engine.handle_event(&mut host, 0, &GameEvent::EntityKilled {
            player: PLAYER,
            victim: victim.to_string(),
        });
    }
    assert!(engine.progress_for(PLAYER).unwrap().reward_pending);

    engine.admin_reset(&mut host, PLAYER, 20).unwrap();
    engine.handle_event(&mut host, 0, &GameEvent::RecyclerUsed { player: PLAYER });
    assert!(engine.progress_for(PLAYER).unwrap().reward_pending);
}

#[test]
fn metal_ore_reconciles_against_inventory() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);
    engine.admin_reset(&mut host, PLAYER, 14).unwrap();

    // 300 ore already banked in the belt; the snapshot seen by the engine
    // already includes the 100 just gathered.
    let mut belt = Container::new(6);
    belt.slots.push(ItemStack::new("metal.ore", 400));
    host.inventories
        .insert(PLAYER, InventorySnapshot::new(Container::new(24), belt));

    engine.handle_event(&mut host, 0, &harvest("metal.ore", 100));
    assert_eq!(
        engine.progress_for(PLAYER).unwrap().amount_for("metal.ore"),
        400
    );

    // Spending the ore never pulls progress back down.
    host.spawn(PLAYER);
    engine.handle_event(&mut host, 10, &GameEvent::ItemAddedToContainer {
        player: PLAYER,
        item: "scrap".to_string(),
        amount: 1,
    });
    assert_eq!(
        engine.progress_for(PLAYER).unwrap().amount_for("metal.ore"),
        400
    );
}

#[test]
fn forced_complete_with_full_inventory_resumes_via_claim() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);
    host.fill_inventory(PLAYER);

    engine.admin_force_complete(&mut host, 0, PLAYER, 1).unwrap();

    let record = engine.progress_for(PLAYER).unwrap();
    assert!(record.reward_pending);
    assert_eq!(record.quest_id, 1);
    assert!(!engine.delivery_in_flight(PLAYER));
    assert!(host.messages.iter().any(|(_, m)| m.contains("pack is full")));

    // Nothing fires later; no delivery was scheduled.
    engine.tick(&mut host, REWARD_DELAY_MS * 10);
    assert!(host.given.is_empty());
    assert!(host.complete_panels.is_empty());

    // Claim after making room delivers with no further delay.
    host.spawn(PLAYER);
    engine.claim_reward(&mut host, 20_000, PLAYER);
    assert_eq!(host.given_amount("wood"), 500);
    assert_eq!(engine.progress_for(PLAYER).unwrap().quest_id, 2);
}

#[test]
fn complete_panel_swaps_after_delivery() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);

    // Leave the quest panel open so the swap is observable.
    engine.cmd_quest(&mut host, PLAYER, None);
    assert!(host.quest_panels.contains_key(&PLAYER));

    engine.handle_event(&mut host, 0, &harvest("wood", 400));
    engine.handle_event(&mut host, 0, &harvest("stones", 200));
    engine.tick(&mut host, REWARD_DELAY_MS);

    // Quest panel torn down at delivery; complete panel arrives later.
    assert!(host.quest_panels.is_empty());
    assert!(host.complete_panels.is_empty());

    engine.tick(&mut host, REWARD_DELAY_MS + 600);
    let panel = host.complete_panels.get(&PLAYER).unwrap();
    assert_eq!(panel.heading, "QUEST COMPLETE");
    assert!(panel.reward_line.contains("x500"));

    // The panel's next action shows the successor quest.
    engine.advance_from_complete_panel(&mut host, PLAYER);
    let panel = host.quest_panels.get(&PLAYER).unwrap();
    assert_eq!(panel.title, "Quest 2 - Stone Tools");
}

#[test]
fn disconnect_during_delay_keeps_reward_owed() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);
    opt_in(&mut engine, &mut host, PLAYER);

    engine.handle_event(&mut host, 0, &harvest("wood", 400));
    engine.handle_event(&mut host, 0, &harvest("stones", 200));

    host.connected.remove(&PLAYER);
    engine.tick(&mut host, REWARD_DELAY_MS);
    assert!(host.given.is_empty());
    assert!(engine.progress_for(PLAYER).unwrap().reward_pending);

    host.spawn(PLAYER);
    engine.claim_reward(&mut host, 60_000, PLAYER);
    assert_eq!(host.given_amount("stones"), 500);
    assert_eq!(engine.progress_for(PLAYER).unwrap().quest_id, 2);
}

#[test]
fn chain_argument_is_gated_until_chain_complete() {
    let mut engine = engine();
    let mut host = MockHost::new();
    host.spawn(PLAYER);

    engine.cmd_quest(&mut host, PLAYER, Some("hunter"));
    assert!(host
        .messages
        .iter()
        .any(|(_, m)| m.contains("Complete the starter quest chain")));

    engine.admin_force_complete(&mut host, 0, PLAYER, 23).unwrap();
    engine.tick(&mut host, REWARD_DELAY_MS);
    assert!(engine.progress_for(PLAYER).unwrap().completed);

    host.messages.clear();
    engine.cmd_quest(&mut host, PLAYER, Some("hunter"));
    assert!(host
        .messages
        .iter()
        .any(|(_, m)| m.contains("early development")));
}

#[test]
fn progress_survives_restart_and_migrates_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = MockHost::new();
    host.spawn(PLAYER);

    {
        let mut engine = QuestEngine::new(
            QuestCatalog::builtin().unwrap(),
            ItemRegistry::builtin().unwrap(),
            Box::new(JsonFileStore::new(dir.path()).unwrap()),
        );
        opt_in(&mut engine, &mut host, PLAYER);
        engine.handle_event(&mut host, 0, &harvest("wood", 250));
    }

    let mut engine = QuestEngine::new(
        QuestCatalog::builtin().unwrap(),
        ItemRegistry::builtin().unwrap(),
        Box::new(JsonFileStore::new(dir.path()).unwrap()),
    );
    let record = engine.progress_for(PLAYER).unwrap();
    assert_eq!(record.quest_id, 1);
    assert_eq!(record.amount_for("wood"), 250);
    assert!(record.started);

    // Finish the quest, restart mid-delay: the reward is still owed.
    engine.handle_event(&mut host, 0, &harvest("wood", 150));
    engine.handle_event(&mut host, 0, &harvest("stones", 200));
    drop(engine);

    let mut engine = QuestEngine::new(
        QuestCatalog::builtin().unwrap(),
        ItemRegistry::builtin().unwrap(),
        Box::new(JsonFileStore::new(dir.path()).unwrap()),
    );
    let record = engine.progress_for(PLAYER).unwrap();
    assert!(record.reward_pending);
    assert!(!engine.delivery_in_flight(PLAYER));

    engine.claim_reward(&mut host, 0, PLAYER);
    assert_eq!(engine.progress_for(PLAYER).unwrap().quest_id, 2);
}
