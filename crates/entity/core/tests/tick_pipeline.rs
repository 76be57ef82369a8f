use std::collections::BTreeMap;

use entity_core::{
    AttackRecord, AttackStyle, AttributeKind, AttributeMask, AttributeTable, DataFrame,
    EntityConfig, EntityId, EntityRegistry, Env, EquipmentSummary, InventoryStore, ItemHandle,
    ItemStack, LootOutcome, MapDimensions, Position, RegistryError, ResolvedActions, SkillLevels,
    SpawnSpec, TableCommit, TableError,
};

const A: EntityId = EntityId(1);
const B: EntityId = EntityId(2);
const C: EntityId = EntityId(3);

#[derive(Default)]
struct Bags(BTreeMap<EntityId, Vec<ItemStack>>);

impl InventoryStore for Bags {
    fn items(&self, entity: EntityId) -> Vec<ItemStack> {
        self.0.get(&entity).cloned().unwrap_or_default()
    }

    fn take_all(&mut self, entity: EntityId) -> Vec<ItemStack> {
        self.0.remove(&entity).unwrap_or_default()
    }

    fn receive_loot(&mut self, entity: EntityId, items: Vec<ItemStack>) -> LootOutcome {
        let received = items.len();
        self.0.entry(entity).or_default().extend(items);
        LootOutcome {
            received,
            dropped: Vec::new(),
        }
    }

    fn equipment(&self, _entity: EntityId) -> EquipmentSummary {
        EquipmentSummary::empty()
    }
}

/// Wilderness rises with distance from the map centre; the inner ring is safe.
fn ring_wilderness(_: &EntityConfig, position: Position) -> i32 {
    position.l1_distance(Position::new(8, 8)) as i32 - 3
}

struct World {
    config: EntityConfig,
    map: MapDimensions,
    skills: SkillLevels,
    table: DataFrame,
    bags: Bags,
    registry: EntityRegistry,
}

impl World {
    fn new() -> Self {
        Self {
            config: EntityConfig::default(),
            map: MapDimensions::new(16, 16),
            skills: SkillLevels::new(10, 10),
            table: DataFrame::new(),
            bags: Bags::default(),
            registry: EntityRegistry::new(),
        }
    }

    fn spawn(&mut self, id: EntityId, position: Position) {
        let env = Env::new(&self.config, &self.map, &ring_wilderness, &self.skills);
        self.registry
            .spawn(&env, &mut self.table, SpawnSpec::new(id, position).with_name("Agent"))
            .unwrap();
    }

    /// One tick: update every living entity, resolve `hits`, then commit.
    fn tick(
        &mut self,
        actions: &BTreeMap<EntityId, ResolvedActions>,
        hits: &[(EntityId, Option<EntityId>, u32)],
    ) -> TableCommit {
        let env = Env::new(&self.config, &self.map, &ring_wilderness, &self.skills);
        let living: Vec<EntityId> = self
            .registry
            .iter()
            .filter(|entity| entity.is_alive(&self.table).unwrap())
            .map(|entity| entity.id())
            .collect();
        for id in living {
            let idle = ResolvedActions::idle();
            let entity_actions = actions.get(&id).unwrap_or(&idle);
            self.registry
                .update(id, &env, &mut self.table, entity_actions)
                .unwrap();
        }
        for &(target, source, amount) in hits {
            self.registry
                .apply_damage(&mut self.table, &mut self.bags, target, source, amount)
                .unwrap();
        }
        self.table.commit()
    }

    fn hit(&mut self, target: EntityId, source: Option<EntityId>, amount: u32) -> bool {
        self.registry
            .apply_damage(&mut self.table, &mut self.bags, target, source, amount)
            .unwrap()
    }
}

#[test]
fn kill_transfers_loot_to_registered_killer() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    world.spawn(B, Position::new(2, 3));
    world
        .bags
        .0
        .insert(A, vec![ItemStack::new(ItemHandle(4), 2), ItemStack::new(ItemHandle(5), 1)]);
    world
        .registry
        .get(A)
        .unwrap()
        .resources()
        .health()
        .set(&mut world.table, 1)
        .unwrap();

    let survived = world.hit(A, Some(B), 5);

    assert!(!survived);
    assert!(world.bags.items(A).is_empty());
    assert_eq!(world.bags.items(B).len(), 2);
    assert_eq!(world.registry.resolve_attacker(A), Some(B));

    let removed = world.registry.remove_dead(&mut world.table).unwrap();
    assert_eq!(removed, vec![A]);
    assert!(!world.registry.contains(A));
    assert!(!world.table.contains_row(A));
}

#[test]
fn removed_source_counts_as_environmental_damage() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    world.spawn(B, Position::new(2, 3));
    world.bags.0.insert(A, vec![ItemStack::new(ItemHandle(4), 1)]);
    world.registry.remove(&mut world.table, B).unwrap();

    let survived = world.hit(A, Some(B), 50);

    assert!(survived);
    assert_eq!(world.bags.items(A).len(), 1);
    assert_eq!(world.registry.get(A).unwrap().history().last_attacker(), None);
}

#[test]
fn attacker_resolves_to_none_once_removed() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    world.spawn(B, Position::new(2, 3));

    world.hit(A, Some(B), 2);
    assert_eq!(world.registry.resolve_attacker(A), Some(B));

    world.registry.remove(&mut world.table, B).unwrap();
    assert_eq!(world.registry.get(A).unwrap().history().last_attacker(), Some(B));
    assert_eq!(world.registry.resolve_attacker(A), None);
}

#[test]
fn damage_is_observable_until_next_update() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    world.spawn(B, Position::new(2, 3));

    let commit = world.tick(&BTreeMap::new(), &[(A, Some(B), 2)]);
    assert!(commit.fields_of(A).contains(AttributeMask::DAMAGE | AttributeMask::HEALTH));
    assert_eq!(world.table.observe(A, AttributeKind::Damage), Some(2));
    assert_eq!(world.table.observe(A, AttributeKind::Health), Some(8));
    assert_eq!(world.registry.resolve_attacker(A), Some(B));

    world.tick(&BTreeMap::new(), &[]);

    assert_eq!(world.table.observe(A, AttributeKind::Damage), Some(0));
    assert_eq!(world.registry.resolve_attacker(A), None);
    // +1 regen while fed and watered.
    assert_eq!(world.table.observe(A, AttributeKind::Health), Some(9));
}

#[test]
fn latest_hit_sets_attacker() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    world.spawn(B, Position::new(2, 3));
    world.spawn(C, Position::new(3, 2));

    world.tick(&BTreeMap::new(), &[(A, Some(B), 1)]);
    world.tick(&BTreeMap::new(), &[(A, Some(C), 1)]);
    assert_eq!(world.registry.resolve_attacker(A), Some(C));

    world.tick(&BTreeMap::new(), &[(A, None, 1)]);
    assert_eq!(world.registry.resolve_attacker(A), None);
    assert_eq!(world.table.observe(A, AttributeKind::Damage), Some(1));
}

#[test]
fn unknown_target_is_rejected() {
    let mut world = World::new();
    let err = world
        .registry
        .apply_damage(&mut world.table, &mut world.bags, C, None, 1)
        .unwrap_err();
    assert_eq!(err, RegistryError::EntityNotFound(C));
}

#[test]
fn duplicate_spawn_is_rejected() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    let env = Env::new(&world.config, &world.map, &ring_wilderness, &world.skills);
    let err = world
        .registry
        .spawn(&env, &mut world.table, SpawnSpec::new(A, Position::new(3, 3)))
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateEntity(A));
}

#[test]
fn observers_see_tick_results_only_after_commit() {
    let mut world = World::new();
    world.spawn(A, Position::new(8, 8));
    world.table.commit();
    assert_eq!(world.table.observe(A, AttributeKind::Wilderness), Some(-3));

    let mut actions = BTreeMap::new();
    actions.insert(A, ResolvedActions::move_to(Position::new(8, 12)));

    let env = Env::new(&world.config, &world.map, &ring_wilderness, &world.skills);
    world
        .registry
        .update(A, &env, &mut world.table, &actions[&A])
        .unwrap();

    assert_eq!(world.table.get(A, AttributeKind::Col).unwrap(), 12);
    assert_eq!(world.table.observe(A, AttributeKind::Col), Some(8));

    let commit = world.table.commit();
    assert_eq!(world.table.observe(A, AttributeKind::Col), Some(12));
    assert_eq!(world.table.observe(A, AttributeKind::Wilderness), Some(1));
    let fields = commit.fields_of(A);
    assert!(fields.contains(AttributeMask::COL | AttributeMask::WILDERNESS | AttributeMask::TIME_ALIVE));
    assert!(!fields.contains(AttributeMask::ROW));
}

#[test]
fn starving_entity_dies_and_is_removed() {
    let mut world = World::new();
    world.spawn(A, Position::new(4, 4));
    {
        let a = world.registry.get(A).unwrap();
        a.resources().food().set(&mut world.table, 0).unwrap();
        a.resources().water().set(&mut world.table, 0).unwrap();
    }

    // 10 health, 2 per tick.
    for _ in 0..4 {
        world.tick(&BTreeMap::new(), &[]);
    }
    let a = world.registry.get(A).unwrap();
    assert_eq!(a.resources().health().get(&world.table).unwrap(), 2);
    assert_eq!(a.history().time_alive(&world.table).unwrap(), 4);

    world.tick(&BTreeMap::new(), &[]);
    assert!(!world.registry.get(A).unwrap().is_alive(&world.table).unwrap());
    assert_eq!(world.registry.remove_dead(&mut world.table).unwrap(), vec![A]);
}

#[test]
fn attack_record_lives_until_next_update() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    world.spawn(B, Position::new(2, 3));

    let attack = AttackRecord::new(AttackStyle::Melee, B, 3);
    world.registry.get_mut(A).unwrap().record_attack(attack);
    world.hit(B, Some(A), 3);
    world.table.commit();

    let packet = world
        .registry
        .get(A)
        .unwrap()
        .packet(&world.table, &world.bags)
        .unwrap();
    assert_eq!(packet.history.attack, Some(attack));

    world.tick(&BTreeMap::new(), &[]);
    let packet = world
        .registry
        .get(A)
        .unwrap()
        .packet(&world.table, &world.bags)
        .unwrap();
    assert_eq!(packet.history.attack, None);
    assert_eq!(packet.history.time_alive, 1);
}

#[test]
fn packet_taken_mid_tick_shows_previous_tick() {
    let mut world = World::new();
    world.spawn(A, Position::new(8, 8));
    world.table.commit();

    let env = Env::new(&world.config, &world.map, &ring_wilderness, &world.skills);
    world
        .registry
        .update(A, &env, &mut world.table, &ResolvedActions::move_to(Position::new(8, 12)))
        .unwrap();

    let a = world.registry.get(A).unwrap();
    assert_eq!(a.history().time_alive(&world.table).unwrap(), 1);
    let packet = a.full_packet(&world.table, &world.bags).unwrap();
    assert_eq!(packet.entity.history.time_alive, 0);
    assert_eq!(packet.entity.status.wilderness, -3);
    assert_eq!(packet.base.c, 8);

    world.table.commit();
    let a = world.registry.get(A).unwrap();
    let packet = a.full_packet(&world.table, &world.bags).unwrap();
    assert_eq!(packet.entity.history.time_alive, 1);
    assert_eq!(packet.entity.status.wilderness, 1);
    assert_eq!(packet.base.c, 12);
}

#[test]
fn packet_before_first_commit_is_rejected() {
    let mut world = World::new();
    world.spawn(A, Position::new(2, 2));
    let err = world
        .registry
        .get(A)
        .unwrap()
        .packet(&world.table, &world.bags)
        .unwrap_err();
    assert_eq!(err, TableError::NotCommitted(A));
}

#[test]
fn packet_json_layout_is_stable() {
    let mut world = World::new();
    world.spawn(A, Position::new(8, 8));
    world.spawn(B, Position::new(8, 9));
    world.hit(A, Some(B), 4);
    world.table.commit();

    let a = world.registry.get(A).unwrap();
    let json = serde_json::to_value(a.packet(&world.table, &world.bags).unwrap()).unwrap();

    assert_eq!(
        json["status"],
        serde_json::json!({"wilderness": -3, "immune": 0, "freeze": 0})
    );
    assert_eq!(json["history"], serde_json::json!({"damage": 4, "timeAlive": 0}));
    assert_eq!(json["alive"], serde_json::json!(true));
    assert!(json.get("equipment").is_some());

    let full = serde_json::to_value(a.full_packet(&world.table, &world.bags).unwrap()).unwrap();
    assert_eq!(full["base"]["name"], serde_json::json!("Agent1"));
    assert_eq!(full["base"]["self"], serde_json::json!(true));
    assert_eq!(full["resources"]["health"], serde_json::json!({"val": 6, "max": 10}));
    assert_eq!(full["alive"], serde_json::json!(true));
}
