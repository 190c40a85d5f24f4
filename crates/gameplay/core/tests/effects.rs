use std::sync::{Arc, Mutex};

use gameplay_core::effects::{
    CaptureSource, DurationPolicy, EffectExecution, EffectObserver, EvaluatedModifier,
    ExecutionHook, ExecutionParams, ModifierExecution, ReduceStackStrategy, StackPolicy, common,
};
use gameplay_core::{
    Attribute, EffectApplication, EffectContext, EffectDef, EffectError, EffectPolicy,
    EffectSpec, EntityId, GameplayConfig, Magnitude, ModifierOperation, SideEffect,
    StackingDetails, StackingType, StatsInitializer, TagRegistry, TagRequirements, World,
};

fn health() -> Attribute {
    Attribute::new("Health")
}

fn spawn_hero(world: &mut World, base: f32) -> EntityId {
    world.spawn_with("hero", &StatsInitializer::new().with(health(), base))
}

fn hero_world(base: f32) -> (World, EntityId) {
    let mut world = World::default();
    let hero = spawn_hero(&mut world, base);
    (world, hero)
}

fn current(world: &World, entity: EntityId) -> f32 {
    world
        .actor(entity)
        .unwrap()
        .attributes()
        .current_value(&health())
        .unwrap()
}

fn base(world: &World, entity: EntityId) -> f32 {
    world
        .actor(entity)
        .unwrap()
        .attributes()
        .base_value(&health())
        .unwrap()
}

fn instant(operation: ModifierOperation, magnitude: f32) -> Arc<EffectDef> {
    EffectDef::builder("Instant")
        .modifier(health(), operation, magnitude)
        .build()
}

fn timed(operation: ModifierOperation, magnitude: f32, seconds: f32) -> Arc<EffectDef> {
    EffectDef::builder("Timed")
        .policy(EffectPolicy::duration(seconds))
        .modifier(health(), operation, magnitude)
        .build()
}

// ============================================================================
// Instant and duration
// ============================================================================

#[test]
fn instant_writes_base_and_never_becomes_resident() {
    let (mut world, hero) = hero_world(100.0);

    let result = world.apply_effect_to_self(hero, &instant(ModifierOperation::Add, -10.0));

    assert_eq!(result, Ok(EffectApplication::Executed));
    assert_eq!(current(&world, hero), 90.0);
    assert_eq!(base(&world, hero), 90.0);
    assert!(world.active_effects(hero).is_empty());

    // ticks rebuild modifiers from resident effects only
    world.tick(1.0);
    world.tick(1.0);
    assert_eq!(base(&world, hero), 90.0);
    assert_eq!(current(&world, hero), 90.0);
}

#[test]
fn instant_operations_on_base() {
    let cases = [
        (ModifierOperation::Add, 10.0, 110.0),
        (ModifierOperation::Multiply, 2.0, 200.0),
        (ModifierOperation::Divide, 2.0, 50.0),
        (ModifierOperation::Divide, 0.0, 100.0),
        (ModifierOperation::Override, 1.0, 1.0),
    ];

    for (operation, magnitude, expected) in cases {
        let (mut world, hero) = hero_world(100.0);
        world
            .apply_effect_to_self(hero, &instant(operation, magnitude))
            .unwrap();
        assert_eq!(current(&world, hero), expected, "{operation:?} {magnitude}");
    }
}

#[test]
fn duration_operations_modify_current_until_expiry() {
    let cases = [
        (ModifierOperation::Add, 10.0, 110.0),
        (ModifierOperation::Multiply, 1.0, 200.0),
        (ModifierOperation::Divide, 0.5, 50.0),
        (ModifierOperation::Override, 1.0, 1.0),
    ];

    for (operation, magnitude, expected) in cases {
        let (mut world, hero) = hero_world(100.0);
        let result = world
            .apply_effect_to_self(hero, &timed(operation, magnitude, 1.0))
            .unwrap();

        assert!(matches!(result, EffectApplication::Added(_)));
        assert_eq!(current(&world, hero), expected, "{operation:?}");
        assert_eq!(base(&world, hero), 100.0);

        world.tick(0.5);
        assert_eq!(current(&world, hero), expected, "{operation:?}");
        world.tick(0.5);
        assert_eq!(current(&world, hero), 100.0, "{operation:?}");
        assert!(world.active_effects(hero).is_empty());
    }
}

#[test]
fn applying_to_unknown_entities_is_refused() {
    let (mut world, hero) = hero_world(100.0);
    let def = instant(ModifierOperation::Add, 1.0);

    assert_eq!(
        world.apply_effect_to_self(EntityId(42), &def),
        Err(EffectError::UnknownEntity(EntityId(42)))
    );
    assert_eq!(
        world.apply_effect_to_target(EntityId(42), hero, &def, None),
        Err(EffectError::UnknownEntity(EntityId(42)))
    );
    assert_eq!(current(&world, hero), 100.0);
}

#[test]
fn modifier_on_missing_attribute_is_refused() {
    let (mut world, hero) = hero_world(100.0);
    let def = EffectDef::builder("Drain")
        .policy(EffectPolicy::duration(1.0))
        .modifier(Attribute::new("Mana"), ModifierOperation::Add, -5.0)
        .build();

    let result = world.apply_effect_to_self(hero, &def);
    assert!(matches!(
        result,
        Err(EffectError::MissingAttribute { index: 0, .. })
    ));
    assert!(world.active_effects(hero).is_empty());
}

// ============================================================================
// Stacking
// ============================================================================

fn stacking(seconds: f32, limit: u32) -> Arc<EffectDef> {
    EffectDef::builder("Rage")
        .policy(EffectPolicy::duration(seconds))
        .modifier(health(), ModifierOperation::Add, 10.0)
        .stacking(StackingDetails::new(StackingType::AggregateByTarget, limit))
        .build()
}

#[test]
fn stacks_scale_the_magnitude() {
    let (mut world, hero) = hero_world(100.0);
    let rage = stacking(5.0, 0);

    world.apply_effect_to_self(hero, &rage).unwrap();
    assert_eq!(current(&world, hero), 110.0);

    let second = world.apply_effect_to_self(hero, &rage).unwrap();
    assert!(matches!(
        second,
        EffectApplication::Stacked { stack_count: 2, .. }
    ));
    assert_eq!(current(&world, hero), 120.0);
    assert_eq!(world.active_effects(hero).len(), 1);
}

#[test]
fn overflow_reaction_matrix() {
    let exhausted = EffectDef::builder("Exhausted")
        .policy(EffectPolicy::duration(10.0))
        .build();

    for allow in [false, true] {
        for clear in [false, true] {
            let rage = EffectDef::builder("Rage")
                .policy(EffectPolicy::duration(10.0))
                .modifier(health(), ModifierOperation::Add, 10.0)
                .stacking(
                    StackingDetails::new(StackingType::AggregateByTarget, 2)
                        .with_overflow_effect(exhausted.clone())
                        .allow_overflow_application(allow)
                        .clear_stack_on_overflow(clear),
                )
                .build();
            let (mut world, hero) = hero_world(100.0);

            world.apply_effect_to_self(hero, &rage).unwrap();
            world.apply_effect_to_self(hero, &rage).unwrap();
            let third = world.apply_effect_to_self(hero, &rage).unwrap();

            let cleared = !allow && clear;
            let expected_len = if cleared { 1 } else { 2 };
            assert_eq!(
                world.active_effects(hero).len(),
                expected_len,
                "allow={allow} clear={clear}"
            );
            assert!(world.find_effect_by_def(hero, &exhausted).is_some());

            match (allow, cleared) {
                (true, _) => assert!(matches!(
                    third,
                    EffectApplication::Stacked { stack_count: 2, .. }
                )),
                (false, true) => assert_eq!(third, EffectApplication::OverflowCleared),
                (false, false) => assert!(matches!(third, EffectApplication::Overflowed(_))),
            }

            let rage_instance = world.find_effect_by_def(hero, &rage);
            if cleared {
                assert!(rage_instance.is_none());
                assert_eq!(current(&world, hero), 100.0);
            } else {
                assert_eq!(rage_instance.unwrap().stack_count(), 2);
                assert_eq!(current(&world, hero), 120.0);
            }
        }
    }
}

#[test]
fn aggregation_by_source_keeps_sources_apart() {
    let mut world = World::default();
    let hero = spawn_hero(&mut world, 100.0);
    let a = world.spawn("a");
    let b = world.spawn("b");
    let mark = EffectDef::builder("Mark")
        .policy(EffectPolicy::duration(5.0))
        .modifier(health(), ModifierOperation::Add, -1.0)
        .stacking(StackingDetails::new(StackingType::AggregateBySource, 0))
        .build();

    world.apply_effect_to_target(a, hero, &mark, None).unwrap();
    world.apply_effect_to_target(a, hero, &mark, None).unwrap();
    world.apply_effect_to_target(b, hero, &mark, None).unwrap();

    let counts: Vec<u32> = world
        .active_effects(hero)
        .iter()
        .map(|effect| effect.stack_count())
        .collect();
    assert_eq!(counts, vec![2, 1]);
    assert_eq!(current(&world, hero), 97.0);
}

#[test]
fn non_stacking_definitions_add_instances() {
    let (mut world, hero) = hero_world(100.0);
    let buff = timed(ModifierOperation::Add, 5.0, 5.0);

    world.apply_effect_to_self(hero, &buff).unwrap();
    world.apply_effect_to_self(hero, &buff).unwrap();

    assert_eq!(world.active_effects(hero).len(), 2);
    assert_eq!(current(&world, hero), 110.0);
}

#[test]
fn remove_effect_follows_the_reduce_strategy() {
    let (mut world, hero) = hero_world(100.0);
    let rage = stacking(10.0, 0);
    for _ in 0..3 {
        world.apply_effect_to_self(hero, &rage).unwrap();
    }
    assert_eq!(current(&world, hero), 130.0);

    assert!(world.remove_effect(hero, &rage));
    assert_eq!(current(&world, hero), 120.0);
    assert_eq!(world.active_effects(hero)[0].stack_count(), 2);

    let purge = EffectDef::builder("Purgeable")
        .policy(EffectPolicy::Duration(
            DurationPolicy::new(10.0)
                .with_stack(StackPolicy::new(1, ReduceStackStrategy::ReduceAllStacks)),
        ))
        .modifier(health(), ModifierOperation::Add, 7.0)
        .stacking(StackingDetails::new(StackingType::AggregateByTarget, 0))
        .build();
    world.apply_effect_to_self(hero, &purge).unwrap();
    world.apply_effect_to_self(hero, &purge).unwrap();
    assert_eq!(current(&world, hero), 134.0);

    assert!(world.remove_effect(hero, &purge));
    assert!(world.find_effect_by_def(hero, &purge).is_none());
    assert_eq!(current(&world, hero), 120.0);
    assert!(!world.remove_effect(hero, &purge));
}

#[test]
fn stack_change_can_restart_the_clock() {
    let (mut world, hero) = hero_world(100.0);
    let rage = EffectDef::builder("Rage")
        .policy(EffectPolicy::Duration(
            DurationPolicy::new(1.0).reset_on_stack_change(true),
        ))
        .modifier(health(), ModifierOperation::Add, 10.0)
        .stacking(StackingDetails::new(StackingType::AggregateByTarget, 0))
        .build();

    world.apply_effect_to_self(hero, &rage).unwrap();
    world.tick(0.75);
    world.apply_effect_to_self(hero, &rage).unwrap();
    world.tick(0.75);

    let instance = &world.active_effects(hero)[0];
    assert_eq!(instance.stack_count(), 2);
    assert!((instance.remaining_duration().unwrap() - 0.25).abs() < 1e-6);
    assert_eq!(current(&world, hero), 120.0);

    // expiry drops one stack and the restart keeps the rest alive
    world.tick(0.25);
    let instance = &world.active_effects(hero)[0];
    assert_eq!(instance.stack_count(), 1);
    assert!(instance.is_valid());
    assert_eq!(current(&world, hero), 110.0);
}

#[test]
fn do_nothing_pins_an_expired_instance_until_cancelled() {
    let (mut world, hero) = hero_world(100.0);
    let sticky = EffectDef::builder("Sticky")
        .policy(EffectPolicy::Duration(
            DurationPolicy::new(0.5)
                .with_stack(StackPolicy::new(1, ReduceStackStrategy::DoNothing)),
        ))
        .modifier(health(), ModifierOperation::Add, 10.0)
        .build();

    let handle = world
        .apply_effect_to_self(hero, &sticky)
        .unwrap()
        .handle()
        .unwrap();
    world.tick(0.5);

    assert_eq!(world.active_effects(hero).len(), 1);
    assert!(world.active_effects(hero)[0].is_expired());
    assert_eq!(current(&world, hero), 100.0);

    assert!(world.cancel_effect(hero, handle));
    world.tick(0.0);
    assert!(world.active_effects(hero).is_empty());
}

// ============================================================================
// Periodic and counter
// ============================================================================

#[test]
fn periodic_applies_exactly_n_times() {
    let (mut world, hero) = hero_world(100.0);
    let burn = instant(ModifierOperation::Add, -10.0);
    let dot = EffectDef::builder("Burning")
        .policy(EffectPolicy::periodic(3, 0.25, vec![burn]))
        .build();

    world.apply_effect_to_self(hero, &dot).unwrap();
    assert_eq!(current(&world, hero), 100.0);

    for expected in [90.0, 80.0, 70.0] {
        world.tick(0.25);
        assert_eq!(current(&world, hero), expected);
    }
    assert!(world.active_effects(hero).is_empty());

    world.tick(0.25);
    assert_eq!(current(&world, hero), 70.0);
}

#[test]
fn periodic_waits_a_full_interval() {
    let (mut world, hero) = hero_world(100.0);
    let dot = EffectDef::builder("Burning")
        .policy(EffectPolicy::periodic(
            2,
            0.25,
            vec![instant(ModifierOperation::Add, -10.0)],
        ))
        .build();
    world.apply_effect_to_self(hero, &dot).unwrap();

    world.tick(0.1);
    world.tick(0.1);
    assert_eq!(current(&world, hero), 100.0);
    world.tick(0.1);
    assert_eq!(current(&world, hero), 90.0);
}

#[test]
fn counter_expires_after_its_signals() {
    let armor = Attribute::new("Armor");
    let mut world = World::default();
    let hero = world.spawn_with("hero", &StatsInitializer::new().with(armor.clone(), 0.0));
    let ward = EffectDef::builder("Ward")
        .policy(EffectPolicy::counter(5, "hit"))
        .modifier(armor.clone(), ModifierOperation::Add, 5.0)
        .build();
    world.apply_effect_to_self(hero, &ward).unwrap();

    let armor_value = |world: &World| {
        world
            .actor(hero)
            .unwrap()
            .attributes()
            .current_value(&armor)
            .unwrap()
    };
    assert_eq!(armor_value(&world), 5.0);

    assert_eq!(world.signal_counter(hero, "miss"), 0);
    for _ in 0..4 {
        assert_eq!(world.signal_counter(hero, "hit"), 1);
        world.tick(1.0);
    }
    assert_eq!(armor_value(&world), 5.0);

    world.signal_counter(hero, "hit");
    assert!(world.active_effects(hero).is_empty());
    assert_eq!(armor_value(&world), 0.0);
    assert_eq!(world.signal_counter(hero, "hit"), 0);
}

// ============================================================================
// Side effects and tags
// ============================================================================

#[test]
fn granted_tags_live_as_long_as_the_effect() {
    let mut registry = TagRegistry::default();
    let shielded = registry.define("Shielded");
    let mut world = World::new(GameplayConfig::default(), registry);
    let hero = spawn_hero(&mut world, 100.0);
    let shield = EffectDef::builder("Shield")
        .policy(EffectPolicy::infinite())
        .side_effect(SideEffect::GrantTags(vec![shielded]))
        .build();

    world.apply_effect_to_self(hero, &shield).unwrap();
    assert!(world.actor(hero).unwrap().tags().contains(shielded));

    assert!(world.remove_effect(hero, &shield));
    assert!(!world.actor(hero).unwrap().tags().contains(shielded));
}

fn poison_world() -> (World, EntityId, Arc<EffectDef>, gameplay_core::TagId) {
    let mut registry = TagRegistry::default();
    let status = registry.define("Status");
    let poisoned = registry.define_child("Poisoned", status).unwrap();
    let mut world = World::new(GameplayConfig::default(), registry);
    let hero = spawn_hero(&mut world, 100.0);
    let poison = EffectDef::builder("Poison")
        .tag(poisoned)
        .policy(EffectPolicy::infinite())
        .modifier(health(), ModifierOperation::Add, -5.0)
        .build();
    world.apply_effect_to_self(hero, &poison).unwrap();
    (world, hero, poison, status)
}

#[test]
fn cleanse_removes_effects_under_a_parent_tag() {
    let (mut world, hero, poison, status) = poison_world();
    assert_eq!(current(&world, hero), 95.0);

    let cleanse = EffectDef::builder("Cleanse")
        .policy(EffectPolicy::duration(0.1))
        .side_effect(SideEffect::RemoveEffectsWithTags(vec![status]))
        .build();
    world.apply_effect_to_self(hero, &cleanse).unwrap();

    assert!(world.find_effect_by_def(hero, &poison).is_none());
    assert_eq!(current(&world, hero), 100.0);
}

#[test]
fn tag_expiry_is_deferred_to_the_next_tick() {
    let (mut world, hero, poison, status) = poison_world();

    assert_eq!(world.expire_effects_with_tag(hero, status), 1);
    let instance = world.find_effect_by_def(hero, &poison).unwrap();
    assert!(!instance.is_active());

    world.tick(0.0);
    assert!(world.find_effect_by_def(hero, &poison).is_none());
    assert_eq!(current(&world, hero), 100.0);
}

#[test]
fn remove_by_def_side_effect() {
    let (mut world, hero, poison, _) = poison_world();
    let antidote = EffectDef::builder("Antidote")
        .policy(EffectPolicy::duration(1.0))
        .side_effect(SideEffect::RemoveEffectsByDef(vec![poison.clone()]))
        .build();

    world.apply_effect_to_self(hero, &antidote).unwrap();
    assert!(world.find_effect_by_def(hero, &poison).is_none());
    assert_eq!(world.active_effects(hero).len(), 1);
}

#[test]
fn clear_effects_and_remove_by_handle() {
    let (mut world, hero) = hero_world(100.0);
    let buff = timed(ModifierOperation::Add, 5.0, 5.0);
    let first = world.apply_effect_to_self(hero, &buff).unwrap().handle().unwrap();
    world.apply_effect_to_self(hero, &buff).unwrap();
    world.apply_effect_to_self(hero, &buff).unwrap();

    assert!(world.remove_effect_by_handle(hero, first));
    assert!(world.effect(hero, first).is_none());
    assert_eq!(current(&world, hero), 110.0);

    world.clear_effects(hero);
    assert!(world.active_effects(hero).is_empty());
    assert_eq!(current(&world, hero), 100.0);
}

// ============================================================================
// Conditions, magnitudes, executions
// ============================================================================

#[test]
fn failed_condition_rejects_the_application() {
    let (mut world, hero) = hero_world(100.0);
    let never = EffectDef::builder("Never")
        .modifier(health(), ModifierOperation::Add, -10.0)
        .condition(common::ChanceToApply::new(0.0))
        .build();

    let result = world.apply_effect_to_self(hero, &never);
    assert!(matches!(
        result,
        Err(EffectError::ConditionFailed {
            condition: "ChanceToApply",
            ..
        })
    ));
    assert_eq!(current(&world, hero), 100.0);
}

#[test]
fn target_tag_requirements_gate_application() {
    let mut registry = TagRegistry::default();
    let wet = registry.define("Wet");
    let mut world = World::new(GameplayConfig::default(), registry);
    let hero = spawn_hero(&mut world, 100.0);
    let shock = EffectDef::builder("Shock")
        .modifier(health(), ModifierOperation::Add, -30.0)
        .condition(common::TargetTagRequirements::new(
            TagRequirements::new().require(wet),
        ))
        .build();

    assert!(world.apply_effect_to_self(hero, &shock).is_err());
    world.actor_mut(hero).unwrap().tags_mut().add_tag(wet);
    assert!(world.apply_effect_to_self(hero, &shock).is_ok());
    assert_eq!(current(&world, hero), 70.0);
}

#[test]
fn magnitudes_read_context_and_source() {
    let wisdom = Attribute::new("Wisdom");
    let mut world = World::default();
    let hero = spawn_hero(&mut world, 50.0);
    let healer = world.spawn_with("healer", &StatsInitializer::new().with(wisdom.clone(), 40.0));

    let heal = EffectDef::builder("Heal")
        .modifier(
            health(),
            ModifierOperation::Add,
            Magnitude::attribute_based(wisdom, CaptureSource::Source, 0.5),
        )
        .build();
    world.apply_effect_to_target(healer, hero, &heal, None).unwrap();
    assert_eq!(current(&world, hero), 70.0);

    let hit = EffectDef::builder("Hit")
        .modifier(
            health(),
            ModifierOperation::Add,
            Magnitude::SetByCaller("damage".into()),
        )
        .build();
    let context = EffectContext::new()
        .with_instigator(healer)
        .with_value("damage", -25.0);
    world
        .apply_effect_to_target(healer, hero, &hit, Some(context))
        .unwrap();
    assert_eq!(current(&world, hero), 45.0);

    // missing caller value evaluates to 0
    world.apply_effect_to_target(healer, hero, &hit, None).unwrap();
    assert_eq!(current(&world, hero), 45.0);

    let scaled = EffectDef::builder("Scaled")
        .modifier(
            health(),
            ModifierOperation::Add,
            Magnitude::Scalable {
                base: 10.0,
                per_level: 5.0,
            },
        )
        .build();
    let spec = world.make_outgoing_spec(healer, &scaled, Some(EffectContext::new().with_level(3.0)));
    world.apply_spec_to_self(hero, spec).unwrap();
    assert_eq!(current(&world, hero), 65.0);
}

struct Strike {
    attack: Attribute,
    defense: Attribute,
}

impl EffectExecution for Strike {
    fn execute(&self, params: &ExecutionParams<'_>, output: &mut Vec<EvaluatedModifier>) {
        let attack = params.capture(&self.attack, CaptureSource::Source).unwrap_or(0.0);
        let defense = params.capture(&self.defense, CaptureSource::Target).unwrap_or(0.0);
        output.push(EvaluatedModifier::new(
            health(),
            ModifierOperation::Add,
            -(attack - defense).max(0.0),
        ));
    }
}

#[test]
fn execution_computes_damage_from_both_sides() {
    let attack = Attribute::new("Attack");
    let defense = Attribute::new("Defense");
    let mut world = World::default();
    let attacker = world.spawn_with("attacker", &StatsInitializer::new().with(attack.clone(), 30.0));
    let defender = world.spawn_with(
        "defender",
        &StatsInitializer::new()
            .with(health(), 100.0)
            .with(defense.clone(), 10.0),
    );
    let strike = EffectDef::builder("Strike")
        .execution(Strike { attack, defense })
        .build();

    world
        .apply_effect_to_target(attacker, defender, &strike, None)
        .unwrap();
    assert_eq!(current(&world, defender), 80.0);
}

// ============================================================================
// Hooks and observers
// ============================================================================

struct NoNegative;

impl ExecutionHook for NoNegative {
    fn pre_execute(&self, execution: &ModifierExecution<'_>) -> bool {
        execution.magnitude >= 0.0
    }
}

struct Named(&'static str, i32, Arc<Mutex<Vec<&'static str>>>);

impl ExecutionHook for Named {
    fn priority(&self) -> i32 {
        self.1
    }

    fn post_execute(&self, _execution: &ModifierExecution<'_>) {
        self.2.lock().unwrap().push(self.0);
    }
}

#[test]
fn hooks_run_by_priority_and_can_veto() {
    let (mut world, hero) = hero_world(100.0);
    let order = Arc::new(Mutex::new(Vec::new()));
    let effects = world.actor_mut(hero).unwrap().effects_mut();
    effects.add_hook(Arc::new(Named("late", 10, order.clone())));
    effects.add_hook(Arc::new(Named("early", -1, order.clone())));
    effects.add_hook(Arc::new(NoNegative));

    world
        .apply_effect_to_self(hero, &instant(ModifierOperation::Add, -10.0))
        .unwrap();
    assert_eq!(current(&world, hero), 100.0);
    assert!(order.lock().unwrap().is_empty());

    world
        .apply_effect_to_self(hero, &instant(ModifierOperation::Add, 5.0))
        .unwrap();
    assert_eq!(current(&world, hero), 105.0);
    assert_eq!(*order.lock().unwrap(), vec!["early", "late"]);
}

#[derive(Default)]
struct Journal(Mutex<Vec<String>>);

impl EffectObserver for Journal {
    fn on_applied_to_self(&self, target: EntityId, spec: &EffectSpec) {
        self.push(format!("{target} got {}", spec.def().name()));
    }

    fn on_applied_to_target(&self, instigator: EntityId, target: EntityId, spec: &EffectSpec) {
        self.push(format!("{instigator} gave {} to {target}", spec.def().name()));
    }

    fn on_stack_changed(&self, _target: EntityId, _spec: &EffectSpec, old: u32, new: u32) {
        self.push(format!("stack {old}->{new}"));
    }

    fn on_removed(&self, target: EntityId, spec: &EffectSpec) {
        self.push(format!("{target} lost {}", spec.def().name()));
    }
}

impl Journal {
    fn push(&self, line: String) {
        self.0.lock().unwrap().push(line);
    }

    fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[test]
fn observers_follow_the_lifecycle() {
    let mut world = World::default();
    let hero = spawn_hero(&mut world, 100.0);
    let caster = world.spawn("caster");
    let hero_journal = Arc::new(Journal::default());
    let caster_journal = Arc::new(Journal::default());
    world
        .actor_mut(hero)
        .unwrap()
        .effects_mut()
        .subscribe(hero_journal.clone());
    world
        .actor_mut(caster)
        .unwrap()
        .effects_mut()
        .subscribe(caster_journal.clone());

    let slow = EffectDef::builder("Slow")
        .policy(EffectPolicy::duration(1.0))
        .build();
    world.apply_effect_to_target(caster, hero, &slow, None).unwrap();
    world.tick(1.0);

    assert_eq!(
        hero_journal.lines(),
        vec![
            format!("{hero} got Slow"),
            "stack 1->0".to_owned(),
            format!("{hero} lost Slow"),
        ]
    );
    assert_eq!(caster_journal.lines(), vec![format!("{caster} gave Slow to {hero}")]);
}
