//! A mage and a knight trading abilities until one drops or time runs out.
use std::sync::Arc;

use anyhow::{Context, Result};
use gameplay_core::abilities::common::CostCondition;
use gameplay_core::attributes::{ClampToAttribute, nearly_equal};
use gameplay_core::effects::EffectObserver;
use gameplay_core::tags::TagListener;
use gameplay_core::{
    AbilityDef, AbilitySpecId, ApplyEffectsBehavior, Attribute, AttributeObserver,
    AttributeValue, EffectDef, EffectPolicy, EffectSpec, EntityId, ModifierOperation,
    SideEffect, TagId, TagRegistry, TagRequirements, World,
};
use tracing::{debug, info, warn};

use crate::config::SandboxConfig;
use crate::content::Content;

/// Outcome of a finished duel.
#[derive(Clone, Debug, PartialEq)]
pub struct DuelReport {
    pub rounds: u32,
    pub mage_health: f32,
    pub knight_health: f32,
    pub winner: Option<&'static str>,
}

struct Attributes {
    max_health: Attribute,
    health: Attribute,
    mana: Attribute,
}

impl Attributes {
    fn new() -> Self {
        let max_health = Attribute::new("MaxHealth");
        let health = Attribute::builder("Health")
            .current_calculator(ClampToAttribute::new(max_health.clone()))
            .build();
        Self {
            max_health,
            health,
            mana: Attribute::new("Mana"),
        }
    }

    fn catalog(&self) -> Vec<Attribute> {
        vec![
            self.max_health.clone(),
            self.health.clone(),
            self.mana.clone(),
        ]
    }
}

struct Tags {
    status: TagId,
    burning: TagId,
    stunned: TagId,
    casting: TagId,
    spell: TagId,
    melee: TagId,
}

impl Tags {
    fn resolve(registry: &TagRegistry) -> Result<Self> {
        let find = |name: &str| {
            registry
                .find(name)
                .with_context(|| format!("Tag tree is missing '{name}'"))
        };
        Ok(Self {
            status: find("Status")?,
            burning: find("Status.Burning")?,
            stunned: find("Status.Stunned")?,
            casting: find("State.Casting")?,
            spell: find("Ability.Spell")?,
            melee: find("Ability.Melee")?,
        })
    }
}

pub struct Duel {
    world: World,
    attributes: Attributes,
    mage: EntityId,
    knight: EntityId,
    fireball: AbilitySpecId,
    strike: AbilitySpecId,
    second_wind: AbilitySpecId,
    stun: Arc<EffectDef>,
}

impl Duel {
    const STUN_CHANCE: f32 = 0.3;

    pub fn new(config: &SandboxConfig) -> Result<Self> {
        let attributes = Attributes::new();
        let content = Content::load(config.data_dir.as_deref(), &attributes.catalog())?;
        let tags = Tags::resolve(&content.tags)?;

        let stats = |archetype: &str| {
            content
                .stats
                .get(archetype)
                .with_context(|| format!("No stats for archetype '{archetype}'"))
        };
        let mage_stats = stats("mage")?;
        let knight_stats = stats("knight")?;

        let mut world = World::new(content.config.clone(), content.tags.clone());
        let mage = world.spawn_with("mage", mage_stats);
        let knight = world.spawn_with("knight", knight_stats);

        let log = Arc::new(CombatLog);
        for entity in [mage, knight] {
            if let Some(actor) = world.actor_mut(entity) {
                actor.attributes_mut().subscribe(log.clone());
                actor.effects_mut().subscribe(log.clone());
                actor.tags_mut().subscribe(log.clone());
            }
        }

        let instant = |name: &str, attribute: &Attribute, amount: f32| {
            EffectDef::builder(name)
                .modifier(attribute.clone(), ModifierOperation::Add, amount)
                .build()
        };

        // ===== mage =====
        let burn = EffectDef::builder("Burn")
            .tag(tags.burning)
            .policy(EffectPolicy::periodic(
                3,
                1.0,
                vec![instant("Burn Tick", &attributes.health, -6.0)],
            ))
            .side_effect(SideEffect::GrantTags(vec![tags.burning]))
            .build();
        let fireball = AbilityDef::builder("Fireball")
            .ability_tag(tags.spell)
            .activation_tag(tags.casting)
            .condition(CostCondition::new(attributes.mana.clone(), 10.0))
            .behavior(
                ApplyEffectsBehavior::new()
                    .on_self(instant("Fireball Cost", &attributes.mana, -10.0))
                    .on_targets(instant("Fireball Hit", &attributes.health, -10.0))
                    .on_targets(burn)
                    .end_immediately(),
            )
            .build();
        let meditation = EffectDef::builder("Meditation")
            .policy(EffectPolicy::periodic(
                config.max_rounds,
                1.0,
                vec![instant("Mana Tick", &attributes.mana, 4.0)],
            ))
            .build();
        let stun = EffectDef::builder("Stun")
            .tag(tags.stunned)
            .policy(EffectPolicy::duration(1.0))
            .side_effect(SideEffect::GrantTags(vec![tags.stunned]))
            .build();

        // ===== knight =====
        let strike = AbilityDef::builder("Strike")
            .ability_tag(tags.melee)
            .owner_requirements(TagRequirements::new().ignore(tags.stunned))
            .behavior(
                ApplyEffectsBehavior::new()
                    .on_targets(instant("Strike Hit", &attributes.health, -9.0))
                    .end_immediately(),
            )
            .build();
        let cleanse = EffectDef::builder("Cleanse")
            .policy(EffectPolicy::duration(0.5))
            .side_effect(SideEffect::RemoveEffectsWithTags(vec![tags.status]))
            .build();
        let second_wind = AbilityDef::builder("Second Wind")
            .owner_requirements(
                TagRequirements::new()
                    .require(tags.burning)
                    .ignore(tags.stunned),
            )
            .behavior(
                ApplyEffectsBehavior::new()
                    .on_self(cleanse)
                    .on_self(instant("Second Wind Heal", &attributes.health, 8.0))
                    .end_immediately(),
            )
            .build();

        world.apply_effect_to_self(mage, &meditation)?;
        let grant = |world: &mut World, owner: EntityId, def: &Arc<AbilityDef>| {
            world
                .give_ability(owner, def)
                .with_context(|| format!("Failed to grant {}", def.name()))
        };
        let fireball = grant(&mut world, mage, &fireball)?;
        let strike = grant(&mut world, knight, &strike)?;
        let second_wind = grant(&mut world, knight, &second_wind)?;

        Ok(Self {
            world,
            attributes,
            mage,
            knight,
            fireball,
            strike,
            second_wind,
            stun,
        })
    }

    pub fn run(mut self, config: &SandboxConfig) -> DuelReport {
        let mut rounds = 0;
        while rounds < config.max_rounds {
            rounds += 1;
            info!(target: "sandbox", round = rounds, "Round start");

            self.mage_turn();
            self.knight_turn();
            self.world.tick(config.tick);

            if self.health(self.mage) <= 0.0 || self.health(self.knight) <= 0.0 {
                break;
            }
        }

        let mage_health = self.health(self.mage);
        let knight_health = self.health(self.knight);
        let winner = match (mage_health > 0.0, knight_health > 0.0) {
            (true, false) => Some("mage"),
            (false, true) => Some("knight"),
            _ => None,
        };
        DuelReport {
            rounds,
            mage_health,
            knight_health,
            winner,
        }
    }

    fn mage_turn(&mut self) {
        if !self.world.try_activate(self.mage, self.fireball, &[self.knight]) {
            return;
        }
        if self
            .world
            .roll_chance(self.mage, self.knight, Self::STUN_CHANCE)
            && let Err(error) =
                self.world
                    .apply_effect_to_target(self.mage, self.knight, &self.stun, None)
        {
            warn!(target: "sandbox", error = %error, "Stun failed");
        }
    }

    fn knight_turn(&mut self) {
        if self.world.try_activate(self.knight, self.second_wind, &[]) {
            return;
        }
        if !self.world.try_activate(self.knight, self.strike, &[self.mage]) {
            debug!(target: "sandbox", "Knight could not act");
        }
    }

    fn health(&self, entity: EntityId) -> f32 {
        self.value(entity, &self.attributes.health)
    }

    fn value(&self, entity: EntityId, attribute: &Attribute) -> f32 {
        self.world
            .actor(entity)
            .and_then(|actor| actor.attributes().current_value(attribute))
            .unwrap_or(0.0)
    }
}

/// Logs every attribute, effect and tag change it observes.
struct CombatLog;

impl AttributeObserver for CombatLog {
    fn post_change(&self, owner: EntityId, old: &AttributeValue, new: &AttributeValue) {
        if nearly_equal(old.current_value, new.current_value) {
            return;
        }
        info!(
            target: "sandbox",
            entity = %owner,
            attribute = new.attribute.name(),
            old = old.current_value,
            new = new.current_value,
            "Attribute changed"
        );
    }
}

impl EffectObserver for CombatLog {
    fn on_applied_to_self(&self, target: EntityId, spec: &EffectSpec) {
        info!(target: "sandbox", entity = %target, effect = spec.def().name(), "Effect applied");
    }

    fn on_stack_changed(&self, target: EntityId, spec: &EffectSpec, old: u32, new: u32) {
        info!(
            target: "sandbox",
            entity = %target,
            effect = spec.def().name(),
            old,
            new,
            "Effect stacks changed"
        );
    }

    fn on_removed(&self, target: EntityId, spec: &EffectSpec) {
        info!(target: "sandbox", entity = %target, effect = spec.def().name(), "Effect removed");
    }
}

impl TagListener for CombatLog {
    fn on_tags_added(&self, owner: EntityId, tags: &[TagId]) {
        debug!(target: "sandbox", entity = %owner, count = tags.len(), "Tags added");
    }

    fn on_tag_removed(&self, owner: EntityId, tag: TagId) {
        debug!(target: "sandbox", entity = %owner, tag = ?tag, "Tag removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> SandboxConfig {
        SandboxConfig {
            data_dir: None,
            max_rounds: 6,
            tick: 1.0,
        }
    }

    #[test]
    fn duel_is_deterministic() {
        let config = builtin();
        let first = Duel::new(&config).unwrap().run(&config);
        let second = Duel::new(&config).unwrap().run(&config);
        assert_eq!(first, second);
    }

    #[test]
    fn first_round_trades_damage() {
        let config = SandboxConfig {
            max_rounds: 1,
            ..builtin()
        };
        let report = Duel::new(&config).unwrap().run(&config);

        assert_eq!(report.rounds, 1);
        assert!(report.knight_health < 120.0);
        // Burning knights spend their turn on Second Wind.
        assert_eq!(report.mage_health, 80.0);
    }

    #[test]
    fn fireball_spends_mana() {
        let config = builtin();
        let mut duel = Duel::new(&config).unwrap();
        let before = duel.value(duel.mage, &duel.attributes.mana);

        assert!(duel.world.try_activate(duel.mage, duel.fireball, &[duel.knight]));
        assert_eq!(duel.value(duel.mage, &duel.attributes.mana), before - 10.0);
        assert!(
            duel.world
                .actor(duel.knight)
                .unwrap()
                .tags()
                .contains(Tags::resolve(duel.world.tag_registry()).unwrap().burning)
        );
    }
}
