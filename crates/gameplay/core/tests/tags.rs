use std::sync::{Arc, Mutex};

use gameplay_core::tags::TagListener;
use gameplay_core::{EntityId, GameplayConfig, TagError, TagRegistry, TagRequirements, World};

fn status_tree() -> (TagRegistry, [gameplay_core::TagId; 3]) {
    let mut registry = TagRegistry::default();
    let status = registry.define("StatusEffect");
    let burning = registry.define_child("Burning", status).unwrap();
    let stunned = registry.define_child("Stunned", status).unwrap();
    (registry, [status, burning, stunned])
}

#[test]
fn held_child_satisfies_parent_query_only_with_depth() {
    let (registry, [status, burning, _]) = status_tree();
    let mut world = World::new(GameplayConfig::default(), registry);
    let hero = world.spawn("hero");
    world.actor_mut(hero).unwrap().tags_mut().add_tag(burning);

    let tags = world.actor(hero).unwrap().tags();
    assert!(tags.has_tag_within(status, 1));
    assert!(!tags.has_tag_within(status, 0));
    assert!(tags.has_tag(status));
    // direction is child-satisfies-parent, never the reverse
    assert!(tags.has_tag_within(burning, 0));
}

#[test]
fn container_queries_follow_the_configured_depth() {
    let (registry, [status, burning, _]) = status_tree();
    let config = GameplayConfig::new().with_query_depth(0);
    let mut world = World::new(config, registry);
    let hero = world.spawn("hero");
    world.actor_mut(hero).unwrap().tags_mut().add_tag(burning);

    assert!(!world.actor(hero).unwrap().tags().has_tag(status));
}

#[test]
fn any_all_none_fold_over_sets() {
    let (registry, [status, burning, stunned]) = status_tree();
    let mut world = World::new(GameplayConfig::default(), registry);
    let hero = world.spawn("hero");
    world.actor_mut(hero).unwrap().tags_mut().add_tag(burning);
    let tags = world.actor(hero).unwrap().tags();

    assert!(tags.has_any(&[stunned, status]));
    assert!(!tags.has_all(&[burning, stunned]));
    assert!(tags.has_all(&[]));
    assert!(!tags.has_any(&[]));
    assert!(tags.has_none(&[stunned]));

    let requirements = TagRequirements::new().require(status).ignore(stunned);
    assert!(requirements.is_satisfied_by(tags));
}

#[test]
fn parent_chain_past_max_depth_is_cleared() {
    let mut registry = TagRegistry::new(GameplayConfig::DEFAULT_MAX_TAG_DEPTH);
    let mut parent = registry.define("level0");
    for level in 1..=10 {
        parent = registry.define_child(format!("level{level}"), parent).unwrap();
    }

    let leaf = registry.define("level11");
    let result = registry.set_parent(leaf, Some(parent));
    assert!(matches!(result, Err(TagError::DepthExceeded { max_depth: 10, .. })));
    assert_eq!(registry.parent(leaf), None);
}

#[test]
fn reparenting_a_subtree_respects_max_depth() {
    let mut registry = TagRegistry::new(2);
    let root = registry.define("Root");
    let upper = registry.define("Upper");
    let middle = registry.define("Middle");
    let leaf = registry.define_child("Leaf", middle).unwrap();
    registry.set_parent(upper, Some(root)).unwrap();

    let result = registry.set_parent(middle, Some(upper));
    assert!(matches!(result, Err(TagError::DepthExceeded { max_depth: 2, .. })));
    assert_eq!(registry.parent(middle), None);
    assert_eq!(registry.parent(leaf), Some(middle));
    assert!(registry.depth(leaf) <= 2);

    // the same subtree fits one level higher
    registry.set_parent(middle, Some(root)).unwrap();
    assert_eq!(registry.depth(leaf), 2);
}

#[derive(Default)]
struct Recorder(Mutex<Vec<String>>);

impl TagListener for Recorder {
    fn on_tags_added(&self, owner: EntityId, tags: &[gameplay_core::TagId]) {
        self.0.lock().unwrap().push(format!("{owner} +{}", tags.len()));
    }

    fn on_tag_removed(&self, owner: EntityId, tag: gameplay_core::TagId) {
        self.0.lock().unwrap().push(format!("{owner} -{}", tag.0));
    }
}

#[test]
fn listeners_see_adds_and_single_removals() {
    let (registry, [_, burning, stunned]) = status_tree();
    let mut world = World::new(GameplayConfig::default(), registry);
    let hero = world.spawn("hero");
    let recorder = Arc::new(Recorder::default());

    let tags = world.actor_mut(hero).unwrap().tags_mut();
    tags.subscribe(recorder.clone());
    tags.add_tags(&[burning, burning, stunned]);
    tags.remove_tag(burning);
    // absent tags are not reported
    tags.remove_tags(&[stunned, stunned]);

    assert!(tags.contains(burning));
    assert!(!tags.contains(stunned));
    assert_eq!(
        *recorder.0.lock().unwrap(),
        vec![
            format!("{hero} +3"),
            format!("{hero} -{}", burning.0),
            format!("{hero} -{}", stunned.0),
        ]
    );
}
