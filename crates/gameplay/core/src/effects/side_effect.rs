use std::sync::Arc;

use crate::abilities::AbilityDef;
use crate::tags::TagId;

use super::EffectDef;

/// Extra state change made on the target when a resident effect is added,
/// and undone (where meaningful) when it is removed.
#[derive(Clone, Debug)]
pub enum SideEffect {
    /// Tags held for the lifetime of the effect.
    GrantTags(Vec<TagId>),
    /// Abilities granted for the lifetime of the effect.
    GrantAbilities(Vec<Arc<AbilityDef>>),
    /// Cancels effects on the target whose tag matches any of these.
    RemoveEffectsWithTags(Vec<TagId>),
    /// Removes (one stack of) the given definitions from the target.
    RemoveEffectsByDef(Vec<Arc<EffectDef>>),
}
