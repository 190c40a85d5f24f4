use crate::attributes::Attribute;
use crate::world::World;

use super::{CaptureSource, EffectSpec, ModifierOperation};

/// Modifier produced at application time rather than authored.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedModifier {
    pub attribute: Attribute,
    pub operation: ModifierOperation,
    pub magnitude: f32,
}

impl EvaluatedModifier {
    pub fn new(attribute: Attribute, operation: ModifierOperation, magnitude: f32) -> Self {
        Self {
            attribute,
            operation,
            magnitude,
        }
    }
}

/// Read-only view handed to custom executions.
pub struct ExecutionParams<'a> {
    pub spec: &'a EffectSpec,
    pub world: &'a World,
}

impl ExecutionParams<'_> {
    /// Current value of `attribute` on the source or target of the spec.
    pub fn capture(&self, attribute: &Attribute, from: CaptureSource) -> Option<f32> {
        let entity = match from {
            CaptureSource::Source => Some(self.spec.source()),
            CaptureSource::Target => self.spec.target(),
        }?;
        self.world
            .actor(entity)?
            .attributes()
            .current_value(attribute)
    }
}

/// Custom calculation run once when an effect becomes active.
///
/// Output modifiers are applied together with the authored ones, unscaled by
/// stack count. Typical use: damage that reads attack from the source and
/// defense from the target.
pub trait EffectExecution: Send + Sync {
    fn execute(&self, params: &ExecutionParams<'_>, output: &mut Vec<EvaluatedModifier>);
}
