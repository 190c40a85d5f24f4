use std::fmt;
use std::sync::Arc;

use crate::attributes::Attribute;
use crate::world::World;

use super::EffectSpec;

/// Which side of an application an attribute is read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CaptureSource {
    #[default]
    Source,
    Target,
}

/// Designer-supplied magnitude computation.
pub trait MagnitudeCalculator: Send + Sync {
    /// `None` means the magnitude could not be computed; the modifier then
    /// contributes 0.
    fn calculate(&self, spec: &EffectSpec, world: &World) -> Option<f32>;
}

/// How a modifier's magnitude is derived at application time.
#[derive(Clone)]
pub enum Magnitude {
    Constant(f32),
    /// `base + per_level * (level - 1)`, reading the level from the context.
    Scalable { base: f32, per_level: f32 },
    /// Value stored in the context under this key.
    SetByCaller(String),
    /// `(captured + pre_add) * coefficient + post_add`.
    AttributeBased {
        attribute: Attribute,
        capture: CaptureSource,
        use_base_value: bool,
        coefficient: f32,
        pre_add: f32,
        post_add: f32,
    },
    Custom(Arc<dyn MagnitudeCalculator>),
}

impl Magnitude {
    /// Scales `attribute` captured from `capture` by `coefficient`.
    pub fn attribute_based(attribute: Attribute, capture: CaptureSource, coefficient: f32) -> Self {
        Self::AttributeBased {
            attribute,
            capture,
            use_base_value: false,
            coefficient,
            pre_add: 0.0,
            post_add: 0.0,
        }
    }

    pub fn custom(calculator: impl MagnitudeCalculator + 'static) -> Self {
        Self::Custom(Arc::new(calculator))
    }

    pub fn evaluate(&self, spec: &EffectSpec, world: &World) -> Option<f32> {
        match self {
            Self::Constant(value) => Some(*value),
            Self::Scalable { base, per_level } => {
                Some(base + per_level * (spec.context().level - 1.0))
            }
            Self::SetByCaller(key) => spec.context().value(key),
            Self::AttributeBased {
                attribute,
                capture,
                use_base_value,
                coefficient,
                pre_add,
                post_add,
            } => {
                let entity = match capture {
                    CaptureSource::Source => Some(spec.source()),
                    CaptureSource::Target => spec.target(),
                }?;
                let value = world
                    .actor(entity)?
                    .attributes()
                    .try_get_attribute_value(attribute)?;
                let captured = if *use_base_value {
                    value.base_value
                } else {
                    value.current_value
                };
                Some((captured + pre_add) * coefficient + post_add)
            }
            Self::Custom(calculator) => calculator.calculate(spec, world),
        }
    }
}

impl From<f32> for Magnitude {
    fn from(value: f32) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Debug for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Scalable { base, per_level } => f
                .debug_struct("Scalable")
                .field("base", base)
                .field("per_level", per_level)
                .finish(),
            Self::SetByCaller(key) => f.debug_tuple("SetByCaller").field(key).finish(),
            Self::AttributeBased {
                attribute,
                capture,
                coefficient,
                ..
            } => f
                .debug_struct("AttributeBased")
                .field("attribute", attribute)
                .field("capture", capture)
                .field("coefficient", coefficient)
                .finish_non_exhaustive(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}
