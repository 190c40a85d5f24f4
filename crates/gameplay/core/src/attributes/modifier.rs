use std::ops::{Add, AddAssign};

/// Contribution accumulated into one modifier slot of an attribute.
///
/// Combining two modifiers sums the additive and multiplicative parts and
/// keeps the right-hand side's override, even when that override is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub additive: f32,
    pub multiplicative: f32,
    /// Non-zero replaces the computed value entirely.
    pub overriding: f32,
}

impl Modifier {
    pub const ZERO: Self = Self {
        additive: 0.0,
        multiplicative: 0.0,
        overriding: 0.0,
    };

    pub const fn additive(value: f32) -> Self {
        Self {
            additive: value,
            ..Self::ZERO
        }
    }

    pub const fn multiplicative(value: f32) -> Self {
        Self {
            multiplicative: value,
            ..Self::ZERO
        }
    }

    pub const fn overriding(value: f32) -> Self {
        Self {
            overriding: value,
            ..Self::ZERO
        }
    }
}

impl Add for Modifier {
    type Output = Modifier;

    fn add(self, rhs: Modifier) -> Modifier {
        Modifier {
            additive: self.additive + rhs.additive,
            multiplicative: self.multiplicative + rhs.multiplicative,
            overriding: rhs.overriding,
        }
    }
}

impl AddAssign for Modifier {
    fn add_assign(&mut self, rhs: Modifier) {
        *self = *self + rhs;
    }
}

/// Which accumulator a modifier lands in.
///
/// Core modifiers are folded in first, external ones on top, and an external
/// override beats a core override.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierKind {
    External,
    #[default]
    Core,
}
