//! Per-entity numeric attributes and their modifier accumulators.
//!
//! # Design
//!
//! An [`AttributeValue`] keeps the base value and two independent modifier
//! slots ([`ModifierKind::External`], [`ModifierKind::Core`]). The current
//! value is always derived from those three, never written on its own.
//!
//! Each [`Attribute`] carries two strategies: one computing the value when the
//! attribute is first added to a ledger, one computing the current value.
//! Both see the whole [`AttributeLedger`], so one attribute may read another
//! (health clamped to max health). The ledger re-evaluates every attribute
//! after a base value change; mutually dependent calculators are not detected.

mod calculator;
mod initializer;
mod ledger;
mod modifier;
mod value;

pub use calculator::{
    AttributeCalculator, BaseValueInitializer, ClampToAttribute, StandardCurrentValue,
};
pub use initializer::StatsInitializer;
pub use ledger::{AttributeLedger, AttributeObserver};
pub use modifier::{Modifier, ModifierKind};
pub use value::{Attribute, AttributeBuilder, AttributeValue};

/// Tolerance used when comparing recomputed values.
pub const EPSILON: f32 = 1e-5;

/// Relative float comparison used to skip no-op writes and zero divisors.
#[inline]
pub fn nearly_equal(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= EPSILON * a.abs().max(b.abs()).max(1.0)
}
