use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{
    AttributeCalculator, BaseValueInitializer, Modifier, ModifierKind, StandardCurrentValue,
};

struct AttributeDef {
    name: String,
    initial: Arc<dyn AttributeCalculator>,
    current: Arc<dyn AttributeCalculator>,
}

/// Shared handle to an attribute definition.
///
/// Identity is the attribute name; two handles with the same name address
/// the same ledger slot.
#[derive(Clone)]
pub struct Attribute(Arc<AttributeDef>);

impl Attribute {
    /// Attribute using the identity initializer and the standard formula.
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    pub fn builder(name: impl Into<String>) -> AttributeBuilder {
        AttributeBuilder {
            name: name.into(),
            initial: Arc::new(BaseValueInitializer),
            current: Arc::new(StandardCurrentValue),
        }
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn initial_calculator(&self) -> &dyn AttributeCalculator {
        self.0.initial.as_ref()
    }

    pub fn current_calculator(&self) -> &dyn AttributeCalculator {
        self.0.current.as_ref()
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Attribute").field(&self.0.name).finish()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// Builder for [`Attribute`] with custom calculators.
pub struct AttributeBuilder {
    name: String,
    initial: Arc<dyn AttributeCalculator>,
    current: Arc<dyn AttributeCalculator>,
}

impl AttributeBuilder {
    pub fn initial_calculator(mut self, calculator: impl AttributeCalculator + 'static) -> Self {
        self.initial = Arc::new(calculator);
        self
    }

    pub fn current_calculator(mut self, calculator: impl AttributeCalculator + 'static) -> Self {
        self.current = Arc::new(calculator);
        self
    }

    pub fn build(self) -> Attribute {
        Attribute(Arc::new(AttributeDef {
            name: self.name,
            initial: self.initial,
            current: self.current,
        }))
    }
}

/// Stored state of one attribute in a ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeValue {
    pub attribute: Attribute,
    pub base_value: f32,
    pub current_value: f32,
    pub external_modifier: Modifier,
    pub core_modifier: Modifier,
}

impl AttributeValue {
    pub fn new(attribute: Attribute) -> Self {
        Self {
            attribute,
            base_value: 0.0,
            current_value: 0.0,
            external_modifier: Modifier::ZERO,
            core_modifier: Modifier::ZERO,
        }
    }

    pub fn modifier(&self, kind: ModifierKind) -> Modifier {
        match kind {
            ModifierKind::External => self.external_modifier,
            ModifierKind::Core => self.core_modifier,
        }
    }

    pub fn modifier_mut(&mut self, kind: ModifierKind) -> &mut Modifier {
        match kind {
            ModifierKind::External => &mut self.external_modifier,
            ModifierKind::Core => &mut self.core_modifier,
        }
    }

    /// Current value from base and modifiers, evaluated in fixed order.
    ///
    /// An external override wins over a core override; with neither set the
    /// result is `((base + core.add) * (1 + core.mul) + ext.add) * (1 + ext.mul)`.
    pub fn standard_current_value(&self) -> f32 {
        let external = self.external_modifier;
        let core = self.core_modifier;

        if external.overriding != 0.0 {
            return external.overriding;
        }
        if core.overriding != 0.0 {
            return core.overriding;
        }

        ((self.base_value + core.additive) * (1.0 + core.multiplicative) + external.additive)
            * (1.0 + external.multiplicative)
    }
}
