use super::{Attribute, AttributeLedger, AttributeValue};

/// Strategy computing an attribute value from its stored state.
///
/// Calculators must be pure over their inputs. The ledger is passed in so a
/// calculator can read other attributes.
pub trait AttributeCalculator: Send + Sync {
    fn calculate(&self, value: AttributeValue, ledger: &AttributeLedger) -> AttributeValue;
}

/// Initial-value strategy: current value starts at the base value.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseValueInitializer;

impl AttributeCalculator for BaseValueInitializer {
    fn calculate(&self, mut value: AttributeValue, _ledger: &AttributeLedger) -> AttributeValue {
        value.current_value = value.base_value;
        value
    }
}

/// Current-value strategy applying [`AttributeValue::standard_current_value`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCurrentValue;

impl AttributeCalculator for StandardCurrentValue {
    fn calculate(&self, mut value: AttributeValue, _ledger: &AttributeLedger) -> AttributeValue {
        value.current_value = value.standard_current_value();
        value
    }
}

/// Standard formula clamped to `[0, ceiling]`, where the ceiling is the
/// current value of another attribute in the same ledger.
///
/// The ceiling is ignored while the other attribute is absent.
#[derive(Clone, Debug)]
pub struct ClampToAttribute {
    pub ceiling: Attribute,
}

impl ClampToAttribute {
    pub fn new(ceiling: Attribute) -> Self {
        Self { ceiling }
    }
}

impl AttributeCalculator for ClampToAttribute {
    fn calculate(&self, mut value: AttributeValue, ledger: &AttributeLedger) -> AttributeValue {
        let mut current = value.standard_current_value().max(0.0);
        if let Some(ceiling) = ledger.current_value(&self.ceiling) {
            current = current.min(ceiling.max(0.0));
        }
        value.current_value = current;
        value
    }
}
