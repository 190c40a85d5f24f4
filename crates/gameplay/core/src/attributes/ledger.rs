use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::entity::EntityId;

use super::{Attribute, AttributeValue, Modifier, ModifierKind, nearly_equal};

/// Observes writes to a ledger, in registration order.
pub trait AttributeObserver: Send + Sync {
    /// Runs before a value is stored; may edit it (e.g. clamp).
    fn pre_change(&self, _owner: EntityId, _incoming: &mut AttributeValue) {}

    /// Runs after a value is stored.
    fn post_change(&self, _owner: EntityId, _old: &AttributeValue, _new: &AttributeValue) {}
}

/// Attributes owned by one entity.
///
/// Holds at most one [`AttributeValue`] per attribute. Lookups go through a
/// name→index cache that is dropped whenever an attribute is added and
/// rebuilt on the next lookup.
pub struct AttributeLedger {
    owner: EntityId,
    values: Vec<AttributeValue>,
    index: OnceCell<HashMap<String, usize>>,
    observers: Vec<Arc<dyn AttributeObserver>>,
}

impl AttributeLedger {
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            values: Vec::new(),
            index: OnceCell::new(),
            observers: Vec::new(),
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn subscribe(&mut self, observer: Arc<dyn AttributeObserver>) {
        self.observers.push(observer);
    }

    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn index_of(&self, attribute: &Attribute) -> Option<usize> {
        self.index
            .get_or_init(|| {
                self.values
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (value.attribute.name().to_owned(), index))
                    .collect()
            })
            .get(attribute.name())
            .copied()
    }

    pub fn has_attribute(&self, attribute: &Attribute) -> bool {
        self.index_of(attribute).is_some()
    }

    /// Adds `attribute` using its initial-value calculator. No-op if present.
    pub fn add_attribute(&mut self, attribute: &Attribute) {
        if self.has_attribute(attribute) {
            return;
        }

        let value = AttributeValue::new(attribute.clone());
        let value = attribute.initial_calculator().calculate(value, self);
        self.values.push(value);
        self.index.take();
    }

    pub fn try_get_attribute_value(&self, attribute: &Attribute) -> Option<&AttributeValue> {
        let value = self.index_of(attribute).map(|index| &self.values[index]);
        if value.is_none() {
            trace!(
                target: "gameplay::attributes",
                entity = %self.owner,
                attribute = attribute.name(),
                "Attribute not found"
            );
        }
        value
    }

    pub fn current_value(&self, attribute: &Attribute) -> Option<f32> {
        self.try_get_attribute_value(attribute)
            .map(|value| value.current_value)
    }

    pub fn base_value(&self, attribute: &Attribute) -> Option<f32> {
        self.try_get_attribute_value(attribute)
            .map(|value| value.base_value)
    }

    /// Sets the base value, adding the attribute first if missing, then
    /// re-evaluates every attribute in the ledger.
    pub fn try_set_base_value(&mut self, attribute: &Attribute, base_value: f32) {
        self.add_attribute(attribute);
        let Some(index) = self.index_of(attribute) else {
            return;
        };

        let mut value = self.values[index].clone();
        value.base_value = base_value;
        let value = attribute.current_calculator().calculate(value, self);
        self.store(index, value);

        self.update_attribute_values();
    }

    /// Accumulates `modifier` into one slot and recomputes that attribute.
    ///
    /// Returns false if the attribute is not in the ledger.
    pub fn try_add_modifier(
        &mut self,
        modifier: Modifier,
        attribute: &Attribute,
        kind: ModifierKind,
    ) -> bool {
        let Some(index) = self.index_of(attribute) else {
            return false;
        };

        let mut value = self.values[index].clone();
        *value.modifier_mut(kind) += modifier;
        let value = attribute.current_calculator().calculate(value, self);
        self.store(index, value);
        true
    }

    /// Replaces the stored value of `attribute`.
    ///
    /// The current value is recomputed from the incoming base and modifiers,
    /// so a stale or hand-edited `current_value` never lands in the ledger.
    /// Pre-change observers may edit the result before it is stored. Returns
    /// false if the attribute is not in the ledger or `value` belongs to a
    /// different attribute.
    pub fn set_attribute_value(&mut self, attribute: &Attribute, value: AttributeValue) -> bool {
        if value.attribute != *attribute {
            warn!(
                target: "gameplay::attributes",
                entity = %self.owner,
                slot = attribute.name(),
                incoming = value.attribute.name(),
                "Refusing value for a different attribute"
            );
            return false;
        }
        let Some(index) = self.index_of(attribute) else {
            return false;
        };

        let value = attribute.current_calculator().calculate(value, self);
        self.store(index, value);
        true
    }

    fn store(&mut self, index: usize, mut value: AttributeValue) {
        for observer in &self.observers {
            observer.pre_change(self.owner, &mut value);
        }

        let old = std::mem::replace(&mut self.values[index], value);

        for observer in &self.observers {
            observer.post_change(self.owner, &old, &self.values[index]);
        }
    }

    /// Re-runs every current-value calculator once, storing only values that
    /// actually changed.
    pub fn update_attribute_values(&mut self) {
        for index in 0..self.values.len() {
            let stored = self.values[index].clone();
            let attribute = stored.attribute.clone();
            let evaluated = attribute.current_calculator().calculate(stored, self);

            if !nearly_equal(evaluated.current_value, self.values[index].current_value) {
                self.store(index, evaluated);
            }
        }
    }

    /// Zeroes both modifier slots of every attribute. Base values and stored
    /// current values are untouched until the next update.
    pub fn reset_attribute_modifiers(&mut self) {
        for value in &mut self.values {
            value.external_modifier = Modifier::ZERO;
            value.core_modifier = Modifier::ZERO;
        }
    }

    /// Resets every attribute to a zeroed value, keeping the attribute set.
    pub fn reset_all_attributes(&mut self) {
        for value in &mut self.values {
            *value = AttributeValue::new(value.attribute.clone());
        }
    }
}

impl fmt::Debug for AttributeLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeLedger")
            .field("owner", &self.owner)
            .field("values", &self.values)
            .field("observers", &self.observers.len())
            .finish()
    }
}
