use super::{Attribute, AttributeLedger};

/// Ordered list of starting base values for an entity.
#[derive(Clone, Debug, Default)]
pub struct StatsInitializer {
    stats: Vec<(Attribute, f32)>,
}

impl StatsInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, attribute: Attribute, base_value: f32) -> Self {
        self.stats.push((attribute, base_value));
        self
    }

    pub fn push(&mut self, attribute: Attribute, base_value: f32) {
        self.stats.push((attribute, base_value));
    }

    pub fn stats(&self) -> &[(Attribute, f32)] {
        &self.stats
    }

    /// Adds every attribute and writes its base value, in list order.
    pub fn apply(&self, ledger: &mut AttributeLedger) {
        for (attribute, base_value) in &self.stats {
            ledger.add_attribute(attribute);
            ledger.try_set_base_value(attribute, *base_value);
        }
        ledger.update_attribute_values();
    }
}
