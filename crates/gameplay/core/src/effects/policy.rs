use std::sync::Arc;

use super::EffectDef;

/// How an applied effect lives on its target.
#[derive(Clone, Debug)]
pub enum EffectPolicy {
    /// Writes into base values once and never becomes resident.
    Instant,
    /// Resident until removed; never expires by itself.
    Infinite(StackPolicy),
    Duration(DurationPolicy),
    Periodic(PeriodicPolicy),
    Counter(CounterPolicy),
}

impl EffectPolicy {
    pub fn duration(seconds: f32) -> Self {
        Self::Duration(DurationPolicy::new(seconds))
    }

    pub fn periodic(active_times: u32, interval: f32, effects: Vec<Arc<EffectDef>>) -> Self {
        Self::Periodic(PeriodicPolicy::new(active_times, interval, effects))
    }

    pub fn counter(count: u32, channel: impl Into<String>) -> Self {
        Self::Counter(CounterPolicy::new(count, channel))
    }

    pub fn infinite() -> Self {
        Self::Infinite(StackPolicy::default())
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, Self::Instant)
    }

    /// Stack settings shared by every resident policy.
    pub fn stack_policy(&self) -> Option<&StackPolicy> {
        match self {
            Self::Instant => None,
            Self::Infinite(stack) => Some(stack),
            Self::Duration(policy) => Some(&policy.stack),
            Self::Periodic(policy) => Some(&policy.stack),
            Self::Counter(policy) => Some(&policy.stack),
        }
    }

    /// Whether a stack change restarts the clock.
    pub fn resets_on_stack_change(&self) -> bool {
        match self {
            Self::Instant | Self::Infinite(_) => false,
            Self::Duration(policy) => policy.reset_on_stack_change,
            Self::Periodic(policy) => policy.reset_on_stack_change,
            Self::Counter(policy) => policy.reset_on_stack_change,
        }
    }
}

/// What happens to the stack count when a resident effect is removed or
/// expires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReduceStackStrategy {
    /// Keeps the count; the instance stays until cancelled or cleared.
    DoNothing,
    #[default]
    ReduceSingleStack,
    ReduceAllStacks,
}

impl ReduceStackStrategy {
    pub fn reduce(self, stack_count: u32) -> u32 {
        match self {
            Self::DoNothing => stack_count,
            Self::ReduceSingleStack => stack_count.saturating_sub(1),
            Self::ReduceAllStacks => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackPolicy {
    /// Stacks added by one application.
    pub stack_per_active: u32,
    pub reduce: ReduceStackStrategy,
}

impl StackPolicy {
    pub fn new(stack_per_active: u32, reduce: ReduceStackStrategy) -> Self {
        Self {
            stack_per_active,
            reduce,
        }
    }
}

impl Default for StackPolicy {
    fn default() -> Self {
        Self::new(1, ReduceStackStrategy::default())
    }
}

#[derive(Clone, Debug)]
pub struct DurationPolicy {
    pub duration: f32,
    pub reset_on_stack_change: bool,
    pub stack: StackPolicy,
}

impl DurationPolicy {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            reset_on_stack_change: false,
            stack: StackPolicy::default(),
        }
    }

    #[must_use]
    pub fn reset_on_stack_change(mut self, reset: bool) -> Self {
        self.reset_on_stack_change = reset;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: StackPolicy) -> Self {
        self.stack = stack;
        self
    }
}

/// Applies `effects` to the owner every `interval` seconds, `active_times` times.
#[derive(Clone, Debug)]
pub struct PeriodicPolicy {
    pub active_times: u32,
    pub interval: f32,
    pub effects: Vec<Arc<EffectDef>>,
    pub reset_on_stack_change: bool,
    pub stack: StackPolicy,
}

impl PeriodicPolicy {
    pub fn new(active_times: u32, interval: f32, effects: Vec<Arc<EffectDef>>) -> Self {
        Self {
            active_times,
            interval,
            effects,
            reset_on_stack_change: false,
            stack: StackPolicy::default(),
        }
    }

    #[must_use]
    pub fn reset_on_stack_change(mut self, reset: bool) -> Self {
        self.reset_on_stack_change = reset;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: StackPolicy) -> Self {
        self.stack = stack;
        self
    }
}

/// Expires after `count` signals on `channel`
/// (see [`World::signal_counter`](crate::World::signal_counter)).
#[derive(Clone, Debug)]
pub struct CounterPolicy {
    pub count: u32,
    pub channel: String,
    pub reset_on_stack_change: bool,
    pub stack: StackPolicy,
}

impl CounterPolicy {
    pub fn new(count: u32, channel: impl Into<String>) -> Self {
        Self {
            count,
            channel: channel.into(),
            reset_on_stack_change: false,
            stack: StackPolicy::default(),
        }
    }

    #[must_use]
    pub fn reset_on_stack_change(mut self, reset: bool) -> Self {
        self.reset_on_stack_change = reset;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: StackPolicy) -> Self {
        self.stack = stack;
        self
    }
}

/// Remaining time or count of a resident effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PolicyClock {
    None,
    Duration { remaining: f32 },
    Periodic { until_next: f32, remaining_times: u32 },
    Counter { remaining: u32 },
}

impl PolicyClock {
    pub fn start(policy: &EffectPolicy) -> Self {
        match policy {
            EffectPolicy::Instant | EffectPolicy::Infinite(_) => Self::None,
            EffectPolicy::Duration(policy) => Self::Duration {
                remaining: policy.duration,
            },
            EffectPolicy::Periodic(policy) => Self::Periodic {
                until_next: policy.interval,
                remaining_times: policy.active_times,
            },
            EffectPolicy::Counter(policy) => Self::Counter {
                remaining: policy.count,
            },
        }
    }
}
