//! Utility selection over a statecraft blackboard.
//!
//! Every tick scores all registered states and runs the highest-scoring one. Tie-breaking is
//! stable by insertion order: a later state must score strictly higher to win.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

use std::fmt;

use statecraft_core::{select, Blackboard, MachineError, MachineId, Registry, StateRef};

pub use statecraft_core::Machine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityConfig {
    /// Minimum score required to select a state.
    ///
    /// When the best score is below this threshold the tick does nothing and the current state is
    /// kept, exactly as with an empty machine.
    pub min_score: f32,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        Self {
            min_score: f32::NEG_INFINITY,
        }
    }
}

pub struct Utility<T> {
    states: Registry<T>,
    config: UtilityConfig,
}

impl<T: 'static> Default for Utility<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Utility<T> {
    pub fn new() -> Self {
        Self::with_id(MachineId::new())
    }

    pub fn with_id(id: MachineId) -> Self {
        Self {
            states: Registry::new(id),
            config: UtilityConfig::default(),
        }
    }

    pub fn with_config(mut self, config: UtilityConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> UtilityConfig {
        self.config
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        state: StateRef<T>,
    ) -> Result<&mut Self, MachineError> {
        self.states.add(name, state)?;
        Ok(self)
    }
}

impl<T: 'static> Machine<T> for Utility<T> {
    fn registry(&self) -> &Registry<T> {
        &self.states
    }

    fn tick(&self, target: &mut T, memory: &mut Blackboard) {
        let target_view: &T = &*target;
        let memory_view: &Blackboard = &*memory;

        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;

        // Score everything, even once the winner is obvious.
        for (name, state) in self.states.iter() {
            let score = state.potential(target_view, memory_view).value();
            if score > best_score {
                best_score = score;
                best = Some((name, state));
            }
        }

        let Some((name, state)) = best else {
            tracing::trace!(machine = %self.states.machine(), "utility tick: nothing to select");
            return;
        };

        if best_score < self.config.min_score {
            tracing::trace!(
                machine = %self.states.machine(),
                state = name,
                score = best_score,
                "utility tick: best score below threshold"
            );
            return;
        }

        select(&self.states, Some((name, state)), target, memory);

        tracing::trace!(machine = %self.states.machine(), state = name, score = best_score, "utility tick");
        state.tick(target, memory);
    }
}

impl<T: 'static> fmt::Debug for Utility<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utility")
            .field("states", &self.states)
            .field("config", &self.config)
            .finish()
    }
}
