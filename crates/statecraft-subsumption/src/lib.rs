//! Subsumption architecture over a statecraft blackboard.
//!
//! States are checked in insertion order (highest priority first). The first state whose
//! `potential` is applicable becomes current and is ticked; when none is applicable the machine
//! falls back to no current state.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

use std::fmt;

use statecraft_core::{select, Blackboard, MachineError, MachineId, Registry, StateRef};

pub use statecraft_core::Machine;

pub struct Subsumption<T> {
    states: Registry<T>,
}

impl<T: 'static> Default for Subsumption<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Subsumption<T> {
    pub fn new() -> Self {
        Self::with_id(MachineId::new())
    }

    pub fn with_id(id: MachineId) -> Self {
        Self {
            states: Registry::new(id),
        }
    }

    /// Appends a state below every state added before it.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        state: StateRef<T>,
    ) -> Result<&mut Self, MachineError> {
        self.states.add(name, state)?;
        Ok(self)
    }
}

impl<T: 'static> Machine<T> for Subsumption<T> {
    fn registry(&self) -> &Registry<T> {
        &self.states
    }

    fn tick(&self, target: &mut T, memory: &mut Blackboard) {
        let target_view: &T = &*target;
        let memory_view: &Blackboard = &*memory;

        // Stops at the first applicable state; lower priorities are not evaluated.
        let winner = self
            .states
            .iter()
            .find(|(_, state)| state.potential(target_view, memory_view).is_applicable());

        select(&self.states, winner, target, memory);

        let Some((name, state)) = winner else {
            tracing::trace!(machine = %self.states.machine(), "subsumption tick: no applicable state");
            return;
        };

        tracing::trace!(machine = %self.states.machine(), state = name, "subsumption tick");
        state.tick(target, memory);
    }
}

impl<T: 'static> fmt::Debug for Subsumption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subsumption")
            .field("states", &self.states)
            .finish()
    }
}
