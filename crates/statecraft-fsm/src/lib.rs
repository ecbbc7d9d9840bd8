//! Finite state machine over a statecraft blackboard.
//!
//! The FSM never looks at `potential`: it changes state only when the caller asks it to through
//! [`Fsm::to`], and each tick runs only the current state.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

use std::fmt;

use statecraft_core::{
    current_name, transition, Blackboard, MachineError, MachineId, Registry, StateRef,
};

pub use statecraft_core::Machine;

pub struct Fsm<T> {
    states: Registry<T>,
}

impl<T: 'static> Default for Fsm<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Fsm<T> {
    pub fn new() -> Self {
        Self::with_id(MachineId::new())
    }

    pub fn with_id(id: MachineId) -> Self {
        Self {
            states: Registry::new(id),
        }
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        state: StateRef<T>,
    ) -> Result<&mut Self, MachineError> {
        self.states.add(name, state)?;
        Ok(self)
    }

    /// Moves the machine to `name` for one agent.
    ///
    /// Runs `exit` on the current state (if any), records `name`, then runs `enter` on the new
    /// state. Targeting the current state re-enters it. Unknown names fail before anything is
    /// touched.
    pub fn to(
        &self,
        name: &str,
        target: &mut T,
        memory: &mut Blackboard,
    ) -> Result<&Self, MachineError> {
        let Some(state) = self.states.get(name) else {
            return Err(MachineError::UnknownState(name.to_string()));
        };

        transition(&self.states, Some((name, state)), target, memory);
        Ok(self)
    }
}

impl<T: 'static> Machine<T> for Fsm<T> {
    fn registry(&self) -> &Registry<T> {
        &self.states
    }

    fn tick(&self, target: &mut T, memory: &mut Blackboard) {
        let Some(name) = current_name(self.states.machine(), memory) else {
            return;
        };
        let Some(state) = self.states.get(name) else {
            return;
        };

        tracing::trace!(machine = %self.states.machine(), state = name, "fsm tick");
        state.tick(target, memory);
    }
}

impl<T: 'static> fmt::Debug for Fsm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("states", &self.states)
            .finish()
    }
}
