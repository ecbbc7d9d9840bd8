use std::fmt;

use crate::{MachineError, MachineId, StateRef};

/// Ordered `(name, state)` table owned by a machine.
///
/// Names are unique; insertion order is preserved and is the evaluation order of the selecting
/// machines.
pub struct Registry<T> {
    machine: MachineId,
    entries: Vec<(String, StateRef<T>)>,
}

impl<T: 'static> Registry<T> {
    pub fn new(machine: MachineId) -> Self {
        Self {
            machine,
            entries: Vec::new(),
        }
    }

    pub fn machine(&self) -> MachineId {
        self.machine
    }

    /// Registers `state` under `name` and points its machine link at this registry's machine.
    pub fn add(&mut self, name: impl Into<String>, state: StateRef<T>) -> Result<(), MachineError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(MachineError::DuplicateName(name));
        }

        state.base().attach(self.machine);
        tracing::debug!(machine = %self.machine, state = %name, id = %state.id(), "state registered");
        self.entries.push((name, state));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&StateRef<T>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, state)| state)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateRef<T>)> {
        self.entries.iter().map(|(n, state)| (n.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: 'static> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("machine", &self.machine)
            .field("states", &self.names())
            .finish()
    }
}
