use std::any::Any;
use std::collections::BTreeMap;

use crate::{MachineId, StateId};

type Memory = BTreeMap<String, Box<dyn Any>>;

/// Partition of blackboard storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Visible to every machine and state driving the agent.
    Global,
    /// Shared by the states of a single machine.
    Machine(MachineId),
    /// Private to one state within one machine.
    State(MachineId, StateId),
}

impl Scope {
    /// Picks the innermost scope implied by the ids present.
    ///
    /// A state id without a machine id falls back to [`Scope::Global`]; it is not an error.
    pub fn resolve(machine: Option<MachineId>, state: Option<StateId>) -> Self {
        match (machine, state) {
            (Some(machine), Some(state)) => Scope::State(machine, state),
            (Some(machine), None) => Scope::Machine(machine),
            (None, _) => Scope::Global,
        }
    }
}

impl From<MachineId> for Scope {
    fn from(value: MachineId) -> Self {
        Scope::Machine(value)
    }
}

impl From<(MachineId, StateId)> for Scope {
    fn from((machine, state): (MachineId, StateId)) -> Self {
        Scope::State(machine, state)
    }
}

#[derive(Default)]
struct MachineMemory {
    current: Option<String>,
    values: Memory,
    states: BTreeMap<StateId, Memory>,
}

/// Per-agent memory shared between machines and their states.
///
/// Storage is split into three nested scopes (see [`Scope`]). Writes lazily create the scopes they
/// need; reads never allocate, so looking up an unknown machine or state leaves no trace. A read with
/// a type other than the stored one is treated like a miss.
///
/// Each machine also keeps its current state name here, outside the key space reachable through
/// `get`/`set`.
#[derive(Default)]
pub struct Blackboard {
    global: Memory,
    machines: BTreeMap<MachineId, MachineMemory>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: 'static>(&mut self, key: impl Into<String>, value: V, scope: impl Into<Scope>) {
        self.memory_mut(scope.into())
            .insert(key.into(), Box::new(value));
    }

    pub fn get<V: 'static>(&self, key: &str, scope: impl Into<Scope>) -> Option<&V> {
        self.memory(scope.into())?.get(key)?.downcast_ref::<V>()
    }

    pub fn get_mut<V: 'static>(&mut self, key: &str, scope: impl Into<Scope>) -> Option<&mut V> {
        self.memory_existing_mut(scope.into())?
            .get_mut(key)?
            .downcast_mut::<V>()
    }

    pub fn contains(&self, key: &str, scope: impl Into<Scope>) -> bool {
        self.memory(scope.into())
            .is_some_and(|memory| memory.contains_key(key))
    }

    /// Current state name recorded by `machine`.
    pub fn current_state(&self, machine: MachineId) -> Option<&str> {
        self.machines.get(&machine)?.current.as_deref()
    }

    /// Records the current state of `machine`; `None` means no active state.
    pub fn set_current_state(&mut self, machine: MachineId, name: Option<&str>) {
        self.machines.entry(machine).or_default().current = name.map(str::to_owned);
    }

    fn memory(&self, scope: Scope) -> Option<&Memory> {
        match scope {
            Scope::Global => Some(&self.global),
            Scope::Machine(machine) => self.machines.get(&machine).map(|m| &m.values),
            Scope::State(machine, state) => self.machines.get(&machine)?.states.get(&state),
        }
    }

    fn memory_existing_mut(&mut self, scope: Scope) -> Option<&mut Memory> {
        match scope {
            Scope::Global => Some(&mut self.global),
            Scope::Machine(machine) => self.machines.get_mut(&machine).map(|m| &mut m.values),
            Scope::State(machine, state) => {
                self.machines.get_mut(&machine)?.states.get_mut(&state)
            }
        }
    }

    fn memory_mut(&mut self, scope: Scope) -> &mut Memory {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Machine(machine) => &mut self.machines.entry(machine).or_default().values,
            Scope::State(machine, state) => self
                .machines
                .entry(machine)
                .or_default()
                .states
                .entry(state)
                .or_default(),
        }
    }
}
