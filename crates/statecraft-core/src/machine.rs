use crate::{Blackboard, MachineId, Registry, StateRef};

/// Operations common to every machine.
///
/// All per-agent data lives in the blackboard handed to each call, so `&self` is enough to drive
/// a machine and one instance can be shared by many agents.
pub trait Machine<T: 'static> {
    fn registry(&self) -> &Registry<T>;

    /// Re-evaluates (where applicable) and runs the current state for one agent.
    fn tick(&self, target: &mut T, memory: &mut Blackboard);

    fn id(&self) -> MachineId {
        self.registry().machine()
    }

    fn get(&self, name: &str) -> Option<&StateRef<T>> {
        self.registry().get(name)
    }

    fn list(&self) -> Vec<&str> {
        self.registry().names()
    }

    /// Current state name recorded in `memory` for this machine.
    fn name<'m>(&self, memory: &'m Blackboard) -> Option<&'m str> {
        current_name(self.id(), memory)
    }
}

pub fn current_name(machine: MachineId, memory: &Blackboard) -> Option<&str> {
    memory.current_state(machine)
}

/// Moves the machine owning `registry` to `next` unconditionally.
///
/// Order: `exit` of the current state (if any), record the new name, `enter` of `next` (if any).
pub fn transition<T: 'static>(
    registry: &Registry<T>,
    next: Option<(&str, &StateRef<T>)>,
    target: &mut T,
    memory: &mut Blackboard,
) {
    let machine = registry.machine();
    let from = current_name(machine, memory).map(str::to_owned);

    if let Some(previous) = from.as_deref().and_then(|name| registry.get(name)) {
        previous.exit(target, memory);
    }

    let to = next.map(|(name, _)| name);
    memory.set_current_state(machine, to);
    tracing::debug!(machine = %machine, from = ?from, to = ?to, "transition");

    if let Some((_, state)) = next {
        state.enter(target, memory);
    }
}

/// Like [`transition`], but a no-op when `next` is already current.
///
/// Returns whether a transition happened.
pub fn select<T: 'static>(
    registry: &Registry<T>,
    next: Option<(&str, &StateRef<T>)>,
    target: &mut T,
    memory: &mut Blackboard,
) -> bool {
    if current_name(registry.machine(), memory) == next.map(|(name, _)| name) {
        return false;
    }

    transition(registry, next, target, memory);
    true
}
