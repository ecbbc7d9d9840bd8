use std::cell::Cell;
use std::rc::Rc;

use crate::{Blackboard, MachineId, Scope, StateId};

/// Shared handle to a state. The same state may be registered in several machines.
pub type StateRef<T> = Rc<dyn State<T>>;

/// Self-reported fitness of a state.
///
/// Subsumption reads it as a flag ([`Potential::is_applicable`]); Utility compares the score.
/// NaN collapses to [`Potential::NONE`], which is neither applicable nor selectable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Potential(f32);

impl Potential {
    pub const NONE: Self = Self(f32::NEG_INFINITY);

    pub fn new(score: f32) -> Self {
        if score.is_nan() {
            Self::NONE
        } else {
            Self(score)
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_applicable(self) -> bool {
        self.0 > 0.0
    }
}

impl Default for Potential {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<bool> for Potential {
    fn from(value: bool) -> Self {
        if value {
            Self(1.0)
        } else {
            Self(0.0)
        }
    }
}

impl From<f32> for Potential {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Identity embedded in every state: its id plus the machine that registered it.
///
/// The machine link is a plain id, stamped by the registry on `add`. When a state is registered
/// in several machines it points at the most recent one.
#[derive(Debug, Default)]
pub struct StateBase {
    id: StateId,
    machine: Cell<Option<MachineId>>,
}

impl StateBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: StateId) -> Self {
        Self {
            id,
            machine: Cell::new(None),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn machine(&self) -> Option<MachineId> {
        self.machine.get()
    }

    pub(crate) fn attach(&self, machine: MachineId) {
        self.machine.set(Some(machine));
    }

    /// Per-machine-per-state scope of this state; global while the state is unattached.
    pub fn scope(&self) -> Scope {
        Scope::resolve(self.machine(), Some(self.id))
    }
}

/// Behavior unit driven by a machine.
///
/// Hooks take `&self`: a state keeps no per-agent data and must only read and write through the
/// `target` and `memory` it is handed, which lets one instance serve many agents and machines.
pub trait State<T>: 'static {
    fn base(&self) -> &StateBase;

    fn id(&self) -> StateId {
        self.base().id()
    }

    fn machine(&self) -> Option<MachineId> {
        self.base().machine()
    }

    fn scope(&self) -> Scope {
        self.base().scope()
    }

    /// Called once when a machine adopts this state, before its first tick.
    fn enter(&self, _target: &mut T, _memory: &mut Blackboard) {}

    /// Called once per machine tick while this state is current.
    fn tick(&self, _target: &mut T, _memory: &mut Blackboard) {}

    /// Called once when the state is displaced, before the successor's `enter`.
    fn exit(&self, _target: &mut T, _memory: &mut Blackboard) {}

    /// Side-effect-free fitness evaluation used by Subsumption and Utility.
    fn potential(&self, _target: &T, _memory: &Blackboard) -> Potential {
        tracing::warn!(state = %self.id(), "potential not implemented");
        Potential::NONE
    }
}
