//! Core primitives shared by every statecraft machine.
//!
//! Machines and states hold no per-agent data. Everything an agent needs at runtime lives in its
//! own [`Blackboard`], namespaced by machine id (and state id), so one machine instance can drive
//! any number of agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod error;
pub mod id;
pub mod machine;
pub mod registry;
pub mod state;

pub use blackboard::{Blackboard, Scope};
pub use error::MachineError;
pub use id::{MachineId, StateId};
pub use machine::{current_name, select, transition, Machine};
pub use registry::Registry;
pub use state::{Potential, State, StateBase, StateRef};
