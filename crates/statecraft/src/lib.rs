//! Umbrella crate that re-exports the `statecraft-*` building blocks.
//!
//! A host keeps one [`Blackboard`](core::Blackboard) per agent and one machine per behavior set.
//! Machines and states can be shared by any number of agents; every call takes the agent (the
//! `target`) and its blackboard explicitly.
//!
//! ```
//! use std::rc::Rc;
//!
//! use statecraft::prelude::*;
//!
//! struct Graze {
//!     base: StateBase,
//! }
//!
//! impl State<u32> for Graze {
//!     fn base(&self) -> &StateBase {
//!         &self.base
//!     }
//!
//!     fn tick(&self, eaten: &mut u32, _memory: &mut Blackboard) {
//!         *eaten += 1;
//!     }
//! }
//!
//! let mut fsm = Fsm::<u32>::new();
//! fsm.add("graze", Rc::new(Graze { base: StateBase::new() })).unwrap();
//!
//! let (mut eaten, mut memory) = (0u32, Blackboard::new());
//! fsm.to("graze", &mut eaten, &mut memory).unwrap();
//! fsm.tick(&mut eaten, &mut memory);
//!
//! assert_eq!(fsm.name(&memory), Some("graze"));
//! assert_eq!(eaten, 1);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub use statecraft_core as core;

#[cfg(feature = "fsm")]
#[cfg_attr(docsrs, doc(cfg(feature = "fsm")))]
pub use statecraft_fsm as fsm;

#[cfg(feature = "subsumption")]
#[cfg_attr(docsrs, doc(cfg(feature = "subsumption")))]
pub use statecraft_subsumption as subsumption;

#[cfg(feature = "utility")]
#[cfg_attr(docsrs, doc(cfg(feature = "utility")))]
pub use statecraft_utility as utility;

pub mod prelude {
    pub use statecraft_core::{
        Blackboard, Machine, MachineError, MachineId, Potential, Scope, State, StateBase, StateId,
        StateRef,
    };

    #[cfg(feature = "fsm")]
    pub use statecraft_fsm::Fsm;

    #[cfg(feature = "subsumption")]
    pub use statecraft_subsumption::Subsumption;

    #[cfg(feature = "utility")]
    pub use statecraft_utility::{Utility, UtilityConfig};
}
