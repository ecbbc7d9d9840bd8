//! A small flock driven by one shared FSM.
//!
//! Every sheep owns its blackboard; the machine and its three states are shared. States never
//! switch the machine themselves: they leave a request in the blackboard and the host loop applies
//! it with `Fsm::to`.
//!
//! Run with `RUST_LOG=debug cargo run -p statecraft --example sheep` to see every transition.

use std::rc::Rc;

use statecraft::prelude::*;
use tracing_subscriber::EnvFilter;

const OBEY_DISTANCE: f32 = 4.0;
const FORGET_TICKS: u64 = 10;
const STOPPING_TICKS: u64 = 15;
const TICKS: u64 = 120;

/// Global key: current simulation tick.
const NOW: &str = "now";
/// Global key: state requested by the running state, applied by the host.
const WANTS: &str = "wants";

#[derive(Debug)]
struct Sheep {
    x: f32,
    speed: f32,
    pointer_distance: f32,
    pointer_side: f32,
}

impl Sheep {
    fn at(x: f32) -> Self {
        Self {
            x,
            speed: 0.0,
            pointer_distance: f32::INFINITY,
            pointer_side: 1.0,
        }
    }

    fn flee(&mut self, push: f32) {
        self.speed = (self.speed + push).min(1.5);
        self.x -= self.pointer_side * self.speed;
    }

    fn slow_down(&mut self, decay: f32) {
        self.speed *= decay;
        self.x -= self.pointer_side * self.speed;
    }
}

fn now(memory: &Blackboard) -> u64 {
    memory.get::<u64>(NOW, Scope::Global).copied().unwrap_or(0)
}

fn request(memory: &mut Blackboard, next: &'static str) {
    memory.set(WANTS, Some(next), Scope::Global);
}

fn take_request(memory: &mut Blackboard) -> Option<&'static str> {
    let next = memory
        .get::<Option<&'static str>>(WANTS, Scope::Global)
        .copied()
        .flatten();
    memory.set(WANTS, None::<&'static str>, Scope::Global);
    next
}

#[derive(Default)]
struct Idle {
    base: StateBase,
}

impl State<Sheep> for Idle {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn tick(&self, sheep: &mut Sheep, memory: &mut Blackboard) {
        if sheep.pointer_distance < OBEY_DISTANCE {
            request(memory, "obey");
        }
        sheep.slow_down(0.5);
    }
}

#[derive(Default)]
struct Obey {
    base: StateBase,
}

impl State<Sheep> for Obey {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn tick(&self, sheep: &mut Sheep, memory: &mut Blackboard) {
        let scope = self.scope();
        if sheep.pointer_distance > OBEY_DISTANCE {
            let recorded = memory
                .get::<Option<u64>>("calm_since", scope)
                .copied()
                .flatten();
            let calm_since = match recorded {
                Some(since) => since,
                None => {
                    let since = now(memory);
                    memory.set("calm_since", Some(since), scope);
                    since
                }
            };
            if now(memory) - calm_since > FORGET_TICKS {
                request(memory, "stopping");
            }
        } else {
            memory.set("calm_since", None::<u64>, scope);
        }
        sheep.flee(0.4);
    }

    fn exit(&self, _sheep: &mut Sheep, memory: &mut Blackboard) {
        memory.set("calm_since", None::<u64>, self.scope());
    }
}

#[derive(Default)]
struct Stopping {
    base: StateBase,
}

impl State<Sheep> for Stopping {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn enter(&self, _sheep: &mut Sheep, memory: &mut Blackboard) {
        let started = now(memory);
        memory.set("started", started, self.scope());
    }

    fn tick(&self, sheep: &mut Sheep, memory: &mut Blackboard) {
        let started = memory
            .get::<u64>("started", self.scope())
            .copied()
            .unwrap_or_default();

        if sheep.pointer_distance < OBEY_DISTANCE {
            request(memory, "obey");
        } else if now(memory) - started > STOPPING_TICKS {
            request(memory, "idle");
        }
        sheep.slow_down(0.8);
    }
}

/// Pointer sweeps across the field and then rests far away.
fn pointer_at(tick: u64) -> f32 {
    if tick < 60 {
        tick as f32 * 0.5 - 5.0
    } else {
        100.0
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut fsm = Fsm::<Sheep>::new();
    fsm.add("idle", Rc::new(Idle::default()))?
        .add("obey", Rc::new(Obey::default()))?
        .add("stopping", Rc::new(Stopping::default()))?;

    let mut flock: Vec<(Sheep, Blackboard)> = (0..5)
        .map(|i| (Sheep::at(i as f32 * 6.0), Blackboard::new()))
        .collect();

    for (sheep, memory) in flock.iter_mut() {
        fsm.to("idle", sheep, memory)?;
    }

    for tick in 0..TICKS {
        let pointer = pointer_at(tick);
        for (sheep, memory) in flock.iter_mut() {
            sheep.pointer_distance = (sheep.x - pointer).abs();
            sheep.pointer_side = if pointer > sheep.x { 1.0 } else { -1.0 };
            memory.set(NOW, tick, Scope::Global);

            fsm.tick(sheep, memory);

            if let Some(next) = take_request(memory) {
                fsm.to(next, sheep, memory)?;
            }
        }

        if tick % 20 == 0 {
            let states: Vec<_> = flock
                .iter()
                .map(|(_, memory)| fsm.name(memory).unwrap_or("-"))
                .collect();
            tracing::info!(tick, pointer, ?states, "flock");
        }
    }

    for (i, (sheep, memory)) in flock.iter().enumerate() {
        tracing::info!(
            sheep = i,
            x = sheep.x,
            state = fsm.name(memory).unwrap_or("-"),
            "final"
        );
    }

    Ok(())
}
