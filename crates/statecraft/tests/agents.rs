#![cfg(feature = "full")]

use std::rc::Rc;

use statecraft::prelude::*;

#[derive(Debug, Default)]
struct Sheep {
    hunger: f32,
    threat: bool,
    log: Vec<String>,
}

/// Counts its own ticks in per-machine-per-state memory.
struct Counting {
    base: StateBase,
    label: &'static str,
}

impl Counting {
    fn shared(label: &'static str) -> Rc<Self> {
        Rc::new(Self {
            base: StateBase::new(),
            label,
        })
    }
}

impl State<Sheep> for Counting {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn enter(&self, target: &mut Sheep, _memory: &mut Blackboard) {
        target.log.push(format!("{}.enter", self.label));
    }

    fn tick(&self, _target: &mut Sheep, memory: &mut Blackboard) {
        let scope = self.scope();
        match memory.get_mut::<u32>("ticks", scope) {
            Some(ticks) => *ticks += 1,
            None => memory.set("ticks", 1u32, scope),
        }
    }

    fn exit(&self, target: &mut Sheep, _memory: &mut Blackboard) {
        target.log.push(format!("{}.exit", self.label));
    }

    fn potential(&self, target: &Sheep, _memory: &Blackboard) -> Potential {
        match self.label {
            "flee" => target.threat.into(),
            "eat" => Potential::new(target.hunger),
            _ => Potential::new(0.5),
        }
    }
}

fn ticks(memory: &Blackboard, machine: MachineId, state: StateId) -> Option<u32> {
    memory.get::<u32>("ticks", (machine, state)).copied()
}

#[test]
fn machines_sharing_a_blackboard_do_not_see_each_other() {
    let mut fsm = Fsm::<Sheep>::new();
    fsm.add("idle", Counting::shared("idle")).unwrap();

    let mut reflexes = Subsumption::<Sheep>::new();
    reflexes
        .add("flee", Counting::shared("flee"))
        .unwrap()
        .add("wander", Counting::shared("wander"))
        .unwrap();

    let mut sheep = Sheep::default();
    let mut memory = Blackboard::new();

    fsm.to("idle", &mut sheep, &mut memory).unwrap();
    fsm.tick(&mut sheep, &mut memory);
    reflexes.tick(&mut sheep, &mut memory);

    assert_eq!(fsm.name(&memory), Some("idle"));
    assert_eq!(reflexes.name(&memory), Some("wander"));
    assert_ne!(fsm.id(), reflexes.id());
}

#[test]
fn state_scope_follows_the_registering_machine() {
    let mut fsm = Fsm::<Sheep>::new();
    let idle = Counting::shared("idle");
    fsm.add("idle", idle.clone()).unwrap();

    let mut sheep = Sheep::default();
    let mut memory = Blackboard::new();
    fsm.to("idle", &mut sheep, &mut memory).unwrap();
    for _ in 0..3 {
        fsm.tick(&mut sheep, &mut memory);
    }

    assert_eq!(ticks(&memory, fsm.id(), idle.id()), Some(3));
    assert_eq!(memory.get::<u32>("ticks", fsm.id()), None);
    assert_eq!(memory.get::<u32>("ticks", Scope::Global), None);
}

#[test]
fn one_machine_drives_many_agents_independently() {
    let mut utility = Utility::<Sheep>::new();
    let eat = Counting::shared("eat");
    let rest = Counting::shared("rest");
    utility
        .add("eat", eat.clone())
        .unwrap()
        .add("rest", rest.clone())
        .unwrap();

    let mut flock: Vec<(Sheep, Blackboard)> = (0..4)
        .map(|i| {
            let sheep = Sheep {
                hunger: i as f32 * 0.3,
                ..Sheep::default()
            };
            (sheep, Blackboard::new())
        })
        .collect();

    for (sheep, memory) in flock.iter_mut() {
        utility.tick(sheep, memory);
        utility.tick(sheep, memory);
    }

    let names: Vec<_> = flock
        .iter()
        .map(|(_, memory)| utility.name(memory))
        .collect();
    assert_eq!(names, vec![Some("rest"), Some("rest"), Some("eat"), Some("eat")]);

    assert_eq!(ticks(&flock[0].1, utility.id(), rest.id()), Some(2));
    assert_eq!(ticks(&flock[0].1, utility.id(), eat.id()), None);
    assert_eq!(ticks(&flock[3].1, utility.id(), eat.id()), Some(2));
    assert_eq!(flock[3].0.log, vec!["eat.enter"]);
}

#[test]
fn heterogeneous_machines_tick_through_the_trait_object() {
    let mut fsm = Fsm::<Sheep>::new();
    fsm.add("idle", Counting::shared("idle")).unwrap();

    let mut reflexes = Subsumption::<Sheep>::new();
    reflexes.add("flee", Counting::shared("flee")).unwrap();

    let mut utility = Utility::<Sheep>::new();
    utility.add("eat", Counting::shared("eat")).unwrap();

    let mut sheep = Sheep {
        hunger: 1.0,
        threat: true,
        ..Sheep::default()
    };
    let mut memory = Blackboard::new();
    fsm.to("idle", &mut sheep, &mut memory).unwrap();

    let machines: Vec<Box<dyn Machine<Sheep>>> =
        vec![Box::new(fsm), Box::new(reflexes), Box::new(utility)];
    for machine in &machines {
        machine.tick(&mut sheep, &mut memory);
    }

    let current: Vec<_> = machines.iter().map(|m| m.name(&memory)).collect();
    assert_eq!(current, vec![Some("idle"), Some("flee"), Some("eat")]);
    assert_eq!(sheep.log, vec!["idle.enter", "flee.enter", "eat.enter"]);
}

#[test]
fn subsumption_and_utility_differ_when_nothing_is_selectable() {
    let mut reflexes = Subsumption::<Sheep>::new();
    reflexes.add("flee", Counting::shared("flee")).unwrap();
    let utility = Utility::<Sheep>::new();

    let mut sheep = Sheep {
        threat: true,
        ..Sheep::default()
    };
    let mut memory = Blackboard::new();

    reflexes.tick(&mut sheep, &mut memory);
    assert_eq!(reflexes.name(&memory), Some("flee"));
    sheep.threat = false;
    reflexes.tick(&mut sheep, &mut memory);
    assert_eq!(reflexes.name(&memory), None);
    assert_eq!(sheep.log, vec!["flee.enter", "flee.exit"]);

    utility.tick(&mut sheep, &mut memory);
    assert_eq!(utility.name(&memory), None);
}
