use std::collections::BTreeMap;

use colony_defence_core::{Armor, AssaultPlan, Command, Event, Outcome};
use colony_defence_system_bootstrap as bootstrap;
use colony_defence_system_scheduler::{run, Idle, Strategy};
use colony_defence_world::{query, Colony};

/// Replays a fixed set of commands on their scheduled ticks.
struct Script {
    orders: BTreeMap<u32, Vec<Command>>,
}

impl Script {
    fn new<const N: usize>(orders: [(u32, Vec<Command>); N]) -> Self {
        Self {
            orders: BTreeMap::from(orders),
        }
    }
}

impl Strategy for Script {
    fn plan(&mut self, colony: &Colony, out: &mut Vec<Command>) {
        if let Some(orders) = self.orders.remove(&query::tick(colony)) {
            out.extend(orders);
        }
    }
}

fn deploy(place: &str, kind: &str) -> Command {
    Command::Deploy {
        place: place.to_string(),
        kind: kind.to_string(),
    }
}

#[test]
fn a_single_thrower_wins_by_tick_four() {
    let plan = AssaultPlan::new(Armor::new(1)).wave(2, 1);
    let mut colony =
        bootstrap::assemble(bootstrap::test_layout(), plan, 4, 0x51).expect("colony assembles");
    let mut strategy = Script::new([(0, vec![deploy("tunnel-0-0", "thrower")])]);

    let mut events = Vec::new();
    let outcome = run(&mut colony, &mut strategy, &mut events).expect("simulation runs");

    assert_eq!(outcome, Outcome::Victory);
    assert!(query::tick(&colony) <= 4, "won at tick {}", query::tick(&colony));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BeeExpired { .. })));
}

#[test]
fn an_unobstructed_bee_reaches_the_queen_within_chain_length() {
    let plan = AssaultPlan::new(Armor::new(1)).wave(0, 1);
    let mut colony =
        bootstrap::assemble(bootstrap::test_layout(), plan, 4, 0x52).expect("colony assembles");

    let mut events = Vec::new();
    let outcome = run(&mut colony, &mut Idle, &mut events).expect("simulation runs");

    assert_eq!(outcome, Outcome::Defeat);
    assert!(query::tick(&colony) <= 8, "lost at tick {}", query::tick(&colony));
}

#[test]
fn a_fire_ant_catches_the_whole_wave_when_stung_down() {
    // Two bees share the entry with a freshly placed fire ant. The first
    // sting is lethal; the detonation resolves over both bees before the
    // second one gets its turn.
    let plan = AssaultPlan::new(Armor::new(2)).wave(0, 2);
    let mut colony =
        bootstrap::assemble(bootstrap::test_layout(), plan, 4, 0x53).expect("colony assembles");
    let mut strategy = Script::new([(0, vec![deploy("tunnel-0-7", "fire")])]);

    let mut events = Vec::new();
    let outcome = run(&mut colony, &mut strategy, &mut events).expect("simulation runs");

    assert_eq!(outcome, Outcome::Victory);
    assert_eq!(query::tick(&colony), 1);
    let expired = events
        .iter()
        .filter(|event| matches!(event, Event::BeeExpired { .. }))
        .count();
    assert_eq!(expired, 2);
}

#[test]
fn waves_release_exactly_once_each() {
    let mut colony = bootstrap::assemble(bootstrap::test_layout(), bootstrap::test_assault_plan(), 4, 0x54)
        .expect("colony assembles");

    let mut events = Vec::new();
    let outcome = run(&mut colony, &mut Idle, &mut events).expect("simulation runs");
    assert_eq!(outcome, Outcome::Defeat);

    let release_ticks: Vec<u32> = events
        .iter()
        .filter_map(|event| match event {
            Event::WaveReleased { tick, .. } => Some(*tick),
            _ => None,
        })
        .collect();
    assert_eq!(release_ticks, vec![2, 3]);
}

#[test]
fn harvest_economy_affords_a_late_thrower() {
    // Two food only covers the harvester; the thrower placed on tick four is
    // paid for entirely by harvests and still clears both practice waves.
    let mut colony = bootstrap::assemble(bootstrap::test_layout(), bootstrap::test_assault_plan(), 2, 0x55)
        .expect("colony assembles");
    let mut strategy = Script::new([
        (0, vec![deploy("tunnel-0-0", "harvester")]),
        (4, vec![deploy("tunnel-0-1", "thrower")]),
    ]);

    let mut events = Vec::new();
    let outcome = run(&mut colony, &mut strategy, &mut events).expect("simulation runs");

    assert_eq!(outcome, Outcome::Victory);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::DeployRejected { .. })));
}

#[test]
fn overcommitted_strategies_are_rejected_but_not_fatal() {
    let plan = AssaultPlan::new(Armor::new(1)).wave(0, 1);
    let mut colony =
        bootstrap::assemble(bootstrap::test_layout(), plan, 3, 0x56).expect("colony assembles");
    let mut strategy = Script::new([(0, vec![deploy("tunnel-0-0", "thrower")])]);

    let mut events = Vec::new();
    let outcome = run(&mut colony, &mut strategy, &mut events).expect("simulation runs");

    assert_eq!(outcome, Outcome::Defeat);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::DeployRejected { .. })));
}

fn campaign(seed: u64) -> (Outcome, Vec<Event>, u32) {
    let mut colony = bootstrap::assemble(
        bootstrap::dry_layout(8, 3),
        bootstrap::full_assault_plan(),
        20,
        seed,
    )
    .expect("colony assembles");
    let mut strategy = Script::new([
        (
            0,
            vec![
                deploy("tunnel-0-0", "thrower"),
                deploy("tunnel-1-0", "thrower"),
                deploy("tunnel-2-0", "thrower"),
            ],
        ),
        (1, vec![deploy("tunnel-0-1", "harvester")]),
    ]);

    let mut events = Vec::new();
    let outcome = run(&mut colony, &mut strategy, &mut events).expect("simulation runs");
    (outcome, events, query::tick(&colony))
}

#[test]
fn deterministic_replay_produces_identical_event_streams() {
    let first = campaign(0xca11_ab1e);
    let second = campaign(0xca11_ab1e);
    assert_eq!(first.0, second.0, "outcomes diverged");
    assert_eq!(first.2, second.2, "final ticks diverged");
    assert_eq!(first.1, second.1, "event streams diverged");
}
