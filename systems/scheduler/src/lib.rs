#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn scheduler sequencing every tick of a Colony Defence game.
//!
//! One tick runs, in order: wave release, the injected placement strategy,
//! ant actions, bee actions, and the clock advance. The loop continues while
//! the queen site holds no bees and at least one bee remains alive anywhere,
//! including bees still staged in the hive.

use colony_defence_core::{ColonyError, Command, Event, Outcome};
use colony_defence_world::{self as world, query, Colony};

/// Placement policy injected into the scheduler.
///
/// Invoked once per tick with read access to the colony; any commands pushed
/// into `out` are applied before the ants act. Insufficient food surfaces as
/// a rejection event rather than an error, so strategies may overcommit
/// freely, but unknown names abort the simulation.
pub trait Strategy {
    /// Emits deployment and withdrawal commands for the current tick.
    fn plan(&mut self, colony: &Colony, out: &mut Vec<Command>);
}

/// Strategy that never deploys anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Idle;

impl Strategy for Idle {
    fn plan(&mut self, _colony: &Colony, _out: &mut Vec<Command>) {}
}

/// Advances the simulation by exactly one tick.
pub fn step(
    colony: &mut Colony,
    strategy: &mut dyn Strategy,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    world::apply(colony, Command::ReleaseWave, out_events)?;

    let mut orders = Vec::new();
    strategy.plan(colony, &mut orders);
    for order in orders {
        world::apply(colony, order, out_events)?;
    }

    world::apply(colony, Command::AntsAct, out_events)?;
    world::apply(colony, Command::BeesAct, out_events)?;
    world::apply(colony, Command::AdvanceTick, out_events)
}

/// Runs the simulation to a terminal outcome.
///
/// Defeat is reported as soon as a bee stands in the queen site; victory as
/// soon as no bee remains alive. The loop never resumes after either.
pub fn run(
    colony: &mut Colony,
    strategy: &mut dyn Strategy,
    out_events: &mut Vec<Event>,
) -> Result<Outcome, ColonyError> {
    loop {
        if let Some(outcome) = query::outcome(colony) {
            return Ok(outcome);
        }
        step(colony, strategy, out_events)?;
    }
}
