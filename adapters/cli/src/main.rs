#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Colony Defence simulations.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colony_defence_core::{Command, Event, Outcome, WELCOME_BANNER};
use colony_defence_system_bootstrap as bootstrap;
use colony_defence_system_scheduler::{self as scheduler, Strategy};
use colony_defence_world::{query, Colony};

/// Arguments controlling a simulation run.
#[derive(Debug, Parser)]
#[command(name = "colony-defence", about = "Headless colony-defence simulator")]
struct Args {
    /// Run the full three-tunnel layout with the standard campaign plan.
    #[arg(long)]
    full: bool,
    /// Use the wet layout with water moats every third step.
    #[arg(long)]
    water: bool,
    /// Use the hardened assault plan. Good luck.
    #[arg(long)]
    insane: bool,
    /// Starting food for the colony.
    #[arg(long, default_value_t = bootstrap::STARTING_FOOD)]
    food: u32,
    /// Seed for the colony's random number generator.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// JSON file mapping ticks to command lists, replayed as the strategy.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Stop without an outcome after this many ticks.
    #[arg(long)]
    max_ticks: Option<u32>,
    /// Write the full event stream to this JSON file after the run.
    #[arg(long)]
    dump_events: Option<PathBuf>,
}

/// Strategy replaying scripted commands on their scheduled ticks.
#[derive(Debug, Default)]
struct Script {
    orders: BTreeMap<u32, Vec<Command>>,
}

impl Strategy for Script {
    fn plan(&mut self, colony: &Colony, out: &mut Vec<Command>) {
        if let Some(orders) = self.orders.remove(&query::tick(colony)) {
            out.extend(orders);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    println!("{WELCOME_BANNER}");

    let layout = if args.water {
        bootstrap::wet_layout(8, 3)
    } else if args.full {
        bootstrap::dry_layout(8, 3)
    } else {
        bootstrap::test_layout()
    };
    let plan = if args.insane {
        bootstrap::insane_assault_plan()
    } else if args.full || args.water {
        bootstrap::full_assault_plan()
    } else {
        bootstrap::test_assault_plan()
    };

    let mut colony =
        bootstrap::assemble(layout, plan, args.food, args.seed).context("assembling colony")?;
    let mut strategy = match &args.script {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            Script {
                orders: serde_json::from_str(&raw).context("parsing script")?,
            }
        }
        None => Script::default(),
    };

    let mut events = Vec::new();
    let outcome = run_capped(&mut colony, &mut strategy, &mut events, args.max_ticks)?;

    for event in &events {
        narrate(event);
    }
    match outcome {
        Some(Outcome::Victory) => println!("All bees are vanquished. The colony prevails."),
        Some(Outcome::Defeat) => println!("A bee reached the queen. The colony has fallen."),
        None => println!("No outcome after {} ticks.", query::tick(&colony)),
    }

    if let Some(path) = &args.dump_events {
        let encoded = serde_json::to_vec_pretty(&events).context("encoding events")?;
        fs::write(path, encoded).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn run_capped(
    colony: &mut Colony,
    strategy: &mut dyn Strategy,
    events: &mut Vec<Event>,
    max_ticks: Option<u32>,
) -> anyhow::Result<Option<Outcome>> {
    loop {
        if let Some(outcome) = query::outcome(colony) {
            return Ok(Some(outcome));
        }
        if max_ticks.is_some_and(|cap| query::tick(colony) >= cap) {
            return Ok(None);
        }
        scheduler::step(colony, strategy, events).context("advancing tick")?;
    }
}

fn narrate(event: &Event) {
    match event {
        Event::WaveReleased { tick, bees, .. } => {
            println!("tick {tick}: wave of {} released", bees.len());
        }
        Event::Deployed { kind, .. } => println!("deployed {}", kind.name()),
        Event::DeployRejected { kind, cost, food } => {
            println!("not enough food for {} (cost {cost}, have {food})", kind.name());
        }
        Event::AntExpired { ant, .. } => println!("ant {} ran out of armor", ant.get()),
        Event::BeeExpired { bee, .. } => println!("bee {} ran out of armor", bee.get()),
        _ => {}
    }
}
