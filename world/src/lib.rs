#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative colony state management for Colony Defence.
//!
//! The [`Colony`] owns every place, ant, and bee, and mutates only through
//! the [`apply`] entry point. Commands resolve deterministically given the
//! configured seed; every mutation is reported through the shared event
//! vocabulary so systems and adapters can follow along without touching the
//! state directly.

mod actions;
mod combat;
mod hive;

use std::collections::BTreeMap;

use colony_defence_core::{
    AntId, AntKind, Armor, AssaultPlan, BeeId, ColonyError, Command, Event, LayoutPlan, PlaceId,
    Slot, StatusLedger, Terrain,
};
use colony_defence_system_targeting::Hop;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const QUEEN_CHAMBER_NAME: &str = "queen-chamber";
const HIVE_NAME: &str = "hive";

/// Configuration required to assemble a colony.
#[derive(Clone, Debug)]
pub struct Config {
    layout: LayoutPlan,
    plan: AssaultPlan,
    food: u32,
    seed: u64,
}

impl Config {
    /// Creates a new colony configuration.
    #[must_use]
    pub fn new(layout: LayoutPlan, plan: AssaultPlan, food: u32, seed: u64) -> Self {
        Self {
            layout,
            plan,
            food,
            seed,
        }
    }
}

/// Represents the authoritative Colony Defence game state.
#[derive(Debug)]
pub struct Colony {
    pub(crate) places: Vec<Place>,
    pub(crate) registered: Vec<PlaceId>,
    pub(crate) entries: Vec<PlaceId>,
    pub(crate) hive: PlaceId,
    pub(crate) queen_site: PlaceId,
    pub(crate) ants: Vec<AntRecord>,
    pub(crate) bees: Vec<BeeRecord>,
    pub(crate) schedule: BTreeMap<u32, Vec<BeeId>>,
    pub(crate) food: u32,
    pub(crate) tick: u32,
    pub(crate) queen_claimed: bool,
    pub(crate) sanctums: u32,
    pub(crate) rng: ChaCha8Rng,
}

#[derive(Debug)]
pub(crate) struct Place {
    pub(crate) name: String,
    pub(crate) ground: Ground,
    pub(crate) exit: Option<PlaceId>,
    pub(crate) entrance: Option<PlaceId>,
    pub(crate) bees: Vec<BeeId>,
    pub(crate) slot: Slot,
}

impl Place {
    fn new(name: String, ground: Ground) -> Self {
        Self {
            name,
            ground,
            exit: None,
            entrance: None,
            bees: Vec::new(),
            slot: Slot::Empty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ground {
    Field(Terrain),
    Hive,
    Sanctum,
}

#[derive(Debug)]
pub(crate) struct AntRecord {
    pub(crate) kind: AntKind,
    pub(crate) armor: Armor,
    pub(crate) place: Option<PlaceId>,
    pub(crate) digestion: u32,
    pub(crate) imposter: bool,
}

#[derive(Debug)]
pub(crate) struct BeeRecord {
    pub(crate) armor: Armor,
    pub(crate) place: Option<PlaceId>,
    pub(crate) status: StatusLedger,
    pub(crate) watersafe: bool,
}

impl Colony {
    /// Assembles a colony from the provided configuration.
    ///
    /// The queen chamber and the hive are created implicitly; layout places
    /// are registered in order after them, exits are linked toward the queen
    /// chamber, and derived entrance back-links are populated in the reverse
    /// direction. Every bee in the assault plan is constructed into the hive
    /// up front.
    pub fn new(config: Config) -> Result<Self, ColonyError> {
        let Config {
            layout,
            plan,
            food,
            seed,
        } = config;

        validate_layout(&layout)?;

        let mut places = vec![
            Place::new(QUEEN_CHAMBER_NAME.to_string(), Ground::Sanctum),
            Place::new(HIVE_NAME.to_string(), Ground::Hive),
        ];
        let queen_site = PlaceId::new(0);
        let hive = PlaceId::new(1);
        let base = places.len();

        let mut registered = vec![hive];
        let mut entries = Vec::new();
        for (index, spec) in layout.places().iter().enumerate() {
            let id = PlaceId::new((base + index) as u32);
            let mut place = Place::new(
                spec.name().to_string(),
                Ground::Field(spec.terrain()),
            );
            place.exit = Some(match spec.exit() {
                Some(downstream) => PlaceId::new((base + downstream) as u32),
                None => queen_site,
            });
            places.push(place);
            registered.push(id);
            if spec.is_entry() {
                entries.push(id);
            }
        }

        // Derived entrance back-links; entry places point back at the hive.
        for index in 0..layout.places().len() {
            let id = PlaceId::new((base + index) as u32);
            if let Some(exit) = places[base + index].exit {
                places[exit.get() as usize].entrance = Some(id);
            }
        }
        for entry in &entries {
            places[entry.get() as usize].entrance = Some(hive);
        }

        let mut colony = Self {
            places,
            registered,
            entries,
            hive,
            queen_site,
            ants: Vec::new(),
            bees: Vec::new(),
            schedule: BTreeMap::new(),
            food,
            tick: 0,
            queen_claimed: false,
            sanctums: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        hive::materialize(&mut colony, &plan);
        Ok(colony)
    }

    pub(crate) fn place(&self, id: PlaceId) -> &Place {
        &self.places[id.get() as usize]
    }

    pub(crate) fn place_mut(&mut self, id: PlaceId) -> &mut Place {
        &mut self.places[id.get() as usize]
    }

    pub(crate) fn ant(&self, id: AntId) -> &AntRecord {
        &self.ants[id.get() as usize]
    }

    pub(crate) fn ant_mut(&mut self, id: AntId) -> &mut AntRecord {
        &mut self.ants[id.get() as usize]
    }

    pub(crate) fn bee(&self, id: BeeId) -> &BeeRecord {
        &self.bees[id.get() as usize]
    }

    pub(crate) fn bee_mut(&mut self, id: BeeId) -> &mut BeeRecord {
        &mut self.bees[id.get() as usize]
    }

    pub(crate) fn place_by_name(&self, name: &str) -> Option<PlaceId> {
        self.registered
            .iter()
            .copied()
            .find(|id| self.place(*id).name == name)
    }

    pub(crate) fn is_water(&self, id: PlaceId) -> bool {
        self.place(id).ground == Ground::Field(Terrain::Water)
    }

    pub(crate) fn is_hive(&self, id: PlaceId) -> bool {
        self.place(id).ground == Ground::Hive
    }

    /// Walks the entrance chain backward from `start`, ending at the hive or
    /// wherever the chain runs out.
    pub(crate) fn approach(&self, start: PlaceId) -> Vec<Hop> {
        let mut hops = Vec::new();
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            let place = self.place(id);
            let staging = place.ground == Ground::Hive;
            hops.push(Hop::new(id, staging, place.bees.clone()));
            if staging {
                break;
            }
            cursor = place.entrance;
        }
        hops
    }

    /// Appends a fresh sanctum place and records it as the queen site.
    pub(crate) fn spawn_sanctum(&mut self) -> PlaceId {
        self.sanctums = self.sanctums.saturating_add(1);
        let id = PlaceId::new(self.places.len() as u32);
        self.places
            .push(Place::new(format!("sanctum-{}", self.sanctums), Ground::Sanctum));
        self.queen_site = id;
        id
    }
}

fn validate_layout(layout: &LayoutPlan) -> Result<(), ColonyError> {
    let count = layout.places().len();
    for spec in layout.places() {
        let mut cursor = spec.exit();
        let mut steps = 0usize;
        while let Some(next) = cursor {
            if next >= count || steps >= count {
                return Err(ColonyError::LayoutCycle(spec.name().to_string()));
            }
            steps += 1;
            cursor = layout.places()[next].exit();
        }
    }
    Ok(())
}

/// Applies the provided command to the colony, mutating state
/// deterministically and appending the resulting events.
///
/// Fatal configuration errors and invariant violations abort with `Err`;
/// the colony must be considered unusable afterwards. Insufficient food is
/// reported through [`Event::DeployRejected`] and never aborts.
pub fn apply(
    colony: &mut Colony,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    match command {
        Command::ReleaseWave => hive::release_wave(colony, out_events),
        Command::Deploy { place, kind } => deploy(colony, &place, &kind, out_events),
        Command::Withdraw { place } => withdraw(colony, &place, out_events),
        Command::AntsAct => actions::ants_act(colony, out_events),
        Command::BeesAct => actions::bees_act(colony, out_events),
        Command::AdvanceTick => {
            colony.tick = colony.tick.saturating_add(1);
            out_events.push(Event::TimeAdvanced { tick: colony.tick });
            Ok(())
        }
    }
}

fn deploy(
    colony: &mut Colony,
    place_name: &str,
    kind_name: &str,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    let kind = AntKind::from_name(kind_name)
        .ok_or_else(|| ColonyError::UnknownKind(kind_name.to_string()))?;
    let place = colony
        .place_by_name(place_name)
        .ok_or_else(|| ColonyError::UnknownPlace(place_name.to_string()))?;

    let cost = kind.food_cost();
    if colony.food < cost {
        tracing::warn!(
            kind = kind.name(),
            cost,
            food = colony.food,
            "deployment rejected: insufficient food"
        );
        out_events.push(Event::DeployRejected {
            kind,
            cost,
            food: colony.food,
        });
        return Ok(());
    }
    colony.food -= cost;

    let imposter = kind == AntKind::Queen && {
        let claimed = colony.queen_claimed;
        colony.queen_claimed = true;
        claimed
    };

    let ant = AntId::new(colony.ants.len() as u32);
    colony.ants.push(AntRecord {
        kind,
        armor: kind.starting_armor(),
        place: None,
        digestion: 0,
        imposter,
    });

    colony
        .place_mut(place)
        .slot
        .admit(ant, kind.is_container())
        .map_err(|reason| ColonyError::Placement {
            place: place_name.to_string(),
            kind: kind.name(),
            reason,
        })?;
    colony.ant_mut(ant).place = Some(place);
    out_events.push(Event::Deployed { ant, kind, place });

    if colony.is_water(place) && !kind.is_watersafe() {
        let drowning = colony.ant(ant).armor.get().max(0) as u32;
        combat::reduce_ant_armor(colony, ant, drowning, out_events)?;
    }
    Ok(())
}

fn withdraw(
    colony: &mut Colony,
    place_name: &str,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    let place = colony
        .place_by_name(place_name)
        .ok_or_else(|| ColonyError::UnknownPlace(place_name.to_string()))?;
    let Some(ant) = colony.place(place).slot.outward() else {
        return Ok(());
    };
    let record = colony.ant(ant);
    if record.kind == AntKind::Queen && !record.imposter {
        return Ok(());
    }

    let promoted = colony
        .place_mut(place)
        .slot
        .release(ant)
        .map_err(|_| ColonyError::DetachedAnt(ant))?;
    if let Some(ward) = promoted {
        out_events.push(Event::GuardTransferred {
            guard: ant,
            ward,
            place,
        });
    }
    colony.ant_mut(ant).place = None;
    out_events.push(Event::Withdrawn { ant, place });
    Ok(())
}

/// Query functions that provide read-only access to the colony state.
pub mod query {
    use super::{Colony, Hop};
    use colony_defence_core::{
        AntId, AntSnapshot, AntView, BeeId, BeeSnapshot, BeeView, Outcome, PlaceId, Slot,
    };

    /// Current simulation tick.
    #[must_use]
    pub fn tick(colony: &Colony) -> u32 {
        colony.tick
    }

    /// Food available to the placement strategy.
    #[must_use]
    pub fn food(colony: &Colony) -> u32 {
        colony.food
    }

    /// Terminal result of the simulation, if one has been reached.
    ///
    /// Defeat takes priority: a bee standing in the queen site ends the game
    /// even if it is the last bee alive.
    #[must_use]
    pub fn outcome(colony: &Colony) -> Option<Outcome> {
        if !colony.place(colony.queen_site).bees.is_empty() {
            Some(Outcome::Defeat)
        } else if colony.bees.iter().all(|bee| bee.place.is_none()) {
            Some(Outcome::Victory)
        } else {
            None
        }
    }

    /// Captures a read-only view of every ant ever constructed.
    #[must_use]
    pub fn ant_view(colony: &Colony) -> AntView {
        AntView::from_snapshots(
            colony
                .ants
                .iter()
                .enumerate()
                .map(|(index, record)| AntSnapshot {
                    id: AntId::new(index as u32),
                    kind: record.kind,
                    armor: record.armor,
                    place: record.place,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every bee ever constructed.
    #[must_use]
    pub fn bee_view(colony: &Colony) -> BeeView {
        BeeView::from_snapshots(
            colony
                .bees
                .iter()
                .enumerate()
                .map(|(index, record)| BeeSnapshot {
                    id: BeeId::new(index as u32),
                    armor: record.armor,
                    place: record.place,
                    status: record.status,
                })
                .collect(),
        )
    }

    /// Names addressable by deployment and withdrawal, in registration order.
    #[must_use]
    pub fn place_names(colony: &Colony) -> Vec<&str> {
        colony
            .registered
            .iter()
            .map(|id| colony.place(*id).name.as_str())
            .collect()
    }

    /// Resolves a registered place name to its identifier.
    #[must_use]
    pub fn place_id(colony: &Colony, name: &str) -> Option<PlaceId> {
        colony.place_by_name(name)
    }

    /// Occupancy slot of the provided place.
    #[must_use]
    pub fn slot(colony: &Colony, place: PlaceId) -> Slot {
        colony.place(place).slot
    }

    /// Bees occupying the provided place, in occupant order.
    #[must_use]
    pub fn bees_at(colony: &Colony, place: PlaceId) -> &[BeeId] {
        &colony.place(place).bees
    }

    /// Entry places bees can be released into.
    #[must_use]
    pub fn entries(colony: &Colony) -> &[PlaceId] {
        &colony.entries
    }

    /// Place currently serving as the loss-condition target.
    #[must_use]
    pub fn queen_site(colony: &Colony) -> PlaceId {
        colony.queen_site
    }

    /// Number of bees still staged in the hive.
    #[must_use]
    pub fn hive_garrison(colony: &Colony) -> usize {
        colony.place(colony.hive).bees.len()
    }

    /// Approach chain walked backward from `place`, hop zero first.
    #[must_use]
    pub fn approach(colony: &Colony, place: PlaceId) -> Vec<Hop> {
        colony.approach(place)
    }
}
