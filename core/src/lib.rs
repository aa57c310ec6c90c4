#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Colony Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative colony, and pure systems. The scheduler and adapters submit
//! [`Command`] values describing desired mutations, the colony executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems and adapters to react to deterministically. Everything here is
//! plain data: no I/O, no randomness, no clocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "The colony stands ready.";

/// Unique identifier assigned to an ant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AntId(u32);

impl AntId {
    /// Creates a new ant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BeeId(u32);

impl BeeId {
    /// Creates a new bee identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index of a place within the colony's place table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(u32);

impl PlaceId {
    /// Creates a new place identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Integer armor carried by every insect; an insect expires at zero or below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Armor(i32);

impl Armor {
    /// Creates a new armor value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying armor amount.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns the armor left after absorbing `amount` points of damage.
    #[must_use]
    pub const fn reduced_by(self, amount: u32) -> Self {
        Self(self.0.saturating_sub_unsigned(amount))
    }

    /// Reports whether the armor is exhausted.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 <= 0
    }
}

/// Inclusive band of hop distances a ranged ant can reach along the approach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeBand {
    min: u32,
    max: u32,
}

impl RangeBand {
    /// Creates a new range band from minimum and maximum hop counts.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Hops that must be skipped before the search begins.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Hops the search may take past the skipped prefix.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}

/// Catalog of deployable ant variants with fixed per-variant parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntKind {
    /// Produces one food for the colony each turn.
    Harvester,
    /// Throws at the nearest bee anywhere along the approach.
    Thrower,
    /// Thrower restricted to nearby hops.
    ShortThrower,
    /// Thrower that cannot see the closest hops.
    LongThrower,
    /// Heavily armored blocker with no action of its own.
    Wall,
    /// Detonates over co-located bees when it expires.
    Fire,
    /// Does not block the path; damages every bee sharing its place.
    Ninja,
    /// Thrower that survives water terrain.
    Scuba,
    /// Devours one co-located bee, then digests for three turns.
    Hungry,
    /// Container that absorbs attacks for a warded ant.
    Bodyguard,
    /// Thrower that slows its target instead of damaging it.
    SlowThrower,
    /// Thrower that stuns its target instead of damaging it.
    StunThrower,
    /// Privileged singleton; see the colony rules for authority handling.
    Queen,
}

impl AntKind {
    /// Every deployable variant, in catalog order.
    pub const ALL: [AntKind; 13] = [
        AntKind::Harvester,
        AntKind::Thrower,
        AntKind::ShortThrower,
        AntKind::LongThrower,
        AntKind::Wall,
        AntKind::Fire,
        AntKind::Ninja,
        AntKind::Scuba,
        AntKind::Hungry,
        AntKind::Bodyguard,
        AntKind::SlowThrower,
        AntKind::StunThrower,
        AntKind::Queen,
    ];

    /// Unique catalog name used by deployment commands.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Harvester => "harvester",
            Self::Thrower => "thrower",
            Self::ShortThrower => "short",
            Self::LongThrower => "long",
            Self::Wall => "wall",
            Self::Fire => "fire",
            Self::Ninja => "ninja",
            Self::Scuba => "scuba",
            Self::Hungry => "hungry",
            Self::Bodyguard => "bodyguard",
            Self::SlowThrower => "slow",
            Self::StunThrower => "stun",
            Self::Queen => "queen",
        }
    }

    /// Resolves a catalog name back to its variant.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Food deducted from the colony pool when the variant is deployed.
    #[must_use]
    pub const fn food_cost(self) -> u32 {
        match self {
            Self::Harvester => 2,
            Self::Thrower => 4,
            Self::ShortThrower | Self::LongThrower => 3,
            Self::Wall => 4,
            Self::Fire => 4,
            Self::Ninja => 6,
            Self::Scuba => 5,
            Self::Hungry => 4,
            Self::Bodyguard => 4,
            Self::SlowThrower => 4,
            Self::StunThrower => 6,
            Self::Queen => 2,
        }
    }

    /// Armor the variant starts with when constructed.
    #[must_use]
    pub const fn starting_armor(self) -> Armor {
        match self {
            Self::Wall => Armor::new(4),
            Self::Bodyguard => Armor::new(2),
            _ => Armor::new(1),
        }
    }

    /// Damage dealt by the variant's attack or expiry detonation.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Thrower
            | Self::ShortThrower
            | Self::LongThrower
            | Self::Scuba
            | Self::Ninja
            | Self::Queen => 1,
            Self::Fire => 3,
            _ => 0,
        }
    }

    /// Reports whether a bee must stop and sting instead of advancing past.
    #[must_use]
    pub const fn blocks_path(self) -> bool {
        !matches!(self, Self::Ninja)
    }

    /// Reports whether the variant can ward another ant in its slot.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Bodyguard)
    }

    /// Reports whether the variant survives water terrain.
    #[must_use]
    pub const fn is_watersafe(self) -> bool {
        matches!(self, Self::Scuba)
    }

    /// Hop band searched by ranged variants; `None` for melee and support.
    #[must_use]
    pub const fn range(self) -> Option<RangeBand> {
        match self {
            Self::Thrower | Self::Scuba | Self::SlowThrower | Self::StunThrower | Self::Queen => {
                Some(RangeBand::new(0, 10))
            }
            Self::ShortThrower => Some(RangeBand::new(0, 2)),
            Self::LongThrower => Some(RangeBand::new(4, 10)),
            _ => None,
        }
    }

    /// Status effect inflicted by the variant's throw, if any.
    #[must_use]
    pub const fn inflicts(self) -> Option<EffectKind> {
        match self {
            Self::SlowThrower => Some(EffectKind::Slow),
            Self::StunThrower => Some(EffectKind::Stun),
            _ => None,
        }
    }
}

/// Temporary behavior overrides that can be applied to a bee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// The bee takes no action while the counter runs.
    Stun,
    /// The bee acts only on even-numbered ticks while the counter runs.
    Slow,
}

impl EffectKind {
    /// Duration installed in the ledger when the effect is applied.
    #[must_use]
    pub const fn duration(self) -> u32 {
        match self {
            Self::Stun => 1,
            Self::Slow => 3,
        }
    }
}

/// Resolution of a bee's status dispatch for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The bee performs its default action this turn.
    Act,
    /// The bee holds and does nothing this turn.
    Hold,
}

/// Independent stun and slow counters carried by every bee.
///
/// Applying an effect installs its fixed duration without touching the other
/// counter. Dispatch gives stun priority over slow; slow permits the default
/// action on even global ticks only. After every dispatch, each non-zero
/// counter decrements by one, so a bee with both counters at zero acts every
/// tick again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusLedger {
    stun: u32,
    slow: u32,
}

impl StatusLedger {
    /// Creates a ledger with no active effects.
    #[must_use]
    pub const fn new() -> Self {
        Self { stun: 0, slow: 0 }
    }

    /// Installs the fixed duration for `effect`, leaving the other counter.
    pub fn apply(&mut self, effect: EffectKind) {
        match effect {
            EffectKind::Stun => self.stun = EffectKind::Stun.duration(),
            EffectKind::Slow => self.slow = EffectKind::Slow.duration(),
        }
    }

    /// Resolves whether the bee acts on the provided global tick.
    #[must_use]
    pub const fn disposition(&self, tick: u32) -> Disposition {
        if self.stun > 0 {
            Disposition::Hold
        } else if self.slow > 0 {
            if tick % 2 == 0 {
                Disposition::Act
            } else {
                Disposition::Hold
            }
        } else {
            Disposition::Act
        }
    }

    /// Decrements every non-zero counter after a dispatch resolves.
    pub fn decay(&mut self) {
        self.stun = self.stun.saturating_sub(1);
        self.slow = self.slow.saturating_sub(1);
    }

    /// Remaining stun turns.
    #[must_use]
    pub const fn stun(&self) -> u32 {
        self.stun
    }

    /// Remaining slow turns.
    #[must_use]
    pub const fn slow(&self) -> u32 {
        self.slow
    }
}

/// Reasons a slot admission or release may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The slot already holds an occupant the newcomer cannot share with.
    #[error("slot already occupied")]
    Occupied,
    /// The ant is not present in the slot it claims to occupy.
    #[error("ant missing from slot")]
    Missing,
}

/// Occupancy slot of a place: at most one simple ant, or a guarded pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// No ant occupies the place.
    #[default]
    Empty,
    /// A single non-container ant occupies the place.
    Occupied(AntId),
    /// A container guards the place, optionally warding one inner ant.
    Guarded {
        /// The outer container absorbing attacks.
        guard: AntId,
        /// The inner ant protected by the guard, if any.
        ward: Option<AntId>,
    },
}

impl Slot {
    /// Admits an ant into the slot.
    ///
    /// A container may enter an empty slot only; a non-container may enter an
    /// empty slot or become the ward of a guard with a free inner position.
    pub fn admit(&mut self, ant: AntId, container: bool) -> Result<(), PlacementError> {
        match (*self, container) {
            (Slot::Empty, true) => {
                *self = Slot::Guarded { guard: ant, ward: None };
                Ok(())
            }
            (Slot::Empty, false) => {
                *self = Slot::Occupied(ant);
                Ok(())
            }
            (Slot::Guarded { guard, ward: None }, false) => {
                *self = Slot::Guarded {
                    guard,
                    ward: Some(ant),
                };
                Ok(())
            }
            _ => Err(PlacementError::Occupied),
        }
    }

    /// Releases an ant from the slot, promoting a ward left behind by its
    /// guard. Returns the promoted ward when a hand-off occurred.
    pub fn release(&mut self, ant: AntId) -> Result<Option<AntId>, PlacementError> {
        match *self {
            Slot::Occupied(occupant) if occupant == ant => {
                *self = Slot::Empty;
                Ok(None)
            }
            Slot::Guarded { guard, ward } if guard == ant => {
                *self = match ward {
                    Some(ward) => Slot::Occupied(ward),
                    None => Slot::Empty,
                };
                Ok(ward)
            }
            Slot::Guarded { guard, ward: Some(ward) } if ward == ant => {
                *self = Slot::Guarded { guard, ward: None };
                Ok(None)
            }
            _ => Err(PlacementError::Missing),
        }
    }

    /// The ant a bee interacts with: the guard of a pair, or the sole
    /// occupant.
    #[must_use]
    pub const fn outward(&self) -> Option<AntId> {
        match *self {
            Slot::Empty => None,
            Slot::Occupied(ant) => Some(ant),
            Slot::Guarded { guard, .. } => Some(guard),
        }
    }

    /// The inner warded ant of a guarded pair, if any.
    #[must_use]
    pub const fn ward(&self) -> Option<AntId> {
        match *self {
            Slot::Guarded { ward, .. } => ward,
            _ => None,
        }
    }

    /// Reports whether the slot holds no ant at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// Commands that express all permissible colony mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Releases the wave scheduled for the current tick, if any, into a
    /// random entry place.
    ReleaseWave,
    /// Requests deployment of an ant variant to a named place.
    Deploy {
        /// Name of the destination place.
        place: String,
        /// Catalog name of the variant to construct.
        kind: String,
    },
    /// Detaches the outward ant occupying a named place, if any.
    Withdraw {
        /// Name of the place to clear.
        place: String,
    },
    /// Every ant alive at the start of the step acts, in place-table order.
    AntsAct,
    /// Every bee alive at the start of the step acts, in place-table order.
    BeesAct,
    /// Advances the simulation clock by one tick.
    AdvanceTick,
}

/// Events broadcast by the colony after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A scheduled wave left the hive for an entry place.
    WaveReleased {
        /// Tick the wave was scheduled for.
        tick: u32,
        /// Entry place the bees were released into.
        entry: PlaceId,
        /// Bees released, in schedule order.
        bees: Vec<BeeId>,
    },
    /// An ant was constructed and attached to a place.
    Deployed {
        /// Identifier assigned to the new ant.
        ant: AntId,
        /// Variant that was constructed.
        kind: AntKind,
        /// Place the ant now occupies.
        place: PlaceId,
    },
    /// A deployment was skipped because the colony lacked food.
    DeployRejected {
        /// Variant that was requested.
        kind: AntKind,
        /// Food the variant would have cost.
        cost: u32,
        /// Food available at the time of the request.
        food: u32,
    },
    /// An ant was detached by the withdraw operation.
    Withdrawn {
        /// Ant that was detached.
        ant: AntId,
        /// Place the ant previously occupied.
        place: PlaceId,
    },
    /// A harvester added food to the colony pool.
    FoodHarvested {
        /// Harvester that produced the food.
        ant: AntId,
        /// Pool total after the harvest.
        total: u32,
    },
    /// A status effect was installed on a bee.
    EffectApplied {
        /// Bee the effect was applied to.
        bee: BeeId,
        /// Effect kind that was installed.
        effect: EffectKind,
        /// Duration installed in the ledger.
        duration: u32,
    },
    /// An ant absorbed damage.
    AntDamaged {
        /// Ant that was damaged.
        ant: AntId,
        /// Damage applied.
        amount: u32,
        /// Armor remaining afterwards.
        remaining: Armor,
    },
    /// A bee absorbed damage.
    BeeDamaged {
        /// Bee that was damaged.
        bee: BeeId,
        /// Damage applied.
        amount: u32,
        /// Armor remaining afterwards.
        remaining: Armor,
    },
    /// An ant ran out of armor and was detached permanently.
    AntExpired {
        /// Ant that expired.
        ant: AntId,
        /// Place the ant occupied when it expired.
        place: PlaceId,
    },
    /// A bee ran out of armor and was detached permanently.
    BeeExpired {
        /// Bee that expired.
        bee: BeeId,
        /// Place the bee occupied when it expired.
        place: PlaceId,
    },
    /// A departing guard handed its slot to the ant it warded.
    GuardTransferred {
        /// Guard that expired or was withdrawn.
        guard: AntId,
        /// Ward promoted to sole occupant.
        ward: AntId,
        /// Place whose slot changed hands.
        place: PlaceId,
    },
    /// A bee advanced one place toward the queen.
    BeeAdvanced {
        /// Bee that moved.
        bee: BeeId,
        /// Place the bee left.
        from: PlaceId,
        /// Place the bee now occupies.
        to: PlaceId,
    },
    /// The queen relocated the colony's recorded queen site.
    QueenMoved {
        /// Freshly constructed sanctum now serving as the queen site.
        site: PlaceId,
    },
    /// The simulation clock advanced.
    TimeAdvanced {
        /// Tick value after the advance.
        tick: u32,
    },
}

/// Terminal result of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every bee was destroyed before reaching the queen site.
    Victory,
    /// A bee reached the queen site.
    Defeat,
}

/// Fatal errors that halt the simulation immediately.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ColonyError {
    /// A command referenced a place name missing from the registry.
    #[error("unknown place name `{0}`")]
    UnknownPlace(String),
    /// A deployment referenced a variant name missing from the catalog.
    #[error("unknown ant kind `{0}`")]
    UnknownKind(String),
    /// A deployment violated the containment placement rules.
    #[error("cannot place `{kind}` at `{place}`: {reason}")]
    Placement {
        /// Destination place of the rejected request.
        place: String,
        /// Catalog name of the variant that was requested.
        kind: &'static str,
        /// Specific slot rule that was violated.
        reason: PlacementError,
    },
    /// The layout's exit chain does not terminate at the queen chamber.
    #[error("layout cycle detected through `{0}`")]
    LayoutCycle(String),
    /// An operation addressed an ant that is no longer attached.
    #[error("ant {} is no longer attached to the colony", .0.get())]
    DetachedAnt(AntId),
    /// An operation addressed a bee that is no longer attached.
    #[error("bee {} is no longer attached to the colony", .0.get())]
    DetachedBee(BeeId),
}

/// The bees' plan of attack: timed waves of fixed-armor bees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssaultPlan {
    bee_armor: Armor,
    waves: BTreeMap<u32, Vec<Armor>>,
}

impl AssaultPlan {
    /// Creates an empty plan whose waves carry bees of the given armor.
    #[must_use]
    pub const fn new(bee_armor: Armor) -> Self {
        Self {
            bee_armor,
            waves: BTreeMap::new(),
        }
    }

    /// Adds `count` bees to the wave released at `tick`.
    #[must_use]
    pub fn wave(mut self, tick: u32, count: u32) -> Self {
        let bees = self.waves.entry(tick).or_default();
        for _ in 0..count {
            bees.push(self.bee_armor);
        }
        self
    }

    /// Iterates the scheduled waves in release order.
    pub fn waves(&self) -> impl Iterator<Item = (u32, &[Armor])> {
        self.waves.iter().map(|(tick, bees)| (*tick, bees.as_slice()))
    }

    /// Total number of bees across every wave.
    #[must_use]
    pub fn total_bees(&self) -> usize {
        self.waves.values().map(Vec::len).sum()
    }
}

/// Ground types a place can be built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Ordinary tunnel ground.
    Dry,
    /// Water that destroys insects unable to survive it.
    Water,
}

/// Description of a single place consumed by the colony constructor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSpec {
    name: String,
    terrain: Terrain,
    exit: Option<usize>,
    entry: bool,
}

impl PlaceSpec {
    /// Creates a new place description.
    ///
    /// `exit` indexes the downstream place within the same layout; `None`
    /// means the place exits directly into the queen chamber. `entry` marks
    /// the place as a bee entry point.
    #[must_use]
    pub fn new(name: String, terrain: Terrain, exit: Option<usize>, entry: bool) -> Self {
        Self {
            name,
            terrain,
            exit,
            entry,
        }
    }

    /// Name registered for the place.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ground the place is built on.
    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Index of the downstream place, or `None` for the queen chamber.
    #[must_use]
    pub const fn exit(&self) -> Option<usize> {
        self.exit
    }

    /// Reports whether bees may be released into the place.
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        self.entry
    }
}

/// Ordered collection of place descriptions forming the colony grounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    places: Vec<PlaceSpec>,
}

impl LayoutPlan {
    /// Creates a layout plan from place descriptions in registration order.
    #[must_use]
    pub fn new(places: Vec<PlaceSpec>) -> Self {
        Self { places }
    }

    /// Place descriptions in registration order.
    #[must_use]
    pub fn places(&self) -> &[PlaceSpec] {
        &self.places
    }
}

/// Immutable representation of a single ant's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AntSnapshot {
    /// Unique identifier assigned to the ant.
    pub id: AntId,
    /// Variant the ant was constructed from.
    pub kind: AntKind,
    /// Armor remaining.
    pub armor: Armor,
    /// Place currently occupied, or `None` once removed.
    pub place: Option<PlaceId>,
}

/// Read-only snapshot describing all ants in the colony.
#[derive(Clone, Debug, Default)]
pub struct AntView {
    snapshots: Vec<AntSnapshot>,
}

impl AntView {
    /// Creates a new ant view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AntSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &AntSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AntSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single bee's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeeSnapshot {
    /// Unique identifier assigned to the bee.
    pub id: BeeId,
    /// Armor remaining.
    pub armor: Armor,
    /// Place currently occupied, or `None` once removed.
    pub place: Option<PlaceId>,
    /// Active status counters.
    pub status: StatusLedger,
}

/// Read-only snapshot describing all bees in the colony.
#[derive(Clone, Debug, Default)]
pub struct BeeView {
    snapshots: Vec<BeeSnapshot>,
}

impl BeeView {
    /// Creates a new bee view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BeeSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BeeSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BeeSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique_and_resolvable() {
        for kind in AntKind::ALL {
            assert_eq!(AntKind::from_name(kind.name()), Some(kind));
        }
        let mut names: Vec<&str> = AntKind::ALL.iter().map(|kind| kind.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), AntKind::ALL.len());
        assert_eq!(AntKind::from_name("beekeeper"), None);
    }

    #[test]
    fn armor_reduction_saturates_and_depletes() {
        let armor = Armor::new(3);
        assert_eq!(armor.reduced_by(2), Armor::new(1));
        assert!(!armor.reduced_by(2).is_depleted());
        assert!(armor.reduced_by(3).is_depleted());
        assert!(armor.reduced_by(u32::MAX).is_depleted());
    }

    #[test]
    fn slot_admits_simple_ant_into_empty() {
        let mut slot = Slot::Empty;
        slot.admit(AntId::new(1), false).expect("admit");
        assert_eq!(slot.outward(), Some(AntId::new(1)));
        assert_eq!(slot.ward(), None);
    }

    #[test]
    fn slot_admits_ward_under_guard() {
        let mut slot = Slot::Empty;
        slot.admit(AntId::new(1), true).expect("guard");
        slot.admit(AntId::new(2), false).expect("ward");
        assert_eq!(slot.outward(), Some(AntId::new(1)));
        assert_eq!(slot.ward(), Some(AntId::new(2)));
    }

    #[test]
    fn slot_rejects_second_container_and_third_ant() {
        let mut slot = Slot::Empty;
        slot.admit(AntId::new(1), true).expect("guard");
        assert_eq!(slot.admit(AntId::new(2), true), Err(PlacementError::Occupied));

        slot.admit(AntId::new(2), false).expect("ward");
        assert_eq!(slot.admit(AntId::new(3), false), Err(PlacementError::Occupied));
    }

    #[test]
    fn slot_rejects_container_over_occupant() {
        let mut slot = Slot::Occupied(AntId::new(1));
        assert_eq!(slot.admit(AntId::new(2), true), Err(PlacementError::Occupied));
        assert_eq!(slot.admit(AntId::new(2), false), Err(PlacementError::Occupied));
    }

    #[test]
    fn slot_release_promotes_ward() {
        let mut slot = Slot::Guarded {
            guard: AntId::new(1),
            ward: Some(AntId::new(2)),
        };
        let promoted = slot.release(AntId::new(1)).expect("release guard");
        assert_eq!(promoted, Some(AntId::new(2)));
        assert_eq!(slot, Slot::Occupied(AntId::new(2)));
    }

    #[test]
    fn slot_release_of_ward_keeps_guard() {
        let mut slot = Slot::Guarded {
            guard: AntId::new(1),
            ward: Some(AntId::new(2)),
        };
        let promoted = slot.release(AntId::new(2)).expect("release ward");
        assert_eq!(promoted, None);
        assert_eq!(
            slot,
            Slot::Guarded {
                guard: AntId::new(1),
                ward: None,
            }
        );
    }

    #[test]
    fn slot_release_of_absent_ant_is_an_error() {
        let mut slot = Slot::Occupied(AntId::new(1));
        assert_eq!(slot.release(AntId::new(9)), Err(PlacementError::Missing));
    }

    #[test]
    fn stun_takes_priority_and_holds_one_turn() {
        let mut ledger = StatusLedger::new();
        ledger.apply(EffectKind::Stun);
        assert_eq!(ledger.disposition(0), Disposition::Hold);
        ledger.decay();
        assert_eq!(ledger.disposition(1), Disposition::Act);
    }

    #[test]
    fn slow_permits_even_ticks_for_three_turns() {
        let mut ledger = StatusLedger::new();
        ledger.apply(EffectKind::Slow);
        let mut acted = Vec::new();
        for tick in 4..8 {
            if ledger.disposition(tick) == Disposition::Act {
                acted.push(tick);
            }
            ledger.decay();
        }
        // counters expire after ticks 4..=6; tick 7 acts unconditionally.
        assert_eq!(acted, vec![4, 6, 7]);
    }

    #[test]
    fn applying_one_effect_preserves_the_other_counter() {
        let mut ledger = StatusLedger::new();
        ledger.apply(EffectKind::Slow);
        ledger.apply(EffectKind::Stun);
        assert_eq!(ledger.slow(), EffectKind::Slow.duration());
        assert_eq!(ledger.stun(), EffectKind::Stun.duration());
        assert_eq!(ledger.disposition(0), Disposition::Hold);
    }

    #[test]
    fn assault_plan_accumulates_waves_in_order() {
        let plan = AssaultPlan::new(Armor::new(3)).wave(3, 1).wave(2, 2).wave(3, 1);
        let waves: Vec<(u32, usize)> = plan.waves().map(|(tick, bees)| (tick, bees.len())).collect();
        assert_eq!(waves, vec![(2, 2), (3, 2)]);
        assert_eq!(plan.total_bees(), 4);
    }
}
