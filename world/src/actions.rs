//! Per-variant turn actions for ants and the default bee action.
//!
//! Both action steps operate over a roster captured before the first action
//! resolves: insects added or removed mid-step get no extra or missing turn,
//! and an insect whose armor is already depleted when its turn arrives skips.

use colony_defence_core::{AntId, AntKind, BeeId, ColonyError, Disposition, Event, PlaceId};
use colony_defence_system_targeting::select_target;
use rand::seq::SliceRandom;

use crate::combat;
use crate::Colony;

const DIGESTION_TURNS: u32 = 3;
const STING_DAMAGE: u32 = 1;

/// Every ant alive at step start acts, in place-table order.
pub(crate) fn ants_act(colony: &mut Colony, out_events: &mut Vec<Event>) -> Result<(), ColonyError> {
    let roster: Vec<AntId> = colony
        .places
        .iter()
        .filter_map(|place| place.slot.outward())
        .collect();
    for ant in roster {
        let record = colony.ant(ant);
        if record.place.is_none() || record.armor.is_depleted() {
            continue;
        }
        ant_act(colony, ant, out_events)?;
    }
    Ok(())
}

fn ant_act(colony: &mut Colony, ant: AntId, out_events: &mut Vec<Event>) -> Result<(), ColonyError> {
    match colony.ant(ant).kind {
        AntKind::Harvester => {
            colony.food = colony.food.saturating_add(1);
            out_events.push(Event::FoodHarvested {
                ant,
                total: colony.food,
            });
            Ok(())
        }
        AntKind::Thrower
        | AntKind::ShortThrower
        | AntKind::LongThrower
        | AntKind::Scuba
        | AntKind::SlowThrower
        | AntKind::StunThrower => throw(colony, ant, out_events),
        AntKind::Wall | AntKind::Fire => Ok(()),
        AntKind::Ninja => ninja_strike(colony, ant, out_events),
        AntKind::Hungry => hungry_act(colony, ant, out_events),
        AntKind::Bodyguard => {
            let place = colony.ant(ant).place.ok_or(ColonyError::DetachedAnt(ant))?;
            match colony.place(place).slot.ward() {
                Some(ward) => ant_act(colony, ward, out_events),
                None => Ok(()),
            }
        }
        AntKind::Queen => queen_act(colony, ant, out_events),
    }
}

fn throw(colony: &mut Colony, ant: AntId, out_events: &mut Vec<Event>) -> Result<(), ColonyError> {
    let record = colony.ant(ant);
    let kind = record.kind;
    let Some(band) = kind.range() else {
        return Ok(());
    };
    let place = record.place.ok_or(ColonyError::DetachedAnt(ant))?;

    let hops = colony.approach(place);
    let Some(bee) = select_target(&hops, band, &mut colony.rng) else {
        return Ok(());
    };
    match kind.inflicts() {
        Some(effect) => {
            colony.bee_mut(bee).status.apply(effect);
            out_events.push(Event::EffectApplied {
                bee,
                effect,
                duration: effect.duration(),
            });
            Ok(())
        }
        None => combat::reduce_bee_armor(colony, bee, kind.damage(), out_events),
    }
}

fn ninja_strike(
    colony: &mut Colony,
    ant: AntId,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    let place = colony.ant(ant).place.ok_or(ColonyError::DetachedAnt(ant))?;
    let caught = colony.place(place).bees.clone();
    for bee in caught {
        combat::reduce_bee_armor(colony, bee, AntKind::Ninja.damage(), out_events)?;
    }
    Ok(())
}

fn hungry_act(
    colony: &mut Colony,
    ant: AntId,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    if colony.ant(ant).digestion > 0 {
        colony.ant_mut(ant).digestion -= 1;
        return Ok(());
    }
    let place = colony.ant(ant).place.ok_or(ColonyError::DetachedAnt(ant))?;
    let pool = colony.place(place).bees.clone();
    let Some(&meal) = pool.choose(&mut colony.rng) else {
        return Ok(());
    };
    let bulk = colony.bee(meal).armor.get().max(0) as u32;
    combat::reduce_bee_armor(colony, meal, bulk, out_events)?;
    colony.ant_mut(ant).digestion = DIGESTION_TURNS;
    Ok(())
}

fn queen_act(
    colony: &mut Colony,
    ant: AntId,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    if colony.ant(ant).imposter {
        let remaining = colony.ant(ant).armor.get().max(0) as u32;
        return combat::reduce_ant_armor(colony, ant, remaining, out_events);
    }
    let site = colony.spawn_sanctum();
    out_events.push(Event::QueenMoved { site });
    throw(colony, ant, out_events)
}

/// Every bee alive at step start acts, in place-table order and occupant
/// order, then its status counters decay.
pub(crate) fn bees_act(colony: &mut Colony, out_events: &mut Vec<Event>) -> Result<(), ColonyError> {
    let roster: Vec<BeeId> = colony
        .places
        .iter()
        .flat_map(|place| place.bees.iter().copied())
        .collect();
    for bee in roster {
        let record = colony.bee(bee);
        if record.place.is_none() || record.armor.is_depleted() {
            continue;
        }
        if record.status.disposition(colony.tick) == Disposition::Act {
            bee_act(colony, bee, out_events)?;
        }
        colony.bee_mut(bee).status.decay();
    }
    Ok(())
}

fn bee_act(colony: &mut Colony, bee: BeeId, out_events: &mut Vec<Event>) -> Result<(), ColonyError> {
    let place = colony.bee(bee).place.ok_or(ColonyError::DetachedBee(bee))?;
    let blocker = colony
        .place(place)
        .slot
        .outward()
        .filter(|ant| colony.ant(*ant).kind.blocks_path());
    if let Some(ant) = blocker {
        return combat::reduce_ant_armor(colony, ant, STING_DAMAGE, out_events);
    }
    if colony.is_hive(place) {
        return Ok(());
    }
    let Some(exit) = colony.place(place).exit else {
        return Ok(());
    };
    step_bee(colony, bee, place, exit, out_events)
}

fn step_bee(
    colony: &mut Colony,
    bee: BeeId,
    from: PlaceId,
    to: PlaceId,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    let position = colony
        .place(from)
        .bees
        .iter()
        .position(|occupant| *occupant == bee)
        .ok_or(ColonyError::DetachedBee(bee))?;
    let _ = colony.place_mut(from).bees.remove(position);
    colony.place_mut(to).bees.push(bee);
    colony.bee_mut(bee).place = Some(to);
    out_events.push(Event::BeeAdvanced { bee, from, to });

    if colony.is_water(to) && !colony.bee(bee).watersafe {
        let bulk = colony.bee(bee).armor.get().max(0) as u32;
        combat::reduce_bee_armor(colony, bee, bulk, out_events)?;
    }
    Ok(())
}
