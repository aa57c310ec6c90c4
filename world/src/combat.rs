//! Damage application and the removal protocol.
//!
//! Armor only ever decreases here. Lethal damage runs the variant's
//! pre-removal hook against the state captured before detachment, resolves
//! the containment hand-off, and only then detaches the insect for good.

use colony_defence_core::{AntId, AntKind, BeeId, ColonyError, Event, PlaceId};

use crate::Colony;

/// Reduces an ant's armor, detaching it permanently when depleted.
pub(crate) fn reduce_ant_armor(
    colony: &mut Colony,
    ant: AntId,
    amount: u32,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    let Some(place) = colony.ant(ant).place else {
        return Err(ColonyError::DetachedAnt(ant));
    };
    let remaining = colony.ant(ant).armor.reduced_by(amount);
    colony.ant_mut(ant).armor = remaining;
    out_events.push(Event::AntDamaged {
        ant,
        amount,
        remaining,
    });
    if !remaining.is_depleted() {
        return Ok(());
    }

    // Pre-removal hook: fire detonates over the bees present right now,
    // before the slot changes hands.
    if colony.ant(ant).kind == AntKind::Fire {
        let caught = colony.place(place).bees.clone();
        for bee in caught {
            reduce_bee_armor(colony, bee, AntKind::Fire.damage(), out_events)?;
        }
    }

    detach_ant(colony, ant, place, out_events)
}

fn detach_ant(
    colony: &mut Colony,
    ant: AntId,
    place: PlaceId,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
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
    tracing::debug!(ant = ant.get(), "ant expired");
    out_events.push(Event::AntExpired { ant, place });
    Ok(())
}

/// Reduces a bee's armor, detaching it permanently when depleted.
pub(crate) fn reduce_bee_armor(
    colony: &mut Colony,
    bee: BeeId,
    amount: u32,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    let Some(place) = colony.bee(bee).place else {
        return Err(ColonyError::DetachedBee(bee));
    };
    let remaining = colony.bee(bee).armor.reduced_by(amount);
    colony.bee_mut(bee).armor = remaining;
    out_events.push(Event::BeeDamaged {
        bee,
        amount,
        remaining,
    });
    if !remaining.is_depleted() {
        return Ok(());
    }

    let position = colony
        .place(place)
        .bees
        .iter()
        .position(|occupant| *occupant == bee)
        .ok_or(ColonyError::DetachedBee(bee))?;
    let _ = colony.place_mut(place).bees.remove(position);
    colony.bee_mut(bee).place = None;
    tracing::debug!(bee = bee.get(), "bee expired");
    out_events.push(Event::BeeExpired { bee, place });
    Ok(())
}
