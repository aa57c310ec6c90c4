//! The staging area: bee construction and scheduled wave release.

use colony_defence_core::{AssaultPlan, BeeId, ColonyError, Event, StatusLedger};
use rand::seq::SliceRandom;

use crate::{BeeRecord, Colony};

/// Constructs every bee in the plan into the hive and records the release
/// schedule keyed by tick.
pub(crate) fn materialize(colony: &mut Colony, plan: &AssaultPlan) {
    for (tick, armors) in plan.waves() {
        let mut wave = Vec::with_capacity(armors.len());
        for armor in armors {
            let bee = BeeId::new(colony.bees.len() as u32);
            colony.bees.push(BeeRecord {
                armor: *armor,
                place: Some(colony.hive),
                status: StatusLedger::new(),
                watersafe: true,
            });
            let hive = colony.hive;
            colony.place_mut(hive).bees.push(bee);
            wave.push(bee);
        }
        let _ = colony.schedule.insert(tick, wave);
    }
}

/// Releases the wave scheduled for the current tick, if any, into an entry
/// place chosen uniformly at random. The schedule entry is consumed, so a
/// wave is released exactly once.
pub(crate) fn release_wave(
    colony: &mut Colony,
    out_events: &mut Vec<Event>,
) -> Result<(), ColonyError> {
    if !colony.schedule.contains_key(&colony.tick) {
        return Ok(());
    }
    let Some(&entry) = colony.entries.choose(&mut colony.rng) else {
        return Ok(());
    };
    let wave = colony.schedule.remove(&colony.tick).unwrap_or_default();
    for bee in &wave {
        let hive = colony.hive;
        let position = colony
            .place(hive)
            .bees
            .iter()
            .position(|occupant| occupant == bee)
            .ok_or(ColonyError::DetachedBee(*bee))?;
        let _ = colony.place_mut(hive).bees.remove(position);
        colony.place_mut(entry).bees.push(*bee);
        colony.bee_mut(*bee).place = Some(entry);
    }

    tracing::debug!(tick = colony.tick, count = wave.len(), "wave released");
    out_events.push(Event::WaveReleased {
        tick: colony.tick,
        entry,
        bees: wave,
    });
    Ok(())
}
