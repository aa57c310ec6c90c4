#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure range-bounded nearest-target search along a colony approach chain.
//!
//! Ranged ants look backward along the `entrance` links of their place,
//! expressed here as a slice of [`Hop`] snapshots with the ant's own place at
//! hop zero. The search skips the range band's minimum, then stops at the
//! first hop holding bees and samples one uniformly. The hive and the end of
//! the chain both terminate the search empty-handed.

use colony_defence_core::{BeeId, PlaceId, RangeBand};
use rand::seq::SliceRandom;
use rand::Rng;

/// One step of the approach chain walked backward from a defender's place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hop {
    place: PlaceId,
    staging: bool,
    bees: Vec<BeeId>,
}

impl Hop {
    /// Creates a new hop snapshot.
    #[must_use]
    pub fn new(place: PlaceId, staging: bool, bees: Vec<BeeId>) -> Self {
        Self {
            place,
            staging,
            bees,
        }
    }

    /// Place the hop describes.
    #[must_use]
    pub const fn place(&self) -> PlaceId {
        self.place
    }

    /// Reports whether the hop is the hive, which ends every search.
    #[must_use]
    pub const fn is_staging(&self) -> bool {
        self.staging
    }

    /// Bees occupying the hop, in occupant order.
    #[must_use]
    pub fn bees(&self) -> &[BeeId] {
        &self.bees
    }
}

/// Selects a bee within the range band, uniformly among the occupants of the
/// nearest populated hop.
///
/// Returns `None` when the chain ends, the hive is reached, or `band.max()`
/// hops past the skipped minimum hold no bees.
#[must_use]
pub fn select_target<R: Rng>(hops: &[Hop], band: RangeBand, rng: &mut R) -> Option<BeeId> {
    let mut index = band.min() as usize;
    let mut taken: u32 = 0;
    loop {
        let hop = hops.get(index)?;
        if hop.is_staging() {
            return None;
        }
        if !hop.bees().is_empty() {
            return hop.bees().choose(rng).copied();
        }
        if taken >= band.max() {
            return None;
        }
        index += 1;
        taken += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{select_target, Hop};
    use colony_defence_core::{BeeId, PlaceId, RangeBand};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0x4c6f_6e67)
    }

    fn chain(length: u32, bees_at: &[(u32, u32)]) -> Vec<Hop> {
        (0..length)
            .map(|hop| {
                let bees = bees_at
                    .iter()
                    .filter(|(at, _)| *at == hop)
                    .map(|(_, id)| BeeId::new(*id))
                    .collect();
                Hop::new(PlaceId::new(hop), false, bees)
            })
            .collect()
    }

    #[test]
    fn finds_bee_in_own_place_at_zero_minimum() {
        let hops = chain(4, &[(0, 7)]);
        let target = select_target(&hops, RangeBand::new(0, 10), &mut rng());
        assert_eq!(target, Some(BeeId::new(7)));
    }

    #[test]
    fn skips_bees_closer_than_the_minimum() {
        let hops = chain(8, &[(2, 7)]);
        let target = select_target(&hops, RangeBand::new(4, 10), &mut rng());
        assert_eq!(target, None);
    }

    #[test]
    fn sees_bees_past_the_minimum() {
        let hops = chain(8, &[(5, 7)]);
        let target = select_target(&hops, RangeBand::new(4, 10), &mut rng());
        assert_eq!(target, Some(BeeId::new(7)));
    }

    #[test]
    fn stops_at_the_nearest_populated_hop() {
        let hops = chain(8, &[(3, 1), (6, 2)]);
        let target = select_target(&hops, RangeBand::new(0, 10), &mut rng());
        assert_eq!(target, Some(BeeId::new(1)));
    }

    #[test]
    fn exhausts_the_maximum_before_a_distant_bee() {
        let hops = chain(8, &[(5, 7)]);
        let target = select_target(&hops, RangeBand::new(0, 2), &mut rng());
        assert_eq!(target, None);
    }

    #[test]
    fn maximum_counts_hops_past_the_skipped_minimum() {
        let hops = chain(8, &[(6, 7)]);
        let target = select_target(&hops, RangeBand::new(4, 2), &mut rng());
        assert_eq!(target, Some(BeeId::new(7)));
    }

    #[test]
    fn the_hive_terminates_the_search() {
        let mut hops = chain(3, &[]);
        hops.push(Hop::new(PlaceId::new(9), true, vec![BeeId::new(7)]));
        let target = select_target(&hops, RangeBand::new(0, 10), &mut rng());
        assert_eq!(target, None);
    }

    #[test]
    fn a_short_chain_terminates_the_search() {
        let hops = chain(3, &[]);
        assert_eq!(select_target(&hops, RangeBand::new(0, 10), &mut rng()), None);
        assert_eq!(select_target(&hops, RangeBand::new(5, 10), &mut rng()), None);
    }

    #[test]
    fn sampling_is_uniform_over_the_stopping_hop_only() {
        let hops = chain(6, &[(2, 1), (2, 2), (2, 3), (4, 9)]);
        let mut rng = rng();
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..64 {
            let target = select_target(&hops, RangeBand::new(0, 10), &mut rng).expect("target");
            let _ = seen.insert(target);
        }
        assert_eq!(
            seen.into_iter().collect::<Vec<_>>(),
            vec![BeeId::new(1), BeeId::new(2), BeeId::new(3)]
        );
    }
}
