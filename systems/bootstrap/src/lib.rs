#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Colony Defence experience.
//!
//! Layouts follow the classic tunnel shape: each tunnel is a chain of places
//! exiting toward the queen chamber, with the farthest step marked as the
//! bee entry. Wet layouts interleave water moats that only watersafe insects
//! survive.

use colony_defence_core::{Armor, AssaultPlan, ColonyError, LayoutPlan, PlaceSpec, Terrain};
use colony_defence_world::{Colony, Config};

/// Food a colony starts with unless a run overrides it.
pub const STARTING_FOOD: u32 = 4;

const MOAT_FREQUENCY: u32 = 3;

/// Single dry practice tunnel of length eight.
#[must_use]
pub fn test_layout() -> LayoutPlan {
    dry_layout(8, 1)
}

/// Dry layout with the requested tunnel count and length.
#[must_use]
pub fn dry_layout(length: u32, tunnels: u32) -> LayoutPlan {
    mixed_layout(length, tunnels, 0)
}

/// Layout interleaving a water moat every third step of each tunnel.
#[must_use]
pub fn wet_layout(length: u32, tunnels: u32) -> LayoutPlan {
    mixed_layout(length, tunnels, MOAT_FREQUENCY)
}

fn mixed_layout(length: u32, tunnels: u32, moat_frequency: u32) -> LayoutPlan {
    let mut places = Vec::new();
    for tunnel in 0..tunnels {
        for step in 0..length {
            let moat = moat_frequency != 0 && (step + 1) % moat_frequency == 0;
            let (terrain, label) = if moat {
                (Terrain::Water, "water")
            } else {
                (Terrain::Dry, "tunnel")
            };
            let exit = if step == 0 { None } else { Some(places.len() - 1) };
            places.push(PlaceSpec::new(
                format!("{label}-{tunnel}-{step}"),
                terrain,
                exit,
                step == length - 1,
            ));
        }
    }
    LayoutPlan::new(places)
}

/// Practice plan: one bee at tick two, another at tick three.
#[must_use]
pub fn test_assault_plan() -> AssaultPlan {
    AssaultPlan::new(Armor::new(3)).wave(2, 1).wave(3, 1)
}

/// Standard campaign: waves every other tick, then a surge of eight.
#[must_use]
pub fn full_assault_plan() -> AssaultPlan {
    let mut plan = AssaultPlan::new(Armor::new(3)).wave(2, 1);
    for tick in (3..15).step_by(2) {
        plan = plan.wave(tick, 1);
    }
    plan.wave(15, 8)
}

/// Hardened campaign: tougher bees, waves every tick, a surge of twenty.
#[must_use]
pub fn insane_assault_plan() -> AssaultPlan {
    let mut plan = AssaultPlan::new(Armor::new(4)).wave(1, 2);
    for tick in 3..15 {
        plan = plan.wave(tick, 1);
    }
    plan.wave(15, 20)
}

/// Assembles a ready colony from a layout, plan, food pool, and seed.
pub fn assemble(
    layout: LayoutPlan,
    plan: AssaultPlan,
    food: u32,
    seed: u64,
) -> Result<Colony, ColonyError> {
    Colony::new(Config::new(layout, plan, food, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_defence_world::query;

    #[test]
    fn test_layout_is_one_tunnel_of_eight() {
        let layout = test_layout();
        assert_eq!(layout.places().len(), 8);
        assert_eq!(layout.places()[0].name(), "tunnel-0-0");
        assert_eq!(layout.places()[0].exit(), None);
        assert!(layout.places()[7].is_entry());
        assert!(layout.places().iter().filter(|spec| spec.is_entry()).count() == 1);
    }

    #[test]
    fn wet_layout_floods_every_third_step() {
        let layout = wet_layout(8, 1);
        let water: Vec<&str> = layout
            .places()
            .iter()
            .filter(|spec| spec.terrain() == Terrain::Water)
            .map(|spec| spec.name())
            .collect();
        assert_eq!(water, vec!["water-0-2", "water-0-5"]);
    }

    #[test]
    fn dry_layout_registers_tunnels_in_order() {
        let layout = dry_layout(4, 2);
        assert_eq!(layout.places().len(), 8);
        assert_eq!(layout.places()[4].name(), "tunnel-1-0");
        assert_eq!(layout.places()[4].exit(), None);
        assert_eq!(layout.places()[5].exit(), Some(4));
        assert_eq!(
            layout
                .places()
                .iter()
                .filter(|spec| spec.is_entry())
                .count(),
            2
        );
    }

    #[test]
    fn plan_presets_match_the_campaign_tables() {
        assert_eq!(test_assault_plan().total_bees(), 2);
        assert_eq!(full_assault_plan().total_bees(), 1 + 6 + 8);
        assert_eq!(insane_assault_plan().total_bees(), 2 + 12 + 20);
    }

    #[test]
    fn assemble_produces_a_colony_with_staged_bees() {
        let colony = assemble(test_layout(), test_assault_plan(), STARTING_FOOD, 11)
            .expect("colony assembles");
        assert_eq!(query::hive_garrison(&colony), 2);
        assert_eq!(query::food(&colony), STARTING_FOOD);
        assert_eq!(query::entries(&colony).len(), 1);
    }
}
