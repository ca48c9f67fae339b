//! Pairwise collision detection and conversion
//!
//! Every contact is a 1:1 conversion: the prey agent is removed and a fresh
//! predator-kind agent appears at its position, homed there. The three
//! predator/prey scans run in a fixed order each tick, and a removal is
//! visible to every later scan, so an agent converted once this tick can
//! never be matched again.

use super::state::{Agent, Arena, Kind};
use super::vec2::Vec2;

/// Axis-aligned bounding-box overlap between two square agents anchored at
/// their top-left corner
pub fn aabb_overlap(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    b.x < a.x + a_size && b.x + b_size > a.x && b.y < a.y + a_size && b.y + b_size > a.y
}

impl Arena {
    /// Run the conversion scans in fixed order: Paper eats Rock, Scissors
    /// eats Paper, Rock eats Scissors. Within a scan the first overlapping
    /// predator claims the prey.
    pub fn resolve_collisions(&mut self) {
        self.convert_overlaps(Kind::Paper);
        self.convert_overlaps(Kind::Scissors);
        self.convert_overlaps(Kind::Rock);
    }

    fn convert_overlaps(&mut self, predator: Kind) {
        let (predators, prey) = self.predation_pair_mut(predator);
        let mut i = 0;
        while i < predators.len() {
            let (p_pos, p_size) = (predators[i].pos, predators[i].size);
            let mut j = 0;
            while j < prey.len() {
                if aabb_overlap(p_pos, p_size, prey[j].pos, prey[j].size) {
                    let victim = prey.remove(j);
                    log::debug!(
                        "{:?} at ({:.0},{:.0}) converted to {:?}",
                        victim.kind,
                        victim.pos.x,
                        victim.pos.y,
                        predator
                    );
                    predators.push(Agent::new(predator, victim.pos));
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }

    fn predation_pair_mut(&mut self, predator: Kind) -> (&mut Vec<Agent>, &mut Vec<Agent>) {
        match predator {
            Kind::Paper => (&mut self.papers, &mut self.rocks),
            Kind::Scissors => (&mut self.scissors, &mut self.papers),
            Kind::Rock => (&mut self.rocks, &mut self.scissors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let size = 16.0;
        let a = Vec2::new(100.0, 100.0);
        assert!(aabb_overlap(a, size, Vec2::new(110.0, 108.0), size));
        // Touching edges do not overlap
        assert!(!aabb_overlap(a, size, Vec2::new(116.0, 100.0), size));
        assert!(!aabb_overlap(a, size, Vec2::new(100.0, 200.0), size));
    }

    #[test]
    fn test_paper_converts_overlapping_rock() {
        let mut arena = Arena::new(1);
        let rock_pos = Vec2::new(200.0, 200.0);
        arena.rocks.push(Agent::new(Kind::Rock, rock_pos));
        arena
            .papers
            .push(Agent::new(Kind::Paper, Vec2::new(208.0, 205.0)));

        arena.resolve_collisions();

        assert_eq!(arena.count(Kind::Rock), 0);
        assert_eq!(arena.count(Kind::Paper), 2);
        // The convert appears exactly where the rock fell, homed there
        let convert = &arena.agents(Kind::Paper)[1];
        assert_eq!(convert.pos, rock_pos);
        assert_eq!(convert.home, rock_pos);
    }

    #[test]
    fn test_non_overlapping_pair_untouched() {
        let mut arena = Arena::new(1);
        arena
            .rocks
            .push(Agent::new(Kind::Rock, Vec2::new(100.0, 100.0)));
        arena
            .papers
            .push(Agent::new(Kind::Paper, Vec2::new(400.0, 400.0)));

        arena.resolve_collisions();

        assert_eq!(arena.count(Kind::Rock), 1);
        assert_eq!(arena.count(Kind::Paper), 1);
    }

    #[test]
    fn test_conversion_chain_preserves_population() {
        // Rock, paper and scissors all stacked on one spot. Scan order:
        // the paper eats the rock, then the scissor eats both papers, and
        // no rocks remain for the final scan. 3 in, 3 out.
        let mut arena = Arena::new(1);
        let spot = Vec2::new(300.0, 300.0);
        arena.rocks.push(Agent::new(Kind::Rock, spot));
        arena.papers.push(Agent::new(Kind::Paper, spot));
        arena.scissors.push(Agent::new(Kind::Scissors, spot));

        arena.resolve_collisions();

        assert_eq!(arena.population(), 3);
        assert_eq!(arena.count(Kind::Rock), 0);
        assert_eq!(arena.count(Kind::Paper), 0);
        assert_eq!(arena.count(Kind::Scissors), 3);
    }

    #[test]
    fn test_removed_prey_not_rematched_same_tick() {
        // A rock flanked by two papers is converted exactly once: one
        // conversion per victim, never two
        let mut arena = Arena::new(1);
        arena
            .rocks
            .push(Agent::new(Kind::Rock, Vec2::new(200.0, 200.0)));
        arena
            .papers
            .push(Agent::new(Kind::Paper, Vec2::new(195.0, 200.0)));
        arena
            .papers
            .push(Agent::new(Kind::Paper, Vec2::new(205.0, 200.0)));

        arena.resolve_collisions();

        assert_eq!(arena.count(Kind::Rock), 0);
        assert_eq!(arena.count(Kind::Paper), 3);
        assert_eq!(arena.population(), 3);
    }
}
