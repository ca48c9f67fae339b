//! Per-tick orchestration
//!
//! One tick = one collision/conversion pass, then one steering update for
//! every agent, then the winner check. The arena never schedules itself;
//! the driver calls `tick` once per frame (or in a tight loop headlessly).

use super::state::{Agent, Arena, Kind};
use super::steering;
use super::vec2::Vec2;

impl Arena {
    /// Advance the battle by one tick. A no-op once a winner is decided or
    /// before the first spawn.
    pub fn tick(&mut self) {
        if !self.running || self.winner.is_some() {
            return;
        }
        self.resolve_collisions();
        // Fixed update order: all Papers, then Rocks, then Scissors
        self.steer_kind(Kind::Paper);
        self.steer_kind(Kind::Rock);
        self.steer_kind(Kind::Scissors);
        self.check_winner();
    }

    fn steer_kind(&mut self, kind: Kind) {
        let bounds = Vec2::new(self.width(), self.height());
        let (agents, prey_pool, threat_pool) = self.steering_pools_mut(kind);
        for agent in agents.iter_mut() {
            let prey = steering::nearest(prey_pool, agent.pos);
            let threat = steering::nearest(threat_pool, agent.pos);
            steering::update(agent, prey, threat, bounds);
        }
    }

    /// Split borrow: the kind's own agents mutably, its prey and predator
    /// collections read-only
    fn steering_pools_mut(&mut self, kind: Kind) -> (&mut Vec<Agent>, &[Agent], &[Agent]) {
        match kind {
            Kind::Rock => (&mut self.rocks, &self.scissors, &self.papers),
            Kind::Paper => (&mut self.papers, &self.rocks, &self.scissors),
            Kind::Scissors => (&mut self.scissors, &self.papers, &self.rocks),
        }
    }
}
