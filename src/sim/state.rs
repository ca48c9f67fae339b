//! Arena state and core simulation types
//!
//! The arena owns every agent. Agents never reference each other; steering
//! reads opposing collections through snapshots captured per tick.

use std::collections::HashSet;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::aabb_overlap;
use super::vec2::Vec2;
use crate::consts::*;

/// One of the three agent kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Rock,
    Paper,
    Scissors,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissors];

    /// The kind this kind converts on contact
    pub fn prey(self) -> Kind {
        match self {
            Kind::Rock => Kind::Scissors,
            Kind::Paper => Kind::Rock,
            Kind::Scissors => Kind::Paper,
        }
    }

    /// The kind that converts this kind on contact
    pub fn predator(self) -> Kind {
        match self {
            Kind::Rock => Kind::Paper,
            Kind::Paper => Kind::Scissors,
            Kind::Scissors => Kind::Rock,
        }
    }

    /// Plural display name ("Rocks win")
    pub fn plural(self) -> &'static str {
        match self {
            Kind::Rock => "Rocks",
            Kind::Paper => "Papers",
            Kind::Scissors => "Scissors",
        }
    }
}

/// An autonomous agent on the arena
///
/// `home` is where the agent heads when it has nothing to chase or flee.
/// For spawned agents that is the spawn cell; a converted agent is a fresh
/// agent whose home is the point of conversion.
#[derive(Debug, Clone)]
pub struct Agent {
    pub kind: Kind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub home: Vec2,
    pub size: f32,
}

impl Agent {
    pub fn new(kind: Kind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            home: pos,
            size: CELL_SIZE,
        }
    }

    /// True when the agent's bounding box overlaps its home bounding box.
    /// An overlap test, not exact equality: close enough counts as home.
    pub fn is_at_home(&self) -> bool {
        aabb_overlap(self.pos, self.size, self.home, self.size)
    }
}

/// Spawn failure: the placement grid has no free cells left
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    GridExhausted { occupied: usize, capacity: usize },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::GridExhausted { occupied, capacity } => write!(
                f,
                "spawn grid exhausted: {occupied} of {capacity} cells occupied"
            ),
        }
    }
}

impl std::error::Error for SpawnError {}

/// The battle arena: owns all agents, drives spawning and win detection
#[derive(Debug, Clone)]
pub struct Arena {
    width: f32,
    height: f32,
    cell_size: f32,
    pub(crate) rocks: Vec<Agent>,
    pub(crate) papers: Vec<Agent>,
    pub(crate) scissors: Vec<Agent>,
    occupied_cells: HashSet<(u32, u32)>,
    pub(crate) n_per_kind: u32,
    pub(crate) running: bool,
    pub(crate) winner: Option<Kind>,
    rng: Pcg32,
}

impl Arena {
    /// Standard 650x650 arena with 16px spawn cells
    pub fn new(seed: u64) -> Self {
        Self::with_dimensions(ARENA_WIDTH, ARENA_HEIGHT, CELL_SIZE, seed)
    }

    pub fn with_dimensions(width: f32, height: f32, cell_size: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            cell_size,
            rocks: Vec::new(),
            papers: Vec::new(),
            scissors: Vec::new(),
            occupied_cells: HashSet::new(),
            n_per_kind: 0,
            running: false,
            winner: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Agents of one kind, in collection order
    pub fn agents(&self, kind: Kind) -> &[Agent] {
        match kind {
            Kind::Rock => &self.rocks,
            Kind::Paper => &self.papers,
            Kind::Scissors => &self.scissors,
        }
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.agents(kind).len()
    }

    /// Total agent population across all kinds
    pub fn population(&self) -> usize {
        self.rocks.len() + self.papers.len() + self.scissors.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Kind> {
        self.winner
    }

    /// Clear agents and outcome, keeping dimensions and RNG state
    pub fn reset(&mut self) {
        self.rocks.clear();
        self.papers.clear();
        self.scissors.clear();
        self.occupied_cells.clear();
        self.n_per_kind = 0;
        self.running = false;
        self.winner = None;
    }

    /// Populate the arena with `n_per_kind` agents of each kind and start
    /// the battle. Replaces any previous population.
    pub fn spawn(&mut self, n_per_kind: u32) -> Result<(), SpawnError> {
        self.reset();
        self.n_per_kind = n_per_kind;
        for _ in 0..n_per_kind {
            self.add_agent(Kind::Paper)?;
            self.add_agent(Kind::Rock)?;
            self.add_agent(Kind::Scissors)?;
        }
        self.running = true;
        log::debug!(
            "spawned {} agents on a {}x{} grid",
            self.population(),
            self.grid_cols(),
            self.grid_rows()
        );
        Ok(())
    }

    /// Place one agent of `kind` at a random free spawn cell.
    ///
    /// Rejection-samples the grid; cell occupancy is only enforced here, at
    /// placement time. A full grid is a configuration error (the grid always
    /// has far more cells than agents for any supported battle size).
    pub fn add_agent(&mut self, kind: Kind) -> Result<(), SpawnError> {
        let (cols, rows) = (self.grid_cols(), self.grid_rows());
        let capacity = (cols as usize) * (rows as usize);
        if self.occupied_cells.len() >= capacity {
            log::error!("spawn grid exhausted at {} cells", capacity);
            return Err(SpawnError::GridExhausted {
                occupied: self.occupied_cells.len(),
                capacity,
            });
        }

        loop {
            let col = self.rng.random_range(0..cols);
            let row = self.rng.random_range(0..rows);
            if self.occupied_cells.insert((col, row)) {
                let pos = Vec2::new(col as f32 * self.cell_size, row as f32 * self.cell_size);
                self.collection_mut(kind).push(Agent::new(kind, pos));
                return Ok(());
            }
        }
    }

    /// A kind wins once it has absorbed everything (population 3n) and every
    /// survivor is back on its home box. Both must hold at the same check.
    pub(crate) fn check_winner(&mut self) {
        let full = (self.n_per_kind as usize) * 3;
        if full == 0 {
            return;
        }
        for kind in Kind::ALL {
            if self.count(kind) == full && self.agents(kind).iter().all(Agent::is_at_home) {
                self.winner = Some(kind);
                self.running = false;
                log::info!("{} win after absorbing all {} agents", kind.plural(), full);
                return;
            }
        }
    }

    pub(crate) fn collection_mut(&mut self, kind: Kind) -> &mut Vec<Agent> {
        match kind {
            Kind::Rock => &mut self.rocks,
            Kind::Paper => &mut self.papers,
            Kind::Scissors => &mut self.scissors,
        }
    }

    /// Columns of spawnable cells; the last column still keeps a full
    /// bounding box inside the arena
    fn grid_cols(&self) -> u32 {
        (((self.width - self.cell_size) / self.cell_size).max(0.0) as u32) + 1
    }

    fn grid_rows(&self) -> u32 {
        (((self.height - self.cell_size) / self.cell_size).max(0.0) as u32) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predation_cycle() {
        for kind in Kind::ALL {
            assert_eq!(kind.prey().predator(), kind);
            assert_ne!(kind.prey(), kind);
            assert_ne!(kind.predator(), kind.prey());
        }
    }

    #[test]
    fn test_spawn_distinct_cells() {
        let mut arena = Arena::new(7);
        arena.spawn(1).unwrap();

        assert_eq!(arena.population(), 3);
        assert!(!arena.is_finished());
        assert!(arena.is_running());

        // Three distinct grid-aligned cells inside the arena
        let mut cells = HashSet::new();
        for kind in Kind::ALL {
            for agent in arena.agents(kind) {
                assert_eq!(agent.pos.x % CELL_SIZE, 0.0);
                assert_eq!(agent.pos.y % CELL_SIZE, 0.0);
                assert!(agent.pos.x >= 0.0 && agent.pos.x <= ARENA_WIDTH - CELL_SIZE);
                assert!(agent.pos.y >= 0.0 && agent.pos.y <= ARENA_HEIGHT - CELL_SIZE);
                cells.insert((agent.pos.x as u32, agent.pos.y as u32));
            }
        }
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_spawn_exhausted_grid() {
        // 32x32 arena with 16px cells: 2x2 = 4 spawn cells
        let mut arena = Arena::with_dimensions(32.0, 32.0, 16.0, 1);
        // 6 agents cannot fit in 4 cells
        assert!(matches!(
            arena.spawn(2),
            Err(SpawnError::GridExhausted { capacity: 4, .. })
        ));
        // 3 agents fit fine
        let mut arena = Arena::with_dimensions(32.0, 32.0, 16.0, 1);
        arena.spawn(1).unwrap();
    }

    #[test]
    fn test_is_at_home_overlap_not_equality() {
        let mut agent = Agent::new(Kind::Rock, Vec2::new(100.0, 100.0));
        assert!(agent.is_at_home());

        // Nudged but still overlapping the home box
        agent.pos = Vec2::new(100.0 + CELL_SIZE - 1.0, 100.0);
        assert!(agent.is_at_home());

        // A full box away: no longer home
        agent.pos = Vec2::new(100.0 + CELL_SIZE + 1.0, 100.0);
        assert!(!agent.is_at_home());
    }

    #[test]
    fn test_win_requires_full_population_at_home() {
        let mut arena = Arena::new(3);
        arena.n_per_kind = 3;
        arena.running = true;
        for i in 0..9 {
            let pos = Vec2::new(i as f32 * 40.0, 50.0);
            arena.rocks.push(Agent::new(Kind::Rock, pos));
        }

        arena.check_winner();
        assert!(arena.is_finished());
        assert_eq!(arena.winner(), Some(Kind::Rock));
        assert!(!arena.is_running());
    }

    #[test]
    fn test_no_win_with_straggler_off_home() {
        let mut arena = Arena::new(3);
        arena.n_per_kind = 3;
        arena.running = true;
        for i in 0..9 {
            let pos = Vec2::new(i as f32 * 40.0, 50.0);
            arena.rocks.push(Agent::new(Kind::Rock, pos));
        }
        // One rock wandered away from its home box
        arena.rocks[4].pos = Vec2::new(600.0, 600.0);

        arena.check_winner();
        assert!(!arena.is_finished());
        assert_eq!(arena.winner(), None);
    }

    #[test]
    fn test_no_win_before_absorption() {
        let mut arena = Arena::new(3);
        arena.n_per_kind = 3;
        arena.running = true;
        // Full rock population minus one, plus a surviving paper
        for i in 0..8 {
            arena
                .rocks
                .push(Agent::new(Kind::Rock, Vec2::new(i as f32 * 40.0, 50.0)));
        }
        arena
            .papers
            .push(Agent::new(Kind::Paper, Vec2::new(400.0, 400.0)));

        arena.check_winner();
        assert!(!arena.is_finished());
    }

    #[test]
    fn test_reset_clears_outcome() {
        let mut arena = Arena::new(5);
        arena.spawn(2).unwrap();
        arena.winner = Some(Kind::Paper);
        arena.reset();
        assert_eq!(arena.population(), 0);
        assert_eq!(arena.winner(), None);
        assert!(!arena.is_running());
    }
}
