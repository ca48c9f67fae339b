//! Steering behaviors, after Craig Reynolds
//!
//! Each tick an agent picks one behavior - pursue its nearest prey, evade
//! its nearest predator, or drift home - and applies a single bounded
//! steering force. Forces never exceed `MAX_FORCE`, integrated velocity
//! never exceeds `MAX_SPEED`.

use super::state::Agent;
use super::vec2::Vec2;
use crate::consts::*;

/// Position/velocity snapshot of a steering target, captured before any
/// agent in the pass is mutated
#[derive(Debug, Clone, Copy)]
pub struct Waypoint {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Waypoint {
    pub fn of(agent: &Agent) -> Self {
        Self {
            pos: agent.pos,
            vel: agent.vel,
        }
    }
}

/// Nearest agent in `pool` to `from`, by Euclidean distance. Stable: the
/// first of several equidistant agents wins. An empty pool yields `None`.
pub fn nearest(pool: &[Agent], from: Vec2) -> Option<Waypoint> {
    let mut best: Option<(f32, &Agent)> = None;
    for agent in pool {
        let dist = from.distance(agent.pos);
        match best {
            Some((best_dist, _)) if best_dist <= dist => {}
            _ => best = Some((dist, agent)),
        }
    }
    best.map(|(_, agent)| Waypoint::of(agent))
}

/// Advance one agent by one tick.
///
/// Behavior selection: with both a prey and a predator in sight, flee the
/// predator unless the prey is strictly nearer. With neither, head home;
/// an agent exactly on its home point sits the tick out entirely.
pub fn update(agent: &mut Agent, prey: Option<Waypoint>, threat: Option<Waypoint>, bounds: Vec2) {
    let force = match (prey, threat) {
        (Some(prey), Some(threat)) => {
            if agent.pos.distance(prey.pos) < agent.pos.distance(threat.pos) {
                pursue(agent, prey)
            } else {
                evade(agent, threat)
            }
        }
        (Some(prey), None) => pursue(agent, prey),
        (None, Some(threat)) => evade(agent, threat),
        (None, None) => {
            if agent.pos.distance(agent.home) == 0.0 {
                return;
            }
            arrive(agent, agent.home)
        }
    };
    integrate(agent, force, bounds);
}

/// Steer toward a point: desired velocity at full speed (ramped down inside
/// `SLOW_RADIUS` when `arriving`), minus current velocity, force-limited.
fn seek(agent: &Agent, target: Vec2, arriving: bool) -> Vec2 {
    let offset = target - agent.pos;
    let mut desired_speed = MAX_SPEED;
    if arriving {
        let distance = offset.length();
        if distance < SLOW_RADIUS {
            desired_speed = distance * MAX_SPEED / SLOW_RADIUS;
        }
    }
    (offset.with_length(desired_speed) - agent.vel).clamp_length_max(MAX_FORCE)
}

/// Seek the target's position projected `LOOKAHEAD_TICKS` ahead
fn pursue(agent: &Agent, target: Waypoint) -> Vec2 {
    seek(agent, target.pos + target.vel * LOOKAHEAD_TICKS, false)
}

/// Flee the threat's projected position
fn evade(agent: &Agent, threat: Waypoint) -> Vec2 {
    -pursue(agent, threat)
}

/// Seek with the arrival ramp
fn arrive(agent: &Agent, target: Vec2) -> Vec2 {
    seek(agent, target, true)
}

/// Apply the force and move: accumulate acceleration, clamp speed, bounce
/// off walls the agent is about to cross, step position, zero acceleration.
fn integrate(agent: &mut Agent, force: Vec2, bounds: Vec2) {
    agent.acc += force;
    agent.vel += agent.acc;
    agent.vel = agent.vel.clamp_length_max(MAX_SPEED);

    // Probe half a body length ahead along the current heading
    let probe = agent.pos + agent.vel.with_length(agent.size / 2.0);
    if probe.x <= 0.0 || probe.x >= bounds.x - agent.size {
        agent.vel = agent.vel * Vec2::new(-1.0, 1.0);
    }
    if probe.y <= 0.0 || probe.y >= bounds.y - agent.size {
        agent.vel = agent.vel * Vec2::new(1.0, -1.0);
    }

    agent.pos += agent.vel;
    agent.acc = Vec2::ZERO;
}
