//! Drawing seam between the simulation and whatever renders it
//!
//! The core draws by handing sprites to a [`DrawSurface`]; the wasm driver
//! backs it with a canvas 2D context, tests with a recording stub.

use crate::sim::{Arena, Kind};

/// A surface that can draw one kind-tagged sprite at a pixel rectangle
pub trait DrawSurface {
    fn draw_sprite(&mut self, kind: Kind, x: f32, y: f32, w: f32, h: f32);
}

impl Arena {
    /// Draw every agent, one sprite each, in collection order
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        for kind in Kind::ALL {
            for agent in self.agents(kind) {
                surface.draw_sprite(kind, agent.pos.x, agent.pos.y, agent.size, agent.size);
            }
        }
    }
}
