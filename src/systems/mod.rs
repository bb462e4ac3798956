mod movement;
mod paving;
mod pickup;

pub use movement::{MovementSystem, PAVED_SPEED, UNPAVED_SPEED};
pub use paving::PavingSystem;
pub use pickup::PickupSystem;

use serde::Serialize;

use crate::{input::InputIntent, landscape::TileCoord, world::World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TickEvent {
    AsphaltCollected { coord: TileCoord, inventory: u32 },
    TilePaved { coord: TileCoord, inventory: u32 },
}

pub struct TickContext<'a> {
    pub intent: &'a InputIntent,
    pub events: Vec<TickEvent>,
}

impl<'a> TickContext<'a> {
    pub fn new(intent: &'a InputIntent) -> Self {
        Self {
            intent,
            events: Vec::new(),
        }
    }
}

/// One step of the per-tick pipeline. Systems run in a fixed order and see
/// the world as the previous system left it.
pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World);
}
