use crate::world::World;

use super::{System, TickContext, TickEvent};

/// Collects asphalt lying on the tile the player ends the move on.
#[derive(Default)]
pub struct PickupSystem;

impl PickupSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for PickupSystem {
    fn name(&self) -> &str {
        "pickup"
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World) {
        let tile = world.player.tile();
        if world.landscape.try_take_asphalt(tile) {
            world.player.asphalt_count += 1;
            ctx.events.push(TickEvent::AsphaltCollected {
                coord: tile,
                inventory: world.player.asphalt_count,
            });
        }
    }
}
