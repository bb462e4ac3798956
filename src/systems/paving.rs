use crate::world::World;

use super::{System, TickContext, TickEvent};

/// Spends one asphalt to pave the player's tile. Paving a paved tile is a
/// silent no-op.
#[derive(Default)]
pub struct PavingSystem;

impl PavingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for PavingSystem {
    fn name(&self) -> &str {
        "paving"
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World) {
        if !ctx.intent.pave || world.player.asphalt_count == 0 {
            return;
        }
        let tile = world.player.tile();
        if world.landscape.get_is_paved(tile) {
            return;
        }
        assert!(world.player.asphalt_count > 0, "asphalt inventory underflow");
        world.player.asphalt_count -= 1;
        world.landscape.set_is_paved(tile, true);
        ctx.events.push(TickEvent::TilePaved {
            coord: tile,
            inventory: world.player.asphalt_count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::InputIntent,
        landscape::{Landscape, TileCoord},
    };

    fn world_with_inventory(asphalt_count: u32) -> World {
        let mut world = World::new(Landscape::with_asphalt_frequency(1, 0.0));
        world.player.asphalt_count = asphalt_count;
        world
    }

    #[test]
    fn paves_and_spends_one() {
        let mut world = world_with_inventory(2);
        let intent = InputIntent::idle().with_pave();
        let mut ctx = TickContext::new(&intent);

        PavingSystem::new().run(&mut ctx, &mut world);

        assert_eq!(world.player.asphalt_count, 1);
        assert!(world.landscape.get_is_paved(TileCoord::new(0, 0)));
        assert_eq!(ctx.events.len(), 1);
    }

    #[test]
    fn repaving_keeps_inventory() {
        let mut world = world_with_inventory(2);
        world.landscape.set_is_paved(TileCoord::new(0, 0), true);
        let intent = InputIntent::idle().with_pave();
        let mut ctx = TickContext::new(&intent);

        PavingSystem::new().run(&mut ctx, &mut world);

        assert_eq!(world.player.asphalt_count, 2);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn empty_inventory_cannot_pave() {
        let mut world = world_with_inventory(0);
        let intent = InputIntent::idle().with_pave();

        PavingSystem::new().run(&mut TickContext::new(&intent), &mut world);

        assert!(!world.landscape.get_is_paved(TileCoord::new(0, 0)));
    }

    #[test]
    fn no_intent_no_paving() {
        let mut world = world_with_inventory(3);
        let intent = InputIntent::idle();

        PavingSystem::new().run(&mut TickContext::new(&intent), &mut world);

        assert_eq!(world.player.asphalt_count, 3);
        assert!(!world.landscape.get_is_paved(TileCoord::new(0, 0)));
    }
}
