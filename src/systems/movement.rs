use crate::world::World;

use super::{System, TickContext};

pub const PAVED_SPEED: f64 = 1.0 / 4.0;
pub const UNPAVED_SPEED: f64 = 1.0 / 16.0;

/// Moves the player at a speed set by the tile they start the tick on.
/// Each axis gets the full speed, so diagonals are faster.
pub struct MovementSystem {
    paved_speed: f64,
    unpaved_speed: f64,
}

impl MovementSystem {
    pub fn new(paved_speed: f64, unpaved_speed: f64) -> Self {
        Self {
            paved_speed,
            unpaved_speed,
        }
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new(PAVED_SPEED, UNPAVED_SPEED)
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn run(&mut self, ctx: &mut TickContext<'_>, world: &mut World) {
        let old_tile = world.player.tile();
        let speed = if world.landscape.get_is_paved(old_tile) {
            self.paved_speed
        } else {
            self.unpaved_speed
        };
        let (dir_x, dir_y) = ctx.intent.direction();
        world.player.move_by(dir_x * speed, dir_y * speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::InputIntent,
        landscape::{Landscape, TileCoord},
    };

    fn world() -> World {
        World::new(Landscape::with_asphalt_frequency(1, 0.0))
    }

    #[test]
    fn diagonal_moves_full_speed_on_both_axes() {
        let mut world = world();
        let intent = InputIntent {
            up: true,
            left: true,
            ..InputIntent::default()
        };
        MovementSystem::default().run(&mut TickContext::new(&intent), &mut world);

        assert_eq!((world.player.x, world.player.y), (-UNPAVED_SPEED, -UNPAVED_SPEED));
    }

    #[test]
    fn speed_comes_from_the_starting_tile() {
        let mut world = world();
        world.player.x = 0.9;
        world.landscape.set_is_paved(TileCoord::new(0, 0), true);
        let intent = InputIntent {
            right: true,
            ..InputIntent::default()
        };
        let mut movement = MovementSystem::default();

        movement.run(&mut TickContext::new(&intent), &mut world);
        assert_eq!(world.player.x, 0.9 + PAVED_SPEED);

        // Now on unpaved (1, 0).
        movement.run(&mut TickContext::new(&intent), &mut world);
        assert_eq!(world.player.x, 0.9 + PAVED_SPEED + UNPAVED_SPEED);
    }
}
