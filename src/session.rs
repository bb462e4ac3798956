//! One play-through: the tick state machine over a [`World`]

use serde::Serialize;
use thiserror::Error;

use crate::{
    config::GameConfig,
    input::InputIntent,
    landscape::Landscape,
    systems::{MovementSystem, PavingSystem, PickupSystem, System, TickContext, TickEvent},
    viewport::Viewport,
    world::World,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Playing,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TickResult {
    pub escape_requested: bool,
    pub events: Vec<TickEvent>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is {state:?}, not playing")]
    NotPlaying { state: SessionState },
}

pub struct Session {
    state: SessionState,
    world: World,
    viewport: Viewport,
    systems: Vec<Box<dyn System>>,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        let landscape = Landscape::with_asphalt_frequency(config.seed, config.asphalt_frequency);
        Self::resume(config, World::new(landscape))
    }

    /// A fresh session over an existing world, e.g. after "continue" or a
    /// load. Starts idle like any other session.
    pub fn resume(config: &GameConfig, world: World) -> Self {
        let mut viewport = Viewport::new(
            config.tile_width,
            config.tile_height,
            config.view_width,
            config.view_height,
        );
        viewport.center_on(world.player.x, world.player.y);
        Self {
            state: SessionState::Idle,
            world,
            viewport,
            systems: vec![
                Box::new(MovementSystem::new(config.paved_speed, config.unpaved_speed)),
                Box::new(PickupSystem::new()),
                Box::new(PavingSystem::new()),
            ],
        }
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Playing;
                Ok(())
            }
            state => Err(SessionError::NotPlaying { state }),
        }
    }

    /// Advance one frame. Escape ends the session without moving the player
    /// or counting the frame.
    pub fn tick(&mut self, intent: InputIntent) -> Result<TickResult, SessionError> {
        if self.state != SessionState::Playing {
            return Err(SessionError::NotPlaying { state: self.state });
        }
        if intent.escape {
            self.state = SessionState::Terminated;
            return Ok(TickResult {
                escape_requested: true,
                events: Vec::new(),
            });
        }

        let mut ctx = TickContext::new(&intent);
        for system in self.systems.iter_mut() {
            system.run(&mut ctx, &mut self.world);
        }
        self.world.player.frame_number += 1;
        self.viewport
            .center_on(self.world.player.x, self.world.player.y);

        Ok(TickResult {
            escape_requested: false,
            events: ctx.events,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Viewport centered on the player as of the last tick.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Split borrow for a render pass: geometry plus the landscape it reads.
    pub fn render_view(&mut self) -> (&Viewport, &mut Landscape) {
        self.viewport
            .center_on(self.world.player.x, self.world.player.y);
        (&self.viewport, &mut self.world.landscape)
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }
}
