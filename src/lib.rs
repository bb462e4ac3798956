pub mod config;
pub mod engine;
pub mod input;
pub mod landscape;
pub mod render;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod systems;
pub mod viewport;
pub mod world;

pub use config::GameConfig;
pub use engine::{Engine, EngineBuilder, EngineSettings, RunSummary};
pub use landscape::{Landscape, TileAmbiance, TileCoord};
pub use session::{Session, SessionState, TickResult};
pub use viewport::Viewport;
pub use world::{PlayerState, World};
