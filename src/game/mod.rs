//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal shell drives it through [`GameEngine::update`] on every tick and
//! [`GameState::on_input`] for every touch.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, ScreenSide};
pub use config::GameConfig;
pub use engine::{GameEngine, TickInfo, TickResult};
pub use state::{CollisionType, Food, GameState, Position, Segment, Snake, SpawnOutcome};
