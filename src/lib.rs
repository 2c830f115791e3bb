//! Touch Snake - grid Snake steered by touching either half of the board
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - Terminal rendering and board geometry (render module)
//! - Key and mouse translation into touches (input module)
//! - Session statistics (metrics module)
//! - The interactive terminal shell (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
