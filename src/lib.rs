//! Snake on a fixed grid with a wandering viper, stones and timed bananas.
//!
//! The game core (`game`, `snake`, `hazard`, `collision`, `placement`, `food`,
//! `grid`) is free of I/O and driven by explicit `Instant`s. The terminal
//! frontend (`renderer`, `ui`, `terminal_runtime`, `input`) only reads
//! [`snapshot::Snapshot`]s and feeds [`input::GameInput`]s back.

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod hazard;
pub mod input;
pub mod logging;
pub mod placement;
pub mod renderer;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
