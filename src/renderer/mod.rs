//! Canvas rendering module
//!
//! The scene builder is a pure projection of `GameState` into draw
//! commands; the canvas backend replays them on a 2D context.

pub mod commands;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use commands::{Color, DrawCommand};
pub use scene::build_frame;
