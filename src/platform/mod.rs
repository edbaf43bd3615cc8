//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (click target classification)
//! - Frame scheduling (cancellable animation loop, WASM only)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod frame_loop;

pub use input::{TargetInfo, classify};

#[cfg(target_arch = "wasm32")]
pub use frame_loop::FrameLoop;
