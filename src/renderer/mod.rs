//! Presentation layer
//!
//! The board is plain DOM; the backdrop is drawn with Canvas 2D.

pub mod labels;

#[cfg(target_arch = "wasm32")]
pub mod board_view;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use board_view::BoardView;
#[cfg(target_arch = "wasm32")]
pub use canvas::BackdropRenderer;
