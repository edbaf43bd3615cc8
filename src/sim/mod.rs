//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time is supplied by the host in milliseconds
//! - Seeded RNG only
//! - No DOM, rendering or platform dependencies

pub mod board;
pub mod state;
pub mod tick;
pub mod timers;

pub use board::{Board, BoardError, Card, CardFace, SYMBOLS, Symbol, pick_random, shuffle};
pub use state::{GameEvent, GamePhase, GameState, Hud, WinSummary};
pub use tick::{ClickTarget, TickInput, flip_card, start_game, tick};
pub use timers::{Deferred, TimerId, Timers};
