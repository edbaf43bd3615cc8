//! Game state and core simulation types
//!
//! Everything the game mutates lives in [`GameState`], owned by the host and
//! passed by reference into [`tick`](super::tick::tick).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, BoardError, Symbol};
use super::timers::{TimerId, Timers};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board dealt, clock not running
    #[default]
    NotStarted,
    /// Clock running
    Running,
    /// Summary shown, clock stopped (terminal)
    Won,
}

/// Counters as last shown to the player (refreshed on each clock tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hud {
    pub moves: u32,
    pub seconds: u32,
}

/// Final result shown when the board is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    pub total_flips: u32,
    pub elapsed_seconds: u32,
}

/// Changes the presentation layer needs to mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Clock started; start control disabled
    Started,
    CardFlipped { index: usize, symbol: Symbol },
    PairMatched { first: usize, second: usize },
    CardsHidden { indices: Vec<usize> },
    ClockTicked(Hud),
    Won(WinSummary),
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Dealt cards
    pub board: Board,
    /// Current phase
    pub phase: GamePhase,
    /// Flip attempts since the last hide. Keeps counting past 2 when extra
    /// clicks land before the pair hides, but only the first two flip.
    pub flipped_count: u32,
    /// Every accepted card click
    pub total_flips: u32,
    /// Whole seconds since the game started
    pub elapsed_seconds: u32,
    /// Repeating clock entry while running
    pub clock: Option<TimerId>,
    /// Counters last pushed to the display
    pub hud: Hud,
    /// Whole board shown after the win
    pub board_revealed: bool,
    /// Set once the win check fires
    pub summary: Option<WinSummary>,
    /// Pending deferred actions
    pub timers: Timers,
    /// Events not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Wrap an already generated board
    pub fn new(board: Board) -> Self {
        Self {
            board,
            phase: GamePhase::NotStarted,
            flipped_count: 0,
            total_flips: 0,
            elapsed_seconds: 0,
            clock: None,
            hud: Hud::default(),
            board_revealed: false,
            summary: None,
            timers: Timers::new(),
            events: Vec::new(),
        }
    }

    /// Deal a new board from a seed
    pub fn with_seed(dimension: u32, pool: &[Symbol], seed: u64) -> Result<Self, BoardError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = Board::generate(dimension, pool, &mut rng)?;
        Ok(Self::new(board))
    }

    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Take all pending events for rendering
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::SYMBOLS;

    #[test]
    fn test_new_state() {
        let state = GameState::with_seed(4, &SYMBOLS, 12345).unwrap();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(!state.is_started());
        assert_eq!(state.board.len(), 16);
        assert_eq!(state.total_flips, 0);
        assert!(state.clock.is_none());
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = GameState::with_seed(4, &SYMBOLS, 99).unwrap();
        let b = GameState::with_seed(4, &SYMBOLS, 99).unwrap();
        assert_eq!(a.board.cards, b.board.cards);
    }

    #[test]
    fn test_with_seed_propagates_board_error() {
        assert_eq!(
            GameState::with_seed(5, &SYMBOLS, 1).unwrap_err(),
            BoardError::OddDimension(5)
        );
    }
}
