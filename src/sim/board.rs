//! Board generation
//!
//! Draws distinct symbols from a pool, pairs them up and shuffles the pairs
//! into a square grid.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A card symbol (a single pictogram)
pub type Symbol = &'static str;

/// Default symbol pool. Supports boards up to 6x6.
pub const SYMBOLS: [Symbol; 20] = [
    "🥔", "🍒", "🥑", "🌽", "🥕", "🍇", "🍉", "🍌", "🥭", "🍍", "🎃", "💥", "🦇", "💀", "😱", "🕷️",
    "👻", "👺", "🎇", "✨",
];

/// Fatal board configuration errors. Nothing is rendered when one occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Board edge must be even so every card has a partner
    OddDimension(u32),
    /// A zero-sized board has no cards to play
    ZeroDimension,
    /// Not enough distinct symbols for the requested number of pairs
    PoolTooSmall { needed: usize, available: usize },
    /// `data-dimension` was not an unsigned integer
    InvalidDimension(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OddDimension(d) => {
                write!(f, "The dimension of the board must be an even number (got {d}).")
            }
            BoardError::ZeroDimension => write!(f, "The dimension of the board must be at least 2."),
            BoardError::PoolTooSmall { needed, available } => write!(
                f,
                "Board needs {needed} distinct symbols but the pool only has {available}."
            ),
            BoardError::InvalidDimension(raw) => {
                write!(f, "Board dimension {raw:?} is not a whole number.")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Visible state of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardFace {
    /// Face down, symbol hidden
    #[default]
    Down,
    /// Face up, waiting to be compared or hidden again
    Up,
    /// Permanently face up
    Matched,
}

/// A single board cell. Identified by its index in [`Board::cards`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub symbol: Symbol,
    pub face: CardFace,
}

impl Card {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            face: CardFace::Down,
        }
    }

    /// Face up, whether matched or not
    pub fn is_flipped(&self) -> bool {
        self.face != CardFace::Down
    }
}

/// Square grid of paired cards, row-major
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub dimension: u32,
    pub cards: Vec<Card>,
}

impl Board {
    /// Generate a shuffled board of `dimension`² cards from the given pool
    pub fn generate<R: Rng + ?Sized>(
        dimension: u32,
        pool: &[Symbol],
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let pairs = pair_count(dimension)?;
        if pool.len() < pairs {
            return Err(BoardError::PoolTooSmall {
                needed: pairs,
                available: pool.len(),
            });
        }

        let picks = pick_random(pool, pairs, rng);
        let doubled: Vec<Symbol> = picks.iter().chain(picks.iter()).copied().collect();
        let items = shuffle(&doubled, rng);

        Ok(Self {
            dimension,
            cards: items.into_iter().map(Card::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards still face down
    pub fn face_down_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_flipped()).count()
    }

    /// Indices of cards that are up but not matched, in board order
    pub fn face_up_unmatched(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.face == CardFace::Up)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Validate a board edge and return the number of pairs it holds
pub fn pair_count(dimension: u32) -> Result<usize, BoardError> {
    if dimension % 2 != 0 {
        return Err(BoardError::OddDimension(dimension));
    }
    if dimension == 0 {
        return Err(BoardError::ZeroDimension);
    }
    // u32 squared always fits in u64, but half of it may not fit a 32-bit usize
    let cells = u64::from(dimension) * u64::from(dimension);
    usize::try_from(cells / 2).map_err(|_| BoardError::InvalidDimension(dimension.to_string()))
}

/// Parse a `data-dimension` attribute value
pub fn parse_dimension(raw: &str) -> Result<u32, BoardError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| BoardError::InvalidDimension(raw.to_string()))
}

/// Sample `count` items without replacement by removing random picks from a
/// shrinking copy of the pool. Takes at most `pool.len()` items.
pub fn pick_random<T: Clone, R: Rng + ?Sized>(pool: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut remaining = pool.to_vec();
    let mut picks = Vec::with_capacity(count.min(pool.len()));

    while picks.len() < count && !remaining.is_empty() {
        let index = rng.random_range(0..remaining.len());
        picks.push(remaining.remove(index));
    }

    picks
}

/// Fisher-Yates shuffle into a new vector
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, rng);
    shuffled
}

/// Fisher-Yates shuffle walking from the last index down to 1.
/// Returns the number of swap steps performed (`len - 1` for non-empty input).
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) -> usize {
    let mut steps = 0;
    for index in (1..items.len()).rev() {
        let random_index = rng.random_range(0..=index);
        items.swap(index, random_index);
        steps += 1;
    }
    steps
}
