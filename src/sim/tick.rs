//! Input dispatch and state transitions
//!
//! `tick` is the only entry point that mutates a [`GameState`]: it fires the
//! deferred actions already due at `now_ms`, applies an optional click, then
//! fires anything that click made due.

use super::board::CardFace;
use super::state::{GameEvent, GamePhase, GameState, Hud, WinSummary};
use super::timers::Deferred;
use crate::consts::*;

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A face-down card at this board index
    Card(usize),
    /// The start button
    Start,
    /// Anything else
    Other,
}

/// Input for a single pump
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click to apply once due timers have fired
    pub click: Option<ClickTarget>,
}

impl TickInput {
    pub fn click(target: ClickTarget) -> Self {
        Self {
            click: Some(target),
        }
    }
}

/// Fire deferred actions due at or before `now_ms`, then apply input.
/// The host may pump late, so a click is always judged against the state the
/// timers would have produced by the time it happened.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    fire_due(state, now_ms);

    match input.click {
        Some(ClickTarget::Card(index)) => flip_card(state, index, now_ms),
        Some(ClickTarget::Start) => start_game(state, now_ms),
        Some(ClickTarget::Other) | None => return,
    }

    fire_due(state, now_ms);
}

fn fire_due(state: &mut GameState, now_ms: u64) {
    while let Some((_, action)) = state.timers.pop_due(now_ms) {
        match action {
            Deferred::ClockTick => clock_tick(state),
            Deferred::HideUnmatched => hide_unmatched(state),
            Deferred::CheckWin => finish(state),
        }
    }
}

/// Start the clock. No-op once started.
pub fn start_game(state: &mut GameState, now_ms: u64) {
    if state.is_started() {
        log::trace!("Start ignored, game already running");
        return;
    }

    state.phase = GamePhase::Running;
    state.clock = Some(
        state
            .timers
            .schedule_every(now_ms, CLOCK_INTERVAL_MS, Deferred::ClockTick),
    );
    state.events.push(GameEvent::Started);
    log::info!("Game started");
}

/// Flip the card at `index`. Ignored if the card is already face up.
pub fn flip_card(state: &mut GameState, index: usize, now_ms: u64) {
    match state.board.cards.get(index) {
        Some(card) if card.face == CardFace::Down => {}
        _ => {
            log::trace!("Flip ignored for card {}", index);
            return;
        }
    }

    state.flipped_count += 1;
    state.total_flips += 1;

    if !state.is_started() {
        start_game(state, now_ms);
    }

    // A third click before the pair hides is counted but never shown
    if state.flipped_count <= 2 {
        let card = &mut state.board.cards[index];
        card.face = CardFace::Up;
        state.events.push(GameEvent::CardFlipped {
            index,
            symbol: card.symbol,
        });
        log::debug!("Flipped card {} ({})", index, card.symbol);
    }

    if state.flipped_count == 2 {
        if let [first, second, ..] = state.board.face_up_unmatched()[..] {
            if state.board.cards[first].symbol == state.board.cards[second].symbol {
                state.board.cards[first].face = CardFace::Matched;
                state.board.cards[second].face = CardFace::Matched;
                state.events.push(GameEvent::PairMatched { first, second });
                log::info!("Matched {} at {} and {}", state.board.cards[first].symbol, first, second);
            }
        }

        state
            .timers
            .schedule_once(now_ms, REVEAL_DELAY_MS, Deferred::HideUnmatched);
    }

    if state.board.face_down_count() == 0 {
        state
            .timers
            .schedule_once(now_ms, WIN_DELAY_MS, Deferred::CheckWin);
    }
}

fn clock_tick(state: &mut GameState) {
    state.elapsed_seconds += 1;
    state.hud = Hud {
        moves: state.total_flips,
        seconds: state.elapsed_seconds,
    };
    state.events.push(GameEvent::ClockTicked(state.hud));
}

fn hide_unmatched(state: &mut GameState) {
    let indices = state.board.face_up_unmatched();
    for &index in &indices {
        state.board.cards[index].face = CardFace::Down;
    }
    state.flipped_count = 0;

    if !indices.is_empty() {
        log::debug!("Hid cards {:?}", indices);
        state.events.push(GameEvent::CardsHidden { indices });
    }
}

fn finish(state: &mut GameState) {
    if let Some(clock) = state.clock.take() {
        state.timers.cancel(clock);
    }

    let summary = WinSummary {
        total_flips: state.total_flips,
        elapsed_seconds: state.elapsed_seconds,
    };
    state.board_revealed = true;
    state.summary = Some(summary);
    state.phase = GamePhase::Won;
    state.events.push(GameEvent::Won(summary));
    log::info!(
        "Board cleared with {} moves in {} seconds",
        summary.total_flips,
        summary.elapsed_seconds
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::{Board, Card, SYMBOLS};

    /// 2x2 board laid out as A B A B
    fn small_state() -> GameState {
        GameState::new(Board {
            dimension: 2,
            cards: vec![Card::new("🍒"), Card::new("🥑"), Card::new("🍒"), Card::new("🥑")],
        })
    }

    fn click(state: &mut GameState, target: ClickTarget, now_ms: u64) {
        tick(state, &TickInput::click(target), now_ms);
    }

    fn pump(state: &mut GameState, now_ms: u64) {
        tick(state, &TickInput::default(), now_ms);
    }

    /// Index of the partner card with the same symbol
    fn partner(state: &GameState, index: usize) -> usize {
        let symbol = state.board.cards[index].symbol;
        (0..state.board.len())
            .find(|&i| i != index && state.board.cards[i].symbol == symbol)
            .unwrap()
    }

    #[test]
    fn test_first_flip_starts_clock() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);

        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.clock.is_some());
        assert_eq!(state.total_flips, 1);
        assert_eq!(state.board.cards[0].face, CardFace::Up);

        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::Started);
        assert!(matches!(events[1], GameEvent::CardFlipped { index: 0, .. }));
    }

    #[test]
    fn test_start_button_is_idempotent() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Start, 0);
        let clock = state.clock;
        assert_eq!(state.phase, GamePhase::Running);

        click(&mut state, ClickTarget::Start, 100);
        assert_eq!(state.clock, clock);
        assert_eq!(state.timers.len(), 1);
        assert_eq!(state.total_flips, 0);
    }

    #[test]
    fn test_clock_counts_seconds() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Start, 0);
        click(&mut state, ClickTarget::Card(0), 200);

        pump(&mut state, 999);
        assert_eq!(state.elapsed_seconds, 0);
        assert_eq!(state.hud, Hud::default());

        pump(&mut state, 3000);
        assert_eq!(state.elapsed_seconds, 3);
        assert_eq!(state.hud, Hud { moves: 1, seconds: 3 });
    }

    #[test]
    fn test_matching_pair_stays_up() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);
        click(&mut state, ClickTarget::Card(2), 100);

        assert_eq!(state.board.cards[0].face, CardFace::Matched);
        assert_eq!(state.board.cards[2].face, CardFace::Matched);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PairMatched { first: 0, second: 2 })
        );

        pump(&mut state, 1100);
        assert_eq!(state.board.cards[0].face, CardFace::Matched);
        assert_eq!(state.board.cards[2].face, CardFace::Matched);
        assert_eq!(state.flipped_count, 0);
    }

    #[test]
    fn test_mismatch_hides_after_delay() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);
        click(&mut state, ClickTarget::Card(1), 100);

        assert_eq!(state.board.cards[0].face, CardFace::Up);
        assert_eq!(state.board.cards[1].face, CardFace::Up);

        pump(&mut state, 1099);
        assert_eq!(state.board.cards[1].face, CardFace::Up);

        pump(&mut state, 1100);
        assert_eq!(state.board.cards[0].face, CardFace::Down);
        assert_eq!(state.board.cards[1].face, CardFace::Down);
        assert_eq!(state.flipped_count, 0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::CardsHidden { indices: vec![0, 1] })
        );
    }

    #[test]
    fn test_third_flip_counted_not_shown() {
        let mut state = GameState::with_seed(4, &SYMBOLS, 2024).unwrap();
        let a = 0;
        let b = (1..16).find(|&i| i != partner(&state, a)).unwrap();
        let c = (1..16).find(|&i| i != b && i != partner(&state, a)).unwrap();

        click(&mut state, ClickTarget::Card(a), 0);
        click(&mut state, ClickTarget::Card(b), 10);
        click(&mut state, ClickTarget::Card(c), 20);

        assert_eq!(state.total_flips, 3);
        assert_eq!(state.flipped_count, 3);
        assert_eq!(state.board.cards[c].face, CardFace::Down);
        assert_eq!(state.board.face_up_unmatched().len(), 2);

        // Still face down, so clicking again keeps counting
        click(&mut state, ClickTarget::Card(c), 30);
        assert_eq!(state.total_flips, 4);
        assert_eq!(state.board.cards[c].face, CardFace::Down);

        pump(&mut state, 1010);
        assert_eq!(state.flipped_count, 0);
        assert_eq!(state.board.face_up_unmatched().len(), 0);
    }

    #[test]
    fn test_late_pump_hides_before_next_flip() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);
        click(&mut state, ClickTarget::Card(1), 0);

        // Hide was due at 1000 but nothing pumped until this click
        click(&mut state, ClickTarget::Card(2), 1020);
        assert_eq!(state.board.cards[0].face, CardFace::Down);
        assert_eq!(state.board.cards[1].face, CardFace::Down);
        assert_eq!(state.board.cards[2].face, CardFace::Up);
        assert_eq!(state.flipped_count, 1);
        assert_eq!(state.total_flips, 3);
    }

    #[test]
    fn test_late_clock_tick_excludes_later_click() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);

        // Tick was due at 1000, before this click
        click(&mut state, ClickTarget::Card(1), 1030);
        assert_eq!(state.hud, Hud { moves: 1, seconds: 1 });
        assert_eq!(state.total_flips, 2);
    }

    #[test]
    fn test_face_up_card_ignored() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);
        click(&mut state, ClickTarget::Card(0), 10);
        assert_eq!(state.total_flips, 1);
        assert_eq!(state.flipped_count, 1);

        click(&mut state, ClickTarget::Card(99), 20);
        click(&mut state, ClickTarget::Other, 30);
        assert_eq!(state.total_flips, 1);
    }

    #[test]
    fn test_win_stops_clock() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);
        click(&mut state, ClickTarget::Card(2), 100);
        pump(&mut state, 1100);
        click(&mut state, ClickTarget::Card(1), 2500);
        click(&mut state, ClickTarget::Card(3), 2600);

        // Win check is pending, not applied yet
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.summary.is_none());

        pump(&mut state, 3600);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.board_revealed);
        assert!(state.clock.is_none());

        let summary = state.summary.unwrap();
        assert_eq!(summary.total_flips, 4);
        assert_eq!(summary.elapsed_seconds, 3);

        pump(&mut state, 60_000);
        assert_eq!(state.elapsed_seconds, 3);
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_hide_fires_before_win_on_final_pair() {
        let mut state = small_state();
        click(&mut state, ClickTarget::Card(0), 0);
        click(&mut state, ClickTarget::Card(2), 0);
        pump(&mut state, 1000);
        click(&mut state, ClickTarget::Card(1), 1500);
        click(&mut state, ClickTarget::Card(3), 1500);
        state.drain_events();

        pump(&mut state, 2500);
        let events = state.drain_events();
        let win_at = events
            .iter()
            .position(|e| matches!(e, GameEvent::Won(_)))
            .unwrap();
        // Final pair matched, so the hide has nothing to report; the clock
        // tick at 2000 precedes the win
        assert!(matches!(events[0], GameEvent::ClockTicked(_)));
        assert_eq!(win_at, events.len() - 1);
        assert_eq!(state.flipped_count, 0);
    }

    #[test]
    fn test_clicks_after_win_ignored() {
        let mut state = small_state();
        for (i, t) in [(0, 0), (2, 0)] {
            click(&mut state, ClickTarget::Card(i), t);
        }
        pump(&mut state, 1000);
        for (i, t) in [(1, 1000), (3, 1000)] {
            click(&mut state, ClickTarget::Card(i), t);
        }
        pump(&mut state, 2000);
        assert!(state.is_won());

        click(&mut state, ClickTarget::Start, 2100);
        click(&mut state, ClickTarget::Card(0), 2200);
        assert_eq!(state.total_flips, 4);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_full_playthrough_4x4() {
        let mut state = GameState::with_seed(4, &SYMBOLS, 777).unwrap();
        let mut now = 0;
        let mut matches = 0;

        while let Some(first) = state.board.cards.iter().position(|c| c.face == CardFace::Down) {
            let second = partner(&state, first);
            click(&mut state, ClickTarget::Card(first), now);
            click(&mut state, ClickTarget::Card(second), now + 300);
            matches += 1;
            now += 1300;
            pump(&mut state, now);
        }

        assert_eq!(matches, 8);
        assert!(state.is_won());
        let summary = state.summary.unwrap();
        assert!(summary.total_flips >= 16);
        assert_eq!(summary.total_flips, 16);
        assert_eq!(summary.elapsed_seconds, state.elapsed_seconds);
        assert!(state.board.cards.iter().all(|c| c.face == CardFace::Matched));
    }
}
