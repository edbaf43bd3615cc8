//! HUD and summary text

use crate::sim::{Board, WinSummary};

pub fn moves_label(moves: u32) -> String {
    format!("{} moves", moves)
}

pub fn time_label(seconds: u32) -> String {
    format!("time: {} sec", seconds)
}

/// Win banner markup
pub fn win_summary_html(summary: &WinSummary) -> String {
    format!(
        "<span class=\"win-text\">\
         You won!<br />\
         with <span class=\"highlight\">{}</span> moves<br />\
         under <span class=\"highlight\">{}</span> seconds\
         </span>",
        summary.total_flips, summary.elapsed_seconds
    )
}

/// Inline style for the generated grid
pub fn grid_style(board: &Board) -> String {
    format!("grid-template-columns: repeat({}, auto)", board.dimension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Card;

    #[test]
    fn test_hud_labels() {
        assert_eq!(moves_label(0), "0 moves");
        assert_eq!(moves_label(17), "17 moves");
        assert_eq!(time_label(42), "time: 42 sec");
    }

    #[test]
    fn test_win_summary_html() {
        let html = win_summary_html(&WinSummary {
            total_flips: 20,
            elapsed_seconds: 35,
        });
        assert!(html.starts_with("<span class=\"win-text\">You won!"));
        assert!(html.contains("<span class=\"highlight\">20</span> moves"));
        assert!(html.contains("under <span class=\"highlight\">35</span> seconds"));
    }

    #[test]
    fn test_grid_style() {
        let board = Board {
            dimension: 6,
            cards: vec![Card::new("👻"); 36],
        };
        assert_eq!(grid_style(&board), "grid-template-columns: repeat(6, auto)");
    }
}
