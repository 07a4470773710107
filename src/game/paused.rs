use crate::leaderboard::ScoreEntry;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for displaying the pause pop-up, which lists the top scores
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    /// The leaderboard as it was when the game was paused
    scores: Vec<ScoreEntry>,

    /// Was the game already over when it was paused?
    game_over: bool,
}

impl Paused {
    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 34;

    pub(super) fn new(scores: Vec<ScoreEntry>, game_over: bool) -> Paused {
        Paused { scores, game_over }
    }

    /// Should unpausing return to the game-over screen rather than resume
    /// play?
    pub(super) fn game_over(&self) -> bool {
        self.game_over
    }

    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) fn height(&self) -> u16 {
        // Two rows of border, the heading, and at least one row of entries
        u16::try_from(self.scores.len().max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(3)
    }
}

impl Widget for &Paused {
    /*
     * ┌──────────── PAUSED ────────────┐
     * │ Top Scores:                    │
     * │ 1. 12 - 2026-10-19 18:04:31    │
     * │ 2. 7 - 2026-10-18 09:12:55     │
     * └────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Line::from("Top Scores:").render(row, buf);
        }
        if self.scores.is_empty() {
            if let Some(row) = rows.next() {
                Line::from("No scores yet").render(row, buf);
            }
        }
        for ((i, entry), row) in self.scores.iter().enumerate().zip(rows) {
            Line::from(format!("{}. {} - {}", i + 1, entry.score, entry.date)).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_scores() {
        let paused = Paused::new(
            vec![
                ScoreEntry {
                    date: String::from("2026-10-19 18:04:31"),
                    score: 12,
                },
                ScoreEntry {
                    date: String::from("2026-10-18 09:12:55"),
                    score: 7,
                },
            ],
            false,
        );
        assert_eq!(paused.height(), 5);
        let area = Rect::new(0, 0, Paused::WIDTH, paused.height());
        let mut buffer = Buffer::empty(area);
        paused.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "┌──────────── PAUSED ────────────┐",
            "│ Top Scores:                    │",
            "│ 1. 12 - 2026-10-19 18:04:31    │",
            "│ 2. 7 - 2026-10-18 09:12:55     │",
            "└────────────────────────────────┘",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn draw_empty() {
        let paused = Paused::new(Vec::new(), true);
        assert!(paused.game_over());
        assert_eq!(paused.height(), 4);
        let area = Rect::new(0, 0, Paused::WIDTH, paused.height());
        let mut buffer = Buffer::empty(area);
        paused.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "┌──────────── PAUSED ────────────┐",
            "│ Top Scores:                    │",
            "│ No scores yet                  │",
            "└────────────────────────────────┘",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
