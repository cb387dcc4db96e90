//! Fixed-geometry deck grid for roadmap-style shoe display

use crate::card::{grid_digit, suit_letter_from_label, Suit};
use serde::{Deserialize, Serialize};

/// Grid width: flat index = row * GRID_COLUMNS + column
pub const GRID_COLUMNS: usize = 16;
/// Grid height: 16 x 26 = 416 cells, an eight-deck shoe
pub const GRID_ROWS: usize = 26;

/// Display emphasis classes a cell can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Highlight {
    ColorRed,
    ColorBlue,
    SignalMatch,
}

impl Highlight {
    /// Stylesheet class name
    pub fn as_class(&self) -> &'static str {
        match self {
            Highlight::ColorRed => "color-red",
            Highlight::ColorBlue => "color-blue",
            Highlight::SignalMatch => "signal-match",
        }
    }
}

impl std::fmt::Display for Highlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_class())
    }
}

/// One display cell of the deck grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Single-character point value, empty past the end of the shoe
    pub value: String,
    pub classes: Vec<Highlight>,
    /// Original label, suffixed with the localized suit name when resolved
    pub tooltip: String,
}

impl GridCell {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.classes.is_empty() && self.tooltip.is_empty()
    }
}

/// Lay out a flat card sequence as a 26x16 grid.
///
/// `color_seq` is the flattened shoe color sequence; positions it does not
/// cover simply carry no color class. Always returns exactly
/// `GRID_ROWS` x `GRID_COLUMNS` cells regardless of input length.
pub fn build_grid(cards: &[String], color_seq: &str, signal: Option<Suit>) -> Vec<Vec<GridCell>> {
    let colors: Vec<char> = color_seq.chars().collect();
    (0..GRID_ROWS)
        .map(|row| {
            (0..GRID_COLUMNS)
                .map(|col| {
                    let idx = row * GRID_COLUMNS + col;
                    build_cell(
                        cards.get(idx).map(String::as_str),
                        colors.get(idx).copied(),
                        signal,
                    )
                })
                .collect()
        })
        .collect()
}

fn build_cell(label: Option<&str>, color: Option<char>, signal: Option<Suit>) -> GridCell {
    let Some(label) = label.filter(|l| !l.is_empty()) else {
        return GridCell::default();
    };

    let suit = suit_letter_from_label(label);
    let mut classes = Vec::new();
    match color.map(|ch| ch.to_ascii_uppercase()) {
        Some('R') => classes.push(Highlight::ColorRed),
        Some('B') => classes.push(Highlight::ColorBlue),
        _ => {}
    }
    if let Some(signal) = signal {
        if suit.len() == 1 && suit.starts_with(signal.letter()) {
            classes.push(Highlight::SignalMatch);
        }
    }

    let tooltip = if suit.is_empty() {
        label.to_string()
    } else {
        let display = suit
            .chars()
            .next()
            .and_then(Suit::from_letter)
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| suit.clone());
        format!("{label} ({display})")
    };

    GridCell {
        value: grid_digit(label),
        classes,
        tooltip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_grid_geometry_fixed() {
        for count in [0usize, 10, 500] {
            let cards: Vec<String> = (0..count).map(|_| "A♠".to_string()).collect();
            let grid = build_grid(&cards, "", None);
            assert_eq!(grid.len(), GRID_ROWS);
            assert!(grid.iter().all(|row| row.len() == GRID_COLUMNS));
        }
    }

    #[test]
    fn test_cells_past_end_are_empty() {
        let grid = build_grid(&labels(&["A♠", "2♥"]), "RB", None);
        assert_eq!(grid[0][0].value, "1");
        assert_eq!(grid[0][1].value, "2");
        assert!(grid[0][2].is_empty());
        assert!(grid[GRID_ROWS - 1][GRID_COLUMNS - 1].is_empty());
    }

    #[test]
    fn test_flat_index_maps_row_major() {
        let mut cards = vec![String::new(); GRID_COLUMNS + 3];
        cards[GRID_COLUMNS + 2] = "7♦".to_string();
        let grid = build_grid(&cards, "", None);
        assert_eq!(grid[1][2].value, "7");
    }

    #[test]
    fn test_color_classes_exclusive() {
        let grid = build_grid(&labels(&["A♠", "2♥", "3♦"]), "rBx", None);
        assert_eq!(grid[0][0].classes, vec![Highlight::ColorRed]);
        assert_eq!(grid[0][1].classes, vec![Highlight::ColorBlue]);
        assert!(grid[0][2].classes.is_empty());
    }

    #[test]
    fn test_short_color_sequence_degrades() {
        let grid = build_grid(&labels(&["A♠", "2♥"]), "R", None);
        assert_eq!(grid[0][0].classes, vec![Highlight::ColorRed]);
        assert!(grid[0][1].classes.is_empty());
        assert_eq!(grid[0][1].value, "2");
    }

    #[test]
    fn test_signal_match_combines_with_color() {
        let grid = build_grid(&labels(&["A♥", "2♥"]), "R", Some(Suit::Heart));
        assert_eq!(
            grid[0][0].classes,
            vec![Highlight::ColorRed, Highlight::SignalMatch]
        );
        assert_eq!(grid[0][1].classes, vec![Highlight::SignalMatch]);
    }

    #[test]
    fn test_tooltip_carries_suit_name() {
        let grid = build_grid(&labels(&["K♥"]), "", None);
        assert_eq!(grid[0][0].tooltip, "K♥ (紅心)");
    }

    #[test]
    fn test_tooltip_unresolved_suit() {
        let grid = build_grid(&labels(&["7x"]), "", None);
        assert_eq!(grid[0][0].tooltip, "7x (X)");
    }

    #[test]
    fn test_highlight_class_names() {
        assert_eq!(Highlight::ColorRed.as_class(), "color-red");
        assert_eq!(Highlight::ColorBlue.as_class(), "color-blue");
        assert_eq!(Highlight::SignalMatch.as_class(), "signal-match");
    }
}
