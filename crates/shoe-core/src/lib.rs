//! shoe-core: Core library for reconciling simulated card shoe exports
//!
//! This library provides functionality to:
//! - Parse and serialize the lenient CSV dialect used by cut-hit exports
//! - Normalize heterogeneous card representations into ranks and suit codes
//! - Reassemble per-round color fragments into a full-shoe sequence
//! - Lay out a shoe as a fixed 26x16 display grid with highlight markers
//! - Merge a vertical card dump with cut-hit statistics into one export

pub mod card;
pub mod codec;
pub mod error;
pub mod export;
pub mod grid;
pub mod round;

pub use card::{grid_digit, rank_from_label, suit_letter_from_label, CardValue, Suit};
pub use error::{Error, Result};
pub use export::{
    combine, combine_to_csv, split_statistics, AverageSummary, StatisticsTable,
    CARD_COLUMN_LABEL, COMBINED_EXPORT_FILENAME,
};
pub use grid::{build_grid, GridCell, Highlight, GRID_COLUMNS, GRID_ROWS};
pub use round::{
    flatten_colors, load_rounds, order_by_start, suit_counts, vertical_dump, ColorSeq, Outcome,
    Round, SuitCounts,
};
