//! Reconciliation of the vertical card dump with cut-hit statistics

use crate::codec;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Column label appended to the combined export, meaning "original card order"
pub const CARD_COLUMN_LABEL: &str = "原始牌序";
/// Conventional filename for the combined export
pub const COMBINED_EXPORT_FILENAME: &str = "combined_hits_vertical.csv";
/// First-cell values that mark a trailing average row
pub const AVERAGE_SENTINELS: [&str; 2] = ["平均", "Average"];

/// Parsed cut-hit statistics: two header rows, data rows, and any trailing
/// average rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsTable {
    pub header1: Vec<String>,
    pub header2: Vec<String>,
    pub data_rows: Vec<Vec<String>>,
    pub average_rows: Vec<Vec<String>>,
}

/// Trailing average summary extracted from the statistics table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageSummary {
    pub avg_hit: f64,
    pub avg_rounds: f64,
}

/// Split parsed statistics rows into headers, data rows, and average rows.
///
/// The first two rows are headers regardless of content. Fully-blank rows
/// are discarded; rows whose first cell is an average sentinel go to
/// `average_rows`.
pub fn split_statistics(rows: Vec<Vec<String>>) -> StatisticsTable {
    let mut iter = rows.into_iter();
    let header1 = iter.next().unwrap_or_default();
    let header2 = iter.next().unwrap_or_default();

    let mut data_rows = Vec::new();
    let mut average_rows = Vec::new();
    for row in iter {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if row
            .first()
            .is_some_and(|cell| AVERAGE_SENTINELS.contains(&cell.trim()))
        {
            average_rows.push(row);
        } else {
            data_rows.push(row);
        }
    }

    StatisticsTable {
        header1,
        header2,
        data_rows,
        average_rows,
    }
}

impl StatisticsTable {
    /// Parse a statistics CSV document
    pub fn parse(text: &str) -> Self {
        split_statistics(codec::parse(text))
    }

    /// Extract the average summary from the last average row, if any.
    /// Cells that fail to parse fall back to zero.
    pub fn average_summary(&self) -> Option<AverageSummary> {
        let last = self.average_rows.last()?;
        let avg_hit = last
            .get(1)
            .and_then(|cell| cell.trim().parse().ok())
            .unwrap_or(0.0);
        let avg_rounds = last
            .last()
            .and_then(|cell| cell.trim().parse().ok())
            .unwrap_or(0.0);
        Some(AverageSummary { avg_hit, avg_rounds })
    }
}

/// Align card lines against statistics data rows and merge them into one
/// table: headers (second one extended with the card column label) followed
/// by data rows each ending in the matching card label.
///
/// Fails with `RowCountMismatch` when the counts disagree; no partial
/// output is produced.
pub fn combine(card_lines: &[String], stats: &StatisticsTable) -> Result<Vec<Vec<String>>> {
    if stats.data_rows.len() != card_lines.len() {
        return Err(Error::RowCountMismatch {
            statistics: stats.data_rows.len(),
            cards: card_lines.len(),
        });
    }

    let mut header1 = stats.header1.clone();
    let mut header2 = stats.header2.clone();
    if !header2.is_empty() {
        header2.push(CARD_COLUMN_LABEL.to_string());
        header1.push(String::new());
    }

    let mut rows = Vec::with_capacity(stats.data_rows.len() + 2);
    rows.push(header1);
    rows.push(header2);
    for (row, card) in stats.data_rows.iter().zip(card_lines) {
        let mut merged = row.clone();
        merged.push(card.clone());
        rows.push(merged);
    }
    Ok(rows)
}

/// Combined export as CSV text with CRLF row terminators
pub fn combine_to_csv(card_lines: &[String], stats: &StatisticsTable) -> Result<String> {
    Ok(codec::serialize(&combine(card_lines, stats)?))
}
