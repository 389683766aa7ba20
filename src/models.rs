//! Core data structures for statement processing.
//!
//! Defines the parsed header information, the segment kinds produced per
//! statement, output tables and batch processing statistics.

use crate::constants::{
    BALANCES_SECTION_TITLE, POSITIONS_SECTION_TITLE, TRADES_SECTION_TITLE,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base information parsed once from a statement's header block.
///
/// Dates that fail to parse are carried as `None`; callers render unknown
/// dates as empty strings rather than failing the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillBaseInfo {
    pub account_no: String,
    pub statement_date_start: Option<NaiveDate>,
    pub statement_date_end: Option<NaiveDate>,
    pub bill_date: Option<NaiveDate>,
}

/// The three output tables produced per statement file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Balances,
    Positions,
    Trades,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [
        SegmentKind::Balances,
        SegmentKind::Positions,
        SegmentKind::Trades,
    ];

    /// Section title locating this segment in the raw statement
    pub fn section_title(&self) -> &'static str {
        match self {
            SegmentKind::Balances => BALANCES_SECTION_TITLE,
            SegmentKind::Positions => POSITIONS_SECTION_TITLE,
            SegmentKind::Trades => TRADES_SECTION_TITLE,
        }
    }

    /// Tag embedded in output file names
    pub fn file_tag(&self) -> &'static str {
        match self {
            SegmentKind::Balances => "SHBalances",
            SegmentKind::Positions => "SHPos",
            SegmentKind::Trades => "SHTrades",
        }
    }

    /// Substring matching this kind's CSV files during merge and archive
    pub fn file_pattern(&self) -> &'static str {
        match self {
            SegmentKind::Balances => "Balance",
            SegmentKind::Positions => "Pos",
            SegmentKind::Trades => "Trade",
        }
    }
}

/// An ordered table of string rows, header first.
///
/// Constructed fresh per (file, segment kind) pair and handed to the CSV
/// writer immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    rows: Vec<Vec<String>>,
}

impl OutputTable {
    /// Create a table holding only the destination header row
    pub fn with_header(columns: &[&str]) -> Self {
        Self {
            rows: vec![columns.iter().map(|c| c.to_string()).collect()],
        }
    }

    /// Append a data row
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// All rows including the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows excluding the header
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// Statistics reported after a batch conversion run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    /// Statement files converted successfully
    pub files_processed: usize,
    /// Statement files that failed
    pub files_failed: usize,
    /// CSV tables written
    pub tables_written: usize,
    /// Per-file failures as (file name, cause)
    pub errors: Vec<(String, String)>,
    /// Wall-clock time for the whole batch
    pub processing_time_ms: u128,
}
