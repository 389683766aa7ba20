//! Balances mapping from the "Financial Situation" segment.
//!
//! The segment is a label/value table; rows are indexed by their trimmed
//! first field and the mapper picks the handful of labels the destination
//! schema consumes. Output is a single data row. Missing labels and
//! unparseable amounts leave their columns at schema defaults.

use std::collections::HashMap;

use crate::config::ConvertConfig;
use crate::constants::{
    BALANCE_BROUGHT_FORWARD, BALANCE_CARRIED_FORWARD, BALANCE_COLUMNS, REALISED_PL_PLACEHOLDER,
    US_DATE_FORMAT, balance_labels,
};
use crate::models::{BillBaseInfo, OutputTable, SegmentKind};
use crate::segment::{locate_segment, tokenize_rows};

/// Build the one-row balances table for a statement.
///
/// An absent "Financial Situation" segment yields a header-only table.
pub fn map_balances(bill: &BillBaseInfo, content: &str, config: &ConvertConfig) -> OutputTable {
    let mut table = OutputTable::with_header(BALANCE_COLUMNS);

    let segment = locate_segment(content, SegmentKind::Balances.section_title());
    if segment.is_empty() {
        return table;
    }

    let rows = tokenize_rows(&segment);
    let mut by_label: HashMap<&str, &Vec<String>> = HashMap::new();
    for row in &rows {
        // Last occurrence of a duplicated label wins.
        by_label.insert(row[0].trim(), row);
    }

    let mut deposit = String::new();
    let mut withdrawal = String::new();
    if let Some(amount) = label_amount(&by_label, balance_labels::DEPOSIT_WITHDRAWAL) {
        if let Ok(value) = amount.parse::<f32>() {
            if value > 0.0 {
                deposit = format!("{value:.2}");
            } else {
                // Magnitude only: which column is populated conveys the sign.
                withdrawal = format!("{:.2}", value.abs());
            }
        }
    }

    let commission = label_amount(&by_label, balance_labels::COMMISSIONS).unwrap_or_default();
    let unrealised = label_amount(&by_label, balance_labels::UNREALIZED).unwrap_or_default();
    let equity = label_amount(&by_label, balance_labels::EQUITY).unwrap_or_default();

    let as_of_date = bill
        .bill_date
        .map(|d| d.format(US_DATE_FORMAT).to_string())
        .unwrap_or_default();

    table.push(vec![
        bill.account_no.clone(),
        config.currency.clone(),
        BALANCE_BROUGHT_FORWARD.to_string(),
        deposit,
        withdrawal,
        String::new(),
        String::new(),
        REALISED_PL_PLACEHOLDER.to_string(),
        commission,
        String::new(),
        String::new(),
        BALANCE_CARRIED_FORWARD.to_string(),
        unrealised,
        equity,
        String::new(),
        String::new(),
        as_of_date,
    ]);

    table
}

/// Third field of the row with the given label, trimmed and comma-stripped
fn label_amount(by_label: &HashMap<&str, &Vec<String>>, label: &str) -> Option<String> {
    by_label
        .get(label)
        .filter(|row| row.len() >= 3)
        .map(|row| row[2].trim().replace(',', ""))
}
