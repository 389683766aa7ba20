//! Trade confirmation mapping from the "Trade Confirmation" segment.
//!
//! Shares the positions schema but reads different source columns. The
//! buy/sell label routes the matched quantity into either the Long or
//! the Short column; the Tradedate column keeps the source date format
//! while the as-of-date column reformats the same date.

use chrono::NaiveDate;

use crate::config::ConvertConfig;
use crate::constants::{
    BUY_LABEL, FUTURES_MARKER, ISO_DATE_FORMAT, POSITION_COLUMNS, SALE_LABEL,
    TRADE_SOURCE_COLUMNS, US_DATE_FORMAT,
};
use crate::convert::contract::decode_month_year;
use crate::error::{BillError, Result};
use crate::models::{BillBaseInfo, OutputTable, SegmentKind};
use crate::segment::{locate_segment, tokenize_rows};

/// Build the trades table for a statement.
///
/// Fewer than two tokenized rows yields a header-only table. Labels other
/// than "Buy" and "Sale" (exact match) leave both quantity columns "0".
pub fn map_trades(
    bill: &BillBaseInfo,
    content: &str,
    config: &ConvertConfig,
) -> Result<OutputTable> {
    let mut table = OutputTable::with_header(POSITION_COLUMNS);

    let segment = locate_segment(content, SegmentKind::Trades.section_title());
    let rows = tokenize_rows(&segment);
    if rows.len() < 2 {
        return Ok(table);
    }

    for row in &rows[1..rows.len() - 1] {
        if row.len() < TRADE_SOURCE_COLUMNS {
            return Err(BillError::ColumnCount {
                segment: SegmentKind::Trades.section_title().to_string(),
                expected: TRADE_SOURCE_COLUMNS,
                found: row.len(),
            });
        }

        let date = row[0].trim();
        let market = row[1].trim();
        let product = row[2].trim();
        let contract = row[3].trim();
        let buy_sale = row[6].trim();
        let match_qty = row[7].trim();
        let match_price = row[8].trim();
        let fee = row[10].trim();
        let currency = row[11].trim();

        let (contract_month, contract_year) = decode_month_year(contract).unwrap_or_default();

        let (mut long, mut short) = ("0".to_string(), "0".to_string());
        if buy_sale == SALE_LABEL {
            short = match_qty.to_string();
        } else if buy_sale == BUY_LABEL {
            long = match_qty.to_string();
        }

        // The Tradedate column keeps the source format; only the
        // as-of-date column is reformatted.
        let as_of_date = NaiveDate::parse_from_str(date, ISO_DATE_FORMAT)
            .map(|d| d.format(US_DATE_FORMAT).to_string())
            .unwrap_or_default();

        table.push(vec![
            bill.account_no.clone(),
            date.to_string(),
            long,
            short,
            FUTURES_MARKER.to_string(),
            market.to_string(),
            contract.to_string(),
            contract_month,
            contract_year,
            String::new(),
            match_price.to_string(),
            String::new(),
            currency.to_string(),
            String::new(),
            String::new(),
            buy_sale.to_string(),
            String::new(),
            product.to_string(),
            fee.to_string(),
            String::new(),
            config.firm_office.clone(),
            as_of_date,
        ]);
    }

    Ok(table)
}
