//! Open positions mapping from the "Gathered Open Positions" segment.
//!
//! The first tokenized row is the column header and the last is the
//! closing boundary row; both are structural and excluded. Mapping is
//! strictly positional, so rows carrying fewer source columns than the
//! mapper indexes fail fast rather than silently misaligning.

use crate::config::ConvertConfig;
use crate::constants::{
    FUTURES_MARKER, ISO_DATE_FORMAT, POSITION_COLUMNS, POSITION_SOURCE_COLUMNS, US_DATE_FORMAT,
};
use crate::convert::contract::decode_month_year;
use crate::error::{BillError, Result};
use crate::models::{BillBaseInfo, OutputTable, SegmentKind};
use crate::segment::{locate_segment, tokenize_rows};

/// Build the positions table for a statement.
///
/// Fewer than two tokenized rows (absent segment included) yields a
/// header-only table. Both date columns derive from the statement end
/// date; positions carry no directional flag.
pub fn map_positions(
    bill: &BillBaseInfo,
    content: &str,
    config: &ConvertConfig,
) -> Result<OutputTable> {
    let mut table = OutputTable::with_header(POSITION_COLUMNS);

    let segment = locate_segment(content, SegmentKind::Positions.section_title());
    let rows = tokenize_rows(&segment);
    if rows.len() < 2 {
        return Ok(table);
    }

    let trade_date = bill
        .statement_date_end
        .map(|d| d.format(ISO_DATE_FORMAT).to_string())
        .unwrap_or_default();
    let as_of_date = bill
        .statement_date_end
        .map(|d| d.format(US_DATE_FORMAT).to_string())
        .unwrap_or_default();

    for row in &rows[1..rows.len() - 1] {
        if row.len() < POSITION_SOURCE_COLUMNS {
            return Err(BillError::ColumnCount {
                segment: SegmentKind::Positions.section_title().to_string(),
                expected: POSITION_SOURCE_COLUMNS,
                found: row.len(),
            });
        }

        let market = row[0].trim();
        let product = row[1].trim();
        let contract = row[2].trim();
        let buy = row[3].trim();
        let sale = row[4].trim();
        let match_price = row[5].trim();
        let settlement_price = row[6].trim();
        let position_profit = row[7].trim();
        let currency = row[10].trim();

        // Undecodable contract codes leave month and year empty.
        let (contract_month, contract_year) = decode_month_year(contract).unwrap_or_default();

        table.push(vec![
            bill.account_no.clone(),
            trade_date.clone(),
            buy.to_string(),
            sale.to_string(),
            FUTURES_MARKER.to_string(),
            market.to_string(),
            contract.to_string(),
            contract_month,
            contract_year,
            String::new(),
            match_price.to_string(),
            settlement_price.to_string(),
            currency.to_string(),
            position_profit.to_string(),
            String::new(),
            String::new(),
            String::new(),
            product.to_string(),
            String::new(),
            String::new(),
            config.firm_office.clone(),
            as_of_date.clone(),
        ]);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::parse_bill_header;

    const STATEMENT: &str = "\
Account No: 10012345      Statement Date: 2018-12-01 to 2018-12-12
----
Gathered Open Positions
|Market|Product |Contract|Buy|Sale|Price |SettPrice|P/L    |Margin|Type|Currency|
|SHFE  |Copper  |1225    |2  |    |48,500|48,650   |300.00 |x     |s   |CNY     |
|DCE   |Soybean |0519    |   |1   |3,450 |3,400    |-50.00 |y     |s   |CNY     |
|Total |        |        |3  |1   |      |         |250.00 |z     |z   |        |
----
";

    fn convert(content: &str) -> Vec<Vec<String>> {
        let bill = parse_bill_header(content).unwrap();
        map_positions(&bill, content, &ConvertConfig::default())
            .unwrap()
            .rows()
            .to_vec()
    }

    #[test]
    fn test_boundary_rows_excluded() {
        let rows = convert(STATEMENT);
        // 4 tokenized rows -> 2 data rows.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][5], "SHFE");
        assert_eq!(rows[2][5], "DCE");
    }

    #[test]
    fn test_row_mapping() {
        let rows = convert(STATEMENT);
        let row = &rows[1];
        assert_eq!(row[0], "10012345");
        assert_eq!(row[1], "2018-12-12");
        assert_eq!(row[2], "2");
        assert_eq!(row[3], "");
        assert_eq!(row[4], "F");
        assert_eq!(row[6], "1225");
        assert_eq!(row[7], "12");
        assert_eq!(row[8], "2025");
        assert_eq!(row[10], "48,500");
        assert_eq!(row[11], "48,650");
        assert_eq!(row[12], "CNY");
        assert_eq!(row[13], "300.00");
        assert_eq!(row[15], "");
        assert_eq!(row[17], "Copper");
        assert_eq!(row[20], "Shanghai Bunge");
        assert_eq!(row[21], "12/12/2018");
    }

    #[test]
    fn test_absent_segment_yields_header_only() {
        let content = "Account No: 10012345\n----\n";
        let rows = convert(content);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_header_and_boundary_only_yields_no_data() {
        let content = "Account No: 1\n----\nGathered Open Positions\n\
                       |Market|Product|Contract|Buy|Sale|Price|Sett|P/L|M|T|Currency|\n\
                       |Total |       |        |   |    |     |    |   | | |        |\n\
                       ----\n";
        let rows = convert(content);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_undecodable_contract_leaves_month_year_empty() {
        let content = "Account No: 1\n----\nGathered Open Positions\n\
                       |Market|Product|Contract|Buy|Sale|Price|Sett|P/L|M|T|Currency|\n\
                       |SHFE  |Copper |CU18    |1  |    |100  |101 |0  | | |CNY     |\n\
                       |Total |       |        |1  |    |     |    |0  | | |        |\n\
                       ----\n";
        let rows = convert(content);
        assert_eq!(rows[1][6], "CU18");
        assert_eq!(rows[1][7], "");
        assert_eq!(rows[1][8], "");
    }

    #[test]
    fn test_short_row_fails_fast() {
        let content = "Account No: 1\n----\nGathered Open Positions\n\
                       |Market|Product|Contract|\n\
                       |SHFE  |Copper |1225    |\n\
                       |Total |       |        |\n\
                       ----\n";
        let bill = parse_bill_header(content).unwrap();
        let result = map_positions(&bill, content, &ConvertConfig::default());
        assert!(matches!(result, Err(BillError::ColumnCount { .. })));
    }

    #[test]
    fn test_unknown_statement_date_leaves_dates_empty() {
        let content = "Account No: 1\n----\nGathered Open Positions\n\
                       |Market|Product|Contract|Buy|Sale|Price|Sett|P/L|M|T|Currency|\n\
                       |SHFE  |Copper |1225    |1  |    |100  |101 |0  | | |CNY     |\n\
                       |Total |       |        |1  |    |     |    |0  | | |        |\n\
                       ----\n";
        let rows = convert(content);
        assert_eq!(rows[1][1], "");
        assert_eq!(rows[1][21], "");
    }
}
