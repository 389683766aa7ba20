//! Integration tests for the batch conversion driver.
//!
//! Exercises the complete pipeline over temporary source folders holding
//! realistic statement fixtures.

pub mod basic_processing;

/// A complete, well-formed statement for one account
pub fn sample_statement(account_no: &str) -> String {
    format!(
        "\
                              Futures Trading Statement

Account No：{account_no}      Bill Date：2018-12-13
Statement Date：2018-12-01 to 2018-12-12
---------------------------------------------------------------------------

Financial Situation
|Item                |Ccy |              Amount|
|Balance b/f         |CNY |          100,000.00|
|Deposit/Withdrawal  |CNY |            1,234.50|
|Commissions         |CNY |               25.00|
|Unrealized          |CNY |           -1,500.00|
|Equity              |CNY |           99,709.50|
---------------------------------------------------------------------------

Gathered Open Positions
|Market|Product |Contract|Buy|Sale|Price |SettPrice|P/L    |Margin|Type|Currency|
|SHFE  |Copper  |1225    |2  |    |48,500|48,650   |300.00 |x     |s   |CNY     |
|DCE   |Soybean |0519    |   |1   |3,450 |3,400    |-50.00 |y     |s   |CNY     |
|Total |        |        |3  |1   |      |         |250.00 |z     |z   |        |
---------------------------------------------------------------------------

Trade Confirmation
|Date      |Market|Product|Contract|O/C |Offset|B/S |Qty|Price |Amount|Fee  |Currency|
|2018-12-12|SHFE  |Copper |1225    |Open|x     |Buy |2  |48,500|97,000|10.00|CNY     |
|2018-12-12|DCE   |Soybean|0519    |Open|y     |Sale|1  |3,450 |3,450 |5.00 |CNY     |
|Total     |      |       |        |    |      |    |3  |      |      |15.00|        |
---------------------------------------------------------------------------
"
    )
}

/// A statement whose header block cannot be parsed
pub fn malformed_statement() -> String {
    "Account No 10012345\n----\n".to_string()
}
