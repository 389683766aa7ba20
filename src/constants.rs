//! Application constants for the statement processor.
//!
//! Section titles, output table schemas, date formats and the fixed
//! literals stamped into the destination tables.

// =============================================================================
// Section Titles
// =============================================================================

/// Title anchoring the account/date header block
pub const HEADER_SECTION_TITLE: &str = "Account No";

/// Title of the balances section
pub const BALANCES_SECTION_TITLE: &str = "Financial Situation";

/// Title of the open positions section
pub const POSITIONS_SECTION_TITLE: &str = "Gathered Open Positions";

/// Title of the trade confirmations section
pub const TRADES_SECTION_TITLE: &str = "Trade Confirmation";

// =============================================================================
// Header Keys
// =============================================================================

pub const KEY_ACCOUNT_NO: &str = "Account No";
pub const KEY_BILL_DATE: &str = "Bill Date";
pub const KEY_STATEMENT_DATE: &str = "Statement Date";

/// Row labels consumed by the balances mapper
pub mod balance_labels {
    pub const DEPOSIT_WITHDRAWAL: &str = "Deposit/Withdrawal";
    pub const COMMISSIONS: &str = "Commissions";
    pub const UNREALIZED: &str = "Unrealized";
    pub const EQUITY: &str = "Equity";
}

// =============================================================================
// Output Schemas
// =============================================================================

/// Destination schema for the balances table
pub const BALANCE_COLUMNS: &[&str] = &[
    "Account",
    "Currency",
    "BalanceBf",
    "Deposit",
    "Withdrawal",
    "OptionPremium",
    "DeliveryProceed",
    "RealisedPL",
    "Commission",
    "Interest",
    "Others",
    "BalanceCf",
    "UnrealisedPL",
    "Equity",
    "NetOptionValue",
    "EligCollateral",
    "as-of-date mm/dd/yyyy",
];

/// Destination schema shared by the positions and trades tables
pub const POSITION_COLUMNS: &[&str] = &[
    "Account",
    "Tradedate",
    "Long",
    "Short",
    "FutOpt",
    "Exchange",
    "Contract",
    "ContractMonth",
    "Contractyear",
    "StrikePrice",
    "Price",
    "SettPrice",
    "Currency",
    "UnrealisedPL",
    "TradeNo",
    "BUY/Sell 1=BUY 0=SELL",
    "SubType P=Put C=Call",
    "Commodity",
    "Commission",
    "Option Delta",
    "Firm/Office",
    "as-of-date (mm/dd/yyyy)",
];

/// Minimum source columns a positions row must carry
pub const POSITION_SOURCE_COLUMNS: usize = 11;

/// Minimum source columns a trades row must carry
pub const TRADE_SOURCE_COLUMNS: usize = 12;

/// Source columns expected of merged positions/trades rows
pub const MERGED_ROW_COLUMNS: usize = 22;

// =============================================================================
// Schema Placeholders and Literals
// =============================================================================

/// BalanceBf placeholder in the balances schema (not numeric)
pub const BALANCE_BROUGHT_FORWARD: &str = "Opening";

/// BalanceCf placeholder in the balances schema (not numeric)
pub const BALANCE_CARRIED_FORWARD: &str = "Closing";

/// RealisedPL placeholder in the balances schema
pub const REALISED_PL_PLACEHOLDER: &str = "Opening - Closing";

/// Futures/options marker stamped into every positions/trades row
pub const FUTURES_MARKER: &str = "F";

/// Buy/sell labels recognized in trade confirmation rows
pub const BUY_LABEL: &str = "Buy";
pub const SALE_LABEL: &str = "Sale";

// =============================================================================
// Defaults
// =============================================================================

/// Default currency stamped into balances rows
pub const DEFAULT_CURRENCY: &str = "CNY";

/// Default branch office identifier for the Firm/Office column
pub const DEFAULT_FIRM_OFFICE: &str = "Shanghai Bunge";

/// Default site tag embedded in output file names
pub const DEFAULT_SITE_TAG: &str = "WANDA";

/// Upper bound applied to the auto-detected worker count
pub const MAX_DEFAULT_WORKERS: usize = 8;

// =============================================================================
// File and Date Formats
// =============================================================================

/// Extension of statement input files
pub const STATEMENT_EXTENSION: &str = "txt";

/// ISO date format used in statement headers and trade rows
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// US date format used for as-of-date columns
pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Date stamp embedded in output file names
pub const FILE_STAMP_SHORT: &str = "%Y%m%d";

/// Date-time stamp embedded in output file names
pub const FILE_STAMP_LONG: &str = "%Y%m%d%H%M%S";

/// Two-digit years at or above this decode to the 1900s, below to the 2000s
pub const CENTURY_PIVOT: u32 = 69;
