//! Conversion of located segments into fixed-schema output tables.
//!
//! One mapper per output table. Each mapper takes the parsed header
//! information plus the raw statement content, locates its own segment,
//! and produces an ordered table with the destination header first. An
//! absent segment degrades to a header-only table.

pub mod balances;
pub mod contract;
pub mod positions;
pub mod trades;

pub use balances::map_balances;
pub use contract::decode_month_year;
pub use positions::map_positions;
pub use trades::map_trades;
