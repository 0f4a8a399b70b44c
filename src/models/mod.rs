pub mod alert;
pub mod fund;
pub mod ipo;
pub mod position;
pub mod quote;
pub mod sold_lot;
pub mod transaction;

pub use alert::{Alert, AlertDirection};
pub use fund::{FundCategory, FundQuote, RiskLevel};
pub use ipo::{IpoListing, IpoStatus};
pub use position::Position;
pub use quote::{BatchQuote, DividendRow, HistoryRow, Quote};
pub use sold_lot::{SoldLot, TaxCategory};
pub use transaction::{Transaction, TransactionType};
