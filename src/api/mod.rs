pub mod ipo;
pub mod utils;
pub mod yahoo;
pub mod yahoo_dto;

pub use ipo::upcoming_ipos;
pub use yahoo::HistoryPeriod;
