pub mod alert;
pub mod analysis;
pub mod portfolio;
pub mod preferences;
pub mod stock;
pub mod watchlist;
