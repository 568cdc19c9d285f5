//! Presentational models: pure functions from fetched data to display
//! strings and colour tones. Nothing here touches the network.

pub mod cards;
pub mod format;
pub mod tables;
pub mod tone;

pub use format::{
    format_currency, format_market_cap, format_number, format_percent, format_signed_percent,
    NOT_AVAILABLE,
};
pub use tone::Tone;
