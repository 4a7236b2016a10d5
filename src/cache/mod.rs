//! Cache module for the advice of the day
//!
//! A small directory-backed key-value store plus the daily cache built on it.
//! The daily cache never surfaces an error: anything unreadable is a miss and
//! failed writes are only logged.

mod daily;
mod store;

pub use daily::{today, DailyCache, ADVICE_KEY, DATE_KEY};
pub use store::KeyValueStore;
