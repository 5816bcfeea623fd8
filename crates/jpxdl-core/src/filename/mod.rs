//! Output filename derivation: `{prefix}_{YYYYMMDD}.{ext}`.
//!
//! The prefix comes from config verbatim (checked by config validation); the
//! extension is either fixed or chosen from the source URL.

mod component;
mod extension;

pub use component::is_safe_filename_component;
pub use extension::ExtensionRule;

use chrono::NaiveDate;

/// Builds the dated filename for a download made on `today`.
///
/// # Examples
///
/// - prefix `jpx_settlement_prices`, 2024-03-05, ext `csv` → `"jpx_settlement_prices_20240305.csv"`
pub fn dated_filename(prefix: &str, today: NaiveDate, ext: &str) -> String {
    let ext = ext.trim_start_matches('.');
    format!("{}_{}.{}", prefix, today.format("%Y%m%d"), ext)
}
