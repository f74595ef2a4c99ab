use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Asia::Kolkata;

use crate::error::{Result, StrengthError};

/// Date format expected by the provider's historical endpoint
pub const PROVIDER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Calendar days covered by every ranking run, independent of the averaging period
pub const TRAILING_WINDOW_DAYS: i64 = 366;

/// Format a date as `dd-mm-yyyy`
pub fn format_provider_date(date: NaiveDate) -> String {
    date.format(PROVIDER_DATE_FORMAT).to_string()
}

/// Parse a `dd-mm-yyyy` date
pub fn parse_provider_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), PROVIDER_DATE_FORMAT).map_err(|e| {
        StrengthError::InvalidInput(format!("date '{}' is not dd-mm-yyyy: {}", date_str, e))
    })
}

/// Today's date on the exchange calendar (India)
pub fn today_exchange() -> NaiveDate {
    Utc::now().with_timezone(&Kolkata).date_naive()
}

/// Inclusive (from, to) pair covering the trailing window that ends on `today`
pub fn trailing_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(TRAILING_WINDOW_DAYS), today)
}

/// Trailing window formatted for the provider
pub fn trailing_window_strings(today: NaiveDate) -> (String, String) {
    let (from, to) = trailing_window(today);
    (format_provider_date(from), format_provider_date(to))
}
