//! Utilities for date handling and formatting.

use chrono::NaiveDate;

/// Current local calendar date. All repository date stamps use this.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Format a date as DD.MM.YYYY for display.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Parse the value of an `<input type="date">` (YYYY-MM-DD).
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(format_date(date), "15.03.2025");
    }

    #[test]
    fn test_parse_input_date() {
        assert_eq!(
            parse_input_date("2025-03-15"),
            NaiveDate::from_ymd_opt(2025, 3, 15)
        );
        assert_eq!(parse_input_date("invalid"), None);
    }
}
