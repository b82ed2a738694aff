//! Date helper functions

use chrono::NaiveDate;

use crate::content::{ContentError, DATE_FORMAT};

/// Format an ISO date (`YYYY-MM-DD`) in long form
///
/// # Examples
/// ```ignore
/// format_display_date("2024-01-05") // -> Ok("January 5, 2024")
/// ```
pub fn format_display_date(iso_date: &str) -> Result<String, ContentError> {
    let date = NaiveDate::parse_from_str(iso_date.trim(), DATE_FORMAT)
        .map_err(|_| ContentError::InvalidDate(iso_date.to_string()))?;
    Ok(display_date(&date))
}

/// Format a date in long form (like "January 5, 2024")
pub fn display_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-01-05").unwrap(), "January 5, 2024");
        assert_eq!(format_display_date("2023-12-31").unwrap(), "December 31, 2023");
    }

    #[test]
    fn test_format_display_date_rejects_garbage() {
        for input in ["", "yesterday", "2024-13-01", "2024-02-30", "05/01/2024"] {
            assert!(
                matches!(format_display_date(input), Err(ContentError::InvalidDate(_))),
                "accepted {:?}",
                input
            );
        }
    }
}
