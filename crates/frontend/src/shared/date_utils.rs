use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an upload timestamp for the file selector.
/// Example: "2024-03-15T14:02:26.123Z" -> "2024-03-15 14:02"
///
/// Unparseable input is returned unchanged; a missing value is an empty string.
pub fn format_upload_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Option label: "sales.csv (2024-03-15 14:02)" or just the filename.
pub fn file_option_label(filename: &str, uploaded: Option<&str>) -> String {
    let when = format_upload_timestamp(uploaded);
    if when.is_empty() {
        filename.to_string()
    } else {
        format!("{} ({})", filename, when)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_upload_timestamp() {
        assert_eq!(
            format_upload_timestamp(Some("2024-03-15T14:02:26.123Z")),
            "2024-03-15 14:02"
        );
        assert_eq!(
            format_upload_timestamp(Some("2024-12-31T23:59:59")),
            "2024-12-31 23:59"
        );
        assert_eq!(
            format_upload_timestamp(Some("2024-12-31 08:05:00.5")),
            "2024-12-31 08:05"
        );
        assert_eq!(format_upload_timestamp(Some("2024-03-15")), "2024-03-15");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_upload_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_upload_timestamp(None), "");
        assert_eq!(format_upload_timestamp(Some("  ")), "");
    }

    #[test]
    fn test_file_option_label() {
        assert_eq!(file_option_label("a.csv", None), "a.csv");
        assert_eq!(
            file_option_label("a.csv", Some("2024-03-15T14:02:26Z")),
            "a.csv (2024-03-15 14:02)"
        );
    }
}
