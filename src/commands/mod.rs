//! CLI subcommands

pub mod list;
pub mod show;

use crate::content::Timestamp;
use crate::helpers::format_date;

/// Format an optional publication date for terminal output
fn display_date(date: Option<&Timestamp>, format: &str) -> String {
    date.map(|ts| format_date(ts.instant(), format))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        let ts = Timestamp::parse("2021-03-25T19:25:28+0000").unwrap();
        assert_eq!(display_date(Some(&ts), "DD MMM YYYY (100%)"), "25 Mar 2021 (100%)");
        assert_eq!(display_date(None, "DD MMM YYYY"), "-");
    }
}
