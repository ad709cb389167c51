use chrono::NaiveDate;
use chrono::NaiveDateTime;

pub type DateTime = chrono::DateTime<chrono::Utc>;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a front matter `date`, as a date-time first and then as a plain date (midnight UTC).
pub fn parse_published_date<S: AsRef<str>>(d: S) -> Option<DateTime> {
    parse_published_date_str(d.as_ref().trim())
}

fn parse_published_date_str(d: &str) -> Option<DateTime> {
    NaiveDateTime::parse_from_str(d, DATE_TIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(d, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD`, as exposed to templates.
pub fn format_date(d: &DateTime) -> String {
    d.format(DATE_FORMAT).to_string()
}
