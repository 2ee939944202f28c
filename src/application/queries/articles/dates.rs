use crate::application::error::{ApplicationError, ApplicationResult};
use chrono::{DateTime, Days, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns an inclusive `[from, to]` pair of calendar dates into a half-open
/// timestamp range `[from 00:00, to+1 00:00)` in UTC. Blank values are ignored.
pub fn parse_date_range(
    from: Option<&str>,
    to: Option<&str>,
) -> ApplicationResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let from = parse_date(from, "created_from")?;
    let to = parse_date(to, "created_to")?;

    if let (Some(start), Some(end)) = (from, to) {
        if start > end {
            return Err(ApplicationError::validation(
                "created_from must not be after created_to",
            ));
        }
    }

    let start = from.and_then(|date| date.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc());
    let end = match to {
        Some(date) => Some(
            date.checked_add_days(Days::new(1))
                .and_then(|next| next.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .ok_or_else(|| ApplicationError::validation("created_to is out of range"))?,
        ),
        None => None,
    };

    Ok((start, end))
}

fn parse_date(value: Option<&str>, field: &str) -> ApplicationResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ApplicationError::validation(format!("{field} must be YYYY-MM-DD"))),
        None => Ok(None),
    }
}
