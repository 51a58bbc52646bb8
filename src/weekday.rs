use chrono::{DateTime, Datelike, Local, Utc, Weekday};
use chrono_tz::Tz;

/// Maps a day-of-week index (0 = Sunday through 6 = Saturday) to its English name.
///
/// # Panics
///
/// Callers must only pass 0 through 6. Any other index is a logic error and panics;
/// no fallback name is substituted.
pub fn day_name_from_index(idx: u32) -> &'static str {
    match idx {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => panic!("day index must be in 0..=6, got {idx}"),
    }
}

pub fn day_name(weekday: Weekday) -> &'static str {
    day_name_from_index(weekday.num_days_from_sunday())
}

/// Inner HTML for the `current-day-label` element.
pub fn greeting_html(weekday: Weekday) -> String {
    format!("Today is <span>{}!</span>", day_name(weekday))
}

/// The current weekday in `zone`, or in the server's local time when no zone is known.
pub fn today_in(zone: Option<Tz>) -> Weekday {
    match zone {
        Some(tz) => weekday_at(Utc::now(), tz),
        None => Local::now().weekday(),
    }
}

pub fn weekday_at(now: DateTime<Utc>, zone: Tz) -> Weekday {
    now.with_timezone(&zone).weekday()
}
