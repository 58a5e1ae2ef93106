/// Minutes since midnight for a provider-local wall-clock time.
pub type Minutes = i32;

/// Parses `"HH:MM"` into minutes since midnight.
///
/// Both parts are parsed as plain integers with no range check, so `"25:00"`
/// becomes 1500. Anything that is not two integers separated by `:`, or that
/// overflows [`Minutes`], is `None`.
pub fn parse_time(hhmm: &str) -> Option<Minutes> {
    let (hours, minutes) = hhmm.trim().split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Billed hours between two wall-clock times, rounded up to the next whole hour.
/// Callers clamp the result to the service's included hours.
pub fn hours_between(start: Minutes, end: Minutes) -> i32 {
    (end - start).div_euclid(60) + i32::from((end - start).rem_euclid(60) != 0)
}

pub fn format_minutes(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}
