use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_HOUR: u32 = 60;
pub const HOURS_PER_DAY: u32 = 24;

/// Minute-of-day for a 12-hour label such as `"2:30 PM"`. Labels whose clock
/// part does not parse, or lands outside a single day, yield `None`.
pub fn minute_of_day(label: &str) -> Option<u32> {
    let mut parts = label.split_whitespace();
    let clock = parts.next()?;
    let period = parts.next();

    let (hour, minute) = clock.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour >= HOURS_PER_DAY || minute >= MINUTES_PER_HOUR {
        return None;
    }

    let hour24 = match period {
        Some("PM") if hour != 12 => hour + 12,
        Some("AM") if hour == 12 => 0,
        _ => hour,
    };
    if hour24 >= HOURS_PER_DAY {
        return None;
    }

    Some(hour24 * MINUTES_PER_HOUR + minute)
}

pub fn time_minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * MINUTES_PER_HOUR + time.minute()
}

pub fn filter_slots_after(slots: Vec<String>, now: NaiveTime) -> Vec<String> {
    let cutoff = time_minute_of_day(now);
    slots
        .into_iter()
        .filter(|label| minute_of_day(label).is_some_and(|minutes| minutes > cutoff))
        .collect()
}

pub fn format_min_time(now: NaiveTime) -> String {
    now.format("%H:%M").to_string()
}

#[cfg(test)]
#[path = "tests/slots_tests.rs"]
mod tests;
