// Display helpers - human-readable install counts, ages and star ratings

use chrono::{DateTime, Datelike, Utc, Weekday};

/// Install count bucket text, e.g. "5+ million"
pub fn install_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{}+ million", count / 1_000_000)
    } else if count >= 1_000 {
        format!("{}+ thousand", count / 1_000)
    } else if count > 0 {
        format!("{}+", count)
    } else {
        "Less than 10".to_string()
    }
}

/// How long ago `then` was, relative to `now`
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - then).abs();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    match days {
        _ if hours < 1 => "Just now".to_string(),
        _ if hours == 1 => "1 hour ago".to_string(),
        _ if hours < 24 => format!("{} hours ago", hours),
        1 => "Yesterday".to_string(),
        2..=6 => format!("Last {}", weekday_name(then.weekday())),
        7..=13 => "Last week".to_string(),
        14..=30 => format!("{} weeks ago", days / 7),
        31..=365 => match days / 30 {
            1 => "Last month".to_string(),
            months => format!("{} months ago", months),
        },
        _ => match days / 365 {
            1 => "Last year".to_string(),
            years => format!("{} years ago", years),
        },
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Five star glyphs for a 0-5 rating in half-star steps
pub fn stars(rating: f64) -> String {
    (1..=5)
        .map(|i| {
            let i = f64::from(i);
            if rating >= i {
                '★'
            } else if rating >= i - 0.5 {
                '⯪'
            } else {
                '☆'
            }
        })
        .collect()
}
